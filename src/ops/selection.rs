//! Multi-region selection with click-to-toggle semantics.
//!
//! Every mutation returns a [`SelectionDelta`] listing the regions that entered
//! and left the selected set, so the presentation layer can restyle exactly
//! those regions.

use indexmap::IndexSet;
use tracing::debug;

use super::navigate::{Direction, NavigationError, neighbor};
use crate::model::{Grid, RegionId};

/// Regions that entered and left the selection in one mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub added: Vec<RegionId>,
    pub removed: Vec<RegionId>,
}

impl SelectionDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Current selection state of a grid.
///
/// `last_selected`, when set, is always a member of the selected set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: IndexSet<RegionId>,
    last_selected: Option<RegionId>,
    selected_column: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Selected regions, in the order they were added
    pub fn selected(&self) -> &IndexSet<RegionId> {
        &self.selected
    }

    pub fn is_selected(&self, id: RegionId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Anchor for directional moves
    pub fn last_selected(&self) -> Option<RegionId> {
        self.last_selected
    }

    /// Active column that authoring actions target
    pub fn selected_column(&self) -> Option<usize> {
        self.selected_column
    }

    /// Set the active column, returning the previous one
    pub fn set_selected_column(&mut self, column: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.selected_column, column)
    }

    /// Selected regions sorted by their position in the grid (column, then row).
    /// Regions no longer in the grid are skipped.
    pub fn in_grid_order(&self, grid: &Grid) -> Vec<RegionId> {
        let mut positioned: Vec<_> = self
            .selected
            .iter()
            .filter_map(|id| grid.locate(*id).map(|pos| (pos, *id)))
            .collect();
        positioned.sort();
        positioned.into_iter().map(|(_, id)| id).collect()
    }

    /// Select `region`. Without `extend` the previous selection is dropped first.
    pub fn primary_select(&mut self, region: RegionId, extend: bool) -> SelectionDelta {
        let before = self.selected.clone();
        if !extend {
            self.selected.clear();
        }
        self.selected.insert(region);
        self.last_selected = Some(region);
        debug!(region = %region, extend, "selected region");
        diff(&before, &self.selected)
    }

    /// Unselect if `region` is already selected, otherwise select it.
    pub fn toggle_select(&mut self, region: RegionId, extend: bool) -> SelectionDelta {
        if self.selected.contains(&region) {
            self.unselect(region, extend)
        } else {
            self.primary_select(region, extend)
        }
    }

    /// Remove `region` from the selection.
    ///
    /// This clears the entire selection, not only `region`, regardless of
    /// `extend`; the anchor is dropped with it.
    pub fn unselect(&mut self, region: RegionId, extend: bool) -> SelectionDelta {
        let before = self.selected.clone();
        self.selected.clear();
        self.last_selected = None;
        debug!(region = %region, extend, "unselected region");
        diff(&before, &self.selected)
    }

    /// Toggle the neighbor of the anchor in `direction`.
    ///
    /// Without an anchor, or at a grid boundary, nothing changes.
    pub fn directional_extend(
        &mut self,
        grid: &Grid,
        direction: Direction,
        extend: bool,
    ) -> Result<SelectionDelta, NavigationError> {
        let Some(anchor) = self.last_selected else {
            debug!(%direction, "no anchor for directional selection");
            return Ok(SelectionDelta::default());
        };
        match neighbor(grid, anchor, direction)? {
            Some(target) => Ok(self.toggle_select(target, extend)),
            None => {
                debug!(from = %anchor, %direction, "no region in direction");
                Ok(SelectionDelta::default())
            }
        }
    }

    /// Make `region` the only selected region and the anchor
    pub fn select_only(&mut self, region: RegionId) -> SelectionDelta {
        self.primary_select(region, false)
    }

    pub fn clear(&mut self) -> SelectionDelta {
        let before = self.selected.clone();
        self.selected.clear();
        self.last_selected = None;
        diff(&before, &self.selected)
    }

    /// Forget regions that were removed from the grid
    pub fn purge(&mut self, removed: &[RegionId]) -> SelectionDelta {
        let before = self.selected.clone();
        self.selected.retain(|id| !removed.contains(id));
        if self.last_selected.is_some_and(|id| removed.contains(&id)) {
            self.last_selected = self.selected.last().copied();
        }
        diff(&before, &self.selected)
    }
}

fn diff(before: &IndexSet<RegionId>, after: &IndexSet<RegionId>) -> SelectionDelta {
    SelectionDelta {
        added: after.difference(before).copied().collect(),
        removed: before.difference(after).copied().collect(),
    }
}
