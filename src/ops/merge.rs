use tracing::{debug, warn};

use super::selection::{Selection, SelectionDelta};
use crate::model::{Grid, GridError, RegionId};

/// Error type for merge operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("nothing selected to merge")]
    EmptySelection,
    #[error("heterogeneous selection: regions span columns {columns:?}")]
    HeterogeneousSelection { columns: Vec<usize> },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Column-order first region, now holding the joined text
    pub survivor: RegionId,
    /// Regions taken out of the column
    pub removed: Vec<RegionId>,
    pub column: usize,
    /// Offensive regions that lost targets to the merge
    pub retargeted: Vec<RegionId>,
    pub selection: SelectionDelta,
}

/// The single column holding every region in `ids`, or `None` if they span
/// several columns, any is missing from the grid, or `ids` is empty.
pub fn common_column(grid: &Grid, ids: &[RegionId]) -> Option<usize> {
    let mut column = None;
    for id in ids {
        let c = grid.column_of(*id)?;
        match column {
            None => column = Some(c),
            Some(existing) if existing != c => return None,
            Some(_) => {}
        }
    }
    column
}

/// Collapse the selected regions of one column into the first of them.
///
/// Texts are joined in column order with `separator`. The survivor keeps its
/// role; cards of the other regions are appended to its own. On failure the
/// grid and selection are untouched.
pub fn merge(grid: &mut Grid, selection: &mut Selection, separator: &str) -> Result<MergeOutcome, MergeError> {
    let ordered = selection.in_grid_order(grid);
    if ordered.is_empty() {
        return Err(MergeError::EmptySelection);
    }
    let Some(column) = common_column(grid, &ordered) else {
        let mut columns: Vec<usize> = ordered.iter().filter_map(|id| grid.column_of(*id)).collect();
        columns.dedup();
        warn!(?columns, "cannot merge a selection spanning several columns");
        return Err(MergeError::HeterogeneousSelection { columns });
    };

    let survivor = ordered[0];
    let rest = &ordered[1..];
    let removed_regions = grid.remove_regions(column, rest)?;

    let region = grid
        .region_mut(survivor)
        .ok_or(GridError::RegionNotFound(survivor))?;
    let mut text = std::mem::take(&mut region.text);
    for other in &removed_regions {
        text.push_str(separator);
        text.push_str(&other.text);
        region.cards.extend(other.cards.iter().cloned());
    }
    region.text = text;

    let removed: Vec<RegionId> = removed_regions.iter().map(|r| r.id).collect();
    let retargeted = grid.forget_targets(&removed);

    let mut delta = selection.purge(&removed);
    let reselect = selection.select_only(survivor);
    delta.added.extend(reselect.added);
    delta.removed.extend(reselect.removed);

    debug!(survivor = %survivor, column, merged = removed.len() + 1, "merged regions");
    Ok(MergeOutcome {
        survivor,
        removed,
        column,
        retargeted,
        selection: delta,
    })
}
