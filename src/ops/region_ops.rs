use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{Grid, GridError, OffensiveKind, Region, RegionId, RegionRole};

/// Regions taken out of the grid by [`delete_regions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    /// Removed regions in column order
    pub removed: Vec<Region>,
    /// Offensive regions that lost targets
    pub retargeted: Vec<RegionId>,
}

impl Deletion {
    pub fn removed_ids(&self) -> Vec<RegionId> {
        self.removed.iter().map(|r| r.id).collect()
    }
}

/// Append a plain region with `text` at the bottom of `column`.
pub fn add_region(grid: &mut Grid, column: usize, text: impl Into<String>) -> Result<RegionId, GridError> {
    let id = grid.append_region(column, text)?;
    debug!(region = %id, column, "added region");
    Ok(id)
}

/// Append an offensive region aimed at `targets`.
///
/// Targets are kept in the order given; missing ones are rejected.
pub fn add_offensive(
    grid: &mut Grid,
    column: usize,
    kind: OffensiveKind,
    text: impl Into<String>,
    targets: Vec<RegionId>,
) -> Result<RegionId, GridError> {
    if column >= grid.speeches().len() {
        return Err(GridError::ColumnOutOfRange(column));
    }
    if let Some(missing) = targets.iter().find(|t| !grid.contains(**t)) {
        return Err(GridError::RegionNotFound(*missing));
    }
    let id = grid.allocate_id()?;
    grid.push_region(column, Region::offensive(id, text, kind, targets))?;
    debug!(region = %id, column, %kind, "added offensive region");
    Ok(id)
}

/// Replace a region's text, returning the previous text.
pub fn edit_text(grid: &mut Grid, id: RegionId, text: impl Into<String>) -> Result<String, GridError> {
    let region = grid.region_mut(id).ok_or(GridError::RegionNotFound(id))?;
    Ok(std::mem::replace(&mut region.text, text.into()))
}

/// Attach an external reference (evidence card) to a region.
pub fn attach_card(grid: &mut Grid, id: RegionId, card: impl Into<String>) -> Result<(), GridError> {
    let region = grid.region_mut(id).ok_or(GridError::RegionNotFound(id))?;
    region.cards.push(card.into());
    Ok(())
}

/// Set or clear the cross-examination question of a region.
pub fn set_question(grid: &mut Grid, id: RegionId, question: Option<String>) -> Result<(), GridError> {
    let region = grid.region_mut(id).ok_or(GridError::RegionNotFound(id))?;
    region.question = question.filter(|q| !q.trim().is_empty());
    Ok(())
}

/// Turn an offensive region back into a plain one.
/// Returns the kind it had, or `None` if it was already plain.
pub fn demote(grid: &mut Grid, id: RegionId) -> Result<Option<OffensiveKind>, GridError> {
    let region = grid.region_mut(id).ok_or(GridError::RegionNotFound(id))?;
    let kind = region.offensive_kind();
    region.role = RegionRole::Plain;
    Ok(kind)
}

/// Remove `ids` from whichever columns hold them and drop them from every
/// offensive region's targets.
///
/// Fails without modifying anything if any id is not in the grid.
pub fn delete_regions(grid: &mut Grid, ids: &[RegionId]) -> Result<Deletion, GridError> {
    let mut by_column: BTreeMap<usize, Vec<RegionId>> = BTreeMap::new();
    for id in ids {
        let column = grid.column_of(*id).ok_or(GridError::RegionNotFound(*id))?;
        let entry = by_column.entry(column).or_default();
        if !entry.contains(id) {
            entry.push(*id);
        }
    }

    let mut removed = Vec::new();
    for (column, ids) in by_column {
        removed.extend(grid.remove_regions(column, &ids)?);
    }
    let removed_ids: Vec<RegionId> = removed.iter().map(|r| r.id).collect();
    let retargeted = grid.forget_targets(&removed_ids);
    debug!(count = removed.len(), "deleted regions");
    Ok(Deletion { removed, retargeted })
}
