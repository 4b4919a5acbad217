use super::region::{Region, RegionId};
use super::speech::{Side, Speech, SpeechRole};

/// Number of speeches (columns) in a grid
pub const SPEECH_COUNT: usize = 8;
/// Exchanges per round: constructive, rebuttal, summary, final focus
pub const SUBROUND_COUNT: usize = 4;

/// Prefix of refutation speech labels ("AT" = answers to)
pub const REFUTATION_PREFIX: &str = "AT";

/// Error type for grid lookups and structural edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("column out of range: {0}")]
    ColumnOutOfRange(usize),
    #[error("region not found: {0}")]
    RegionNotFound(RegionId),
    #[error("region {region} is not in column {column}")]
    NotInColumn { region: RegionId, column: usize },
    #[error("region id already in grid: {0}")]
    DuplicateRegion(RegionId),
    #[error("no region ids left after {0}")]
    IdOverflow(RegionId),
}

/// Location of a region: column index and row within the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

/// The fixed sequence of eight speeches flowed for one side of a round.
///
/// Column order never changes; only region membership within columns does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: Side,
    speeches: Vec<Speech>,
    next_id: u64,
}

impl Grid {
    /// Build an empty grid for `side`.
    ///
    /// Even columns are the side's own speeches; each is followed by the
    /// opposing side's answer to it within the same sub-round.
    pub fn new(side: Side) -> Self {
        let mut speeches = Vec::with_capacity(SPEECH_COUNT);
        for subround in 0..SUBROUND_COUNT {
            let number = subround + 1;
            let header = side.header();
            speeches.push(Speech::new(
                subround * 2,
                side,
                SpeechRole::Defensive,
                format!("{} {}", header, number),
            ));
            speeches.push(Speech::new(
                subround * 2 + 1,
                side.opposite(),
                SpeechRole::Refutation,
                format!("{}-{} {}", REFUTATION_PREFIX, header, number),
            ));
        }
        Grid {
            side,
            speeches,
            next_id: 1,
        }
    }

    /// Assemble a grid from already-built speeches. The caller guarantees
    /// eight speeches in column order and unique region ids.
    ///
    /// Fails if the largest id leaves no room for new ones.
    pub(crate) fn from_parts(side: Side, speeches: Vec<Speech>) -> Result<Self, GridError> {
        let max = speeches
            .iter()
            .flat_map(|s| s.regions().iter().map(|r| r.id))
            .max();
        let next_id = match max {
            Some(id) => id.0.checked_add(1).ok_or(GridError::IdOverflow(id))?,
            None => 1,
        };
        Ok(Grid {
            side,
            speeches,
            next_id,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn speeches(&self) -> &[Speech] {
        &self.speeches
    }

    pub fn speech(&self, column: usize) -> Option<&Speech> {
        self.speeches.get(column)
    }

    pub fn speech_mut(&mut self, column: usize) -> Option<&mut Speech> {
        self.speeches.get_mut(column)
    }

    /// Number of regions in `column`
    pub fn column_len(&self, column: usize) -> Option<usize> {
        self.speech(column).map(Speech::len)
    }

    pub fn region_at(&self, column: usize, row: usize) -> Option<&Region> {
        self.speech(column)?.get(row)
    }

    /// Column and row of the region with this id
    pub fn locate(&self, id: RegionId) -> Option<Position> {
        self.speeches.iter().find_map(|speech| {
            speech.position(id).map(|row| Position {
                column: speech.index(),
                row,
            })
        })
    }

    /// Column containing the region with this id
    pub fn column_of(&self, id: RegionId) -> Option<usize> {
        self.locate(id).map(|p| p.column)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.locate(id).is_some()
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.speeches.iter().find_map(|s| s.region(id))
    }

    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.speeches.iter_mut().find_map(|s| s.region_mut(id))
    }

    /// Iterate every region in column order, then row order
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.speeches.iter().flat_map(|s| s.regions().iter())
    }

    /// Total number of regions across all columns
    pub fn region_count(&self) -> usize {
        self.speeches.iter().map(Speech::len).sum()
    }

    /// Reserve a fresh region id
    pub fn allocate_id(&mut self) -> Result<RegionId, GridError> {
        let id = RegionId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(GridError::IdOverflow(id))?;
        Ok(id)
    }

    /// Append a plain region with `text` at the bottom of `column`
    pub fn append_region(&mut self, column: usize, text: impl Into<String>) -> Result<RegionId, GridError> {
        if column >= self.speeches.len() {
            return Err(GridError::ColumnOutOfRange(column));
        }
        let id = self.allocate_id()?;
        self.speeches[column].push(Region::new(id, text));
        Ok(id)
    }

    /// Append an already-built region at the bottom of `column`.
    ///
    /// The id should come from [`Grid::allocate_id`]; an id already in the
    /// grid is rejected.
    pub fn push_region(&mut self, column: usize, region: Region) -> Result<RegionId, GridError> {
        if column >= self.speeches.len() {
            return Err(GridError::ColumnOutOfRange(column));
        }
        let id = region.id;
        if self.contains(id) {
            return Err(GridError::DuplicateRegion(id));
        }
        let after = id.0.checked_add(1).ok_or(GridError::IdOverflow(id))?;
        self.speeches[column].push(region);
        self.next_id = self.next_id.max(after);
        Ok(id)
    }

    /// Remove `ids` from `column`, preserving the order of what remains.
    ///
    /// Fails without modifying anything if any id is not in the column.
    pub fn remove_regions(&mut self, column: usize, ids: &[RegionId]) -> Result<Vec<Region>, GridError> {
        let speech = self
            .speeches
            .get_mut(column)
            .ok_or(GridError::ColumnOutOfRange(column))?;
        if let Some(missing) = ids.iter().find(|id| !speech.contains(**id)) {
            return Err(GridError::NotInColumn {
                region: *missing,
                column,
            });
        }
        Ok(speech.remove_ids(ids))
    }

    /// Drop `ids` from the targets of every offensive region.
    /// Returns the offensive regions whose targets changed.
    pub fn forget_targets(&mut self, ids: &[RegionId]) -> Vec<RegionId> {
        let mut changed = Vec::new();
        for speech in &mut self.speeches {
            for region in speech.regions_mut() {
                if region.forget_targets(ids) {
                    changed.push(region.id);
                }
            }
        }
        changed
    }

    /// The refutation column answering the defensive `column` in the same sub-round
    pub fn rebuttal_of(&self, column: usize) -> Option<usize> {
        match self.speech(column)?.role() {
            SpeechRole::Defensive => Some(column + 1),
            SpeechRole::Refutation => None,
        }
    }

    /// The defensive column that the refutation `column` answers
    pub fn defended_by(&self, column: usize) -> Option<usize> {
        match self.speech(column)?.role() {
            SpeechRole::Refutation => Some(column - 1),
            SpeechRole::Defensive => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_layout() {
        let grid = Grid::new(Side::Affirmative);
        assert_eq!(grid.speeches().len(), SPEECH_COUNT);

        let labels: Vec<&str> = grid.speeches().iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Aff 1", "AT-Aff 1", "Aff 2", "AT-Aff 2", "Aff 3", "AT-Aff 3", "Aff 4", "AT-Aff 4"]
        );
        for (i, speech) in grid.speeches().iter().enumerate() {
            assert_eq!(speech.index(), i);
            if i % 2 == 0 {
                assert_eq!(speech.side(), Side::Affirmative);
                assert_eq!(speech.role(), SpeechRole::Defensive);
            } else {
                assert_eq!(speech.side(), Side::Negation);
                assert_eq!(speech.role(), SpeechRole::Refutation);
            }
        }
    }

    #[test]
    fn test_negation_labels() {
        let grid = Grid::new(Side::Negation);
        assert_eq!(grid.speech(0).unwrap().label(), "Neg 1");
        assert_eq!(grid.speech(7).unwrap().label(), "AT-Neg 4");
        assert_eq!(grid.speech(7).unwrap().side(), Side::Affirmative);
    }

    #[test]
    fn test_append_and_lookup() {
        let mut grid = Grid::new(Side::Affirmative);
        let a = grid.append_region(2, "a").unwrap();
        let b = grid.append_region(2, "b").unwrap();
        assert_ne!(a, b);
        assert_eq!(grid.column_len(2), Some(2));
        assert_eq!(grid.column_len(3), Some(0));
        assert_eq!(grid.column_len(8), None);
        assert_eq!(grid.region_at(2, 1).map(|r| r.id), Some(b));
        assert_eq!(grid.locate(a), Some(Position { column: 2, row: 0 }));
        assert_eq!(grid.column_of(b), Some(2));
        assert_eq!(grid.region_count(), 2);
    }

    #[test]
    fn test_append_out_of_range() {
        let mut grid = Grid::new(Side::Affirmative);
        assert_eq!(grid.append_region(8, "x"), Err(GridError::ColumnOutOfRange(8)));
    }

    #[test]
    fn test_remove_regions_checks_membership() {
        let mut grid = Grid::new(Side::Affirmative);
        let a = grid.append_region(0, "a").unwrap();
        let b = grid.append_region(1, "b").unwrap();
        assert_eq!(
            grid.remove_regions(0, &[a, b]),
            Err(GridError::NotInColumn { region: b, column: 0 })
        );
        assert_eq!(grid.column_len(0), Some(1));

        let removed = grid.remove_regions(0, &[a]).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(grid.column_len(0), Some(0));
        assert!(!grid.contains(a));
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut grid = Grid::new(Side::Affirmative);
        let a = grid.append_region(0, "a").unwrap();
        grid.remove_regions(0, &[a]).unwrap();
        let b = grid.append_region(0, "b").unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_pairing() {
        let grid = Grid::new(Side::Affirmative);
        assert_eq!(grid.rebuttal_of(0), Some(1));
        assert_eq!(grid.rebuttal_of(6), Some(7));
        assert_eq!(grid.rebuttal_of(1), None);
        assert_eq!(grid.defended_by(5), Some(4));
        assert_eq!(grid.defended_by(4), None);
        assert_eq!(grid.defended_by(9), None);
    }

    #[test]
    fn test_forget_targets() {
        use crate::model::OffensiveKind;

        let mut grid = Grid::new(Side::Affirmative);
        let a = grid.append_region(0, "a").unwrap();
        let id = grid.allocate_id().unwrap();
        grid.push_region(1, Region::offensive(id, "turn", OffensiveKind::Card, vec![a]))
            .unwrap();
        assert_eq!(grid.forget_targets(&[a]), vec![id]);
        assert!(grid.region(id).unwrap().targets().is_empty());
    }

    #[test]
    fn test_push_region_rejects_duplicate_id() {
        let mut grid = Grid::new(Side::Affirmative);
        let a = grid.append_region(0, "a").unwrap();
        assert_eq!(
            grid.push_region(3, Region::new(a, "copy")),
            Err(GridError::DuplicateRegion(a))
        );
        assert_eq!(grid.column_len(3), Some(0));
        assert_eq!(grid.locate(a), Some(Position { column: 0, row: 0 }));
    }

    #[test]
    fn test_push_region_at_id_limit() {
        let mut grid = Grid::new(Side::Affirmative);
        let last = RegionId(u64::MAX);
        assert_eq!(
            grid.push_region(0, Region::new(last, "edge")),
            Err(GridError::IdOverflow(last))
        );
        assert!(!grid.contains(last));

        grid.push_region(0, Region::new(RegionId(u64::MAX - 1), "near edge"))
            .unwrap();
        assert_eq!(grid.append_region(0, "next"), Err(GridError::IdOverflow(RegionId(u64::MAX))));
        assert_eq!(grid.column_len(0), Some(1));
    }

    #[test]
    fn test_from_parts_at_id_limit() {
        let mut speeches = Grid::new(Side::Affirmative).speeches().to_vec();
        speeches[2].push(Region::new(RegionId(u64::MAX), "edge"));
        assert_eq!(
            Grid::from_parts(Side::Affirmative, speeches),
            Err(GridError::IdOverflow(RegionId(u64::MAX)))
        );
    }
}
