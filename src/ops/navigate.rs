use crate::model::{Grid, GridError, RegionId};
use crate::util::{RelativeIndexError, relative_index};

/// Error type for navigation queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    RelativeIndex(#[from] RelativeIndexError),
}

/// A spatial move across the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row delta for vertical moves, column delta for horizontal ones
    pub fn offset(self) -> isize {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// The region next to `from` in `direction`, or `None` at a boundary.
///
/// Vertical moves stay in the source column. Horizontal moves go to the
/// adjacent column (wrapping between the last and first speech), keep the row
/// when the destination is long enough and otherwise clamp to its last row.
pub fn neighbor(grid: &Grid, from: RegionId, direction: Direction) -> Result<Option<RegionId>, NavigationError> {
    let position = grid.locate(from).ok_or(GridError::RegionNotFound(from))?;

    if direction.is_vertical() {
        let row = position.row as isize + direction.offset();
        if row < 0 {
            return Ok(None);
        }
        return Ok(grid.region_at(position.column, row as usize).map(|r| r.id));
    }

    let column = relative_index(grid.speeches().len(), position.column, direction.offset())?;
    let len = grid
        .column_len(column)
        .ok_or(GridError::ColumnOutOfRange(column))?;
    if len == 0 {
        return Ok(None);
    }
    let row = position.row.min(len - 1);
    Ok(grid.region_at(column, row).map(|r| r.id))
}

pub fn up(grid: &Grid, from: RegionId) -> Result<Option<RegionId>, NavigationError> {
    neighbor(grid, from, Direction::Up)
}

pub fn down(grid: &Grid, from: RegionId) -> Result<Option<RegionId>, NavigationError> {
    neighbor(grid, from, Direction::Down)
}

pub fn left(grid: &Grid, from: RegionId) -> Result<Option<RegionId>, NavigationError> {
    neighbor(grid, from, Direction::Left)
}

pub fn right(grid: &Grid, from: RegionId) -> Result<Option<RegionId>, NavigationError> {
    neighbor(grid, from, Direction::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Side;

    /// Grid with the given column lengths; returns ids by [column][row].
    fn grid_with_lengths(lengths: [usize; 8]) -> (Grid, Vec<Vec<RegionId>>) {
        let mut grid = Grid::new(Side::Affirmative);
        let mut ids = Vec::new();
        for (column, len) in lengths.iter().enumerate() {
            let mut col = Vec::new();
            for row in 0..*len {
                col.push(grid.append_region(column, format!("{column}:{row}")).unwrap());
            }
            ids.push(col);
        }
        (grid, ids)
    }

    #[test]
    fn test_vertical_within_bounds() {
        let (grid, ids) = grid_with_lengths([3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(down(&grid, ids[0][0]), Ok(Some(ids[0][1])));
        assert_eq!(up(&grid, ids[0][2]), Ok(Some(ids[0][1])));
    }

    #[test]
    fn test_vertical_boundaries() {
        let (grid, ids) = grid_with_lengths([3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(up(&grid, ids[0][0]), Ok(None));
        assert_eq!(down(&grid, ids[0][2]), Ok(None));
    }

    #[test]
    fn test_up_down_are_inverse() {
        let (grid, ids) = grid_with_lengths([4, 2, 5, 1, 0, 3, 0, 2]);
        for column in &ids {
            for id in column {
                if let Some(below) = down(&grid, *id).unwrap() {
                    assert_eq!(up(&grid, below), Ok(Some(*id)));
                }
                if let Some(above) = up(&grid, *id).unwrap() {
                    assert_eq!(down(&grid, above), Ok(Some(*id)));
                }
            }
        }
    }

    #[test]
    fn test_right_preserves_row() {
        let (grid, ids) = grid_with_lengths([3, 3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(right(&grid, ids[0][1]), Ok(Some(ids[1][1])));
        assert_eq!(left(&grid, ids[1][2]), Ok(Some(ids[0][2])));
    }

    #[test]
    fn test_right_clamps_to_shorter_column() {
        let (grid, ids) = grid_with_lengths([5, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(right(&grid, ids[0][4]), Ok(Some(ids[1][1])));
    }

    #[test]
    fn test_right_into_empty_column_is_none() {
        let (grid, ids) = grid_with_lengths([2, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(right(&grid, ids[0][0]), Ok(None));
    }

    #[test]
    fn test_horizontal_wraps_between_ends() {
        let (grid, ids) = grid_with_lengths([2, 0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(right(&grid, ids[7][2]), Ok(Some(ids[0][1])));
        assert_eq!(left(&grid, ids[0][0]), Ok(Some(ids[7][0])));
    }

    #[test]
    fn test_right_matches_min_rule_everywhere() {
        let lengths = [4, 2, 5, 1, 0, 3, 6, 2];
        let (grid, ids) = grid_with_lengths(lengths);
        for (c, column) in ids.iter().enumerate() {
            for (i, id) in column.iter().enumerate() {
                let next = (c + 1) % 8;
                let expected = if lengths[next] > 0 {
                    Some(ids[next][i.min(lengths[next] - 1)])
                } else {
                    None
                };
                assert_eq!(right(&grid, *id), Ok(expected), "from ({c}, {i})");
            }
        }
    }

    #[test]
    fn test_unknown_region_is_an_error() {
        let (grid, _) = grid_with_lengths([1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            neighbor(&grid, RegionId(999), Direction::Left),
            Err(NavigationError::Grid(GridError::RegionNotFound(RegionId(999))))
        );
    }
}
