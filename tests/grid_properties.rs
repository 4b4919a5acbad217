use flowgrid::model::{FlowConfig, Grid, RegionId, Side};
use flowgrid::ops::merge::merge;
use flowgrid::ops::navigate::{down, right, up};
use flowgrid::ops::{MergeError, Selection};
use flowgrid::util::{relative_element, relative_index};
use pretty_assertions::assert_eq;

/// Grid whose column `c` holds `lengths[c]` regions; ids indexed [column][row].
fn grid_with_lengths(lengths: [usize; 8]) -> (Grid, Vec<Vec<RegionId>>) {
    let mut grid = Grid::new(Side::Affirmative);
    let ids = lengths
        .iter()
        .enumerate()
        .map(|(column, len)| {
            (0..*len)
                .map(|row| grid.append_region(column, format!("{column}/{row}")).unwrap())
                .collect()
        })
        .collect();
    (grid, ids)
}

#[test]
fn up_and_down_are_inverse_within_columns() {
    let (grid, ids) = grid_with_lengths([3, 1, 4, 0, 2, 5, 1, 3]);
    for column in &ids {
        for (row, id) in column.iter().enumerate() {
            match down(&grid, *id).unwrap() {
                Some(below) => assert_eq!(up(&grid, below).unwrap(), Some(*id)),
                None => assert_eq!(row, column.len() - 1),
            }
            if row == 0 {
                assert_eq!(up(&grid, *id).unwrap(), None);
            }
        }
    }
}

#[test]
fn right_follows_min_rule_and_wraps() {
    let lengths = [2, 5, 0, 3, 1, 4, 2, 6];
    let (grid, ids) = grid_with_lengths(lengths);
    for (c, column) in ids.iter().enumerate() {
        let next = (c + 1) % 8;
        for (i, id) in column.iter().enumerate() {
            let expected = (lengths[next] > 0).then(|| ids[next][i.min(lengths[next] - 1)]);
            assert_eq!(right(&grid, *id).unwrap(), expected, "from column {c} row {i}");
        }
    }
}

#[test]
fn toggle_twice_then_again() {
    let (grid, ids) = grid_with_lengths([1, 0, 0, 0, 0, 0, 0, 0]);
    let region = ids[0][0];
    assert!(grid.contains(region));

    let mut selection = Selection::new();
    selection.toggle_select(region, false);
    selection.toggle_select(region, false);
    assert!(selection.is_empty());
    assert_eq!(selection.last_selected(), None);

    selection.toggle_select(region, false);
    assert_eq!(selection.selected().iter().copied().collect::<Vec<_>>(), vec![region]);
    assert_eq!(selection.last_selected(), Some(region));
}

#[test]
fn merge_three_in_column_order() {
    let mut grid = Grid::new(Side::Negation);
    let a = grid.append_region(4, "A").unwrap();
    let b = grid.append_region(4, "B").unwrap();
    let c = grid.append_region(4, "C").unwrap();

    let mut selection = Selection::new();
    for id in [b, c, a] {
        selection.primary_select(id, true);
    }
    let outcome = merge(&mut grid, &mut selection, &FlowConfig::default().regions.merge_separator).unwrap();

    assert_eq!(outcome.survivor, a);
    assert_eq!(grid.column_len(4), Some(1));
    assert_eq!(grid.region(a).unwrap().text, "A\nB\nC");
    assert_eq!(selection.last_selected(), Some(a));
}

#[test]
fn merge_across_columns_is_rejected() {
    let (mut grid, ids) = grid_with_lengths([2, 3, 0, 0, 0, 0, 0, 0]);
    let mut selection = Selection::new();
    selection.primary_select(ids[0][1], true);
    selection.primary_select(ids[1][0], true);

    let err = merge(&mut grid, &mut selection, "\n").unwrap_err();
    assert_eq!(err, MergeError::HeterogeneousSelection { columns: vec![0, 1] });
    assert_eq!(grid.column_len(0), Some(2));
    assert_eq!(grid.column_len(1), Some(3));
    assert_eq!(selection.len(), 2);
}

#[test]
fn relative_element_wraps_past_the_end() {
    let xs: Vec<String> = (0..8).map(|i| format!("x{i}")).collect();
    assert_eq!(relative_element(&xs, &xs[7], 1).unwrap(), "x0");
    assert_eq!(relative_element(&xs, &xs[0], -1).unwrap(), "x7");
    for offset in -20..=20 {
        let index = relative_index(xs.len(), 7, offset).unwrap();
        assert!(index < xs.len(), "offset {offset}");
    }
}
