//! Grid tests - occupancy reads, writes and the column sweep

use polydrop::core::Grid;
use polydrop::types::{COLLS, ROWS};

fn fill_column(grid: &mut Grid, p: i8) {
    for s in 0..ROWS as i8 {
        assert!(grid.set_occupied(p, s));
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.colls(), COLLS);
    assert_eq!(grid.rows(), ROWS);

    for p in 0..COLLS as i8 {
        for s in 0..ROWS as i8 {
            assert!(!grid.is_occupied(p, s), "cell ({}, {}) should be free", p, s);
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_primary_read_wraps_but_write_rejects() {
    let mut grid = Grid::new();
    assert!(grid.set_occupied(0, 3));

    // Reads reduce primary modulo COLLS.
    assert!(grid.is_occupied(COLLS as i8, 3));
    assert!(grid.is_occupied(-(COLLS as i8), 3));
    assert_eq!(grid.is_occupied(COLLS as i8, 5), grid.is_occupied(0, 5));

    // Writes outside the grid are no-ops.
    let before = grid.clone();
    assert!(!grid.set_occupied(COLLS as i8, 5));
    assert!(!grid.set_occupied(-1, 5));
    assert_eq!(grid, before);
}

#[test]
fn test_secondary_out_of_range_reads_blocked() {
    let grid = Grid::new();
    assert!(grid.is_occupied(4, -1));
    assert!(grid.is_occupied(4, ROWS as i8));
    assert!(!grid.is_occupied(4, ROWS as i8 - 1));
}

#[test]
fn test_secondary_out_of_range_writes_rejected() {
    let mut grid = Grid::new();
    assert!(!grid.set_occupied(4, -1));
    assert!(!grid.set_occupied(4, ROWS as i8));
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_sweep_removes_full_column_and_shifts_outward() {
    let mut grid = Grid::new();
    fill_column(&mut grid, 10);
    grid.set_occupied(9, 1);
    grid.set_occupied(3, 6);
    grid.set_occupied(12, 2);

    let cleared = grid.sweep();
    assert_eq!(cleared.as_slice(), &[10]);

    // Columns nearer the origin moved one step outward.
    assert!(grid.is_occupied(10, 1));
    assert!(grid.is_occupied(4, 6));
    assert!(!grid.is_occupied(9, 1));
    assert!(!grid.is_occupied(3, 6));
    // Columns past the cleared one stay put.
    assert!(grid.is_occupied(12, 2));
    // Column 0 is emptied.
    for s in 0..ROWS as i8 {
        assert!(!grid.is_occupied(0, s));
    }
    assert_eq!(grid.occupied_count(), 3);
}

#[test]
fn test_adjacent_full_columns_cascade_in_one_sweep() {
    let mut grid = Grid::new();
    fill_column(&mut grid, 14);
    fill_column(&mut grid, 15);
    grid.set_occupied(13, 0);

    let cleared = grid.sweep();
    assert_eq!(cleared.len(), 2);
    assert_eq!(cleared.as_slice(), &[15, 15]);
    assert_eq!(grid.occupied_count(), 1);
    assert!(grid.is_occupied(15, 0));
}

#[test]
fn test_sweep_on_partial_columns_is_noop() {
    let mut grid = Grid::new();
    for s in 0..ROWS as i8 - 1 {
        grid.set_occupied(8, s);
    }
    let before = grid.clone();
    assert!(grid.sweep().is_empty());
    assert_eq!(grid, before);
}

#[test]
fn test_sweep_full_column_zero() {
    let mut grid = Grid::new();
    fill_column(&mut grid, 0);
    let cleared = grid.sweep();
    assert_eq!(cleared.as_slice(), &[0]);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_sweep_leaves_no_full_column_when_everything_is_full() {
    let mut grid = Grid::new();
    for p in 0..COLLS as i8 {
        fill_column(&mut grid, p);
    }
    let cleared = grid.sweep();
    assert_eq!(cleared.len(), COLLS as usize);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_bool_grid_round_trip() {
    let mut grid = Grid::new();
    grid.set_occupied(2, 3);
    grid.set_occupied(15, 7);

    let mut out = [[false; ROWS as usize]; COLLS as usize];
    grid.write_bool_grid(&mut out);
    assert!(out[2][3]);
    assert!(out[15][7]);
    assert_eq!(Grid::from_bool_grid(&out), grid);
}
