//! Property-based tests for the move, rotation and snapshot mechanics.
//!
//! Run with: cargo test --test grid_properties

use proptest::prelude::*;

use tile_merge::engine::{Direction, Grid};

fn tile() -> impl Strategy<Value = u64> {
    prop_oneof![
        3 => Just(0u64),
        4 => (1u32..=11).prop_map(|exp| 1u64 << exp),
    ]
}

fn any_grid() -> impl Strategy<Value = Grid> {
    (1usize..=6).prop_flat_map(|n| {
        prop::collection::vec(tile(), n * n).prop_map(move |cells| {
            let rows: Vec<Vec<u64>> = cells.chunks(n).map(<[u64]>::to_vec).collect();
            Grid::from_rows(&rows).unwrap()
        })
    })
}

fn any_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

/// Straightforward slide of one line toward index 0.
fn reference_line(line: &[u64]) -> Vec<u64> {
    let tiles: Vec<u64> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::with_capacity(line.len());
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out.push(tiles[i] * 2);
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }
    out.resize(line.len(), 0);
    out
}

/// Applies `reference_line` to every row or column, reading each line from
/// the edge the direction slides toward.
fn reference_slide(grid: &Grid, direction: Direction) -> Vec<Vec<u64>> {
    let n = grid.size();
    let mut rows = grid.to_rows();
    let coord = |line: usize, offset: usize| match direction {
        Direction::Left => (line, offset),
        Direction::Right => (line, n - 1 - offset),
        Direction::Up => (offset, line),
        Direction::Down => (n - 1 - offset, line),
    };
    for line in 0..n {
        let values: Vec<u64> = (0..n)
            .map(|offset| {
                let (r, c) = coord(line, offset);
                grid.get(r, c)
            })
            .collect();
        for (offset, value) in reference_line(&values).into_iter().enumerate() {
            let (r, c) = coord(line, offset);
            rows[r][c] = value;
        }
    }
    rows
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn prop_slide_matches_reference(grid in any_grid(), direction in any_direction()) {
        let expected = reference_slide(&grid, direction);
        let mut moved = grid.clone();
        moved.slide(direction);
        prop_assert_eq!(moved.to_rows(), expected);
    }

    #[test]
    fn prop_can_move_iff_slide_changes(grid in any_grid(), direction in any_direction()) {
        let mut moved = grid.clone();
        let changed = moved.slide(direction);
        prop_assert_eq!(changed, moved != grid);
        prop_assert_eq!(grid.can_move(direction), changed);
    }

    #[test]
    fn prop_blocked_slide_is_noop(grid in any_grid(), direction in any_direction()) {
        // Every changing slide packs or merges tiles, so repeating it ends in
        // a grid that is blocked in that direction.
        let mut blocked = grid;
        let mut slides = 0;
        while blocked.slide(direction) {
            slides += 1;
            prop_assert!(slides <= 64, "slide {} never settled", direction);
        }
        prop_assert!(!blocked.can_move(direction));

        let before = blocked.clone();
        prop_assert!(!blocked.slide(direction));
        prop_assert_eq!(blocked, before);
    }

    #[test]
    fn prop_slide_conserves_sum(grid in any_grid(), direction in any_direction()) {
        let mut moved = grid.clone();
        moved.slide(direction);
        prop_assert_eq!(moved.tile_sum(), grid.tile_sum());
        prop_assert!(moved.tile_count() <= grid.tile_count());
    }

    #[test]
    fn prop_each_tile_merges_once(grid in any_grid()) {
        let mut moved = grid.clone();
        moved.slide(Direction::Left);
        for (before, after) in grid.rows().zip(moved.rows()) {
            let tiles_before = before.iter().filter(|&&v| v != 0).count();
            let tiles_after = after.iter().filter(|&&v| v != 0).count();
            prop_assert!(tiles_after * 2 >= tiles_before);
            for &v in after.iter().filter(|&&v| v != 0) {
                let kept = before.contains(&v);
                let doubled = v % 2 == 0 && before.iter().filter(|&&b| b == v / 2).count() >= 2;
                prop_assert!(kept || doubled, "tile {} came from nowhere in {:?}", v, before);
            }
        }
    }

    #[test]
    fn prop_four_rotations_are_identity(grid in any_grid(), k in 0i32..4) {
        let mut rotated = grid.clone();
        rotated.rotate(4 * k);
        prop_assert_eq!(&rotated, &grid);

        rotated.rotate(1);
        rotated.rotate(3);
        prop_assert_eq!(rotated, grid);
    }

    #[test]
    fn prop_slide_equals_rotated_left_slide(grid in any_grid(), direction in any_direction()) {
        let mut direct = grid.clone();
        direct.slide(direction);

        let turns = direction.quarter_turns_to_left();
        let mut rotated = grid.clone();
        rotated.rotate(turns);
        rotated.slide(Direction::Left);
        rotated.rotate((4 - turns) % 4);

        prop_assert_eq!(direct, rotated);
    }

    #[test]
    fn prop_snapshot_restore_undoes_slide(grid in any_grid(), direction in any_direction()) {
        let mut live = grid.clone();
        let saved = live.snapshot();
        live.slide(direction);
        live.restore(&saved).unwrap();
        prop_assert_eq!(live, grid);
    }
}

#[test]
fn scenario_pair_merges_left() {
    let mut grid = Grid::from_rows(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    assert!(grid.slide(Direction::Left));
    assert_eq!(grid.to_rows()[0], vec![4, 0, 0, 0]);
}

#[test]
fn scenario_compact_merge_recompact() {
    let mut grid = Grid::from_rows(&[[2, 0, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    assert!(grid.slide(Direction::Left));
    assert_eq!(grid.to_rows()[0], vec![4, 2, 0, 0]);
}

#[test]
fn scenario_full_distinct_row_is_blocked() {
    let mut grid = Grid::from_rows(&[[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]).unwrap();
    // Row 0 cannot move left; the empty rows below cannot either.
    assert!(!grid.can_move(Direction::Left));
    assert!(!grid.slide(Direction::Left));
    assert_eq!(grid.to_rows()[0], vec![2, 4, 8, 16]);
}

#[test]
fn scenario_snapshot_move_restore() {
    let mut grid = Grid::from_rows(&[[2, 0, 0, 2], [4, 4, 0, 0], [0, 8, 8, 0], [2, 0, 2, 0]]).unwrap();
    let before = grid.clone();
    let saved = grid.snapshot();
    assert!(grid.slide(Direction::Up));
    grid.restore(&saved).unwrap();
    assert_eq!(grid, before);
}
