//! Parity test deciding whether a board can reach the canonical goal.

use crate::engine::GridState;

/// Returns `true` if the goal arrangement is reachable from `grid`.
///
/// For odd widths a vertical slide moves a tile past an even number of others, so the
/// inversion parity never changes and must already be even. For even widths every
/// vertical slide flips the inversion parity while moving the blank one row, so the
/// inversions plus the blank's distance from the bottom row must be even.
///
/// Boards that are a single row or column can never reorder their tiles; only an
/// already-sorted tile order is solvable there.
///
/// ```
/// use sliding_puzzle::engine::GridState;
/// use sliding_puzzle::solvability::is_solvable;
///
/// let solvable = GridState::from_rows(&[[12, 1, 10, 2], [7, 11, 4, 14], [5, 0, 9, 15], [8, 13, 6, 3]]).unwrap();
/// assert!(is_solvable(&solvable));
///
/// let swapped = GridState::from_rows(&[[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 15, 14, 0]]).unwrap();
/// assert!(!is_solvable(&swapped));
/// ```
pub fn is_solvable(grid: &GridState) -> bool {
    let inversions = grid.inversions();
    let (height, width) = grid.dimensions();

    if height == 1 || width == 1 {
        return inversions == 0;
    }

    if width % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (blank_row, _) = grid.blank_position();
        let rows_from_goal_row = height - 1 - blank_row;
        (inversions + rows_from_goal_row) % 2 == 0
    }
}
