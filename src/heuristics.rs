use crate::engine::{GridState, BLANK};
use std::fmt;

/// Selects the lower bound the search engine uses to order its frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Plain Manhattan distance.
    Manhattan,
    /// Manhattan distance plus the linear-conflict correction.
    #[default]
    LinearConflict,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::LinearConflict];

    /// Estimates the number of slides still needed to solve `grid`.
    pub fn evaluate(&self, grid: &GridState) -> usize {
        match self {
            Heuristic::Manhattan => manhattan_distance(grid),
            Heuristic::LinearConflict => estimate(grid),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::LinearConflict => "linear-conflict",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Counts the numbered tiles that are not in their goal cell.
///
/// # Arguments
/// * `grid`: The board to analyze.
///
/// # Returns
/// The number of misplaced tiles. The blank is never counted.
pub fn hamming_weight(grid: &GridState) -> usize {
    grid.tiles()
        .iter()
        .enumerate()
        .filter(|&(pos, &tile)| tile != BLANK && tile as usize != pos + 1)
        .count()
}

/// Sums, over every numbered tile, the row and column offsets between its current cell
/// and its goal cell.
///
/// A single slide moves exactly one tile by one cell, so this changes by exactly one per
/// move and never overestimates the remaining distance.
///
/// # Arguments
/// * `grid`: The board to analyze.
///
/// # Returns
/// The total Manhattan distance, `0` for a solved board.
pub fn manhattan_distance(grid: &GridState) -> usize {
    grid.tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(pos, &tile)| {
            let (row, col) = (pos / grid.width(), pos % grid.width());
            let (goal_row, goal_col) = grid.goal_position(tile);
            row.abs_diff(goal_row) + col.abs_diff(goal_col)
        })
        .sum()
}

/// Extra slides forced by tiles that already sit in their goal row (or column) but in the
/// wrong relative order.
///
/// In each line only the tiles whose goal line is that line are considered. Whenever two of
/// them are reversed, one has to step out of the line and come back, which costs two moves
/// that the Manhattan distance does not see. The line contributes two moves for every tile
/// in the smallest set whose removal leaves the rest in goal order. Rows and columns are
/// counted independently; row evictions are vertical moves and column evictions are
/// horizontal ones, so the sum stays admissible.
///
/// # Arguments
/// * `grid`: The board to analyze.
///
/// # Returns
/// An even, non-negative correction to add to `manhattan_distance`.
pub fn linear_conflict(grid: &GridState) -> usize {
    let (height, width) = grid.dimensions();
    let mut extra_moves = 0;
    let mut line = Vec::with_capacity(height.max(width));

    // Row conflicts
    for row in 0..height {
        line.clear();
        for col in 0..width {
            let tile = grid.get(row, col);
            if tile == BLANK {
                continue;
            }
            let (goal_row, goal_col) = grid.goal_position(tile);
            if goal_row == row {
                line.push(goal_col);
            }
        }
        extra_moves += 2 * tiles_to_evict(&line);
    }

    // Column conflicts
    for col in 0..width {
        line.clear();
        for row in 0..height {
            let tile = grid.get(row, col);
            if tile == BLANK {
                continue;
            }
            let (goal_row, goal_col) = grid.goal_position(tile);
            if goal_col == col {
                line.push(goal_row);
            }
        }
        extra_moves += 2 * tiles_to_evict(&line);
    }

    extra_moves
}

/// Fewest entries to drop from `goal_indices` so the remainder is increasing, i.e. the
/// length minus the longest increasing subsequence. Indices within one line are distinct.
fn tiles_to_evict(goal_indices: &[usize]) -> usize {
    let mut tails: Vec<usize> = Vec::with_capacity(goal_indices.len());
    for &index in goal_indices {
        let at = tails.partition_point(|&tail| tail < index);
        if at == tails.len() {
            tails.push(index);
        } else {
            tails[at] = index;
        }
    }
    goal_indices.len() - tails.len()
}

/// The combined lower bound: `manhattan_distance + linear_conflict`.
pub fn estimate(grid: &GridState) -> usize {
    manhattan_distance(grid) + linear_conflict(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::bfs_distances;

    #[test]
    fn test_goal_has_zero_metrics() {
        for height in 1..=4 {
            for width in 1..=4 {
                let goal = GridState::goal(height, width);
                assert_eq!(manhattan_distance(&goal), 0);
                assert_eq!(linear_conflict(&goal), 0);
                assert_eq!(hamming_weight(&goal), 0);
            }
        }
    }

    #[test]
    fn test_single_slide_from_goal_costs_one() {
        for &(height, width) in &[(2, 2), (3, 3), (4, 4), (2, 5), (1, 4)] {
            let goal = GridState::goal(height, width);
            for (direction, next) in goal.successors() {
                assert_eq!(manhattan_distance(&next), 1, "{} from {}x{} goal", direction, height, width);
                assert_eq!(hamming_weight(&next), 1);
            }
        }
    }

    #[test]
    fn test_metrics_on_known_board() {
        let grid = GridState::from_rows(&[[2, 6, 3], [1, 0, 4], [7, 8, 5]]).unwrap();
        assert_eq!(hamming_weight(&grid), 5);
        assert_eq!(manhattan_distance(&grid), 8);
        assert_eq!(linear_conflict(&grid), 0);
        assert_eq!(estimate(&grid), 8);
        assert_eq!(Heuristic::Manhattan.evaluate(&grid), 8);
        assert_eq!(Heuristic::LinearConflict.evaluate(&grid), 8);
    }

    #[test]
    fn test_row_conflict() {
        let grid = GridState::from_rows(&[[2, 1, 3], [4, 5, 6], [7, 8, 0]]).unwrap();
        assert_eq!(manhattan_distance(&grid), 2);
        assert_eq!(linear_conflict(&grid), 2);
        assert_eq!(estimate(&grid), 4);
    }

    #[test]
    fn test_column_conflict() {
        let grid = GridState::from_rows(&[[4, 2, 3], [1, 5, 6], [7, 8, 0]]).unwrap();
        assert_eq!(linear_conflict(&grid), 2);
    }

    #[test]
    fn test_fully_reversed_row_needs_two_evictions() {
        let grid = GridState::from_rows(&[[3, 2, 1], [4, 5, 6], [7, 8, 0]]).unwrap();
        assert_eq!(linear_conflict(&grid), 4);
    }

    #[test]
    fn test_tiles_to_evict() {
        assert_eq!(tiles_to_evict(&[]), 0);
        assert_eq!(tiles_to_evict(&[0, 1, 2, 3]), 0);
        assert_eq!(tiles_to_evict(&[3, 2, 1, 0]), 3);
        assert_eq!(tiles_to_evict(&[1, 0, 3, 2]), 2);
        assert_eq!(tiles_to_evict(&[3, 0, 1, 2]), 1);
    }

    #[test]
    fn test_linear_conflict_is_even_on_random_boards() {
        for seed in 0..50 {
            let grid = GridState::random_with_seed(4, 4, seed);
            assert_eq!(linear_conflict(&grid) % 2, 0, "odd correction on\n{}", grid);
        }
    }

    #[test]
    fn test_heuristics_are_admissible_on_small_boards() {
        for &(height, width) in &[(2, 3), (3, 2), (3, 3)] {
            let goal = GridState::goal(height, width);
            for (grid, distance) in bfs_distances(&goal) {
                let h = estimate(&grid);
                assert!(h <= distance, "estimate {} exceeds optimal {} on\n{}", h, distance, grid);
                assert_eq!(h % 2, distance % 2);
                assert!(manhattan_distance(&grid) <= h);
            }
        }
    }

    #[test]
    fn test_heuristic_names() {
        assert_eq!(Heuristic::default(), Heuristic::LinearConflict);
        assert_eq!(Heuristic::Manhattan.to_string(), "manhattan");
        assert_eq!(Heuristic::LinearConflict.to_string(), "linear-conflict");
    }
}
