//! Brute-force helpers shared by the unit tests.

use crate::engine::GridState;
use std::collections::{HashMap, VecDeque};

/// Breadth-first search outwards from `goal`, recording the optimal number of slides
/// between every reachable board and the goal. Slides are reversible, so the distance
/// from the goal is also the distance to it.
pub(crate) fn bfs_distances(goal: &GridState) -> HashMap<GridState, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();

    distances.insert(goal.clone(), 0);
    queue.push_back(goal.clone());

    while let Some(grid) = queue.pop_front() {
        let distance = distances[&grid];
        for (_, next) in grid.successors() {
            if !distances.contains_key(&next) {
                distances.insert(next.clone(), distance + 1);
                queue.push_back(next);
            }
        }
    }

    distances
}
