use crate::engine::{Direction, GridState};
use crate::frontier::Frontier;
use crate::heuristics::Heuristic;
use crate::solvability::is_solvable;
use log::{debug, info, trace};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: usize = 100_000;

/// Represents a solution found by the search engine.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Every board from the start to the goal, both inclusive.
    pub path: Vec<GridState>,
    /// The slide taken between each consecutive pair in `path`.
    pub moves: Vec<Direction>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of slides in the solution.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Nodes pushed onto the frontier, including the root.
    pub generated: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// Which budget stopped a search early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitKind {
    Expansions,
    Time,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::Expansions => write!(f, "expansion limit"),
            LimitKind::Time => write!(f, "time limit"),
        }
    }
}

/// The result of a search. Every variant is an expected outcome; none of them is an error.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    /// The parity check ruled the board out before searching.
    Insoluble,
    /// Every reachable board was expanded without meeting the goal.
    Exhausted(SearchStats),
    /// A budget in `SearchLimits` ran out first.
    Incomplete { stats: SearchStats, limit: LimitKind },
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Optional bounds on how much work a search may do. The default is unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// A board in the search tree. `parent` indexes the engine's node arena.
#[derive(Debug)]
struct SearchNode {
    state: GridState,
    g: usize,
    h: usize,
    parent: Option<usize>,
    via: Option<Direction>,
}

/// A* search over board states, ordered by `g + h`.
///
/// Each state is expanded at most once for a given cost. A state is only pushed again
/// when a strictly cheaper path to it turns up, so the search always terminates, even
/// on insoluble boards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchEngine {
    heuristic: Heuristic,
    limits: SearchLimits,
}

impl SearchEngine {
    pub fn new(heuristic: Heuristic) -> Self {
        SearchEngine {
            heuristic,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Checks solvability first and only searches when the goal is reachable.
    pub fn solve(&self, start: &GridState) -> SearchOutcome {
        if !is_solvable(start) {
            debug!("parity check rejected board, skipping search");
            return SearchOutcome::Insoluble;
        }
        self.search(start)
    }

    /// Runs the search without the parity precheck.
    ///
    /// On an insoluble board this expands the whole reachable half of the state space and
    /// returns `Exhausted`, which is only practical for small boards.
    pub fn search(&self, start: &GridState) -> SearchOutcome {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut frontier: Frontier<usize> = Frontier::new();
        let mut best_g: HashMap<GridState, usize> = HashMap::new();
        let mut closed: HashSet<GridState> = HashSet::new();

        let h = self.heuristic.evaluate(start);
        debug!(
            "searching {}x{} board with {} heuristic, initial estimate {}",
            start.height(),
            start.width(),
            self.heuristic,
            h
        );

        best_g.insert(start.clone(), 0);
        nodes.push(SearchNode {
            state: start.clone(),
            g: 0,
            h,
            parent: None,
            via: None,
        });
        frontier.push(h, 0);
        stats.generated = 1;
        stats.max_frontier = 1;

        while let Some((_, index)) = frontier.pop() {
            let (g, via) = (nodes[index].g, nodes[index].via);

            if best_g
                .get(&nodes[index].state)
                .is_some_and(|&recorded| recorded < g)
            {
                continue;
            }

            if nodes[index].state.is_solved() {
                let solution = reconstruct(&nodes, index, stats);
                info!(
                    "solved in {} moves after expanding {} nodes",
                    solution.move_count(),
                    stats.expanded
                );
                return SearchOutcome::Solved(solution);
            }

            if !closed.insert(nodes[index].state.clone()) {
                continue;
            }

            if let Some(limit) = self.limit_reached(&stats, started) {
                debug!("stopping search at {} after {} expansions", limit, stats.expanded);
                return SearchOutcome::Incomplete { stats, limit };
            }

            stats.expanded += 1;
            if stats.expanded % PROGRESS_INTERVAL == 0 {
                trace!(
                    "expanded {} nodes, frontier {}, f = {}",
                    stats.expanded,
                    frontier.len(),
                    g + nodes[index].h
                );
            }

            let successors: Vec<(Direction, GridState)> = nodes[index].state.successors().collect();
            for (direction, next) in successors {
                // Sliding straight back only re-creates the parent.
                if via.is_some_and(|last| direction == last.opposite()) {
                    continue;
                }

                let next_g = g + 1;
                if best_g.get(&next).is_some_and(|&recorded| recorded <= next_g) {
                    continue;
                }
                best_g.insert(next.clone(), next_g);
                closed.remove(&next);

                let next_h = self.heuristic.evaluate(&next);
                nodes.push(SearchNode {
                    state: next,
                    g: next_g,
                    h: next_h,
                    parent: Some(index),
                    via: Some(direction),
                });
                frontier.push(next_g + next_h, nodes.len() - 1);
                stats.generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        info!("search exhausted after expanding {} nodes", stats.expanded);
        SearchOutcome::Exhausted(stats)
    }

    fn limit_reached(&self, stats: &SearchStats, started: Instant) -> Option<LimitKind> {
        if self
            .limits
            .max_expansions
            .is_some_and(|max| stats.expanded >= max)
        {
            return Some(LimitKind::Expansions);
        }
        if self
            .limits
            .time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
        {
            return Some(LimitKind::Time);
        }
        None
    }
}

/// Walks the parent links from `goal_index` back to the root.
fn reconstruct(nodes: &[SearchNode], goal_index: usize, stats: SearchStats) -> Solution {
    let mut path = Vec::new();
    let mut moves = Vec::new();
    let mut cursor = Some(goal_index);

    while let Some(index) = cursor {
        let node = &nodes[index];
        path.push(node.state.clone());
        if let Some(direction) = node.via {
            moves.push(direction);
        }
        cursor = node.parent;
    }

    path.reverse();
    moves.reverse();
    Solution { path, moves, stats }
}

/// Solves `start` with the default engine: linear-conflict heuristic, no limits.
///
/// ```
/// use sliding_puzzle::engine::GridState;
/// use sliding_puzzle::solver::{solve, SearchOutcome};
///
/// let start = GridState::from_rows(&[[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// let solution = solve(&start).into_solution().unwrap();
/// assert_eq!(solution.move_count(), 2);
/// assert!(solution.path.last().unwrap().is_solved());
///
/// let swapped = GridState::from_rows(&[[2, 1], [3, 0]]).unwrap();
/// assert!(matches!(solve(&swapped), SearchOutcome::Insoluble));
/// ```
pub fn solve(start: &GridState) -> SearchOutcome {
    SearchEngine::default().solve(start)
}
