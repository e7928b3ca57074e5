//! # Sliding Puzzle Library
//!
//! This library decides whether a generalized H×W sliding-tile puzzle (the 8- and
//! 15-puzzles and their rectangular relatives) can be solved, and finds an optimal
//! sequence of slides with an A* search when it can.
//!
//! It is used by three binaries:
//! - `puzzle_solver`: Reads a board from a file and prints the optimal solution.
//! - `human_player`: Lets you slide tiles interactively on a random solvable board.
//! - `heuristic_evaluator`: Compares the search effort of the available heuristics on
//!   seeded random boards.
//!
//! ## Modules
//! - `engine`: The immutable board (`GridState`) and the blank's moves (`Direction`).
//! - `solvability`: The parity test telling whether the goal is reachable.
//! - `heuristics`: Manhattan distance, linear conflict and Hamming weight.
//! - `frontier`: The priority queue ordering pending search nodes.
//! - `solver`: The `SearchEngine` and its `SearchOutcome`.
//! - `utils`: Parsing boards from text.
//! - `error`: The `PuzzleError` type.

pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod solvability;
pub mod solver;
pub mod utils;

#[cfg(test)]
mod testing;
