use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sliding_puzzle::engine::GridState;
use sliding_puzzle::heuristics::{hamming_weight, linear_conflict, manhattan_distance, Heuristic};
use sliding_puzzle::solvability::is_solvable;
use sliding_puzzle::solver::{SearchEngine, SearchLimits, SearchOutcome};
use sliding_puzzle::utils::grid_from_text;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    LinearConflict,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::LinearConflict => Heuristic::LinearConflict,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Finds an optimal solution for a sliding-tile puzzle", long_about = None)]
struct Args {
    /// Heuristic guiding the search
    #[clap(long, value_enum, default_value = "linear-conflict")]
    heuristic: HeuristicArg,

    /// Stop after expanding this many nodes
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Stop after this many seconds
    #[clap(long)]
    time_limit: Option<u64>,

    /// Path to the board file (one row per line, whitespace-separated, 0 for the blank)
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<GridState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    grid_from_text(&content).with_context(|| format!("invalid board in {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let grid = read_board_file(&args.board_file)?;
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}\n", grid);
    println!(
        "Hamming: {}, Manhattan: {}, Linear conflict: {}",
        hamming_weight(&grid),
        manhattan_distance(&grid),
        linear_conflict(&grid)
    );
    println!("Solvable: {}\n", is_solvable(&grid));

    let mut limits = SearchLimits::unlimited();
    if let Some(max) = args.max_expansions {
        limits = limits.with_max_expansions(max);
    }
    if let Some(secs) = args.time_limit {
        limits = limits.with_time_limit(Duration::from_secs(secs));
    }

    let heuristic = Heuristic::from(args.heuristic);
    println!("Searching with the {} heuristic...\n", heuristic);
    let engine = SearchEngine::new(heuristic).with_limits(limits);

    match engine.solve(&grid) {
        SearchOutcome::Solved(solution) => {
            if solution.moves.is_empty() {
                println!("This puzzle is already solved.");
                return Ok(());
            }
            println!(
                "Solution found: {} moves ({} nodes expanded, {} generated)\n",
                solution.move_count(),
                solution.stats.expanded,
                solution.stats.generated
            );
            for (i, (direction, board)) in solution
                .moves
                .iter()
                .zip(solution.path.iter().skip(1))
                .enumerate()
            {
                println!("Move {}: {}\n{}\n", i + 1, direction, board);
            }
        }
        SearchOutcome::Insoluble => println!("This puzzle cannot be solved."),
        SearchOutcome::Exhausted(stats) => println!(
            "No solution found after expanding all {} reachable boards.",
            stats.expanded
        ),
        SearchOutcome::Incomplete { stats, limit } => println!(
            "Search stopped at the {} after expanding {} nodes.",
            limit, stats.expanded
        ),
    }

    Ok(())
}
