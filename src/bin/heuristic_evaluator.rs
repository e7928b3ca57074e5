use anyhow::Result;
use clap::Parser;
use sliding_puzzle::engine::GridState;
use sliding_puzzle::heuristics::Heuristic;
use sliding_puzzle::solver::{SearchEngine, SearchLimits, SearchOutcome};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search effort across heuristics", long_about = None)]
struct Args {
    /// Number of random boards to solve
    #[clap(long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; later boards use consecutive seeds
    #[clap(long, default_value_t = 0)]
    seed: u64,

    #[clap(long, default_value_t = 3)]
    height: usize,

    #[clap(long, default_value_t = 3)]
    width: usize,

    /// Per-search expansion budget
    #[clap(long, default_value_t = 5_000_000)]
    max_expansions: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.height == 0 || args.width == 0 {
        anyhow::bail!("height and width must be at least 1");
    }

    let limits = SearchLimits::unlimited().with_max_expansions(args.max_expansions);
    let mut all_expansions: HashMap<Heuristic, Vec<usize>> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} {}x{} boards...",
        args.boards, args.height, args.width
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let initial_board = GridState::random_solvable_with_seed(args.height, args.width, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for heuristic in Heuristic::ALL {
            let engine = SearchEngine::new(heuristic).with_limits(limits);
            match engine.solve(&initial_board) {
                SearchOutcome::Solved(solution) => {
                    println!(
                        "  Heuristic: {:<16}, Moves: {:<4}, Expanded: {}",
                        heuristic,
                        solution.move_count(),
                        solution.stats.expanded
                    );
                    all_expansions
                        .entry(heuristic)
                        .or_default()
                        .push(solution.stats.expanded);
                }
                SearchOutcome::Incomplete { stats, limit } => {
                    eprintln!(
                        "Warning: {} stopped at the {} on board {} (Seed: {}) after {} expansions.",
                        heuristic, limit, board_idx, current_seed, stats.expanded
                    );
                }
                other => {
                    eprintln!(
                        "Error: {} returned {:?} on board {} (Seed: {}), which should be solvable.",
                        heuristic, other, board_idx, current_seed
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Average Expanded Nodes ---");

    let mut averages: Vec<(Heuristic, f64)> = Vec::new();
    for heuristic in Heuristic::ALL {
        match all_expansions.get(&heuristic) {
            Some(expansions) if !expansions.is_empty() => {
                let total: usize = expansions.iter().sum();
                averages.push((heuristic, total as f64 / expansions.len() as f64));
            }
            _ => println!("Heuristic {}: No solved boards recorded.", heuristic),
        }
    }

    // Fewest expansions first
    averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (heuristic, average) in averages {
        println!("Heuristic {:<16}: Average Expanded = {:.2}", heuristic, average);
    }

    Ok(())
}
