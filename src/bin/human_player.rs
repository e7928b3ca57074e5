use anyhow::{Context, Result};
use clap::Parser;
use sliding_puzzle::engine::{Direction, GridState};
use sliding_puzzle::heuristics::manhattan_distance;
use sliding_puzzle::solver::{SearchEngine, SearchLimits, SearchOutcome};
use std::io::{self, Write};

/// Hints give up after this many expansions so a hard board never hangs the prompt.
const HINT_EXPANSION_LIMIT: usize = 2_000_000;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a sliding-tile puzzle in the terminal", long_about = None)]
struct Args {
    #[clap(long, default_value_t = 3)]
    height: usize,

    #[clap(long, default_value_t = 3)]
    width: usize,

    /// Seed for the random starting board
    #[clap(long, default_value_t = 514514)]
    seed: u64,
}

fn hint(grid: &GridState) -> Option<Direction> {
    let engine = SearchEngine::default()
        .with_limits(SearchLimits::unlimited().with_max_expansions(HINT_EXPANSION_LIMIT));
    match engine.solve(grid) {
        SearchOutcome::Solved(solution) => solution.moves.first().copied(),
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.height == 0 || args.width == 0 {
        anyhow::bail!("height and width must be at least 1");
    }

    let mut history = vec![GridState::random_solvable_with_seed(
        args.height,
        args.width,
        args.seed,
    )];
    println!("Welcome to the sliding puzzle!");

    loop {
        let grid = history.last().context("history is never empty")?.clone();
        println!("---------------------");
        println!("Moves: {}, Manhattan distance: {}", history.len() - 1, manhattan_distance(&grid));
        println!("{}", grid);

        if grid.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total moves: {}", history.len() - 1);
            println!("---------------------");
            break;
        }

        print!("Move the blank (up/down/left/right), or 'undo', 'hint', 'quit': ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input).context("failed to read input")? == 0 {
            break;
        }

        match input.trim() {
            "quit" | "q" => {
                println!("Thanks for playing!");
                break;
            }
            "undo" | "z" => {
                if history.len() > 1 {
                    history.pop();
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (already at the starting board).");
                }
            }
            "hint" | "h" => match hint(&grid) {
                Some(direction) => println!("Try moving the blank {}.", direction),
                None => println!("No hint available for this board."),
            },
            other => match other.parse::<Direction>() {
                Ok(direction) => match grid.slide(direction) {
                    Some(next) => history.push(next),
                    None => println!("Invalid move: the blank cannot move {} from here.", direction),
                },
                Err(e) => println!("{}", e),
            },
        }
    }

    Ok(())
}
