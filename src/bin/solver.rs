use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::search::DuplicatePolicy;
use eight_puzzle_solver::solver::{solve_with_config, SolverConfig, Strategy};
use eight_puzzle_solver::utils::{board_from_str, board_to_str};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve the 8-puzzle", long_about = None)]
struct Args {
    /// Search strategy: bfs, dfs, ast (A*) or ida (IDA*)
    #[clap(value_enum)]
    method: Strategy,

    /// Initial board as nine comma-separated tiles in row-major order, 0 is the empty slot
    #[clap(required_unless_present = "scramble")]
    board: Option<String>,

    /// Start from the goal scrambled by this many random moves instead of BOARD
    #[clap(long, conflicts_with = "board")]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Give up after this many expanded nodes
    #[clap(long)]
    node_limit: Option<u64>,

    /// Give up IDA* after this many bound iterations
    #[clap(long)]
    max_iterations: Option<u32>,

    /// Never re-push a pending board, even when a cheaper path reaches it
    #[clap(long)]
    first_discovery: bool,

    /// Also write the report to this file
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Log search progress (same as RUST_LOG=debug)
    #[clap(short, long)]
    verbose: bool,
}

fn initial_board(args: &Args) -> Result<Board, String> {
    match (&args.board, args.scramble) {
        (Some(text), _) => board_from_str(text).map_err(|e| format!("Invalid board '{}': {}", text, e)),
        (None, Some(moves)) => Ok(Board::new_random_with_seed(args.seed, moves)),
        (None, None) => Err("No board given".to_string()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let board = match initial_board(&args) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };
    info!("initial board {}:\n{}", board_to_str(&board), board);
    if !board.is_solvable() {
        warn!(
            "board {} has odd inversion parity; the search will exhaust without a solution",
            board_to_str(&board)
        );
    }

    let config = SolverConfig {
        duplicate_policy: args.first_discovery.then_some(DuplicatePolicy::FirstDiscovery),
        node_limit: args.node_limit,
        max_bound_iterations: args.max_iterations,
        ..SolverConfig::default()
    };
    let report = solve_with_config(&board, args.method, &config);
    println!("{}", report);

    if let Some(path) = &args.output {
        if let Err(e) = fs::write(path, format!("{}\n", report)) {
            eprintln!("Failed to write report to {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
