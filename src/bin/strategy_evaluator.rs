use clap::Parser;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::solver::{solve, Strategy};
use eight_puzzle_solver::utils::board_to_str;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the search strategies on random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Random moves applied to the goal to build each board
    #[clap(short, long, default_value_t = 30)]
    scramble: usize,

    /// Seed of the first board; board i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Strategies to run (default: all four)
    #[clap(short, long, value_enum)]
    strategy: Vec<Strategy>,
}

#[derive(Default)]
struct Totals {
    nodes_expanded: u64,
    path_length: usize,
    seconds: f64,
    solved: usize,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let strategies: Vec<Strategy> = if args.strategy.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        args.strategy.clone()
    };
    let mut totals: HashMap<Strategy, Totals> = HashMap::new();

    println!(
        "Evaluating {} boards ({} scramble moves)...",
        args.boards, args.scramble
    );

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let board = Board::new_random_with_seed(seed, args.scramble);
        println!("\nBoard {} (Seed: {}): {}", board_idx, seed, board_to_str(&board));

        for &strategy in &strategies {
            let report = solve(&board, strategy);
            let entry = totals.entry(strategy).or_default();
            entry.nodes_expanded += report.stats.nodes_expanded;
            entry.seconds += report.stats.running_time.as_secs_f64();
            match report.cost_of_path() {
                Some(cost) => {
                    entry.path_length += cost;
                    entry.solved += 1;
                    println!(
                        "  Strategy: {:<4} Cost: {:<6} Expanded: {:<8} Time: {:.4}s",
                        strategy,
                        cost,
                        report.stats.nodes_expanded,
                        report.stats.running_time.as_secs_f64()
                    );
                }
                None => eprintln!(
                    "Warning: strategy {} found no solution for board {} (Seed: {}).",
                    strategy, board_idx, seed
                ),
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("\n--- Averages ---");

    let mut rows: Vec<(Strategy, f64, f64, f64)> = strategies
        .iter()
        .filter_map(|s| {
            let t = totals.get(s)?;
            if t.solved == 0 {
                println!("Strategy {}: no solved boards.", s);
                return None;
            }
            let n = t.solved as f64;
            Some((*s, t.nodes_expanded as f64 / n, t.path_length as f64 / n, t.seconds / n))
        })
        .collect();

    // Fewest expansions first.
    rows.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (strategy, expanded, cost, seconds) in rows {
        println!(
            "Strategy {:<4}: Expanded = {:.1}, Cost = {:.2}, Time = {:.4}s",
            strategy, expanded, cost, seconds
        );
    }
}
