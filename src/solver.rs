use crate::engine::Board;
use crate::frontier::{BoundedPriorityFrontier, Frontier, PriorityFrontier, QueueFrontier, StackFrontier};
use crate::heuristics::manhattan_sum;
use crate::report::{Outcome, SearchReport, SearchStats};
use crate::search::{DuplicatePolicy, PassOutcome, SearchEngine};
use crate::utils::{board_to_str, peak_resident_memory_kib};
use log::{debug, info};
use std::fmt;
use std::time::Instant;

/// The four search disciplines.
///
/// The short names (`bfs`, `dfs`, `ast`, `ida`) are the command-line spellings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// FIFO frontier.
    #[value(name = "bfs", alias = "breadth-first")]
    BreadthFirst,
    /// LIFO frontier, successors pushed in reverse.
    #[value(name = "dfs", alias = "depth-first")]
    DepthFirst,
    /// A*: frontier ordered by `depth + manhattan_sum`.
    #[value(name = "ast", alias = "best-first")]
    BestFirst,
    /// IDA*: bounded best-first passes, bound raised between passes.
    #[value(name = "ida", alias = "iterative-deepening-best-first")]
    IterativeDeepening,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::BestFirst,
        Strategy::IterativeDeepening,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::DepthFirst => "dfs",
            Strategy::BestFirst => "ast",
            Strategy::IterativeDeepening => "ida",
        }
    }

    /// The cost-ordered disciplines reopen pending boards reached more cheaply,
    /// which keeps A* and IDA* optimal. The uninformed ones keep first discovery.
    pub fn default_duplicate_policy(&self) -> DuplicatePolicy {
        match self {
            Strategy::BreadthFirst | Strategy::DepthFirst => DuplicatePolicy::FirstDiscovery,
            Strategy::BestFirst | Strategy::IterativeDeepening => DuplicatePolicy::ReopenCheaper,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Knobs for a single solve. `Default` gives the uncapped baseline behaviour.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Overrides [`Strategy::default_duplicate_policy`].
    pub duplicate_policy: Option<DuplicatePolicy>,
    /// Stop with [`Outcome::LimitReached`] after this many expansions
    /// (summed over all IDA* passes).
    pub node_limit: Option<u64>,
    /// Stop IDA* with [`Outcome::LimitReached`] after this many passes.
    pub max_bound_iterations: Option<u32>,
    /// Engine steps between two samples of `memory_probe`.
    pub memory_sample_interval: u64,
    /// Returns the current peak resident memory in KiB.
    pub memory_probe: fn() -> Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            duplicate_policy: None,
            node_limit: None,
            max_bound_iterations: None,
            memory_sample_interval: 1000,
            memory_probe: peak_resident_memory_kib,
        }
    }
}

/// Solves `board` with `strategy` using the default configuration.
pub fn solve(board: &Board, strategy: Strategy) -> SearchReport {
    solve_with_config(board, strategy, &SolverConfig::default())
}

/// Solves `board` with `strategy`.
///
/// Always returns a report: an unreachable goal is [`Outcome::Unsolvable`],
/// a cap from `config` is [`Outcome::LimitReached`].
pub fn solve_with_config(board: &Board, strategy: Strategy, config: &SolverConfig) -> SearchReport {
    let started = Instant::now();
    let policy = config
        .duplicate_policy
        .unwrap_or_else(|| strategy.default_duplicate_policy());
    let mut sampler = MemorySampler::new(config);
    debug!("solving {} with {} ({:?})", board_to_str(board), strategy, policy);

    let (outcome, mut stats) = match strategy {
        Strategy::BreadthFirst => single_pass(QueueFrontier::new(), board, policy, config, &mut sampler),
        Strategy::DepthFirst => single_pass(StackFrontier::new(), board, policy, config, &mut sampler),
        Strategy::BestFirst => single_pass(PriorityFrontier::new(), board, policy, config, &mut sampler),
        Strategy::IterativeDeepening => iterative_deepening(board, policy, config, &mut sampler),
    };

    sampler.sample();
    stats.running_time = started.elapsed();
    stats.max_ram_usage_kib = sampler.peak;
    if let Outcome::Solved { path } = &outcome {
        stats.search_depth = Some(path.len() as u32);
    }

    SearchReport {
        strategy,
        initial: *board,
        outcome,
        stats,
    }
}

fn single_pass<F: Frontier>(
    frontier: F,
    board: &Board,
    policy: DuplicatePolicy,
    config: &SolverConfig,
    sampler: &mut MemorySampler,
) -> (Outcome, SearchStats) {
    let mut engine = SearchEngine::new(frontier, policy);
    engine.set_node_limit(config.node_limit);
    let pass = drive(&mut engine, board, sampler);

    let mut stats = SearchStats::default();
    stats.absorb_pass(engine.stats());
    (conclude(&engine, pass), stats)
}

/// Runs bounded passes, starting at `manhattan_sum(board)` and raising the bound
/// to the smallest exceeding `f` after each pass, until a pass ends any other way.
fn iterative_deepening(
    board: &Board,
    policy: DuplicatePolicy,
    config: &SolverConfig,
    sampler: &mut MemorySampler,
) -> (Outcome, SearchStats) {
    let mut bound = manhattan_sum(board);
    let mut engine = SearchEngine::new(BoundedPriorityFrontier::new(bound), policy);
    let mut stats = SearchStats::default();

    loop {
        if config
            .max_bound_iterations
            .is_some_and(|max| stats.bounds.len() as u32 >= max)
        {
            return (Outcome::LimitReached, stats);
        }

        let remaining = config
            .node_limit
            .map(|limit| limit.saturating_sub(stats.nodes_expanded));
        engine.set_node_limit(remaining);
        engine.frontier_mut().set_bound(bound);
        stats.bounds.push(bound);

        let pass = drive(&mut engine, board, sampler);
        stats.absorb_pass(engine.stats());

        match pass {
            PassOutcome::BoundExceeded { next_bound } => {
                info!("bound {} exhausted, raising to {}", bound, next_bound);
                bound = next_bound;
            }
            other => return (conclude(&engine, other), stats),
        }
    }
}

fn drive<F: Frontier>(engine: &mut SearchEngine<F>, board: &Board, sampler: &mut MemorySampler) -> PassOutcome {
    engine.start(*board);
    loop {
        if let Some(outcome) = engine.step() {
            return outcome;
        }
        sampler.observe();
    }
}

fn conclude<F: Frontier>(engine: &SearchEngine<F>, pass: PassOutcome) -> Outcome {
    match pass {
        PassOutcome::GoalFound(id) => Outcome::Solved {
            path: engine.path_to(id),
        },
        PassOutcome::Exhausted => Outcome::Unsolvable,
        PassOutcome::LimitReached => Outcome::LimitReached,
        PassOutcome::BoundExceeded { .. } => {
            unreachable!("bounded passes are resolved by the iterative deepening loop")
        }
    }
}

/// Samples the memory probe every `interval` engine steps and keeps the peak.
struct MemorySampler {
    probe: fn() -> Option<u64>,
    interval: u64,
    steps_since_sample: u64,
    peak: Option<u64>,
}

impl MemorySampler {
    fn new(config: &SolverConfig) -> Self {
        let mut sampler = MemorySampler {
            probe: config.memory_probe,
            interval: config.memory_sample_interval.max(1),
            steps_since_sample: 0,
            peak: None,
        };
        sampler.sample();
        sampler
    }

    fn observe(&mut self) {
        self.steps_since_sample += 1;
        if self.steps_since_sample >= self.interval {
            self.steps_since_sample = 0;
            self.sample();
        }
    }

    fn sample(&mut self) {
        if let Some(kib) = (self.probe)() {
            self.peak = Some(self.peak.map_or(kib, |p| p.max(kib)));
        }
    }
}
