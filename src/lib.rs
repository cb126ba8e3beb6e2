//! # 8-Puzzle Solver Library
//!
//! This library solves the 3x3 sliding-tile puzzle by searching the graph of
//! reachable boards with one of four interchangeable strategies: breadth-first,
//! depth-first, best-first (A*) and iterative-deepening best-first (IDA*).
//!
//! It is used by two binaries:
//! - `solver`: Takes a strategy and a comma-separated board, prints the path to the
//!   goal and the search statistics.
//! - `strategy_evaluator`: Runs every strategy over a set of seeded random boards
//!   and compares their statistics.
//!
//! ## Modules
//! - `engine`: The immutable `Board`, the `Action` type, successor generation and
//!   seeded scrambles.
//! - `heuristics`: The Manhattan-distance estimate used by the cost-ordered strategies.
//! - `node`: Search nodes and the arena that keeps their parent links.
//! - `frontier`: The `Frontier` trait and its four disciplines.
//! - `search`: The single expansion loop (`SearchEngine`) all strategies share.
//! - `solver`: Strategy selection, the IDA* outer loop, timing and memory sampling.
//! - `report`: Final statistics and their text rendering.
//! - `error`: `InvalidBoardError`.
//! - `utils`: Board parsing and the peak-memory probe.

pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod node;
pub mod report;
pub mod search;
pub mod solver;
pub mod utils;

pub use engine::{Action, Board};
pub use error::InvalidBoardError;
pub use report::{Outcome, SearchReport, SearchStats};
pub use solver::{solve, solve_with_config, SolverConfig, Strategy};
