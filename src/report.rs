//! Final statistics of a solve and their text rendering.
//!
//! The rendering follows the classic key/value block (`path_to_goal:`,
//! `cost_of_path:`, `nodes_expanded:` ...) so output can be diffed against
//! other 8-puzzle solvers.

use crate::engine::{Action, Board};
use crate::search::PassStats;
use crate::solver::Strategy;
use std::fmt;
use std::time::Duration;

/// How a solve ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Goal reached; `path` lists the moves from the initial board.
    Solved { path: Vec<Action> },
    /// Every reachable board was explored without meeting the goal.
    Unsolvable,
    /// A configured node or iteration cap stopped the search first.
    LimitReached,
}

/// Statistics collected over a whole solve (all passes for IDA*).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStats {
    pub nodes_expanded: u64,
    /// Frontier size when the final pass ended.
    pub fringe_size: usize,
    pub max_fringe_size: usize,
    /// Depth of the goal node, if one was reached.
    pub search_depth: Option<u32>,
    pub max_search_depth: u32,
    pub running_time: Duration,
    /// Peak resident memory in KiB, when the platform reports it.
    pub max_ram_usage_kib: Option<u64>,
    /// IDA* bound used for each pass, in order. Empty for other strategies.
    pub bounds: Vec<u32>,
}

impl SearchStats {
    /// Folds one engine pass into the totals.
    pub fn absorb_pass(&mut self, pass: &PassStats) {
        self.nodes_expanded += pass.nodes_expanded;
        self.fringe_size = pass.frontier_size;
        self.max_fringe_size = self.max_fringe_size.max(pass.max_frontier_size);
        self.max_search_depth = self.max_search_depth.max(pass.max_search_depth);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub initial: Board,
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn path(&self) -> Option<&[Action]> {
        match &self.outcome {
            Outcome::Solved { path } => Some(path.as_slice()),
            _ => None,
        }
    }

    /// Every move costs one, so this is the path length.
    pub fn cost_of_path(&self) -> Option<usize> {
        self.path().map(|p| p.len())
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved { .. })
    }
}

/// Renders actions as `['Up', 'Left']`.
pub fn format_path(path: &[Action]) -> String {
    let names: Vec<String> = path.iter().map(|a| format!("'{}'", a)).collect();
    format!("[{}]", names.join(", "))
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        match &self.outcome {
            Outcome::Solved { path } => {
                writeln!(f, "path_to_goal: {}", format_path(path))?;
                writeln!(f, "cost_of_path: {}", path.len())?;
            }
            Outcome::Unsolvable => writeln!(f, "path_to_goal: no solution")?,
            Outcome::LimitReached => writeln!(f, "path_to_goal: search limit reached")?,
        }
        writeln!(f, "nodes_expanded: {}", stats.nodes_expanded)?;
        writeln!(f, "fringe_size: {}", stats.fringe_size)?;
        writeln!(f, "max_fringe_size: {}", stats.max_fringe_size)?;
        if let Some(depth) = stats.search_depth {
            writeln!(f, "search_depth: {}", depth)?;
        }
        writeln!(f, "max_search_depth: {}", stats.max_search_depth)?;
        if !stats.bounds.is_empty() {
            let bounds: Vec<String> = stats.bounds.iter().map(|b| b.to_string()).collect();
            writeln!(f, "bounds: [{}]", bounds.join(", "))?;
        }
        writeln!(f, "running_time: {:.8}", stats.running_time.as_secs_f64())?;
        match stats.max_ram_usage_kib {
            Some(kib) => write!(f, "max_ram_usage: {:.8}", kib as f64 / 1024.0),
            None => write!(f, "max_ram_usage: unavailable"),
        }
    }
}
