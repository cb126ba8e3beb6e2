//! The expansion loop shared by every strategy.
//!
//! [`SearchEngine`] is generic over a [`Frontier`]; pop order is the only thing
//! that differs between breadth-first, depth-first, best-first and the bounded
//! pass of iterative-deepening best-first. One call to [`SearchEngine::start`]
//! seeds a pass, repeated [`SearchEngine::step`] calls drive it to a terminal
//! [`PassOutcome`].

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::engine::{Action, Board};
use crate::frontier::Frontier;
use crate::heuristics::manhattan_sum;
use crate::node::{NodeArena, NodeId};

/// How a board that is already pending in the frontier is treated when it is
/// generated again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// The first path to reach a board wins; later paths are dropped.
    FirstDiscovery,
    /// A pending board reached again at a strictly smaller depth is pushed
    /// again; the superseded entry is skipped when it is popped.
    ReopenCheaper,
}

/// Terminal result of one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// The goal was popped. The handle points into the engine's arena.
    GoalFound(NodeId),
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// The frontier emptied after skipping nodes over the bound.
    /// `next_bound` is the smallest `f` seen above the current bound.
    BoundExceeded { next_bound: u32 },
    /// The node limit was hit before any other terminal state.
    LimitReached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Never started; no pass has been searched.
    Idle,
    /// Seeded with a root, no node popped yet.
    Ready,
    Running,
    Finished(PassOutcome),
}

/// Counters for one pass, updated as the pass runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub nodes_expanded: u64,
    pub max_frontier_size: usize,
    pub max_search_depth: u32,
    /// Frontier size when the pass finished.
    pub frontier_size: usize,
}

pub struct SearchEngine<F: Frontier> {
    frontier: F,
    arena: NodeArena,
    explored: HashSet<Board>,
    /// Boards currently in the frontier, with the depth they were pushed at.
    pending: HashMap<Board, u32>,
    policy: DuplicatePolicy,
    node_limit: Option<u64>,
    state: EngineState,
    stats: PassStats,
    min_exceeding: Option<u32>,
}

impl<F: Frontier> SearchEngine<F> {
    /// Creates an idle engine. Call [`SearchEngine::start`] before stepping.
    pub fn new(frontier: F, policy: DuplicatePolicy) -> Self {
        SearchEngine {
            frontier,
            arena: NodeArena::new(),
            explored: HashSet::new(),
            pending: HashMap::new(),
            policy,
            node_limit: None,
            state: EngineState::Idle,
            stats: PassStats::default(),
            min_exceeding: None,
        }
    }

    /// Caps the number of expansions in the following passes.
    pub fn set_node_limit(&mut self, limit: Option<u64>) {
        self.node_limit = limit;
    }

    /// Clears all state from any previous pass and seeds the frontier with `root`.
    pub fn start(&mut self, root: Board) {
        self.arena.clear();
        self.explored.clear();
        self.pending.clear();
        self.frontier.clear();
        self.stats = PassStats::default();
        self.min_exceeding = None;

        let id = self.arena.push_root(root);
        self.frontier.push(id, self.arena.get(id));
        self.pending.insert(root, 0);
        self.stats.max_frontier_size = self.frontier.len();
        self.state = EngineState::Ready;
    }

    /// Pops and processes one frontier entry.
    ///
    /// # Returns
    /// `None` while the pass is still running, otherwise the terminal outcome.
    /// Stepping a finished engine returns the same outcome again.
    ///
    /// # Panics
    /// Panics if [`SearchEngine::start`] was never called.
    pub fn step(&mut self) -> Option<PassOutcome> {
        match self.state {
            EngineState::Idle => panic!("SearchEngine::step called before start"),
            EngineState::Finished(outcome) => return Some(outcome),
            EngineState::Ready => {
                debug!("pass started (bound: {:?})", self.frontier.bound());
                self.state = EngineState::Running;
            }
            EngineState::Running => {}
        }

        let Some(id) = self.frontier.pop() else {
            let outcome = match self.min_exceeding {
                Some(next_bound) => PassOutcome::BoundExceeded { next_bound },
                None => PassOutcome::Exhausted,
            };
            return Some(self.finish(outcome));
        };

        let node = self.arena.get(id);
        let board = node.board;
        let depth = node.depth;

        // Superseded by a cheaper entry for the same board.
        if self.pending.get(&board).is_some_and(|&best| best < depth) {
            return None;
        }
        self.pending.remove(&board);
        if !self.explored.insert(board) {
            return None;
        }

        trace!("exploring state at depth {}:\n{}", depth, board);
        if board.is_goal() {
            return Some(self.finish(PassOutcome::GoalFound(id)));
        }

        if self
            .node_limit
            .is_some_and(|limit| self.stats.nodes_expanded >= limit)
        {
            return Some(self.finish(PassOutcome::LimitReached));
        }
        self.stats.nodes_expanded += 1;

        if let Some(bound) = self.frontier.bound() {
            let f = depth + manhattan_sum(&board);
            if f > bound {
                self.min_exceeding = Some(self.min_exceeding.map_or(f, |m| m.min(f)));
                return None;
            }
        }

        let mut children = board.successors();
        if self.frontier.reverses_successors() {
            children.reverse();
        }

        let child_depth = depth + 1;
        for (child, action) in children {
            if self.explored.contains(&child) {
                continue;
            }
            if let Some(&known) = self.pending.get(&child) {
                if self.policy == DuplicatePolicy::FirstDiscovery || child_depth >= known {
                    continue;
                }
            }
            let child_id = self.arena.push_child(id, child, action);
            self.frontier.push(child_id, self.arena.get(child_id));
            self.pending.insert(child, child_depth);
            self.stats.max_search_depth = self.stats.max_search_depth.max(child_depth);
        }

        self.stats.max_frontier_size = self.stats.max_frontier_size.max(self.frontier.len());
        None
    }

    /// Steps until the pass finishes.
    pub fn run(&mut self, root: Board) -> PassOutcome {
        self.start(root);
        loop {
            if let Some(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn finish(&mut self, outcome: PassOutcome) -> PassOutcome {
        self.stats.frontier_size = self.frontier.len();
        self.state = EngineState::Finished(outcome);
        debug!(
            "pass finished: {:?} after {} expansions",
            outcome, self.stats.nodes_expanded
        );
        outcome
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    pub fn frontier_mut(&mut self) -> &mut F {
        &mut self.frontier
    }

    /// Actions from the root to `id` in the current pass's arena.
    pub fn path_to(&self, id: NodeId) -> Vec<Action> {
        self.arena.path_to(id)
    }
}
