//! Frontier disciplines.
//!
//! A frontier only decides pop order. Duplicate suppression lives in the
//! search engine's hash sets, so every discipline here is a thin wrapper over a
//! std container holding [`NodeId`] handles.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::heuristics::manhattan_sum;
use crate::node::{NodeId, SearchNode};

/// The capability set the search engine needs from a container.
pub trait Frontier {
    /// Adds a node. `node` is the arena entry behind `id`, for disciplines that
    /// order by its contents.
    fn push(&mut self, id: NodeId, node: &SearchNode);

    /// Removes and returns the next node to expand, or `None` when empty.
    fn pop(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every pending entry.
    fn clear(&mut self);

    /// Upper limit on `depth + h` for a node to be expanded. `None` means unbounded.
    fn bound(&self) -> Option<u32> {
        None
    }

    /// Whether the engine should push successors in reverse generation order.
    ///
    /// A LIFO container pops the last push first, so reversing keeps the
    /// exploration order at Up, Down, Left, Right.
    fn reverses_successors(&self) -> bool {
        false
    }
}

/// LIFO discipline, used by depth-first search.
#[derive(Debug, Default)]
pub struct StackFrontier {
    stack: Vec<NodeId>,
}

impl StackFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for StackFrontier {
    fn push(&mut self, id: NodeId, _node: &SearchNode) {
        self.stack.push(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn clear(&mut self) {
        self.stack.clear();
    }

    fn reverses_successors(&self) -> bool {
        true
    }
}

/// FIFO discipline, used by breadth-first search.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    queue: VecDeque<NodeId>,
}

impl QueueFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for QueueFrontier {
    fn push(&mut self, id: NodeId, _node: &SearchNode) {
        self.queue.push_back(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Heap ordering key: `(f_cost, insertion_order)`.
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop the
/// lowest `f_cost` first; equal costs pop in insertion order.
type PriorityKey = Reverse<(u32, u64, NodeId)>;

/// Min-heap on `f = depth + manhattan_sum(board)`, ties broken first-in-first-out.
/// Used by best-first (A*) search.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<PriorityKey>,
    next_order: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The total cost estimate a node is ordered by.
    pub fn f_cost(node: &SearchNode) -> u32 {
        node.depth + manhattan_sum(&node.board)
    }

    /// Lowest `f_cost` currently pending.
    pub fn peek_cost(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse((f, _, _))| *f)
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, id: NodeId, node: &SearchNode) {
        let order = self.next_order;
        self.next_order += 1;
        self.heap.push(Reverse((Self::f_cost(node), order, id)));
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.next_order = 0;
    }
}

/// [`PriorityFrontier`] ordering plus a cost bound the engine checks before
/// expanding. Used by iterative-deepening best-first (IDA*) search.
#[derive(Debug, Default)]
pub struct BoundedPriorityFrontier {
    inner: PriorityFrontier,
    bound: u32,
}

impl BoundedPriorityFrontier {
    pub fn new(bound: u32) -> Self {
        BoundedPriorityFrontier {
            inner: PriorityFrontier::new(),
            bound,
        }
    }

    /// Replaces the bound for the next pass.
    pub fn set_bound(&mut self, bound: u32) {
        self.bound = bound;
    }
}

impl Frontier for BoundedPriorityFrontier {
    fn push(&mut self, id: NodeId, node: &SearchNode) {
        self.inner.push(id, node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.inner.pop()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn bound(&self) -> Option<u32> {
        Some(self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Board;
    use crate::node::NodeArena;

    /// Builds an arena holding the goal plus nodes at the given depths, all on
    /// the goal board so that `f_cost == depth`.
    fn arena_with_depths(depths: &[u32]) -> (NodeArena, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let root = arena.push_root(Board::goal());
        let mut ids = Vec::new();
        for &d in depths {
            let mut id = root;
            for _ in 0..d {
                id = arena.push_child(id, Board::goal(), crate::engine::Action::Up);
            }
            ids.push(id);
        }
        (arena, ids)
    }

    fn drain(frontier: &mut dyn Frontier) -> Vec<NodeId> {
        let mut out = Vec::new();
        while let Some(id) = frontier.pop() {
            out.push(id);
        }
        out
    }

    #[test]
    fn test_stack_is_lifo() {
        let (arena, ids) = arena_with_depths(&[0, 1, 2]);
        let mut frontier = StackFrontier::new();
        for &id in &ids {
            frontier.push(id, arena.get(id));
        }
        assert_eq!(frontier.len(), 3);
        assert_eq!(drain(&mut frontier), vec![ids[2], ids[1], ids[0]]);
        assert!(frontier.is_empty());
        assert!(frontier.reverses_successors());
    }

    #[test]
    fn test_queue_is_fifo() {
        let (arena, ids) = arena_with_depths(&[0, 1, 2]);
        let mut frontier = QueueFrontier::new();
        for &id in &ids {
            frontier.push(id, arena.get(id));
        }
        assert_eq!(drain(&mut frontier), ids);
        assert!(!frontier.reverses_successors());
        assert_eq!(frontier.bound(), None);
    }

    #[test]
    fn test_priority_pops_lowest_cost_first() {
        let (arena, ids) = arena_with_depths(&[3, 1, 2, 0]);
        let mut frontier = PriorityFrontier::new();
        for &id in &ids {
            frontier.push(id, arena.get(id));
        }
        assert_eq!(frontier.peek_cost(), Some(0));
        assert_eq!(drain(&mut frontier), vec![ids[3], ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_priority_ties_break_by_insertion_order() {
        let (arena, ids) = arena_with_depths(&[2, 2, 1, 2]);
        let mut frontier = PriorityFrontier::new();
        // Push in an order that disagrees with handle order.
        for &i in &[3usize, 0, 2, 1] {
            frontier.push(ids[i], arena.get(ids[i]));
        }
        assert_eq!(drain(&mut frontier), vec![ids[2], ids[3], ids[0], ids[1]]);
    }

    #[test]
    fn test_f_cost_includes_heuristic() {
        let mut arena = NodeArena::new();
        let board = Board::from_flat_sequence(&[1, 2, 5, 3, 4, 0, 6, 7, 8]).unwrap();
        let root = arena.push_root(board);
        assert_eq!(PriorityFrontier::f_cost(arena.get(root)), 3);
        let (child, action) = board.successors()[0];
        let id = arena.push_child(root, child, action);
        assert_eq!(PriorityFrontier::f_cost(arena.get(id)), 1 + manhattan_sum(&child));
    }

    #[test]
    fn test_bounded_priority_exposes_bound() {
        let (arena, ids) = arena_with_depths(&[2, 0]);
        let mut frontier = BoundedPriorityFrontier::new(5);
        assert_eq!(frontier.bound(), Some(5));
        frontier.set_bound(7);
        assert_eq!(frontier.bound(), Some(7));
        for &id in &ids {
            frontier.push(id, arena.get(id));
        }
        assert_eq!(drain(&mut frontier), vec![ids[1], ids[0]]);
    }

    #[test]
    fn test_clear_empties_frontier() {
        let (arena, ids) = arena_with_depths(&[0, 1]);
        let mut frontiers: Vec<Box<dyn Frontier>> = vec![
            Box::new(StackFrontier::new()),
            Box::new(QueueFrontier::new()),
            Box::new(PriorityFrontier::new()),
            Box::new(BoundedPriorityFrontier::new(0)),
        ];
        for frontier in frontiers.iter_mut() {
            for &id in &ids {
                frontier.push(id, arena.get(id));
            }
            frontier.clear();
            assert!(frontier.is_empty());
            assert_eq!(frontier.pop(), None);
        }
    }
}
