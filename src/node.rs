//! Search nodes and the arena that owns them.
//!
//! Nodes reference their parent by [`NodeId`] rather than by pointer. The arena
//! keeps every node of one search pass alive, so any lineage can be walked back
//! to the root after the pass ends, and the whole tree is released together.

use crate::engine::{Action, Board};

/// Handle to a node stored in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A board plus the metadata needed to rebuild the path that reached it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub board: Board,
    /// Parent handle (`None` for the root).
    pub parent: Option<NodeId>,
    /// The move that produced this node from its parent (`None` for the root).
    pub action: Option<Action>,
    /// Tree depth (root = 0). Equals the path cost, every move costs one.
    pub depth: u32,
}

/// Append-only store of the nodes generated by one search pass.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Stores a root node (depth 0, no parent).
    pub fn push_root(&mut self, board: Board) -> NodeId {
        self.insert(SearchNode {
            board,
            parent: None,
            action: None,
            depth: 0,
        })
    }

    /// Stores a child of `parent`, reached by `action`, one level deeper.
    ///
    /// # Panics
    /// Panics if `parent` was not issued by this arena.
    pub fn push_child(&mut self, parent: NodeId, board: Board, action: Action) -> NodeId {
        let depth = self.get(parent).depth + 1;
        self.insert(SearchNode {
            board,
            parent: Some(parent),
            action: Some(action),
            depth,
        })
    }

    fn insert(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// # Panics
    /// Panics if `id` was not issued by this arena.
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Actions from the root to `id`, in the order they are played.
    ///
    /// Walks parent links up to the root and reverses the collected actions.
    pub fn path_to(&self, id: NodeId) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.get(id).depth as usize);
        let mut current = self.get(id);
        while let (Some(parent), Some(action)) = (current.parent, current.action) {
            actions.push(action);
            current = self.get(parent);
        }
        actions.reverse();
        actions
    }

    /// Drops every node. Handles issued before the call must not be used again.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
