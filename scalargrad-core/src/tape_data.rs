// src/tape_data.rs
use std::fmt;

use crate::autograd::BackwardOp;
use crate::config::TapeConfig;
use crate::ops::traits::GradNumeric;

/// Identity of a node: its index in the tape's arena.
///
/// Two nodes with equal `data` are still distinct nodes; identity is never
/// derived from the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its tape (construction order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage for a single scalar node.
#[derive(Debug, Clone)]
pub struct NodeData<T: GradNumeric> {
    /// Forward value.
    pub(crate) data: T,
    /// Accumulated gradient of the last backward root with respect to this node.
    pub(crate) grad: T,
    /// Local gradient rule and parent links. `None` for leaves.
    pub(crate) grad_fn: Option<BackwardOp>,
    /// Truncation epoch the node was recorded in.
    pub(crate) epoch: u32,
}

impl<T: GradNumeric> NodeData<T> {
    fn new(data: T, grad_fn: Option<BackwardOp>, epoch: u32) -> Self {
        NodeData {
            data,
            grad: T::zero(),
            grad_fn,
            epoch,
        }
    }
}

/// Arena holding every node recorded on a tape.
///
/// Wrapped in `Rc<RefCell<TapeData>>` by [`Tape`](crate::Tape). Nodes are
/// only ever appended, and a node can only reference nodes recorded before it,
/// so the parent relation is acyclic by construction.
#[derive(Debug)]
pub struct TapeData<T: GradNumeric> {
    pub(crate) nodes: Vec<NodeData<T>>,
    pub(crate) config: TapeConfig,
    /// Bumped by every truncation that drops nodes. A slot refilled after a
    /// truncation gets the new epoch, so stale handles to the old node are
    /// told apart from handles to the new one.
    pub(crate) epoch: u32,
}

impl<T: GradNumeric> TapeData<T> {
    pub(crate) fn new(config: TapeConfig) -> Self {
        TapeData {
            nodes: Vec::new(),
            config,
            epoch: 0,
        }
    }

    pub(crate) fn push_leaf(&mut self, data: T) -> NodeId {
        self.push(NodeData::new(data, None, self.epoch))
    }

    /// Records an interior node. Every input of `grad_fn` must already be on the tape.
    pub(crate) fn push_node(&mut self, data: T, grad_fn: BackwardOp) -> NodeId {
        debug_assert!(grad_fn.inputs().iter().all(|id| id.0 < self.nodes.len()));
        self.push(NodeData::new(data, Some(grad_fn), self.epoch))
    }

    fn push(&mut self, node: NodeData<T>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData<T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData<T> {
        &mut self.nodes[id.0]
    }

    /// Looks up the node behind a `Value` handle.
    ///
    /// # Panics
    /// Panics if the node was dropped by [`TapeData::truncate`].
    pub(crate) fn live_node(&self, id: NodeId, epoch: u32) -> &NodeData<T> {
        self.check_live(id, epoch);
        &self.nodes[id.0]
    }

    /// Mutable counterpart of [`TapeData::live_node`].
    pub(crate) fn live_node_mut(&mut self, id: NodeId, epoch: u32) -> &mut NodeData<T> {
        self.check_live(id, epoch);
        &mut self.nodes[id.0]
    }

    fn check_live(&self, id: NodeId, epoch: u32) {
        match self.nodes.get(id.0) {
            Some(node) if node.epoch == epoch => {}
            _ => panic!("value {} was discarded by a tape truncation", id),
        }
    }

    /// Drops every node recorded at index `len` or later. Returns the number
    /// of nodes dropped.
    ///
    /// Kept nodes only reference earlier nodes, so the remaining prefix is a
    /// complete graph.
    pub(crate) fn truncate(&mut self, len: usize) -> usize {
        let dropped = self.nodes.len().saturating_sub(len);
        if dropped > 0 {
            self.nodes.truncate(len);
            self.epoch = self.epoch.wrapping_add(1);
        }
        dropped
    }

    pub(crate) fn zero_grad_all(&mut self) {
        for node in &mut self.nodes {
            node.grad = T::zero();
        }
    }
}
