use crate::errors::SimulationError;
use crate::models::{Body, CentreOfMass};

use super::node::{EmptyNode, ForkNode, LeafNode, NodeId, NodeKind, QuadNode};

/// Acquire/release counters for one node kind. Read-only diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub attempts: u64,
    pub hits: u64,
    pub misses: u64,
    pub frees: u64,
}

/// Free-list pool of quadtree nodes, keyed by node kind.
///
/// The tree is torn down and rebuilt every simulation step. Instead of
/// allocating fresh nodes each time, the pool keeps released nodes on
/// per-kind free lists and reinitializes them in place on the next
/// acquire. Nodes live in a single backing slab and are addressed by
/// [`NodeId`]; an id stays valid for the lifetime of the pool.
///
/// Ownership contract: once an id has been released the caller must not
/// retain or dereference it. The pool does not defend against
/// reuse-after-release.
pub struct NodePool {
    nodes: Vec<QuadNode>,
    free: [Vec<NodeId>; NodeKind::COUNT],
    stats: [Option<PoolStats>; NodeKind::COUNT],
}

impl NodePool {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: [Vec::new(), Vec::new(), Vec::new()],
            stats: [None; NodeKind::COUNT],
        }
    }

    /// Shared pop-or-miss path. Registers the kind on first use, counts the
    /// attempt, and returns a reusable id on a hit.
    fn checkout(&mut self, kind: NodeKind) -> Option<NodeId> {
        let stats = self.stats[kind.index()].get_or_insert_with(PoolStats::default);
        stats.attempts += 1;
        match self.free[kind.index()].pop() {
            Some(id) => {
                stats.hits += 1;
                Some(id)
            }
            None => {
                stats.misses += 1;
                None
            }
        }
    }

    pub fn acquire_empty(&mut self, center_x: f64, center_y: f64, size: f64) -> NodeId {
        match self.checkout(NodeKind::Empty) {
            Some(id) => {
                if let QuadNode::Empty(empty) = &mut self.nodes[id] {
                    empty.set(center_x, center_y, size);
                }
                id
            }
            None => {
                self.nodes.push(QuadNode::Empty(EmptyNode::new(center_x, center_y, size)));
                self.nodes.len() - 1
            }
        }
    }

    /// Acquires a leaf holding `indices` (indices into `bodies`). A reused
    /// leaf keeps its bodies allocation.
    pub fn acquire_leaf(
        &mut self,
        center_x: f64,
        center_y: f64,
        size: f64,
        indices: &[usize],
        bodies: &[Body],
    ) -> NodeId {
        match self.checkout(NodeKind::Leaf) {
            Some(id) => {
                if let QuadNode::Leaf(leaf) = &mut self.nodes[id] {
                    leaf.set(center_x, center_y, size, indices, bodies);
                }
                id
            }
            None => {
                self.nodes
                    .push(QuadNode::Leaf(LeafNode::new(center_x, center_y, size, indices, bodies)));
                self.nodes.len() - 1
            }
        }
    }

    /// Acquires a fork over four existing children (nw, ne, sw, se order).
    /// Geometry and aggregates are derived from the children.
    pub fn acquire_fork(&mut self, nw: NodeId, ne: NodeId, sw: NodeId, se: NodeId) -> NodeId {
        let center_x = (self.nodes[nw].center_x() + self.nodes[ne].center_x()) / 2.0;
        let center_y = (self.nodes[nw].center_y() + self.nodes[sw].center_y()) / 2.0;
        let size = self.nodes[nw].size() * 2.0;
        let (mass, mass_x, mass_y, total) =
            self.aggregate_children([nw, ne, sw, se], center_x, center_y);
        match self.checkout(NodeKind::Fork) {
            Some(id) => {
                if let QuadNode::Fork(fork) = &mut self.nodes[id] {
                    fork.center_x = center_x;
                    fork.center_y = center_y;
                    fork.size = size;
                    fork.mass = mass;
                    fork.mass_x = mass_x;
                    fork.mass_y = mass_y;
                    fork.total = total;
                    fork.nw = nw;
                    fork.ne = ne;
                    fork.sw = sw;
                    fork.se = se;
                }
                id
            }
            None => {
                self.nodes.push(QuadNode::Fork(ForkNode {
                    center_x,
                    center_y,
                    size,
                    mass,
                    mass_x,
                    mass_y,
                    total,
                    nw,
                    ne,
                    sw,
                    se,
                }));
                self.nodes.len() - 1
            }
        }
    }

    /// Releases a node back to its kind's free list. A fork releases its
    /// four children first (explicit post-order traversal), so a whole
    /// subtree transfers to the pool in one call.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnregisteredPool`] when the node's kind
    /// has never been acquired from — a teardown bug that must surface.
    pub fn release(&mut self, id: NodeId) -> Result<(), SimulationError> {
        let children = match &self.nodes[id] {
            QuadNode::Fork(fork) => Some(fork.children()),
            _ => None,
        };
        if let Some(children) = children {
            for child in children {
                self.release(child)?;
            }
        }
        let kind = self.nodes[id].kind();
        match &mut self.stats[kind.index()] {
            Some(stats) => {
                stats.frees += 1;
                self.free[kind.index()].push(id);
                Ok(())
            }
            None => Err(SimulationError::UnregisteredPool(kind)),
        }
    }

    /// Recomputes a fork's cached aggregates from its current children.
    pub(crate) fn refresh_fork(&mut self, id: NodeId) {
        let (children, center_x, center_y) = match &self.nodes[id] {
            QuadNode::Fork(fork) => (fork.children(), fork.center_x, fork.center_y),
            _ => return,
        };
        let (mass, mass_x, mass_y, total) = self.aggregate_children(children, center_x, center_y);
        if let QuadNode::Fork(fork) = &mut self.nodes[id] {
            fork.mass = mass;
            fork.mass_x = mass_x;
            fork.mass_y = mass_y;
            fork.total = total;
        }
    }

    /// Mass-weighted aggregate over four children. A zero-mass child adds
    /// nothing to the weighted sum; with no mass anywhere the aggregate
    /// falls back to the geometric centre.
    fn aggregate_children(
        &self,
        children: [NodeId; 4],
        center_x: f64,
        center_y: f64,
    ) -> (f64, f64, f64, usize) {
        let mut mass = 0.0;
        let mut weighted_x = 0.0;
        let mut weighted_y = 0.0;
        let mut total = 0;
        for id in children {
            let node = &self.nodes[id];
            let m = node.mass();
            let (x, y) = node.com();
            mass += m;
            weighted_x += m * x;
            weighted_y += m * y;
            total += node.total();
        }
        if mass > 0.0 {
            (mass, weighted_x / mass, weighted_y / mass, total)
        } else {
            (0.0, center_x, center_y, total)
        }
    }

    /// Returns the node behind `id`.
    pub fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut QuadNode {
        &mut self.nodes[id]
    }

    /// Number of free instances currently available for `kind`; `None`
    /// until the kind is first registered by an acquire.
    pub fn pool_size(&self, kind: NodeKind) -> Option<usize> {
        self.stats[kind.index()].map(|_| self.free[kind.index()].len())
    }

    /// Acquire/release counters for `kind`; `None` until first acquire.
    pub fn stats(&self, kind: NodeKind) -> Option<PoolStats> {
        self.stats[kind.index()]
    }

    /// Total slots in the backing storage, free or live.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodePool {
    fn default() -> Self {
        Self::new()
    }
}
