use crate::models::{Body, CentreOfMass};

/// Index of a node in the pool's backing storage.
pub type NodeId = usize;

/// The three node kinds; the pool keys its free lists by this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Empty,
    Leaf,
    Fork,
}

impl NodeKind {
    pub(crate) const COUNT: usize = 3;

    pub(crate) fn index(self) -> usize {
        match self {
            NodeKind::Empty => 0,
            NodeKind::Leaf => 1,
            NodeKind::Fork => 2,
        }
    }
}

/// One of a fork's four quadrants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    Nw,
    Ne,
    Sw,
    Se,
}

/// Resolves which quadrant of a region centred at (`center_x`, `center_y`)
/// the point (`x`, `y`) falls in.
///
/// Strictly greater-than on both axes: a point exactly on a centreline
/// resolves to the north/west side. Tree shapes depend on this tie-break
/// being reproduced exactly.
#[inline]
pub fn quadrant_for(x: f64, y: f64, center_x: f64, center_y: f64) -> Quadrant {
    let south = y > center_y;
    let east = x > center_x;
    match (south, east) {
        (true, true) => Quadrant::Se,
        (true, false) => Quadrant::Sw,
        (false, true) => Quadrant::Ne,
        (false, false) => Quadrant::Nw,
    }
}

/// A square region holding no bodies.
#[derive(Clone, Debug)]
pub struct EmptyNode {
    pub center_x: f64,
    pub center_y: f64,
    pub size: f64,
}

impl EmptyNode {
    pub(crate) fn new(center_x: f64, center_y: f64, size: f64) -> Self {
        Self { center_x, center_y, size }
    }

    /// Reinitializes a pooled instance, equivalent to running the
    /// constructor in place.
    pub(crate) fn set(&mut self, center_x: f64, center_y: f64, size: f64) {
        self.center_x = center_x;
        self.center_y = center_y;
        self.size = size;
    }
}

/// A square region holding bodies directly, as indices into the step's
/// body slice.
///
/// Holds more than one body only once the region has shrunk to
/// `MINIMUM_SIZE`; above that size the second insertion converts the leaf
/// into a fork.
#[derive(Clone, Debug)]
pub struct LeafNode {
    pub center_x: f64,
    pub center_y: f64,
    pub size: f64,
    pub mass: f64,
    pub mass_x: f64,
    pub mass_y: f64,
    pub bodies: Vec<usize>,
}

impl LeafNode {
    pub(crate) fn new(
        center_x: f64,
        center_y: f64,
        size: f64,
        indices: &[usize],
        all: &[Body],
    ) -> Self {
        let mut leaf = Self {
            center_x,
            center_y,
            size,
            mass: 0.0,
            mass_x: center_x,
            mass_y: center_y,
            bodies: indices.to_vec(),
        };
        leaf.recompute(all);
        leaf
    }

    /// Reinitializes a pooled instance, reusing the bodies allocation.
    pub(crate) fn set(
        &mut self,
        center_x: f64,
        center_y: f64,
        size: f64,
        indices: &[usize],
        all: &[Body],
    ) {
        self.center_x = center_x;
        self.center_y = center_y;
        self.size = size;
        self.bodies.clear();
        self.bodies.extend_from_slice(indices);
        self.recompute(all);
    }

    /// Recomputes the cached mass and centre of mass from the held bodies.
    /// With no bodies the aggregate degrades to the geometric centre at
    /// mass zero, the same view an empty region reports.
    pub(crate) fn recompute(&mut self, all: &[Body]) {
        let mut mass = 0.0;
        let mut weighted_x = 0.0;
        let mut weighted_y = 0.0;
        for &index in &self.bodies {
            let body = &all[index];
            mass += body.mass;
            weighted_x += body.mass * body.x;
            weighted_y += body.mass * body.y;
        }
        if mass > 0.0 {
            self.mass_x = weighted_x / mass;
            self.mass_y = weighted_y / mass;
        } else {
            self.mass_x = self.center_x;
            self.mass_y = self.center_y;
        }
        self.mass = mass;
    }
}

/// An internal region with four half-size children and cached aggregates.
#[derive(Clone, Debug)]
pub struct ForkNode {
    pub center_x: f64,
    pub center_y: f64,
    pub size: f64,
    pub mass: f64,
    pub mass_x: f64,
    pub mass_y: f64,
    pub total: usize,
    pub nw: NodeId,
    pub ne: NodeId,
    pub sw: NodeId,
    pub se: NodeId,
}

impl ForkNode {
    pub fn child(&self, quadrant: Quadrant) -> NodeId {
        match quadrant {
            Quadrant::Nw => self.nw,
            Quadrant::Ne => self.ne,
            Quadrant::Sw => self.sw,
            Quadrant::Se => self.se,
        }
    }

    pub(crate) fn set_child(&mut self, quadrant: Quadrant, child: NodeId) {
        match quadrant {
            Quadrant::Nw => self.nw = child,
            Quadrant::Ne => self.ne = child,
            Quadrant::Sw => self.sw = child,
            Quadrant::Se => self.se = child,
        }
    }

    /// Children in nw, ne, sw, se order.
    pub fn children(&self) -> [NodeId; 4] {
        [self.nw, self.ne, self.sw, self.se]
    }
}

/// A quadtree node: one of exactly three shapes over a square region.
/// All traversal logic switches exhaustively on these cases.
#[derive(Clone, Debug)]
pub enum QuadNode {
    Empty(EmptyNode),
    Leaf(LeafNode),
    Fork(ForkNode),
}

impl QuadNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            QuadNode::Empty(_) => NodeKind::Empty,
            QuadNode::Leaf(_) => NodeKind::Leaf,
            QuadNode::Fork(_) => NodeKind::Fork,
        }
    }

    pub fn center_x(&self) -> f64 {
        match self {
            QuadNode::Empty(empty) => empty.center_x,
            QuadNode::Leaf(leaf) => leaf.center_x,
            QuadNode::Fork(fork) => fork.center_x,
        }
    }

    pub fn center_y(&self) -> f64 {
        match self {
            QuadNode::Empty(empty) => empty.center_y,
            QuadNode::Leaf(leaf) => leaf.center_y,
            QuadNode::Fork(fork) => fork.center_y,
        }
    }

    /// Side length of the region this node covers.
    pub fn size(&self) -> f64 {
        match self {
            QuadNode::Empty(empty) => empty.size,
            QuadNode::Leaf(leaf) => leaf.size,
            QuadNode::Fork(fork) => fork.size,
        }
    }

    /// Number of bodies under this node.
    pub fn total(&self) -> usize {
        match self {
            QuadNode::Empty(_) => 0,
            QuadNode::Leaf(leaf) => leaf.bodies.len(),
            QuadNode::Fork(fork) => fork.total,
        }
    }
}

impl CentreOfMass for EmptyNode {
    fn mass(&self) -> f64 {
        0.0
    }

    fn com(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }
}

impl CentreOfMass for LeafNode {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn com(&self) -> (f64, f64) {
        (self.mass_x, self.mass_y)
    }
}

impl CentreOfMass for ForkNode {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn com(&self) -> (f64, f64) {
        (self.mass_x, self.mass_y)
    }
}

impl CentreOfMass for QuadNode {
    fn mass(&self) -> f64 {
        match self {
            QuadNode::Empty(empty) => empty.mass(),
            QuadNode::Leaf(leaf) => leaf.mass(),
            QuadNode::Fork(fork) => fork.mass(),
        }
    }

    fn com(&self) -> (f64, f64) {
        match self {
            QuadNode::Empty(empty) => empty.com(),
            QuadNode::Leaf(leaf) => leaf.com(),
            QuadNode::Fork(fork) => fork.com(),
        }
    }
}
