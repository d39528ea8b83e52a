use std::fmt::Debug;

/// Signed world coordinates. Wide enough that a pattern advanced by `u64::MAX` generations still
/// has addressable cells.
pub type WorldOffset = i128;

/// Largest level a [`Node`] may reach. A node of this level spans `2^MAX_LEVEL` cells on a side,
/// which still leaves headroom in a [`WorldOffset`].
pub const MAX_LEVEL: u8 = 120;

/// Handle to a [`Node`] owned by a [`crate::hashlife::HashLife`] arena.
///
/// Nodes are hash-consed, so two handles compare equal exactly when they refer to the same
/// region: same level, same cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The canonical dead cell
    pub const DEAD: NodeId = NodeId(0);

    /// The canonical live cell
    pub const ALIVE: NodeId = NodeId(1);

    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "Out of memory!");

        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the leaf for a cell in state `alive`.
    pub fn leaf(alive: bool) -> Self {
        if alive { Self::ALIVE } else { Self::DEAD }
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::DEAD => write!(f, "#dead"),
            Self::ALIVE => write!(f, "#alive"),
            NodeId(i) => write!(f, "#{i}"),
        }
    }
}

/// The four quadrants of a node, in `[nw, ne, sw, se]` order. `x` grows east, `y` grows south.
pub type Quadrants = [NodeId; 4];

/// Lookup key of the canonicalization table.
///
/// It is the identity of the four children, nothing derived from them, so two distinct
/// combinations can never be merged by accident.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeKey(pub(crate) Quadrants);

/// A square region of `2^level` cells on a side.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Node {
    level: u8,

    /// Number of live cells in the region
    population: u128,

    /// `None` for the two leaves
    children: Option<Quadrants>,
}

impl Node {
    pub(crate) const fn leaf(alive: bool) -> Self {
        Self {
            level: 0,
            population: alive as u128,
            children: None,
        }
    }

    pub(crate) const fn branch(level: u8, population: u128, children: Quadrants) -> Self {
        Self {
            level,
            population,
            children: Some(children),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn population(&self) -> u128 {
        self.population
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.population == 0
    }

    /// The quadrants of this node, `None` for a leaf.
    pub fn children(&self) -> Option<Quadrants> {
        self.children
    }

    /// Side length in cells
    pub fn side(&self) -> WorldOffset {
        1 << self.level
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = 1u128 << self.level;

        match self.children {
            None => write!(f, "Leaf({})", if self.population == 1 { "alive" } else { "dead" }),
            Some([nw, ne, sw, se]) => write!(
                f,
                "Node(level: {}, {side}x{side}, population: {}) [nw: {nw:?}, ne: {ne:?}, sw: {sw:?}, se: {se:?}]",
                self.level, self.population
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Node;
    use super::NodeId;

    #[test]
    fn leaves() {
        assert_eq!(NodeId::leaf(true), NodeId::ALIVE);
        assert_eq!(NodeId::leaf(false), NodeId::DEAD);

        let alive = Node::leaf(true);
        assert!(alive.is_leaf());
        assert_eq!(alive.population(), 1);
        assert_eq!(alive.side(), 1);

        let dead = Node::leaf(false);
        assert!(dead.is_empty());
        assert_eq!(dead.children(), None);
    }

    #[test]
    fn debug_format() {
        let node = Node::branch(1, 2, [NodeId::ALIVE, NodeId::DEAD, NodeId::DEAD, NodeId::ALIVE]);

        assert_eq!(
            format!("{node:?}"),
            "Node(level: 1, 2x2, population: 2) [nw: #alive, ne: #dead, sw: #dead, se: #alive]"
        );
    }
}
