use std::collections::HashMap;

use crate::node::MAX_LEVEL;
use crate::node::Node;
use crate::node::NodeId;
use crate::node::NodeKey;
use crate::node::Quadrants;

mod convert;
mod shape;
mod step;

pub use shape::MIN_PADDED_LEVEL;

/// The hashlife engine.
///
/// Owns every node ever built along with the tables that make the algorithm fast:
///
/// * the canonicalization table, guaranteeing that structurally identical regions share one
///   [`NodeId`],
/// * the empty-region cache, one all-dead node per level,
/// * the generation cache, mapping `(node, step)` to the node's center `2^step` generations later.
///
/// Nodes are never freed individually. [`HashLife::clear`] drops everything at once.
pub struct HashLife {
    /// This is where all of our memory goes. Indexed by [`NodeId`].
    nodes: Vec<Node>,

    /// Canonicalization table
    table: HashMap<NodeKey, NodeId>,

    /// `zeros[level]` is the all-dead node of that level
    zeros: Vec<NodeId>,

    /// Generation cache
    results: HashMap<(NodeId, u8), NodeId>,
}

impl Default for HashLife {
    fn default() -> Self {
        Self::new()
    }
}

impl HashLife {
    /// Create an engine holding only the two leaves.
    pub fn new() -> Self {
        Self {
            nodes: Self::leaves(),
            table: HashMap::new(),
            zeros: vec![NodeId::DEAD],
            results: HashMap::new(),
        }
    }

    // Keep in sync with `NodeId::DEAD` and `NodeId::ALIVE`
    fn leaves() -> Vec<Node> {
        vec![Node::leaf(false), Node::leaf(true)]
    }

    /// Drop every node and every cached result.
    ///
    /// Any [`NodeId`] handed out before, except the two leaves, is invalid afterwards.
    pub fn clear(&mut self) {
        self.nodes = Self::leaves();
        self.table.clear();
        self.zeros.truncate(1);
        self.results.clear();
    }

    /// Look up the node behind `id`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn level(&self, id: NodeId) -> u8 {
        self.node(id).level()
    }

    pub fn population(&self, id: NodeId) -> u128 {
        self.node(id).population()
    }

    /// Number of nodes allocated, leaves included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 2
    }

    /// Number of memoized generation results
    pub fn cache_len(&self) -> usize {
        self.results.len()
    }

    /// The quadrants of `id`, which must not be a leaf.
    pub fn quadrants(&self, id: NodeId) -> Quadrants {
        let Some(children) = self.node(id).children() else {
            panic!("A leaf has no quadrants")
        };

        children
    }

    /// The sixteen grandchildren of `id` as a grid, `grid[y][x]`.
    ///
    /// ```notrust
    ///   nw.nw nw.ne | ne.nw ne.ne
    ///   nw.sw nw.se | ne.sw ne.se
    ///   ------------+------------
    ///   sw.nw sw.ne | se.nw se.ne
    ///   sw.sw sw.se | se.sw se.se
    /// ```
    pub(crate) fn grid(&self, id: NodeId) -> [[NodeId; 4]; 4] {
        let [nw, ne, sw, se] = self.quadrants(id).map(|q| self.quadrants(q));

        [
            [nw[0], nw[1], ne[0], ne[1]],
            [nw[2], nw[3], ne[2], ne[3]],
            [sw[0], sw[1], se[0], se[1]],
            [sw[2], sw[3], se[2], se[3]],
        ]
    }

    /// Returns the unique node whose quadrants are `nw`, `ne`, `sw` and `se`.
    ///
    /// All four must share the same level. Asking twice for the same quadrants yields the same
    /// [`NodeId`].
    pub fn combine(&mut self, nw: NodeId, ne: NodeId, sw: NodeId, se: NodeId) -> NodeId {
        let key = NodeKey([nw, ne, sw, se]);

        if let Some(&id) = self.table.get(&key) {
            return id;
        }

        let level = self.level(nw);
        assert!(
            [ne, sw, se].iter().all(|&q| self.level(q) == level),
            "Cannot combine quadrants of mismatched levels {:?}",
            key.0.map(|q| self.level(q))
        );
        assert!(level < MAX_LEVEL, "Node level would exceed {MAX_LEVEL}");

        let population = key.0.iter().map(|&q| self.population(q)).sum();

        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::branch(level + 1, population, key.0));
        self.table.insert(key, id);

        id
    }

    /// Like [`HashLife::combine`], taking the quadrants as an array.
    pub fn combine_quadrants(&mut self, [nw, ne, sw, se]: Quadrants) -> NodeId {
        self.combine(nw, ne, sw, se)
    }

    /// The all-dead node of `level`.
    pub fn zeros(&mut self, level: u8) -> NodeId {
        while self.zeros.len() <= level as usize {
            let z = self.zeros[self.zeros.len() - 1];
            let next = self.combine(z, z, z, z);

            self.zeros.push(next);
        }

        self.zeros[level as usize]
    }
}
