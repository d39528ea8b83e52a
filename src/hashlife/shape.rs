//! Keeping the tree just large enough.
//!
//! Every operation here also reports how far the north-west corner of the region moved, in cells,
//! along both axes. The moves are symmetric, so one number covers `x` and `y`.

use super::HashLife;
use crate::node::NodeId;
use crate::node::WorldOffset;

/// Nodes at or below this level are always grown before stepping and never clipped.
pub const MIN_PADDED_LEVEL: u8 = 3;

impl HashLife {
    /// Place `id` in the middle of a node twice as wide, surrounded by dead cells.
    pub fn center(&mut self, id: NodeId) -> NodeId {
        self.center_offset(id).0
    }

    pub(crate) fn center_offset(&mut self, id: NodeId) -> (NodeId, WorldOffset) {
        let level = self.level(id);
        assert!(level > 0, "Cannot center a single cell");

        let [nw, ne, sw, se] = self.quadrants(id);
        let z = self.zeros(level - 1);

        let nw = self.combine(z, z, z, nw);
        let ne = self.combine(z, z, ne, z);
        let sw = self.combine(z, sw, z, z);
        let se = self.combine(se, z, z, z);

        let centered = self.combine(nw, ne, sw, se);

        (centered, -(1 << (level - 1)))
    }

    /// The node of half the width sitting in the middle of `id`.
    pub fn inner(&mut self, id: NodeId) -> NodeId {
        self.inner_offset(id).0
    }

    pub(crate) fn inner_offset(&mut self, id: NodeId) -> (NodeId, WorldOffset) {
        let level = self.level(id);
        assert!(level >= 2, "A node of level {level} has no inner node");

        let [nw, ne, sw, se] = self.quadrants(id);
        let [_, _, _, nw_se] = self.quadrants(nw);
        let [_, _, ne_sw, _] = self.quadrants(ne);
        let [_, sw_ne, _, _] = self.quadrants(sw);
        let [se_nw, _, _, _] = self.quadrants(se);

        let inner = self.combine(nw_se, ne_sw, sw_ne, se_nw);

        (inner, 1 << (level - 2))
    }

    /// Whether every live cell of `id` lies in its inner node.
    ///
    /// Holds when each quadrant has as many live cells as its innermost sub-quadrant.
    pub fn is_padded(&self, id: NodeId) -> bool {
        let [nw, ne, sw, se] = self.quadrants(id);

        // index of the sub-quadrant facing the center, per quadrant
        [(nw, 3), (ne, 2), (sw, 1), (se, 0)]
            .into_iter()
            .all(|(q, i)| self.population(q) == self.population(self.quadrants(q)[i]))
    }

    /// Grow `id` until it is padded and above [`MIN_PADDED_LEVEL`].
    pub fn pad(&mut self, id: NodeId) -> NodeId {
        self.pad_offset(id).0
    }

    pub(crate) fn pad_offset(&mut self, mut id: NodeId) -> (NodeId, WorldOffset) {
        let mut offset = 0;

        while self.level(id) <= MIN_PADDED_LEVEL || !self.is_padded(id) {
            let (centered, shift) = self.center_offset(id);

            id = centered;
            offset += shift;
        }

        (id, offset)
    }

    /// Strip the dead border off `id` while it stays padded and above [`MIN_PADDED_LEVEL`].
    pub fn clip(&mut self, id: NodeId) -> NodeId {
        self.clip_offset(id).0
    }

    pub(crate) fn clip_offset(&mut self, mut id: NodeId) -> (NodeId, WorldOffset) {
        let mut offset = 0;

        while self.level(id) > MIN_PADDED_LEVEL && self.is_padded(id) {
            let (inner, shift) = self.inner_offset(id);

            id = inner;
            offset += shift;
        }

        (id, offset)
    }
}
