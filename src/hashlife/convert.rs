use std::collections::HashMap;

use super::HashLife;
use crate::node::MAX_LEVEL;
use crate::node::NodeId;
use crate::node::WorldOffset;

type Point = (WorldOffset, WorldOffset);

/// Widest pattern, in cells, that [`HashLife::build_tree`] accepts. Leaves room below
/// [`MAX_LEVEL`] for padding and for the levels [`HashLife::advance`] adds.
pub const MAX_SPAN: WorldOffset = 1 << (MAX_LEVEL - 8);

impl HashLife {
    /// Build the padded tree holding the live cells `points`.
    ///
    /// Coordinates may lie anywhere, the pattern is moved so that its top-left corner is in the
    /// tree. An empty list gives an empty padded tree.
    ///
    /// # Panics
    ///
    /// The pattern must fit in [`MAX_SPAN`] cells on each side. Two points further apart than that
    /// would need a tree above [`MAX_LEVEL`]. The corner of the padded tree must also be a valid
    /// [`WorldOffset`], which fails for cells within a few tree widths of `WorldOffset::MIN`.
    pub fn build_tree(&mut self, points: &[Point]) -> NodeId {
        self.build_tree_offset(points).0
    }

    /// Like [`HashLife::build_tree`], also returning where the north-west corner of the tree sits
    /// in the coordinates of `points`.
    pub(crate) fn build_tree_offset(&mut self, points: &[Point]) -> (NodeId, Point) {
        let Some((min_x, min_y)) = points
            .iter()
            .copied()
            .reduce(|(ax, ay), (x, y)| (ax.min(x), ay.min(y)))
        else {
            let z = self.zeros(1);
            let (id, shift) = self.pad_offset(z);

            return (id, (shift, shift));
        };

        let span = |v: WorldOffset, min: WorldOffset| match v.checked_sub(min) {
            Some(d) if d < MAX_SPAN => d,
            _ => panic!("Pattern spans more than {MAX_SPAN} cells"),
        };

        let mut pattern: HashMap<Point, NodeId> = points
            .iter()
            .map(|&(x, y)| ((span(x, min_x), span(y, min_y)), NodeId::ALIVE))
            .collect();

        // Merge 2x2 groups into their parent until a single node is left. A single cell still
        // makes one pass, so the tree is never a bare leaf.
        let mut level = 0;
        while pattern.len() > 1 || level == 0 {
            let z = self.zeros(level);
            let mut next = HashMap::with_capacity(pattern.len() / 2 + 1);

            let keys: Vec<Point> = pattern.keys().copied().collect();
            for key in keys {
                // already merged with a neighbor
                if !pattern.contains_key(&key) {
                    continue;
                }

                let (x, y) = (key.0 & !1, key.1 & !1);
                let mut take = |dx, dy| pattern.remove(&(x + dx, y + dy)).unwrap_or(z);

                let parent = self.combine(take(0, 0), take(1, 0), take(0, 1), take(1, 1));
                next.insert((x >> 1, y >> 1), parent);
            }

            pattern = next;
            level += 1;
        }

        let Some((_, root)) = pattern.into_iter().next() else {
            unreachable!("merging never empties a non-empty pattern")
        };

        let (root, shift) = self.pad_offset(root);
        let corner = (min_x.checked_add(shift), min_y.checked_add(shift));
        let (Some(x), Some(y)) = corner else {
            panic!("Pattern lies too close to the edge of the plane");
        };

        (root, (x, y))
    }

    /// Every live cell of `id`, relative to its north-west corner.
    pub fn flatten(&self, id: NodeId) -> Vec<Point> {
        self.flatten_at(id, 0)
    }

    /// Every occupied block of `2^level` cells of `id`, in units of blocks.
    ///
    /// Empty regions are skipped without being visited.
    pub fn flatten_at(&self, id: NodeId, level: u8) -> Vec<Point> {
        let mut points = Vec::new();
        let mut stack = vec![(id, 0, 0)];

        while let Some((id, x, y)) = stack.pop() {
            let node = self.node(id);

            if node.is_empty() {
                continue;
            }

            if node.level() <= level {
                points.push((x >> level, y >> level));
                continue;
            }

            let half = node.side() >> 1;
            let [nw, ne, sw, se] = self.quadrants(id);

            stack.push((se, x + half, y + half));
            stack.push((sw, x, y + half));
            stack.push((ne, x + half, y));
            stack.push((nw, x, y));
        }

        points
    }
}
