use tracing::trace;

use super::HashLife;
use crate::node::NodeId;
use crate::node::WorldOffset;

impl HashLife {
    /// Compute the inner node of `id`, `2^step` generations into the future.
    ///
    /// `id` must be at least of level 2. A `step` above `level - 2` is clamped to `level - 2`,
    /// the furthest a node can see into its own future.
    pub fn step(&mut self, id: NodeId, step: u8) -> NodeId {
        let level = self.level(id);
        assert!(level >= 2, "Cannot step a node of level {level}, need at least 2");

        let step = step.min(level - 2);

        if self.population(id) == 0 {
            // the nw quadrant of an empty node is the empty node of the level below
            return self.quadrants(id)[0];
        }

        if let Some(&res) = self.results.get(&(id, step)) {
            return res;
        }

        let res = if level == 2 {
            self.step_level_2(id)
        } else {
            self.step_node(id, level, step)
        };

        self.results.insert((id, step), res);

        res
    }

    /// Like [`HashLife::step`], also returning how far the north-west corner moved.
    pub(crate) fn step_offset(&mut self, id: NodeId, step: u8) -> (NodeId, WorldOffset) {
        let level = self.level(id);

        (self.step(id, step), 1 << (level - 2))
    }

    /// One generation of a 4x4 region, giving its middle 2x2.
    fn step_level_2(&mut self, id: NodeId) -> NodeId {
        let grid = self.grid(id).map(|row| row.map(|cell| self.population(cell) as u8));

        let next = |x: usize, y: usize| {
            let mut neighbors = 0;

            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    if (nx, ny) != (x, y) {
                        neighbors += grid[ny][nx];
                    }
                }
            }

            let alive = grid[y][x] == 1;
            NodeId::leaf(neighbors == 3 || (alive && neighbors == 2))
        };

        self.combine(next(1, 1), next(2, 1), next(1, 2), next(2, 2))
    }

    /// The macrocell recursion.
    ///
    /// The node is cut into nine overlapping subsquares of half its width, `n[y][x]`:
    ///
    /// ```notrust
    ///   +-----+-----+-----+-----+
    ///   |    n00    |    n02    |
    ///   |     +----n01----+     |
    ///   +----n10---n11---n12----+
    ///   |     +----n21----+     |
    ///   |    n20    |    n22    |
    ///   +-----+-----+-----+-----+
    /// ```
    ///
    /// Each is stepped, then the four quadrants of the result are assembled from the pieces.
    fn step_node(&mut self, id: NodeId, level: u8, step: u8) -> NodeId {
        let grid = self.grid(id);

        let mut n = [[NodeId::DEAD; 3]; 3];
        for y in 0..3 {
            for x in 0..3 {
                let sub = self.combine(grid[y][x], grid[y][x + 1], grid[y + 1][x], grid[y + 1][x + 1]);
                n[y][x] = self.step(sub, step);
            }
        }

        let mut quads = [NodeId::DEAD; 4];

        if step < level - 2 {
            // The nine results are already `2^step` generations ahead. Stitch their inner corners
            // together.
            let quadrants = n.map(|row| row.map(|r| self.quadrants(r)));

            for (i, quad) in quads.iter_mut().enumerate() {
                let (x, y) = (i % 2, i / 2);

                *quad = self.combine(
                    quadrants[y][x][3],
                    quadrants[y][x + 1][2],
                    quadrants[y + 1][x][1],
                    quadrants[y + 1][x + 1][0],
                );
            }
        } else {
            // Full speed. The nine results are half way there, so step their overlaps again.
            for (i, quad) in quads.iter_mut().enumerate() {
                let (x, y) = (i % 2, i / 2);

                let sub = self.combine(n[y][x], n[y][x + 1], n[y + 1][x], n[y + 1][x + 1]);
                *quad = self.step(sub, step);
            }
        }

        self.combine_quadrants(quads)
    }

    /// Advance the pattern in `id` by `iterations` generations.
    ///
    /// The result is clipped, so its level depends on how far the pattern spread. An
    /// `iterations` of `0` returns `id` untouched.
    pub fn advance(&mut self, id: NodeId, iterations: u64) -> NodeId {
        self.advance_offset(id, iterations).0
    }

    /// Like [`HashLife::advance`], also returning how far the north-west corner moved.
    pub(crate) fn advance_offset(&mut self, id: NodeId, iterations: u64) -> (NodeId, WorldOffset) {
        if iterations == 0 {
            return (id, 0);
        }

        let mut id = id;
        let mut offset = 0;

        // Like binary exponentiation, jump by the highest powers of two first
        let digits = u64::BITS - iterations.leading_zeros();
        for bit in (0..digits).rev() {
            if iterations >> bit & 1 == 0 {
                continue;
            }

            let step = bit as u8;

            // Padding puts every live cell within the inner node. One more ring keeps them within
            // the result after spreading by up to `2^step` cells, as long as the node is at
            // least of level `step + 3`.
            let (padded, shift) = self.pad_offset(id);
            id = padded;
            offset += shift;

            loop {
                let (centered, shift) = self.center_offset(id);
                id = centered;
                offset += shift;

                if self.level(id) >= step + 3 {
                    break;
                }
            }

            trace!(step, level = self.level(id), "jumping {} generations", 1u64 << step);

            let (next, shift) = self.step_offset(id, step);
            id = next;
            offset += shift;
        }

        let (clipped, shift) = self.clip_offset(id);

        (clipped, offset + shift)
    }
}
