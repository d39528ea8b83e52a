use tracing::debug;

use crate::hashlife::HashLife;
use crate::node::NodeId;
use crate::node::WorldOffset;

/// A cell position, `x` growing east and `y` growing south.
pub type Point = (WorldOffset, WorldOffset);

/// A Life pattern placed on the infinite plane.
///
/// The engine only knows about cells relative to the corner of the root node, and padding or
/// clipping the root moves that corner. `World` keeps track of where the corner is, so that cells
/// come back out at the coordinates they went in at.
pub struct World {
    life: HashLife,

    root: NodeId,

    /// Position of the north-west corner of `root`
    origin: Point,

    /// Number of generations simulated so far
    generation: u128,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::from_points(&[])
    }

    /// Create a world whose live cells are `points`. Duplicates are ignored.
    pub fn from_points(points: &[Point]) -> Self {
        let mut life = HashLife::new();
        let (root, origin) = life.build_tree_offset(points);

        Self {
            life,
            root,
            origin,
            generation: 0,
        }
    }

    /// Run the world `iterations` generations forward.
    pub fn advance(&mut self, iterations: u64) {
        let (root, shift) = self.life.advance_offset(self.root, iterations);

        self.root = root;
        self.origin = (self.origin.0 + shift, self.origin.1 + shift);
        self.generation += iterations as u128;

        debug!(
            iterations,
            generation = self.generation,
            population = self.population(),
            level = self.level(),
            nodes = self.life.len(),
            cached = self.life.cache_len(),
            "advanced world"
        );
    }

    /// Every live cell. The order is unspecified, but no cell appears twice.
    pub fn points(&self) -> Vec<Point> {
        let (dx, dy) = self.origin;

        self.life
            .flatten(self.root)
            .into_iter()
            .map(|(x, y)| (x + dx, y + dy))
            .collect()
    }

    /// Every block of `2^level` cells holding at least one live cell, in units of blocks.
    ///
    /// Blocks are aligned on the root node, so when the root is not aligned on a multiple of
    /// `2^level` the blocks are rounded towards the north-west.
    pub fn blocks(&self, level: u8) -> Vec<Point> {
        let (dx, dy) = (self.origin.0 >> level, self.origin.1 >> level);

        self.life
            .flatten_at(self.root, level)
            .into_iter()
            .map(|(x, y)| (x + dx, y + dy))
            .collect()
    }

    /// Smallest and largest coordinates of live cells, `None` when the world is empty.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.points().into_iter().fold(None, |bounds, (x, y)| {
            let Some(((min_x, min_y), (max_x, max_y))) = bounds else {
                return Some(((x, y), (x, y)));
            };

            Some(((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y))))
        })
    }

    /// Bring the cells at `points` to life, keeping the current ones.
    pub fn set_cells(&mut self, points: &[Point]) {
        let mut all = self.points();
        all.extend_from_slice(points);

        let (root, origin) = self.life.build_tree_offset(&all);
        self.root = root;
        self.origin = origin;
    }

    /// Drop every node and memoized result, keeping only the current pattern.
    pub fn reset(&mut self) {
        let points = self.points();

        self.life.clear();

        let (root, origin) = self.life.build_tree_offset(&points);
        self.root = root;
        self.origin = origin;
    }

    pub fn population(&self) -> u128 {
        self.life.population(self.root)
    }

    pub fn generation(&self) -> u128 {
        self.generation
    }

    /// Level of the root node
    pub fn level(&self) -> u8 {
        self.life.level(self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn engine(&self) -> &HashLife {
        &self.life
    }
}
