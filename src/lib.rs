//! Conway's Game of Life on an unbounded plane, computed with hashlife.

pub mod config;
pub mod hashlife;
pub mod node;
pub mod pattern;
pub mod render;
pub mod world;

mod parse_util;

pub use hashlife::HashLife;
pub use node::NodeId;
pub use node::WorldOffset;
pub use world::Point;
pub use world::World;
