pub mod common;
pub mod pathfinding;

pub use common::GraphView;
pub use pathfinding::{bfs, dijkstra, PathResult};
