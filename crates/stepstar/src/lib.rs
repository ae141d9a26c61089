//! Interruptible A* pathfinding on weighted 2D grids.
//!
//! Instead of one blocking call, a search is advanced one bounded slice at a
//! time so it can share a frame loop or a cooperative scheduler with other
//! work:
//!
//! 1. Build a [`Graph`] from a weight matrix (`0` is a wall).
//! 2. Wrap it in an [`AStar`] engine together with a result callback.
//! 3. Call [`AStar::search`], then [`AStar::step`] until it returns `false`.
//!
//! The callback runs exactly once per search with the number of frames used
//! and the path, start and goal included. An unreachable goal yields an empty
//! path, or with [`SearchOptions::closest`] the path to the reachable node
//! nearest to the goal.
//!
//! # Building blocks
//!
//! | Type | Role |
//! |---|---|
//! | [`Node`] | One cell: position, weight and per-search state |
//! | [`PriorityQueue`] | Min-heap ordered by a [`Score`] strategy |
//! | [`Graph`] | Node arena, neighbour lookup, dirty-set reset |
//! | [`AStar`] | The stepped search engine |
//! | [`Heuristic`] | Distance estimate strategy ([`Manhattan`], [`Diagonal`]) |

mod error;
mod geom;
mod graph;
mod heuristic;
mod node;
mod queue;
mod search;
mod traits;

pub use error::{Error, Result};
pub use geom::Point;
pub use graph::{Graph, GraphOptions};
pub use heuristic::{Diagonal, HeuristicKind, Manhattan, diagonal, manhattan};
pub use node::{Node, NodeId};
pub use queue::PriorityQueue;
pub use search::{AStar, SearchOptions};
pub use traits::{Heuristic, Score};
