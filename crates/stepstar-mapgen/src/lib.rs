//! Map generation for stepstar: random weight matrices to search on.
//!
//! Nothing here is needed to run a search; it only produces test data and
//! demo maps in the `[x][y]` layout [`stepstar::Graph::new`] expects.

pub mod mapgen;

pub use mapgen::{
    EightDirectionWalker, FLOOR, FourDirectionWalker, MapGen, RandomWalker, ScatterOptions, WALL,
    WeightMap, center, open_cell,
};
