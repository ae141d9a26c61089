//! Built-in distance heuristics.
//!
//! See <http://theory.stanford.edu/~amitp/GameProgramming/Heuristics.html>.

use std::f64::consts::SQRT_2;

use crate::Point;
use crate::node::Node;
use crate::traits::Heuristic;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    f64::from((a.x - b.x).abs() + (a.y - b.y).abs())
}

/// Octile distance: straight steps cost 1, diagonal steps cost √2.
#[inline]
pub fn diagonal(a: Point, b: Point) -> f64 {
    let dx = f64::from((a.x - b.x).abs());
    let dy = f64::from((a.y - b.y).abs());
    (dx + dy) + (SQRT_2 - 2.0) * dx.min(dy)
}

/// [`manhattan`] as a [`Heuristic`]. Admissible for 4-connected graphs only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: &Node, to: &Node) -> f64 {
        manhattan(from.pos(), to.pos())
    }
}

/// [`diagonal`] as a [`Heuristic`]. Admissible for 8-connected graphs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagonal;

impl Heuristic for Diagonal {
    #[inline]
    fn estimate(&self, from: &Node, to: &Node) -> f64 {
        diagonal(from.pos(), to.pos())
    }
}

/// A built-in heuristic picked at runtime, e.g. from configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Diagonal,
}

impl Heuristic for HeuristicKind {
    #[inline]
    fn estimate(&self, from: &Node, to: &Node) -> f64 {
        match self {
            HeuristicKind::Manhattan => Manhattan.estimate(from, to),
            HeuristicKind::Diagonal => Diagonal.estimate(from, to),
        }
    }
}
