use crate::node::Node;

/// Scoring strategy for a [`PriorityQueue`](crate::PriorityQueue).
///
/// Lower scores are popped first. Any `Fn(&T) -> f64` is a scorer.
pub trait Score<T> {
    fn score(&self, item: &T) -> f64;
}

impl<T, F> Score<T> for F
where
    F: Fn(&T) -> f64,
{
    #[inline]
    fn score(&self, item: &T) -> f64 {
        self(item)
    }
}

/// Heuristic estimate of the remaining cost between two nodes.
///
/// Must never overestimate the true cost (admissible) for the search to
/// return shortest paths. This is not checked.
pub trait Heuristic {
    fn estimate(&self, from: &Node, to: &Node) -> f64;
}
