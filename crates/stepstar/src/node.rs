use std::f64::consts::SQRT_2;
use std::fmt;

use crate::Point;

/// Index of a [`Node`] in its [`Graph`](crate::Graph)'s arena.
///
/// Ids are only meaningful for the graph that handed them out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the graph's flat node list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single grid cell: its fixed position and weight plus the bookkeeping a
/// search writes into it.
#[derive(Clone, Debug)]
pub struct Node {
    pos: Point,
    weight: u32,
    pub(crate) f: f64,
    pub(crate) g: f64,
    pub(crate) h: f64,
    /// Whether `h` holds the estimate for the current search.
    pub(crate) h_known: bool,
    pub(crate) visited: bool,
    pub(crate) closed: bool,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(pos: Point, weight: u32) -> Self {
        Self {
            pos,
            weight,
            f: 0.0,
            g: 0.0,
            h: 0.0,
            h_known: false,
            visited: false,
            closed: false,
            parent: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    /// Traversal cost multiplier. Zero marks a wall.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.weight == 0
    }

    /// Cost of entering this node from the adjacent node `from`.
    ///
    /// Diagonal steps cost `weight * √2`, orthogonal steps cost `weight`.
    pub fn cost_from(&self, from: &Node) -> f64 {
        if self.pos.is_diagonal_to(from.pos) {
            f64::from(self.weight) * SQRT_2
        } else {
            f64::from(self.weight)
        }
    }

    /// Priority key, `g + h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Best known cost from the search start.
    #[inline]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Heuristic estimate to the search goal.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    #[inline]
    pub fn visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Predecessor on the best known path from the start.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return all search state to its initial values.
    pub fn clean(&mut self) {
        self.f = 0.0;
        self.g = 0.0;
        self.h = 0.0;
        self.h_known = false;
        self.visited = false;
        self.closed = false;
        self.parent = None;
    }

    /// Whether the node carries no state from a search.
    pub fn is_clean(&self) -> bool {
        self.f == 0.0
            && self.g == 0.0
            && self.h == 0.0
            && !self.h_known
            && !self.visited
            && !self.closed
            && self.parent.is_none()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.pos.x, self.pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_and_diagonal_cost() {
        let n = Node::new(Point::new(1, 1), 3);
        let west = Node::new(Point::new(0, 1), 1);
        let south_west = Node::new(Point::new(0, 0), 1);
        assert_eq!(n.cost_from(&west), 3.0);
        assert!((n.cost_from(&south_west) - 3.0 * SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn wall() {
        assert!(Node::new(Point::ZERO, 0).is_wall());
        assert!(!Node::new(Point::ZERO, 1).is_wall());
        assert_eq!(Node::new(Point::ZERO, 0).cost_from(&Node::new(Point::new(0, 1), 1)), 0.0);
    }

    #[test]
    fn clean_resets_search_state() {
        let mut n = Node::new(Point::new(4, 2), 2);
        n.f = 7.0;
        n.g = 3.0;
        n.h = 4.0;
        n.h_known = true;
        n.visited = true;
        n.closed = true;
        n.parent = Some(NodeId(3));
        assert!(!n.is_clean());

        n.clean();
        assert!(n.is_clean());
        assert_eq!(n.pos(), Point::new(4, 2));
        assert_eq!(n.weight(), 2);

        n.clean();
        assert!(n.is_clean());
    }

    #[test]
    fn display() {
        assert_eq!(Node::new(Point::new(3, 9), 1).to_string(), "[3 9]");
    }
}
