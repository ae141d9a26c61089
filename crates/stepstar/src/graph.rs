use std::fmt;

use crate::Point;
use crate::error::{Error, Result};
use crate::node::{Node, NodeId};
use crate::traits::Score;

/// Graph construction options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphOptions {
    /// Whether diagonal moves are allowed (8-connected instead of 4).
    pub diagonal: bool,
}

/// A weighted grid graph that owns every [`Node`].
///
/// Nodes touched by a search are recorded in a dirty set so the next search
/// resets only those, instead of every node in the grid.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    dirty: Vec<NodeId>,
    width: usize,
    height: usize,
    diagonal: bool,
}

impl Graph {
    /// Build a graph from a rectangular weight matrix.
    ///
    /// `weights[x][y]` becomes the node at `Point::new(x, y)`. A weight of `0`
    /// is a wall. Rows of unequal length are rejected.
    pub fn new<R: AsRef<[u32]>>(weights: &[R], options: GraphOptions) -> Result<Self> {
        let width = weights.len();
        let height = weights.first().map_or(0, |row| row.as_ref().len());
        let mut nodes = Vec::with_capacity(width * height);

        for (x, row) in weights.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != height {
                return Err(Error::RaggedRow {
                    row: x,
                    expected: height,
                    found: row.len(),
                });
            }
            for (y, &weight) in row.iter().enumerate() {
                nodes.push(Node::new(Point::new(x as i32, y as i32), weight));
            }
        }

        log::debug!(
            "built {}x{} graph ({} walls, diagonal: {})",
            width,
            height,
            nodes.iter().filter(|n| n.is_wall()).count(),
            options.diagonal
        );

        Ok(Self {
            nodes,
            dirty: Vec::new(),
            width,
            height,
            diagonal: options.diagonal,
        })
    }

    /// Extent along `x` (number of rows in the input matrix).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along `y` (length of each input row).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.diagonal
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Id of the node at `p`, or `None` if out of bounds.
    #[inline]
    pub fn id_at(&self, p: Point) -> Option<NodeId> {
        if !self.contains(p) {
            return None;
        }
        Some(NodeId(p.x as usize * self.height + p.y as usize))
    }

    /// Like [`id_at`](Self::id_at), but reports the offending point.
    pub(crate) fn try_id_at(&self, p: Point) -> Result<NodeId> {
        self.id_at(p).ok_or(Error::OutOfBounds {
            point: p,
            width: self.width,
            height: self.height,
        })
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` was not handed out by this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// The node at `p`, or `None` if out of bounds.
    #[inline]
    pub fn node_at(&self, p: Point) -> Option<&Node> {
        self.id_at(p).map(|id| self.node(id))
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Append the in-bounds neighbours of `id` to `buf`, clearing it first.
    ///
    /// Order is west, east, south, north, then (when diagonal moves are
    /// enabled) south-west, south-east, north-west, north-east. Walls are
    /// included; filtering is up to the caller.
    pub fn neighbors(&self, id: NodeId, buf: &mut Vec<NodeId>) {
        const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

        buf.clear();
        let p = self.node(id).pos();
        let dirs: &[(i32, i32)] = &ORTHOGONAL;
        let extra: &[(i32, i32)] = if self.diagonal { &DIAGONAL } else { &[] };
        for &(dx, dy) in dirs.iter().chain(extra) {
            if let Some(n) = self.id_at(p.shift(dx, dy)) {
                buf.push(n);
            }
        }
    }

    /// Record that `id` carries search state. Duplicates are harmless.
    #[inline]
    pub fn mark_dirty(&mut self, id: NodeId) {
        self.dirty.push(id);
    }

    /// Number of entries in the dirty set, duplicates included.
    #[inline]
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Clean every dirty node and empty the dirty set.
    pub fn clean_dirty(&mut self) {
        for id in self.dirty.drain(..) {
            self.nodes[id.0].clean();
        }
    }

    /// Clean every node in the graph, dirty or not.
    pub fn reset(&mut self) {
        self.dirty.clear();
        for node in &mut self.nodes {
            node.clean();
        }
    }

    /// Total traversal cost of `path`, or `None` if it leaves the grid or
    /// two consecutive points are not adjacent.
    pub fn path_cost(&self, path: &[Point]) -> Option<f64> {
        let mut cost = 0.0;
        for pair in path.windows(2) {
            if !pair[0].is_adjacent(pair[1]) {
                return None;
            }
            let from = self.node_at(pair[0])?;
            let to = self.node_at(pair[1])?;
            cost += to.cost_from(from);
        }
        Some(cost)
    }
}

/// Scores nodes by their current `f`.
impl Score<NodeId> for Graph {
    #[inline]
    fn score(&self, id: &NodeId) -> f64 {
        self.nodes[id.0].f
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.height == 0 {
            return Ok(());
        }
        for (x, row) in self.nodes.chunks(self.height).enumerate() {
            if x > 0 {
                writeln!(f)?;
            }
            for (y, node) in row.iter().enumerate() {
                if y > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", node.weight())?;
            }
        }
        Ok(())
    }
}
