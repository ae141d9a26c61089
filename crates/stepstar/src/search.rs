use crate::Point;
use crate::error::Result;
use crate::graph::Graph;
use crate::heuristic::HeuristicKind;
use crate::node::NodeId;
use crate::queue::PriorityQueue;
use crate::traits::Heuristic;

/// Search engine options.
///
/// The default uses [`HeuristicKind::Manhattan`]; pick another heuristic with
/// [`with_heuristic`](Self::with_heuristic).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions<H = HeuristicKind> {
    /// Distance estimate used to order the frontier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heuristic: H,
    /// When the goal is unreachable, report the path to the reachable node
    /// closest to it instead of an empty path.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closest: bool,
    /// Maximum number of frontier pops per [`AStar::step`] call.
    #[cfg_attr(feature = "serde", serde(default = "default_max_step_times"))]
    pub max_step_times: usize,
}

const DEFAULT_MAX_STEP_TIMES: usize = 30;

#[cfg(feature = "serde")]
fn default_max_step_times() -> usize {
    DEFAULT_MAX_STEP_TIMES
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::default(),
            closest: false,
            max_step_times: DEFAULT_MAX_STEP_TIMES,
        }
    }
}

impl<H> SearchOptions<H> {
    /// Same options with a different heuristic.
    pub fn with_heuristic<H2: Heuristic>(self, heuristic: H2) -> SearchOptions<H2> {
        SearchOptions {
            heuristic,
            closest: self.closest,
            max_step_times: self.max_step_times,
        }
    }
}

/// Endpoints and progress of the search in flight.
#[derive(Copy, Clone, Debug)]
struct Session {
    start: NodeId,
    end: NodeId,
    closest: NodeId,
}

/// A* search that runs in bounded slices.
///
/// [`search`](Self::search) sets up a query, then each [`step`](Self::step)
/// call expands at most `max_step_times` nodes and returns whether the search
/// is still running. When it ends, the callback receives the number of frames
/// (`step` calls) the search took and the path from start to goal, both
/// inclusive.
///
/// ```
/// use std::cell::RefCell;
/// use stepstar::{AStar, Graph, GraphOptions, Point, SearchOptions};
///
/// let graph = Graph::new(&[[1u32, 1, 1], [1, 0, 1], [1, 1, 1]], GraphOptions::default())?;
/// let found = RefCell::new(Vec::new());
/// let options = SearchOptions::default();
/// let mut astar = AStar::new(graph, |_, path| *found.borrow_mut() = path, options);
///
/// astar.search(Point::new(0, 0), Point::new(2, 2))?;
/// while astar.step() {}
///
/// assert_eq!(found.borrow().len(), 5);
/// # Ok::<(), stepstar::Error>(())
/// ```
pub struct AStar<H, F> {
    graph: Graph,
    open: PriorityQueue<NodeId>,
    heuristic: H,
    closest: bool,
    max_step_times: usize,
    callback: F,
    session: Option<Session>,
    frames: u32,
    nbuf: Vec<NodeId>,
}

impl<H, F> AStar<H, F>
where
    H: Heuristic,
    F: FnMut(u32, Vec<Point>),
{
    /// Create an idle engine that owns `graph` and reports results to
    /// `callback`.
    pub fn new(graph: Graph, callback: F, options: SearchOptions<H>) -> Self {
        let max_step_times = if options.max_step_times == 0 {
            log::warn!("max_step_times of 0 would never make progress, using 1");
            1
        } else {
            options.max_step_times
        };
        Self {
            graph,
            open: PriorityQueue::new(),
            heuristic: options.heuristic,
            closest: options.closest,
            max_step_times,
            callback,
            session: None,
            frames: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The graph being searched.
    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the graph, e.g. to clean it after a search.
    #[inline]
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Give the graph back, dropping the engine.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Whether a search is in flight.
    #[inline]
    pub fn is_searching(&self) -> bool {
        self.session.is_some()
    }

    /// Frames consumed by the current (or last) search.
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Number of nodes waiting in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    /// Begin a search from `start` to `end`.
    ///
    /// Any search already in flight is abandoned without invoking the
    /// callback, and state left behind by earlier searches is cleaned.
    pub fn search(&mut self, start: Point, end: Point) -> Result<()> {
        let start = self.graph.try_id_at(start)?;
        let end = self.graph.try_id_at(end)?;

        if self.session.is_some() {
            log::debug!("restarting search after {} frames", self.frames);
        }
        self.graph.clean_dirty();
        self.open.clear();

        let h = self
            .heuristic
            .estimate(self.graph.node(start), self.graph.node(end));
        let node = self.graph.node_mut(start);
        node.h = h;
        node.h_known = true;
        node.f = h;
        self.graph.mark_dirty(start);
        self.open.push(start, &self.graph);

        self.frames = 0;
        self.session = Some(Session {
            start,
            end,
            closest: start,
        });

        log::debug!(
            "search {} -> {}",
            self.graph.node(start),
            self.graph.node(end)
        );
        Ok(())
    }

    /// Advance the search by at most `max_step_times` expansions.
    ///
    /// Returns `true` while the search needs more frames. Returns `false`
    /// once it has finished (the callback has run) or if no search is in
    /// flight.
    pub fn step(&mut self) -> bool {
        let Some(mut session) = self.session else {
            return false;
        };
        self.frames += 1;

        let mut budget = self.max_step_times;
        while budget > 0 {
            budget -= 1;
            let Some(current) = self.open.pop(&self.graph) else {
                break;
            };

            if current == session.end {
                self.finish(session, Some(current));
                return false;
            }

            self.graph.node_mut(current).closed = true;
            self.graph.neighbors(current, &mut self.nbuf);

            for &neighbor in &self.nbuf {
                let (cur, next) = (self.graph.node(current), self.graph.node(neighbor));
                if next.closed() || next.is_wall() {
                    continue;
                }

                let g = cur.g() + next.cost_from(cur);
                let seen = next.visited();
                if seen && g >= next.g() {
                    continue;
                }

                let h = if next.h_known {
                    next.h
                } else {
                    self.heuristic.estimate(next, self.graph.node(session.end))
                };
                let node = self.graph.node_mut(neighbor);
                node.visited = true;
                node.parent = Some(current);
                node.h = h;
                node.h_known = true;
                node.g = g;
                node.f = g + h;
                self.graph.mark_dirty(neighbor);

                if self.closest {
                    let best = self.graph.node(session.closest);
                    if h < best.h() || (h == best.h() && g < best.g()) {
                        session.closest = neighbor;
                    }
                }

                if seen {
                    let queued = self.open.rescore(&neighbor, &self.graph);
                    assert!(queued, "visited open node {neighbor:?} missing from frontier");
                } else {
                    self.open.push(neighbor, &self.graph);
                }
            }
        }

        if self.open.is_empty() {
            let result = self.closest.then_some(session.closest);
            self.finish(session, result);
            return false;
        }

        self.session = Some(session);
        log::trace!(
            "frame {}: {} open, closest {}",
            self.frames,
            self.open.len(),
            self.graph.node(session.closest)
        );
        true
    }

    /// Step until the search finishes. Returns the frames it took.
    pub fn run(&mut self) -> u32 {
        while self.step() {}
        self.frames
    }

    /// End the search, reporting the path to `node` (or an empty path).
    fn finish(&mut self, session: Session, node: Option<NodeId>) {
        self.session = None;
        let path = node.map(|id| self.trace(id)).unwrap_or_default();
        log::debug!(
            "search from {} finished after {} frames: {}",
            self.graph.node(session.start),
            self.frames,
            match node {
                Some(id) => format!("{} nodes to {}", path.len(), self.graph.node(id)),
                None => "no path".to_string(),
            }
        );
        (self.callback)(self.frames, path);
    }

    /// Walk parent links back from `id`, returning start-to-`id` points.
    fn trace(&self, id: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let node = self.graph.node(c);
            path.push(node.pos());
            cur = node.parent();
        }
        path.reverse();
        path
    }
}
