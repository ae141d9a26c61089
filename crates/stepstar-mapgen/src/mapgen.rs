//! Weight-matrix generators.
//!
//! Provides two generators:
//! - **Scattered walls**: each cell independently becomes a wall, otherwise
//!   it gets weight 1 (or a random odd weight up to 5).
//! - **Random walk cave**: starts from solid rock and carves open cells with
//!   a drunk walk from the centre, so every open cell is connected.

use rand::Rng;
use stepstar::Point;

/// Weight of an impassable cell.
pub const WALL: u32 = 0;

/// Weight of a plain open cell.
pub const FLOOR: u32 = 1;

/// A weight matrix indexed `[x][y]`, ready for `stepstar::Graph::new`.
pub type WeightMap = Vec<Vec<u32>>;

/// Trait for choosing a random neighbor during random-walk cave generation.
pub trait RandomWalker {
    /// Given a position `p`, return a random neighbor using `rng`.
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point;
}

/// Walks west, east, south or north.
///
/// Caves carved with it are connected under 4-way movement.
pub struct FourDirectionWalker;

impl RandomWalker for FourDirectionWalker {
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point {
        match rng.random_range(0..4u32) {
            0 => p.shift(-1, 0),
            1 => p.shift(1, 0),
            2 => p.shift(0, -1),
            _ => p.shift(0, 1),
        }
    }
}

/// Walks to any of the eight surrounding cells.
///
/// Caves carved with it are only guaranteed connected under diagonal
/// movement.
pub struct EightDirectionWalker;

impl RandomWalker for EightDirectionWalker {
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point {
        loop {
            let dx = rng.random_range(-1..=1);
            let dy = rng.random_range(-1..=1);
            if dx != 0 || dy != 0 {
                return p.shift(dx, dy);
            }
        }
    }
}

/// Settings for [`MapGen::scatter`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScatterOptions {
    /// Probability (0.0–1.0) that a cell is a wall.
    pub wall_frequency: f64,
    /// Give open cells a random weight of 1, 3 or 5 instead of always 1.
    pub weighted: bool,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            wall_frequency: 0.1,
            weighted: false,
        }
    }
}

/// Map generator producing [`WeightMap`]s from a random source.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    /// Create a new MapGen drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `width` x `height` map of scattered walls.
    pub fn scatter(&mut self, width: usize, height: usize, opts: &ScatterOptions) -> WeightMap {
        let p = opts.wall_frequency.clamp(0.0, 1.0);
        let mut walls = 0usize;
        let mut map = WeightMap::with_capacity(width);
        for _ in 0..width {
            let mut row = Vec::with_capacity(height);
            for _ in 0..height {
                let weight = if self.rng.random_bool(p) {
                    walls += 1;
                    WALL
                } else if opts.weighted {
                    self.rng.random_range(0..3u32) * 2 + 1
                } else {
                    FLOOR
                };
                row.push(weight);
            }
            map.push(row);
        }
        log::debug!("scattered {walls} walls over {width}x{height}");
        map
    }

    /// Generate a cave using random walk.
    ///
    /// The map starts as solid walls. Starting from the center of the grid,
    /// perform `walks` random walks, each setting visited cells to
    /// [`FLOOR`]. Carving stops once `fill_pct` (0.0–1.0) of the area is
    /// open.
    pub fn random_walk_cave(
        &mut self,
        width: usize,
        height: usize,
        walker: &impl RandomWalker,
        fill_pct: f64,
        walks: usize,
    ) -> WeightMap {
        let mut map = vec![vec![WALL; height]; width];
        let total = width * height;
        if total == 0 {
            return map;
        }
        let target = ((total as f64 * fill_pct.clamp(0.0, 1.0)) as usize).max(1);
        let in_bounds = |p: Point| {
            p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height
        };
        let start = center(width, height);
        let mut carved = 0usize;

        'walks: for _ in 0..walks {
            let mut pos = start;
            let step_limit = total * 4; // safety limit per walk

            for _ in 0..step_limit {
                if carved >= target {
                    break 'walks;
                }

                let cell = &mut map[pos.x as usize][pos.y as usize];
                if *cell != FLOOR {
                    *cell = FLOOR;
                    carved += 1;
                }

                // Walk to a neighbor, or stay put at the edge.
                let next = walker.neighbor(pos, &mut self.rng);
                if in_bounds(next) {
                    pos = next;
                }
            }
        }

        log::debug!("carved {carved} of {total} cells");
        map
    }
}

/// The center cell of a `width` x `height` map.
pub fn center(width: usize, height: usize) -> Point {
    Point::new((width / 2) as i32, (height / 2) as i32)
}

/// Set `p` to [`FLOOR`] if it is a wall, so it can serve as a search
/// endpoint. Out-of-range points are ignored.
pub fn open_cell(map: &mut WeightMap, p: Point) {
    if p.x < 0 || p.y < 0 {
        return;
    }
    if let Some(cell) = map
        .get_mut(p.x as usize)
        .and_then(|row| row.get_mut(p.y as usize))
    {
        if *cell == WALL {
            *cell = FLOOR;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use stepstar::{AStar, Graph, GraphOptions, SearchOptions};

    fn seeded(seed: u64) -> MapGen<StdRng> {
        MapGen::new(StdRng::seed_from_u64(seed))
    }

    fn count(map: &WeightMap, f: impl Fn(u32) -> bool) -> usize {
        map.iter().flatten().filter(|&&w| f(w)).count()
    }

    #[test]
    fn scatter_dimensions() {
        let map = seeded(1).scatter(7, 4, &ScatterOptions::default());
        assert_eq!(map.len(), 7);
        assert!(map.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn scatter_wall_frequency_extremes() {
        let none = ScatterOptions {
            wall_frequency: 0.0,
            weighted: false,
        };
        let map = seeded(2).scatter(20, 20, &none);
        assert_eq!(count(&map, |w| w == FLOOR), 400);

        let all = ScatterOptions {
            wall_frequency: 1.0,
            weighted: false,
        };
        let map = seeded(2).scatter(20, 20, &all);
        assert_eq!(count(&map, |w| w == WALL), 400);
    }

    #[test]
    fn scatter_wall_share_near_frequency() {
        let map = seeded(3).scatter(100, 100, &ScatterOptions::default());
        let walls = count(&map, |w| w == WALL);
        assert!((700..1300).contains(&walls), "{walls} walls");
    }

    #[test]
    fn scatter_weighted_values() {
        let opts = ScatterOptions {
            wall_frequency: 0.2,
            weighted: true,
        };
        let map = seeded(4).scatter(50, 50, &opts);
        assert!(map.iter().flatten().all(|w| [0, 1, 3, 5].contains(w)));
        for w in [1, 3, 5] {
            assert!(count(&map, |v| v == w) > 0, "no cells of weight {w}");
        }
    }

    #[test]
    fn scatter_is_reproducible() {
        let opts = ScatterOptions::default();
        assert_eq!(seeded(9).scatter(30, 30, &opts), seeded(9).scatter(30, 30, &opts));
    }

    #[test]
    fn random_walk_fills_target() {
        let map = seeded(5).random_walk_cave(20, 20, &FourDirectionWalker, 0.4, 20);
        let open = count(&map, |w| w == FLOOR);
        assert_eq!(open, 160);
        assert_eq!(count(&map, |w| w == WALL), 240);
        let c = center(20, 20);
        assert_eq!(map[c.x as usize][c.y as usize], FLOOR);
    }

    #[test]
    fn random_walk_cave_is_connected() {
        let (w, h) = (16, 12);
        let map = seeded(6).random_walk_cave(w, h, &FourDirectionWalker, 0.5, 20);
        let graph = Graph::new(&map, GraphOptions::default()).unwrap();
        let open: Vec<Point> = graph
            .nodes()
            .iter()
            .filter(|n| !n.is_wall())
            .map(|n| n.pos())
            .collect();

        let mut reached = 0;
        let mut astar = AStar::new(
            graph,
            |_, path: Vec<Point>| {
                if !path.is_empty() {
                    reached += 1;
                }
            },
            SearchOptions::default(),
        );
        for &p in &open {
            astar.search(center(w, h), p).unwrap();
            astar.run();
        }
        drop(astar);
        assert_eq!(reached, open.len());
    }

    #[test]
    fn eight_direction_walker_moves_one_cell() {
        let mut rng = StdRng::seed_from_u64(8);
        let p = Point::new(5, 5);
        for _ in 0..200 {
            let n = EightDirectionWalker.neighbor(p, &mut rng);
            assert!(p.is_adjacent(n));
        }
    }

    #[test]
    fn open_cell_clears_walls_only() {
        let mut map = vec![vec![WALL, 5], vec![3, WALL]];
        open_cell(&mut map, Point::new(0, 0));
        open_cell(&mut map, Point::new(0, 1));
        open_cell(&mut map, Point::new(9, 9));
        open_cell(&mut map, Point::new(-1, 0));
        assert_eq!(map, vec![vec![FLOOR, 5], vec![3, WALL]]);
    }

    #[test]
    fn empty_maps() {
        assert!(seeded(0).scatter(0, 5, &ScatterOptions::default()).is_empty());
        let map = seeded(0).random_walk_cave(0, 0, &FourDirectionWalker, 0.5, 3);
        assert!(map.is_empty());
    }
}
