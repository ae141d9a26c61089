//! Shared helpers for the stepstar demo binaries: endpoint selection and
//! console rendering of maps and paths.

use stepstar::{Graph, Point, manhattan};
use stepstar_mapgen::{WALL, WeightMap};

/// Default map size and per-frame budget of the stepper demo.
pub const WIDTH: usize = 100;
pub const HEIGHT: usize = 100;
pub const MAX_STEP_TIMES: usize = 100;

const CH_WALL: char = '#';
const CH_PATH: char = '*';
const CH_START: char = 'S';
const CH_END: char = 'E';

/// The open cell of `map` farthest from `from` in Manhattan distance.
///
/// Ties go to the first cell in `[x][y]` order.
pub fn farthest_open(map: &WeightMap, from: Point) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for (x, row) in map.iter().enumerate() {
        for (y, &w) in row.iter().enumerate() {
            if w == WALL {
                continue;
            }
            let p = Point::new(x as i32, y as i32);
            let d = manhattan(from, p);
            if best.is_none_or(|(bd, _)| d > bd) {
                best = Some((d, p));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Render `graph` one `x` row per line: `#` for walls, the weight digit for
/// open cells (`+` above 9) and the path drawn over them.
pub fn render(graph: &Graph, path: &[Point]) -> String {
    let mut out = String::with_capacity(graph.len() + graph.width());
    for x in 0..graph.width() {
        for y in 0..graph.height() {
            let p = Point::new(x as i32, y as i32);
            let ch = if path.first() == Some(&p) {
                CH_START
            } else if path.last() == Some(&p) {
                CH_END
            } else if path.contains(&p) {
                CH_PATH
            } else {
                match graph.node_at(p).map(|n| n.weight()) {
                    Some(0) | None => CH_WALL,
                    Some(w) => char::from_digit(w, 10).unwrap_or('+'),
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// `(x, y) -> (x, y) -> ...`, or `<empty>`.
pub fn format_path(path: &[Point]) -> String {
    if path.is_empty() {
        return "<empty>".to_string();
    }
    path.iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepstar::GraphOptions;

    #[test]
    fn farthest_open_skips_walls() {
        let map = vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 0]];
        assert_eq!(farthest_open(&map, Point::new(0, 0)), Some(Point::new(1, 2)));
        assert_eq!(farthest_open(&vec![vec![0, 0]], Point::ZERO), None);
    }

    #[test]
    fn render_overlays_path() {
        let map: WeightMap = vec![vec![1, 1, 3], vec![0, 1, 1]];
        let graph = Graph::new(&map, GraphOptions::default()).unwrap();
        let path = [Point::new(0, 0), Point::new(0, 1), Point::new(1, 1), Point::new(1, 2)];
        assert_eq!(render(&graph, &path), "S*3\n#*E\n");
        assert_eq!(render(&graph, &[]), "113\n#11\n");
    }

    #[test]
    fn path_text() {
        assert_eq!(format_path(&[]), "<empty>");
        assert_eq!(
            format_path(&[Point::new(0, 0), Point::new(1, 0)]),
            "(0, 0) -> (1, 0)"
        );
    }
}
