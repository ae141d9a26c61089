use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use stepstar::{AStar, Graph, GraphOptions, HeuristicKind, Point, SearchOptions};
use stepstar_demos::{HEIGHT, MAX_STEP_TIMES, WIDTH, farthest_open, format_path, render};
use stepstar_mapgen::{
    EightDirectionWalker, FourDirectionWalker, MapGen, ScatterOptions, WeightMap, center,
    open_cell,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Diagonal,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => HeuristicKind::Manhattan,
            HeuristicArg::Diagonal => HeuristicKind::Diagonal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a stepped A* search over a random map")]
struct Cli {
    /// Number of rows (x extent).
    #[arg(long, default_value_t = WIDTH)]
    width: usize,
    /// Number of columns (y extent).
    #[arg(long, default_value_t = HEIGHT)]
    height: usize,
    /// Chance that a scattered cell is a wall.
    #[arg(long, default_value_t = 0.1)]
    wall_frequency: f64,
    /// Give open cells a random weight of 1, 3 or 5.
    #[arg(long)]
    weighted: bool,
    /// Carve a connected cave instead of scattering walls.
    #[arg(long)]
    cave: bool,
    /// Allow diagonal moves.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    diagonal: bool,
    /// Report the path to the closest reachable node when the goal is cut off.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    closest: bool,
    /// Distance estimate; defaults to diagonal when diagonal moves are on.
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,
    /// Frontier pops per frame.
    #[arg(long, default_value_t = MAX_STEP_TIMES)]
    max_step_times: usize,
    /// Map seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the map with the path drawn over it.
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.width == 0 || cli.height == 0 {
        bail!("map must be at least 1x1, got {}x{}", cli.width, cli.height);
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("map seed {seed}");

    let (map, start, end) = build_map(&cli, seed);
    let graph = Graph::new(&map, GraphOptions { diagonal: cli.diagonal })
        .context("failed to build the search graph")?;

    let heuristic = cli.heuristic.map(HeuristicKind::from).unwrap_or(if cli.diagonal {
        HeuristicKind::Diagonal
    } else {
        HeuristicKind::Manhattan
    });
    let options = SearchOptions {
        heuristic,
        closest: cli.closest,
        max_step_times: cli.max_step_times,
    };

    let mut outcome: Option<(u32, Vec<Point>)> = None;
    let mut astar = AStar::new(graph, |frames, path| outcome = Some((frames, path)), options);

    let started = Instant::now();
    astar
        .search(start, end)
        .with_context(|| format!("failed to start a search from {start} to {end}"))?;
    while astar.step() {}
    let elapsed = started.elapsed();
    let graph = astar.into_graph();

    let Some((steps, path)) = outcome else {
        bail!("search ended without reporting a result");
    };
    log::info!("search from {start} to {end} took {steps} frames in {elapsed:?}");

    match path.last() {
        Some(&last) if last == end => {
            let cost = graph.path_cost(&path).unwrap_or(f64::NAN);
            log::info!("reached the goal in {} nodes, cost {cost:.3}", path.len());
        }
        Some(&last) => log::warn!("goal unreachable, stopped at {last} after {} nodes", path.len()),
        None => log::warn!("goal unreachable"),
    }

    if cli.print {
        print!("{}", render(&graph, &path));
    }
    println!("{}", format_path(&path));
    Ok(())
}

/// Generate the map and pick the endpoints, opening them if they landed on
/// walls.
fn build_map(cli: &Cli, seed: u64) -> (WeightMap, Point, Point) {
    let mut mapgen = MapGen::new(StdRng::seed_from_u64(seed));
    if cli.cave {
        let mut map = if cli.diagonal {
            mapgen.random_walk_cave(cli.width, cli.height, &EightDirectionWalker, 0.45, 64)
        } else {
            mapgen.random_walk_cave(cli.width, cli.height, &FourDirectionWalker, 0.45, 64)
        };
        let start = center(cli.width, cli.height);
        open_cell(&mut map, start);
        let end = farthest_open(&map, start).unwrap_or(start);
        return (map, start, end);
    }

    let opts = ScatterOptions {
        wall_frequency: cli.wall_frequency,
        weighted: cli.weighted,
    };
    let mut map = mapgen.scatter(cli.width, cli.height, &opts);
    let start = Point::ZERO;
    let end = center(cli.width, cli.height);
    open_cell(&mut map, start);
    open_cell(&mut map, end);
    (map, start, end)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Also installs the `log` bridge, so library records reach the subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}
