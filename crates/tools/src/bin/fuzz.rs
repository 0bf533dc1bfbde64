use anyhow::Result;
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use wayfind_core::{
    AdjacencyIndex, Coord, Grid, Navigator, Objective, Scenario, Terrain, TraceEvent,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    cases: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_range(rng: &mut ChaCha8Rng, lo: i32, hi: i32) -> i32 {
    lo + (rng.next_u64() % (hi - lo) as u64) as i32
}

/// Random but always-loadable scenario: every cell present, full 4-neighbor
/// lattice edges with random costs, start forced onto open ground.
fn random_scenario(rng: &mut ChaCha8Rng) -> Scenario {
    let width = random_range(rng, 2, 9);
    let height = random_range(rng, 2, 9);
    let mut grid = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            // Bias to open ground so routes usually exist.
            let terrain: Terrain = choose(rng, &[0, 0, 0, 0, 1, 2, 2, 3]);
            grid.place_cell(Coord::new(x, y), terrain);
        }
    }
    let start = Coord::new(random_range(rng, 0, width), random_range(rng, 0, height));
    grid.place_cell(start, 0);

    let mut adjacency = AdjacencyIndex::new();
    for y in 0..height {
        for x in 0..width {
            let here = Coord::new(x, y);
            if x + 1 < width {
                let cost = f64::from(random_range(rng, 1, 10));
                adjacency.add_undirected(here, Coord::new(x + 1, y), cost);
            }
            if y + 1 < height {
                let cost = f64::from(random_range(rng, 1, 10));
                adjacency.add_undirected(here, Coord::new(x, y + 1), cost);
            }
        }
    }

    let mut objectives = Vec::new();
    for _ in 0..random_range(rng, 1, 4) {
        let target = Coord::new(random_range(rng, 0, width), random_range(rng, 0, height));
        let mut options = Vec::new();
        for _ in 0..random_range(rng, 0, 3) {
            options.push(choose(rng, &[2, 3, 4]));
        }
        objectives.push(Objective::new(target, options));
    }

    Scenario { grid, adjacency, sight_radius: random_range(rng, 0, 4), start, objectives }
}

fn run_and_check(case_seed: u64) -> (Vec<TraceEvent>, u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(case_seed);
    let scenario = random_scenario(&mut rng);
    let start = scenario.start;
    let mut navigator = Navigator::new(scenario);
    navigator.run();

    // Replay the trace: every move must follow an adjacency edge, and the
    // objectives must be reported reached exactly once each, in order.
    let mut position = start;
    let mut reached = Vec::new();
    for event in navigator.trace() {
        match event {
            TraceEvent::MovedTo { coord } => {
                assert!(
                    navigator.adjacency().edge_cost(position, *coord).is_some(),
                    "Invariant failed: move {position} -> {coord} without an edge on seed {case_seed}"
                );
                position = *coord;
            }
            TraceEvent::ObjectiveReached { index } => reached.push(*index),
            TraceEvent::OptionChosen { .. } | TraceEvent::RouteBlocked => {}
        }
    }
    assert_eq!(
        position,
        navigator.position(),
        "Invariant failed: trace and final position disagree on seed {case_seed}"
    );
    let expected: Vec<usize> = (1..=navigator.objectives().len()).collect();
    assert_eq!(
        reached, expected,
        "Invariant failed: objective reports out of order on seed {case_seed}"
    );
    for coord in navigator.revealed().iter() {
        assert!(
            !navigator.grid().is_passable(coord) || navigator.grid().terrain(coord) == Some(0),
            "Invariant failed: revealed cell {coord} became passable on seed {case_seed}"
        );
    }

    (navigator.trace().to_vec(), navigator.snapshot_hash())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} cases...", args.seed, args.cases);
    for case in 0..args.cases {
        let case_seed = args.seed.wrapping_add(u64::from(case));
        let (first_trace, first_hash) = run_and_check(case_seed);
        let (second_trace, second_hash) = run_and_check(case_seed);
        assert_eq!(
            first_trace, second_trace,
            "Invariant failed: trace diverged between runs on seed {case_seed}"
        );
        assert_eq!(
            first_hash, second_hash,
            "Invariant failed: snapshot hash diverged between runs on seed {case_seed}"
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
