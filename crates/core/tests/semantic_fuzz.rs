use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use wayfind_core::{
    AdjacencyIndex, Coord, Grid, Navigator, Objective, Scenario, Terrain, TraceEvent,
};

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_range(rng: &mut ChaCha8Rng, lo: i32, hi: i32) -> i32 {
    lo + (rng.next_u64() % (hi - lo) as u64) as i32
}

fn random_scenario(rng: &mut ChaCha8Rng) -> Scenario {
    let width = random_range(rng, 2, 9);
    let height = random_range(rng, 2, 9);
    let mut grid = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
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

fn run_fuzz_scenario(scenario_seed: u64) -> Result<(), String> {
    let mut rng = ChaCha8Rng::seed_from_u64(scenario_seed);
    let scenario = random_scenario(&mut rng);
    let start = scenario.start;
    let mut navigator = Navigator::new(scenario);
    navigator.run();

    // Every move must follow an adjacency edge from the previous position,
    // and objectives must be reported reached exactly once each, in order.
    let mut position = start;
    let mut reached = Vec::new();
    for event in navigator.trace() {
        match event {
            TraceEvent::MovedTo { coord } => {
                if navigator.adjacency().edge_cost(position, *coord).is_none() {
                    return Err(format!(
                        "Invariant failed: move {position} -> {coord} without an edge on seed {scenario_seed}"
                    ));
                }
                position = *coord;
            }
            TraceEvent::ObjectiveReached { index } => reached.push(*index),
            TraceEvent::OptionChosen { .. } | TraceEvent::RouteBlocked => {}
        }
    }
    if position != navigator.position() {
        return Err(format!(
            "Invariant failed: trace ends at {position} but the agent stands at {} on seed {scenario_seed}",
            navigator.position()
        ));
    }
    let expected: Vec<usize> = (1..=navigator.objectives().len()).collect();
    if reached != expected {
        return Err(format!(
            "Invariant failed: objective reports {reached:?} on seed {scenario_seed}"
        ));
    }

    // A revealed cell may only be passable again if a committed option
    // cleared it to open ground.
    for coord in navigator.revealed().iter() {
        if navigator.grid().is_passable(coord) && navigator.grid().terrain(coord) != Some(0) {
            return Err(format!(
                "Invariant failed: revealed cell {coord} became passable on seed {scenario_seed}"
            ));
        }
    }

    // The same seed must reproduce the same trace and end-state hash.
    let mut rng = ChaCha8Rng::seed_from_u64(scenario_seed);
    let mut second = Navigator::new(random_scenario(&mut rng));
    second.run();
    if second.trace() != navigator.trace() {
        return Err(format!("Invariant failed: trace diverged on seed {scenario_seed}"));
    }
    if second.snapshot_hash() != navigator.snapshot_hash() {
        return Err(format!("Invariant failed: snapshot hash diverged on seed {scenario_seed}"));
    }

    Ok(())
}

#[test]
fn test_fuzz_navigation_preserves_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(20));
    let seeds = any::<u64>();

    runner
        .run(&seeds, |scenario_seed| {
            run_fuzz_scenario(scenario_seed).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz navigation should preserve invariants");
}
