//! Objective resolution and the step-by-step run loop.
//! This module exists to sequence reveals, option trials, and traversal into
//! one deterministic trace. It does not own file formats or rendering.

use crate::graph::AdjacencyIndex;
use crate::grid::Grid;
use crate::scenario::Scenario;
use crate::search::{route_cost, shortest_path};
use crate::trace::TraceEvent;
use crate::types::{Coord, Objective, Terrain};
use crate::visibility::{RevealedSet, reveal_around};

mod hash;

/// Drives one run: owns the grid, the adjacency index, the revealed set, the
/// agent position, and the trace being built.
pub struct Navigator {
    grid: Grid,
    adjacency: AdjacencyIndex,
    sight_radius: i32,
    objectives: Vec<Objective>,
    position: Coord,
    revealed: RevealedSet,
    trace: Vec<TraceEvent>,
}

impl Navigator {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            grid: scenario.grid,
            adjacency: scenario.adjacency,
            sight_radius: scenario.sight_radius,
            objectives: scenario.objectives,
            position: scenario.start,
            revealed: RevealedSet::new(),
            trace: Vec::new(),
        }
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    pub fn revealed(&self) -> &RevealedSet {
        &self.revealed
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Events appended so far, in emission order.
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    /// Resolves every objective in declared order, appending trace events as
    /// decisions happen. An unreachable objective produces no movement and is
    /// still reported reached; that is terminal behavior, not an error.
    pub fn run(&mut self) {
        for number in 1..=self.objectives.len() {
            self.resolve_objective(number);
        }
    }

    fn resolve_objective(&mut self, number: usize) {
        let objective = self.objectives[number - 1].clone();

        self.reveal();

        if !objective.options.is_empty() {
            let winner = self.best_option(&objective);
            self.grid.clear_terrain(winner);
            self.trace.push(TraceEvent::OptionChosen { option: winner });
        }

        // Plan. A reveal landing on the just-computed route forces one
        // immediate recompute over the same endpoints.
        let fresh = self.reveal();
        let mut route = self.route_to(objective.target);
        if blocks_route(&fresh, &route) {
            self.trace.push(TraceEvent::RouteBlocked);
            route = self.route_to(objective.target);
        }

        // Traverse. Index 0 is skipped when it is the cell already stood on.
        // Each iteration reveals before stepping; a reveal that lands
        // anywhere on the route (traversed prefix included) re-plans from the
        // current position without stepping, so an empty re-planned route
        // ends traversal.
        let mut index = usize::from(route.first() == Some(&self.position));
        while index < route.len() {
            let fresh = self.reveal();
            if blocks_route(&fresh, &route) {
                self.trace.push(TraceEvent::RouteBlocked);
                route = self.route_to(objective.target);
                index = 1;
                continue;
            }
            let step = route[index];
            self.position = step;
            self.trace.push(TraceEvent::MovedTo { coord: step });
            index += 1;
        }

        self.trace.push(TraceEvent::ObjectiveReached { index: number });
    }

    /// Picks the option whose trial minimizes route cost from the current
    /// position. Strictly-smaller wins, so the first option to reach the
    /// minimum keeps it; an option whose trial leaves the target unreachable
    /// scores 0.0 and can therefore win outright.
    fn best_option(&mut self, objective: &Objective) -> Terrain {
        let mut best = objective.options[0];
        let mut best_cost = f64::INFINITY;
        for &option in &objective.options {
            let cost = self.trial_option(option, objective.target);
            if cost < best_cost {
                best_cost = cost;
                best = option;
            }
        }
        best
    }

    /// Clears one option's terrain, measures the resulting route cost, then
    /// restores every changed cell and re-asserts revealed impassability.
    fn trial_option(&mut self, option: Terrain, target: Coord) -> f64 {
        let changed = self.grid.clear_terrain(option);
        self.reveal();
        let route = self.route_to(target);
        let cost = route_cost(&self.adjacency, &route);
        for &coord in &changed {
            self.grid.set_terrain(coord, option);
        }
        self.revealed.reassert(&mut self.grid, &changed);
        cost
    }

    fn reveal(&mut self) -> Vec<Coord> {
        reveal_around(&mut self.grid, &mut self.revealed, self.position, self.sight_radius)
    }

    fn route_to(&self, target: Coord) -> Vec<Coord> {
        shortest_path(&self.grid, &self.adjacency, self.position, target)
    }
}

/// True when any freshly revealed cell lies anywhere on the route.
fn blocks_route(fresh: &[Coord], route: &[Coord]) -> bool {
    fresh.iter().any(|coord| route.contains(coord))
}
