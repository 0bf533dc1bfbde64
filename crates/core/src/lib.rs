pub mod collections;
pub mod graph;
pub mod grid;
pub mod navigator;
pub mod scenario;
pub mod search;
pub mod trace;
pub mod types;
pub mod visibility;

pub use graph::{AdjacencyIndex, Edge};
pub use grid::{Cell, Grid};
pub use navigator::Navigator;
pub use scenario::{Scenario, ScenarioFile, ScenarioLoadError, load_scenario};
pub use search::{route_cost, shortest_path};
pub use trace::{TraceEvent, render_trace, write_trace};
pub use types::*;
pub use visibility::{RevealedSet, reveal_around};
