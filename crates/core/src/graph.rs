use crate::collections::ChainMap;
use crate::types::Coord;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: Coord,
    pub cost: f64,
}

/// Outgoing edges grouped by source coordinate, in insertion order. Topology
/// is fixed once construction ends; only the grid's passability decides
/// whether an edge is usable.
#[derive(Debug)]
pub struct AdjacencyIndex {
    edges: ChainMap<Coord, Vec<Edge>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self { edges: ChainMap::new() }
    }

    /// Records an undirected edge by inserting both directions.
    pub fn add_undirected(&mut self, a: Coord, b: Coord, cost: f64) {
        self.add_directed(a, b, cost);
        self.add_directed(b, a, cost);
    }

    fn add_directed(&mut self, from: Coord, to: Coord, cost: f64) {
        self.edges.put_if_absent(from, Vec::new());
        self.edges
            .get_mut(&from)
            .expect("edge list must exist after put_if_absent")
            .push(Edge { to, cost });
    }

    /// `None` when no edge leaves `coord`.
    pub fn edges_from(&self, coord: Coord) -> Option<&[Edge]> {
        self.edges.get(&coord).map(Vec::as_slice)
    }

    /// Cost of the first recorded edge `from -> to`, if any.
    pub fn edge_cost(&self, from: Coord, to: Coord) -> Option<f64> {
        self.edges_from(from)?.iter().find(|edge| edge.to == to).map(|edge| edge.cost)
    }
}

impl Default for AdjacencyIndex {
    fn default() -> Self {
        Self::new()
    }
}
