//! Shortest-path search over the current passability state.
//! This module exists so route computation stays deterministic and free of
//! run-loop policy. It does not own reveals or terrain mutation.

use crate::collections::{ChainMap, MinHeap};
use crate::graph::AdjacencyIndex;
use crate::grid::Grid;
use crate::types::Coord;

#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    coord: Coord,
    dist: f64,
}

/// Dijkstra from `source` to `target` over currently passable cells.
///
/// Returns the route source-to-target inclusive, or an empty vector when the
/// target is unreachable (or the source lies outside the grid). The frontier
/// tolerates stale entries instead of tracking visited nodes: relaxation only
/// enqueues strict improvements, so a stale pop re-relaxes edges to no
/// effect. The source's own passability is never consulted.
pub fn shortest_path(
    grid: &Grid,
    adjacency: &AdjacencyIndex,
    source: Coord,
    target: Coord,
) -> Vec<Coord> {
    if !grid.in_bounds(source) {
        return Vec::new();
    }

    let mut dist = vec![f64::INFINITY; grid.cell_count()];
    dist[grid.index(source)] = 0.0;

    let mut parents: ChainMap<Coord, Option<Coord>> = ChainMap::new();
    parents.put(source, None);

    let mut frontier =
        MinHeap::new(|a: &FrontierEntry, b: &FrontierEntry| a.dist.total_cmp(&b.dist));
    frontier.push(FrontierEntry { coord: source, dist: 0.0 });

    while let Some(entry) = frontier.pop() {
        if entry.coord == target {
            return reconstruct(&parents, target);
        }
        let Some(edges) = adjacency.edges_from(entry.coord) else {
            continue;
        };
        for edge in edges {
            if !grid.is_passable(edge.to) {
                continue;
            }
            let tentative = entry.dist + edge.cost;
            let slot = grid.index(edge.to);
            if tentative < dist[slot] {
                dist[slot] = tentative;
                parents.put(edge.to, Some(entry.coord));
                frontier.push(FrontierEntry { coord: edge.to, dist: tentative });
            }
        }
    }

    Vec::new()
}

fn reconstruct(parents: &ChainMap<Coord, Option<Coord>>, target: Coord) -> Vec<Coord> {
    let mut route = vec![target];
    let mut cursor = target;
    while let Some(Some(parent)) = parents.get(&cursor) {
        route.push(*parent);
        cursor = *parent;
    }
    route.reverse();
    route
}

/// Total cost of `route` as the sum of its consecutive adjacency edges.
/// Routes shorter than two coordinates cost 0.0, including the empty
/// unreachable route, which option trials rely on.
pub fn route_cost(adjacency: &AdjacencyIndex, route: &[Coord]) -> f64 {
    route.windows(2).filter_map(|pair| adjacency.edge_cost(pair[0], pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full lattice: every cell terrain 0, unit-cost 4-neighbor edges.
    fn open_lattice(width: i32, height: i32) -> (Grid, AdjacencyIndex) {
        let mut grid = Grid::new(width, height);
        let mut adjacency = AdjacencyIndex::new();
        for y in 0..height {
            for x in 0..width {
                grid.place_cell(Coord::new(x, y), 0);
            }
        }
        for y in 0..height {
            for x in 0..width {
                if x + 1 < width {
                    adjacency.add_undirected(Coord::new(x, y), Coord::new(x + 1, y), 1.0);
                }
                if y + 1 < height {
                    adjacency.add_undirected(Coord::new(x, y), Coord::new(x, y + 1), 1.0);
                }
            }
        }
        (grid, adjacency)
    }

    fn manhattan(a: Coord, b: Coord) -> usize {
        (a.x.abs_diff(b.x) + a.y.abs_diff(b.y)) as usize
    }

    #[test]
    fn lattice_route_length_equals_manhattan_distance() {
        let (grid, adjacency) = open_lattice(5, 4);
        for (source, target) in [
            (Coord::new(0, 0), Coord::new(4, 3)),
            (Coord::new(2, 1), Coord::new(0, 3)),
            (Coord::new(4, 0), Coord::new(0, 0)),
        ] {
            let route = shortest_path(&grid, &adjacency, source, target);
            assert_eq!(route.first(), Some(&source));
            assert_eq!(route.last(), Some(&target));
            assert_eq!(route.len() - 1, manhattan(source, target));
        }
    }

    #[test]
    fn impassable_cells_never_appear_on_a_route() {
        let (mut grid, adjacency) = open_lattice(3, 3);
        // Wall off the center; routes must bend around it.
        grid.set_terrain(Coord::new(1, 1), 1);
        let route = shortest_path(&grid, &adjacency, Coord::new(0, 1), Coord::new(2, 1));
        assert!(!route.is_empty());
        assert!(!route.contains(&Coord::new(1, 1)));
        assert_eq!(route.len() - 1, 4, "detour costs two extra steps");
    }

    #[test]
    fn unreachable_target_yields_empty_route() {
        let (mut grid, adjacency) = open_lattice(3, 1);
        grid.set_terrain(Coord::new(1, 0), 1);
        assert!(shortest_path(&grid, &adjacency, Coord::new(0, 0), Coord::new(2, 0)).is_empty());

        let no_edges = AdjacencyIndex::new();
        assert!(shortest_path(&grid, &no_edges, Coord::new(0, 0), Coord::new(2, 0)).is_empty());
    }

    #[test]
    fn source_equals_target_is_a_one_element_route() {
        let (grid, adjacency) = open_lattice(2, 2);
        let route = shortest_path(&grid, &adjacency, Coord::new(1, 1), Coord::new(1, 1));
        assert_eq!(route, vec![Coord::new(1, 1)]);
    }

    #[test]
    fn out_of_bounds_source_yields_empty_route() {
        let (grid, adjacency) = open_lattice(2, 2);
        assert!(shortest_path(&grid, &adjacency, Coord::new(-1, 0), Coord::new(1, 1)).is_empty());
    }

    #[test]
    fn cheaper_long_way_beats_expensive_direct_edge() {
        let mut grid = Grid::new(3, 1);
        for x in 0..3 {
            grid.place_cell(Coord::new(x, 0), 0);
        }
        let mut adjacency = AdjacencyIndex::new();
        adjacency.add_undirected(Coord::new(0, 0), Coord::new(2, 0), 10.0);
        adjacency.add_undirected(Coord::new(0, 0), Coord::new(1, 0), 2.0);
        adjacency.add_undirected(Coord::new(1, 0), Coord::new(2, 0), 3.0);

        let route = shortest_path(&grid, &adjacency, Coord::new(0, 0), Coord::new(2, 0));
        assert_eq!(route, vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]);
        assert_eq!(route_cost(&adjacency, &route), 5.0);
    }

    #[test]
    fn repeated_searches_return_the_identical_route() {
        // A full lattice is rich in equal-cost ties; the tie-break must not
        // drift between invocations.
        let (grid, adjacency) = open_lattice(6, 6);
        let first = shortest_path(&grid, &adjacency, Coord::new(0, 0), Coord::new(5, 5));
        for _ in 0..5 {
            let again = shortest_path(&grid, &adjacency, Coord::new(0, 0), Coord::new(5, 5));
            assert_eq!(again, first);
        }
    }

    #[test]
    fn route_cost_of_short_routes_is_zero() {
        let adjacency = AdjacencyIndex::new();
        assert_eq!(route_cost(&adjacency, &[]), 0.0);
        assert_eq!(route_cost(&adjacency, &[Coord::new(0, 0)]), 0.0);
    }
}
