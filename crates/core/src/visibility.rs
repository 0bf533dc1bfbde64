//! Fog-of-war reveal rules.
//! This module exists to keep the sight-range terrain lockdown and its
//! sticky override in one place. It does not own route planning or movement.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::Coord;

/// Every coordinate ever forced impassable by a reveal. Monotonic for the
/// whole run: coordinates are added, never removed.
#[derive(Clone, Debug, Default)]
pub struct RevealedSet {
    coords: BTreeSet<Coord>,
}

impl RevealedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }

    /// The single enforcement point for the sticky override: any `touched`
    /// coordinate that was ever revealed goes back to impassable, whatever
    /// its terrain now derives to.
    pub fn reassert(&self, grid: &mut Grid, touched: &[Coord]) {
        for &coord in touched {
            if self.coords.contains(&coord) {
                grid.force_impassable(coord);
            }
        }
    }

    fn insert(&mut self, coord: Coord) {
        self.coords.insert(coord);
    }
}

/// Reveals around `center`: every present, currently passable cell with
/// terrain >= 2 within true Euclidean distance `radius` is forced impassable,
/// added to `revealed`, and returned as this call's fresh list. Cells
/// revealed by earlier calls stay impassable and are not re-reported. An
/// out-of-extents center reveals nothing.
pub fn reveal_around(
    grid: &mut Grid,
    revealed: &mut RevealedSet,
    center: Coord,
    radius: i32,
) -> Vec<Coord> {
    if !grid.in_bounds(center) {
        return Vec::new();
    }

    // A parsed radius can sit at the i32 bounds; saturating keeps the clamp
    // total and leaves the box empty for negative radii.
    let min_x = center.x.saturating_sub(radius).max(0);
    let max_x = center.x.saturating_add(radius).saturating_add(1).min(grid.width());
    let min_y = center.y.saturating_sub(radius).max(0);
    let max_y = center.y.saturating_add(radius).saturating_add(1).min(grid.height());

    let mut fresh = Vec::new();
    for x in min_x..max_x {
        for y in min_y..max_y {
            let dx = (x - center.x) as i64;
            let dy = (y - center.y) as i64;
            // Squared-distance compare; no float round-trip.
            if dx * dx + dy * dy > (radius as i64) * (radius as i64) {
                continue;
            }
            let coord = Coord::new(x, y);
            if let Some(cell) = grid.cell(coord)
                && cell.terrain >= 2
                && cell.passable
            {
                grid.force_impassable(coord);
                revealed.insert(coord);
                fresh.push(coord);
            }
        }
    }
    fresh
}
