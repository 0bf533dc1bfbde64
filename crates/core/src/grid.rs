use crate::types::{Coord, Terrain};

/// One grid position. `passable` normally follows `derived_passable`, but the
/// reveal mechanism may force it false independently of the terrain value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub terrain: Terrain,
    pub passable: bool,
}

impl Cell {
    fn new(terrain: Terrain) -> Self {
        Self { terrain, passable: derived_passable(terrain) }
    }
}

fn derived_passable(terrain: Terrain) -> bool {
    terrain == 0 || terrain >= 2
}

/// Dense cell storage. Positions inside the extents may hold no cell at all;
/// absent cells and out-of-extent coordinates answer every query the same
/// way: no terrain, not passable.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self { width, height, cells: vec![None; len] }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Creates the cell at `coord` during construction. Out-of-extent
    /// coordinates are ignored; the loader validates them beforehand.
    pub fn place_cell(&mut self, coord: Coord, terrain: Terrain) {
        if !self.in_bounds(coord) {
            return;
        }
        let idx = self.index(coord);
        self.cells[idx] = Some(Cell::new(terrain));
    }

    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells[self.index(coord)]
    }

    pub fn terrain(&self, coord: Coord) -> Option<Terrain> {
        self.cell(coord).map(|cell| cell.terrain)
    }

    pub fn is_passable(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.passable)
    }

    /// Rewrites the terrain type and re-derives passability from it. Note
    /// this drops any forced-impassable state; callers holding a revealed set
    /// re-assert it afterwards.
    pub fn set_terrain(&mut self, coord: Coord, terrain: Terrain) {
        if !self.in_bounds(coord) {
            return;
        }
        let idx = self.index(coord);
        if let Some(cell) = self.cells[idx].as_mut() {
            *cell = Cell::new(terrain);
        }
    }

    /// The reveal override: impassable regardless of terrain.
    pub fn force_impassable(&mut self, coord: Coord) {
        if !self.in_bounds(coord) {
            return;
        }
        let idx = self.index(coord);
        if let Some(cell) = self.cells[idx].as_mut() {
            cell.passable = false;
        }
    }

    /// Sets every cell of terrain type `terrain` to 0 (passable) and returns
    /// the coordinates changed, in row-major scan order.
    pub fn clear_terrain(&mut self, terrain: Terrain) -> Vec<Coord> {
        let mut changed = Vec::new();
        for (idx, slot) in self.cells.iter_mut().enumerate() {
            if let Some(cell) = slot.as_mut()
                && cell.terrain == terrain
            {
                *cell = Cell::new(0);
                changed.push(Coord::new(idx as i32 % self.width, idx as i32 / self.width));
            }
        }
        changed
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Dense index for `coord`; callers check `in_bounds` first.
    pub(crate) fn index(&self, coord: Coord) -> usize {
        debug_assert!(self.in_bounds(coord));
        coord.y as usize * self.width as usize + coord.x as usize
    }
}
