//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns out of the run loop.
//! It does not own any simulation state transitions.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Navigator {
    /// Digest over the run's observable state: grid terrain and passability
    /// in row-major order, agent position, revealed set, and event count.
    /// Equal end states hash equal across processes and platforms.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_i32(self.grid.width());
        hasher.write_i32(self.grid.height());
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                match self.grid.cell(Coord::new(x, y)) {
                    None => hasher.write_u8(0),
                    Some(cell) => {
                        hasher.write_u8(1 + u8::from(cell.passable));
                        hasher.write_u32(cell.terrain);
                    }
                }
            }
        }
        hasher.write_i32(self.position.x);
        hasher.write_i32(self.position.y);
        hasher.write_u64(self.revealed.len() as u64);
        for coord in self.revealed.iter() {
            hasher.write_i32(coord.x);
            hasher.write_i32(coord.y);
        }
        hasher.write_u64(self.trace.len() as u64);
        hasher.finish()
    }
}
