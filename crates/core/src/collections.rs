//! Generic containers whose tie-break and resize behavior the engine's
//! determinism guarantees depend on.

pub mod heap;
pub mod map;

pub use heap::MinHeap;
pub use map::ChainMap;
