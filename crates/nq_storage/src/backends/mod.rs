pub mod memory;

pub use memory::{IndexEntry, MemoryIndex};
