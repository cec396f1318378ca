//! Vocabulary storage: word lookup, frequencies, and the similarity graph.

pub mod memory;
pub mod store;

pub use memory::*;
pub use store::*;
