//! Utility modules for Corrigo.

pub mod lru;

// Re-export commonly used types
pub use lru::*;
