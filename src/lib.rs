//! # Corrigo
//!
//! A keyboard-aware spelling correction engine.
//!
//! ## Features
//!
//! - Weighted edit distance where substitution cost follows physical key
//!   proximity on a QWERTY layout
//! - Graph-guided candidate search that avoids scanning the whole
//!   vocabulary for every query
//! - Frequency-weighted ranking of correction candidates
//! - In-memory vocabulary store with text and binary persistence
//! - TCP server speaking a compact length-prefixed protocol
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use corrigo::checker::SpellChecker;
//! use corrigo::vocabulary::MemoryVocabulary;
//!
//! let store = Arc::new(MemoryVocabulary::from_counts([
//!     ("hello".to_string(), 5.0),
//!     ("help".to_string(), 3.0),
//! ]));
//! let checker = SpellChecker::new(store);
//!
//! assert!(checker.check("hello").unwrap());
//! let correction = checker.correct("helo").unwrap().unwrap();
//! assert_eq!(correction.word, "hello");
//! ```

pub mod checker;
pub mod cli;
pub mod distance;
pub mod error;
pub mod keyboard;
pub mod search;
pub mod server;
pub mod util;
pub mod vocabulary;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
