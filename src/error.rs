//! Error types for the Corrigo library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`CorrigoError`] enum. "No correction found" is not an error: lookups that
//! legitimately produce no answer return `Ok(None)`.
//!
//! # Examples
//!
//! ```
//! use corrigo::error::{CorrigoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CorrigoError::invalid_input("empty word"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Corrigo operations.
#[derive(Error, Debug)]
pub enum CorrigoError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A character outside the supported keyboard alphabet.
    #[error("invalid character {0:?}: not in the supported alphabet")]
    InvalidCharacter(char),

    /// Empty or otherwise malformed word argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Vocabulary store errors (missing words, failed writes, corrupt data).
    #[error("store error: {0}")]
    Store(String),

    /// Wire protocol errors (oversized payloads, malformed frames).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Snapshot encode/decode errors.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with CorrigoError.
pub type Result<T> = std::result::Result<T, CorrigoError>;

impl CorrigoError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        CorrigoError::InvalidInput(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Store(msg.into())
    }

    /// Create a new protocol error.
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Protocol(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CorrigoError::Serialization(msg.into())
    }
}
