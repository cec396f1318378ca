//! TCP server exposing the checker over a length-prefixed wire protocol.

pub mod listener;
pub mod protocol;

pub use listener::*;
pub use protocol::*;
