//! Network module.
//!
//! Contains the outbound connection loop.

mod connection;

pub use connection::{Endpoint, run};
