//! Integration test common infrastructure.
//!
//! Provides a scripted fake IRC server and a harness that runs the
//! irclogd binary against it.

pub mod logger;
pub mod server;

#[allow(unused_imports)]
pub use logger::TestLogger;
#[allow(unused_imports)]
pub use server::{FakeServer, ServerConn};
