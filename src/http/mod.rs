//! HTTP server module.
//!
//! Binds the configured address and serves the router, with graceful
//! shutdown on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
