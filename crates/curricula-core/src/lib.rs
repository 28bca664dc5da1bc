//! Core infrastructure for Curricula.
//!
//! Application state, request extractors and the bearer token middleware shared
//! by the server crate and the admin handlers.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod middleware;
pub mod prelude;

// Re-export commonly used types
pub use app::{App, AppBuilderOpts, AppState, VERSION};
pub use extract::Auth;

// vim: ts=4
