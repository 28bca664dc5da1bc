//! Curricula is an administration backend for learning content.
//!
//! Administrators manage a hierarchy of trainings, modules, submodules and
//! lessons, and grant users access on the first three levels. A grant can be
//! propagated to the related entities of the hierarchy.

// Re-export shared types and adapter traits from curricula-types
pub use curricula_types::auth;
pub use curricula_types::error;
pub use curricula_types::level;
pub use curricula_types::meta_adapter;
pub use curricula_types::types;

// Feature crate re-exports
pub use curricula_admin as admin;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;
pub mod webserver;

pub use app::AppBuilder;

// vim: ts=4
