//! Admin API handlers for the training hierarchy and its access permissions

pub mod lesson;
pub mod module;
pub mod perm;
pub mod permission;
pub mod submodule;
pub mod training;

mod prelude;

// vim: ts=4
