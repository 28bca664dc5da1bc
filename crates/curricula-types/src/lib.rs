//! Shared types, adapter traits, and core utilities for the Curricula platform.
//!
//! This crate contains the foundational types that are shared between the
//! server crate, the admin handlers and the storage adapter implementations.

pub mod auth;
pub mod error;
pub mod level;
pub mod meta_adapter;
pub mod prelude;
pub mod types;

// vim: ts=4
