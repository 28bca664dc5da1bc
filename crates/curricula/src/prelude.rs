pub use curricula_core::prelude::*;

// vim: ts=4
