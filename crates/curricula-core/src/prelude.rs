pub use crate::app::App;
pub use curricula_types::prelude::*;

// vim: ts=4
