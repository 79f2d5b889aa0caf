//! Utils

pub mod or_else_log;
pub mod or_warn;
