//! Command-line interface module
//!
//! Provides argument parsing and action dispatch.

pub mod args;
pub mod commands;

pub use args::{parse_args, Args};
pub use commands::execute_action;
