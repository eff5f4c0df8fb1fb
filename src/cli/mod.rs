//! CLI module
//!
//! Argument parsing and command dispatch for the verb-forge binary.

pub mod commands;

pub use commands::{run, CliArgs, Command};
