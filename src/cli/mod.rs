//! Command-line interface for libphonetic
//!
//! Lists, runs and checks the registered algorithms. Available with the
//! `cli` feature.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, NormalizeArgs};
