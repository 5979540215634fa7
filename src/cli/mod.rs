//! CLI module for tonal scales
//!
//! This module contains all command-line interface related code including
//! argument parsing, command definitions, and command handlers.
//!
//! # Submodules
//!
//! - `args` - Command-line argument definitions using clap
//! - `commands` - Command handler implementations
//! - `output` - Tables, status lines and the log file writer

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Args, Commands, ShapeArgs};
pub use commands::run_command;
pub use output::DualWriter;
