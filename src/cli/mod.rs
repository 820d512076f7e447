//! CLI module - argument parsing, output rendering and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod logging;
pub mod output;

pub use args::{Cli, Commands, GlobalOpts, InputArgs, OutputFormat};
