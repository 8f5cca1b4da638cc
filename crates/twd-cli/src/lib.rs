//! Timewarrior tag comparison CLI library.
//!
//! This crate wires the pure logic from `twd-core` to the real world: the
//! `timew` subprocess, configuration, and the report commands.

mod cli;
pub mod commands;
mod config;
mod runner;
mod timew;

pub use cli::Cli;
pub use config::Config;
pub use runner::{CommandOutput, CommandRunner, RunnerError, SystemRunner};
pub use timew::{QueryFailure, QueryOutcome, TimewClient, ToolUnavailable};
