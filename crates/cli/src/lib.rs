//! Competition Leaderboard CLI Library
//!
//! Command implementations for the `leaderboard` binary: ground-truth secret
//! encoding, offline scoring, local submissions and leaderboard display,
//! plus the output formatting they share.

pub mod commands;
pub mod output;

pub use commands::CommandContext;
pub use output::{JsonFormatter, OutputFormat, PlainFormatter, Report, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
