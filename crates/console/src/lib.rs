//! EstateFlow Console - management console over the request ledger
//!
//! Provides the CLI binary, its configuration and the per-session context
//! that pairs a request ledger with its yield sessions.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;

pub use cli::{split_line, ConsoleCommand, PatchArgs, SessionLine};
pub use config::{ConfigError, ConsoleConfig, ManagedLoanDefaults};
pub use context::{AppContext, ConsoleError, ConsoleView, UNKNOWN_PROPERTY};
