//! CLI command handlers for SmartPlanner.
//!
//! This module provides headless, scriptable access to the board and theme
//! logic for automation and testing.

pub mod board;
pub mod common;
pub mod config;
pub mod theme;

// Re-export types used by main.rs and tests
pub use board::BoardArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use theme::ThemeArgs;
