//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and environment variable names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "SmartPlanner";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "smartplanner";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SMARTPLANNER_CONFIG_DIR";

/// Name of the configuration directory below the platform config root.
pub const CONFIG_DIR_NAME: &str = "SmartPlanner";

/// Delay between a drop and the drag coordinator returning to idle, in milliseconds.
///
/// Gives the rendering layer time to play the card's settle animation while the
/// dragged item is still exposed as the active item.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Upper bound accepted for a configured settle delay, in milliseconds.
pub const MAX_SETTLE_DELAY_MS: u64 = 10_000;
