//! SmartPlanner Library
//!
//! Client-side state for the SmartPlanner dashboard: the Kanban
//! drag-and-drop coordinator that turns a drag gesture into a single status
//! change, and the theme store that derives presentation tokens from the
//! user's preferences and keeps them in sync.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod kanban;
pub mod theme;
