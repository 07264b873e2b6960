//! UI rendering module for airops
//!
//! This module contains the rendering logic for the interactive flight
//! browser, using the ratatui library for TUI components.

pub mod flight_list;
pub mod help_overlay;

pub use flight_list::render as render_flight_list;
pub use help_overlay::render as render_help_overlay;
