//! Interactive command picker.
//!
//! This module provides the terminal quick-pick for command-runner: a
//! scrollable list with fuzzy filtering.
//!
//! # User Interface
//!
//! The interface supports:
//! - Arrow key navigation with wrap-around
//! - Enter to select the highlighted command
//! - Typing to filter commands (fuzzy search), Backspace to widen
//! - Escape or Ctrl-C to cancel

pub mod types;
pub mod ui;

// Re-exports for convenience
pub use types::{CycleDirection, UiState};
pub use ui::QuickPick;
