//! Command Runner CLI Library
//!
//! This crate provides the command-line interface for command-runner. It
//! wires the core engine to the real host: a crossterm picker, stdin
//! prompts, the process environment, and shell-backed terminal sessions.
//!
//! # Architecture
//!
//! - [`cli_args`]: command-line argument parsing
//! - [`host`]: the production accessor (settings, environment, prompts,
//!   sub-command invocation, context variables)
//! - [`picker`]: the interactive quick-pick UI
//!
//! # Examples
//!
//! The CLI binary (`cr`) can be used in several ways:
//!
//! ```bash
//! # Interactive mode - shows the command picker
//! cr
//!
//! # Direct execution of a stored command
//! cr build
//!
//! # Run in a named terminal session, clearing it first
//! cr build -t builds --auto-clear
//!
//! # Run the host editor's current selection
//! cr --select-text
//!
//! # Resolve and print without executing
//! cr --dry-run build
//! ```

pub mod cli_args;
pub mod host;
pub mod picker;
