//! Command Runner Core Library
//!
//! This crate provides the core functionality for command-runner, a tool
//! that stores named shell command templates, resolves `${...}` placeholders
//! through scoped strategies, and runs the result in a managed terminal
//! session.
//!
//! # Key Features
//!
//! - **Template Resolution**: `${variable:args}` placeholders resolved
//!   through predefined bindings, configuration, environment, interactive
//!   input, sub-command output and context variables
//! - **Recency Ranking**: picker ordering biased toward recently run
//!   commands, persisted in a workspace state store
//! - **Session Management**: find-or-create terminal sessions, focus/clear
//!   directives, one-shot close handling
//! - **Capability Traits**: the host surface ([`accessor::Accessor`],
//!   [`select::Picker`], [`session::SessionProvider`], [`state::StateStore`])
//!   is pluggable, with production implementations here and in the CLI crate
//! - **Error Handling**: structured error types for all failure modes
//!
//! # Examples
//!
//! Resolving a template against an accessor:
//!
//! ```no_run
//! use command_runner_core::resolve::resolve;
//! use std::collections::HashMap;
//!
//! # fn run<A: command_runner_core::accessor::Accessor>(accessor: &A) {
//! let predefined = HashMap::from([("selectedFile".to_string(), "a.txt".to_string())]);
//! let resolved = resolve("cat ${selectedFile}", &predefined, accessor);
//! # }
//! ```

pub mod accessor;
pub mod config;
pub mod definitions;
pub mod error;
pub mod executor;
pub mod recent;
pub mod resolve;
pub mod select;
pub mod session;
pub mod state;
