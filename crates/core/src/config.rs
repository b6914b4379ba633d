//! Settings file loading for command-runner.
//!
//! This module provides the settings schema, functions for resolving the
//! settings and state file paths, and the dotted-key lookup that backs the
//! `${config:...}` placeholder strategy.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::definitions::{CommandSet, TerminalProfile};
use crate::error::{Error, Result};

/// Default path for the settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.command-runner/commands.yml";
/// Default path for the persisted workspace state (recent list)
const DEFAULT_STATE_PATH: &str = "~/.command-runner/state.yml";

/// Default shell for terminal sessions and sub-command invocation
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
pub fn get_settings_path(settings_path_arg: &Option<String>) -> String {
    let settings_path = match settings_path_arg {
        Some(settings_path) => settings_path,
        None => DEFAULT_SETTINGS_PATH,
    };

    shellexpand::tilde(settings_path).to_string()
}

/// Resolves the state file path, with `~` expanded.
pub fn get_state_path(state_path_arg: &Option<String>) -> String {
    let state_path = match state_path_arg {
        Some(state_path) => state_path,
        None => DEFAULT_STATE_PATH,
    };

    shellexpand::tilde(state_path).to_string()
}

/// Expands shell variables in a working directory path.
///
/// Returns None if no working directory is provided.
pub fn expand_working_directory(working_directory: &Option<String>) -> Option<String> {
    working_directory
        .as_ref()
        .map(|working_directory| shellexpand::tilde(working_directory).to_string())
}

/// The settings file contents.
///
/// `commands` maps names to raw templates in file order. `terminal` holds the
/// run option defaults. `settings` is a free-form tree served to templates
/// through the `${config:dotted.key}` strategy.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub commands: CommandSet,
    pub terminal: TerminalProfile,
    pub auto_append_selected_files: bool,
    pub settings: Value,
}

impl Settings {
    /// Loads settings from a YAML file.
    ///
    /// A missing file yields the defaults (no commands, no terminal
    /// profile), matching a host whose configuration store simply has no
    /// values set yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or contains
    /// YAML that does not match the schema.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let reader = File::open(path)
            .map_err(|e| Error::io_error("settings".to_string(), path.to_string(), e))?;

        serde_yaml::from_reader(reader).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "settings".to_string(),
                path.to_string(),
                e,
            )
        })
    }

    /// Looks up a dotted key in the `settings` tree and coerces the value to
    /// a string.
    ///
    /// An exact top-level key wins over a dotted descent, so both
    /// `settings: {"shell.pwd": x}` and `settings: {shell: {pwd: x}}`
    /// answer `shell.pwd`. Missing paths and non-scalar values yield `None`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }

        if let Some(value) = self.settings.get(key) {
            if let Some(scalar) = coerce_scalar(value) {
                return Some(scalar);
            }
        }

        let mut current = &self.settings;
        for segment in key.split('.') {
            current = current.get(segment)?;
        }

        coerce_scalar(current)
    }
}

fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
