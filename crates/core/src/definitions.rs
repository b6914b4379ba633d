use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named command templates, in the order they appear in the settings file.
/// Names are unique by construction; a duplicate key in the YAML mapping is
/// resolved as last-write-wins before this type is ever built.
pub type CommandSet = IndexMap<String, String>;

/// Entry offered when the user has not stored any commands yet, so the
/// picker always has at least one item.
pub const EXAMPLE_COMMAND_NAME: &str = "This is an example as `echo \"${workspaceFolder}\"`";
pub const EXAMPLE_COMMAND_TEMPLATE: &str = "echo \"${workspaceFolder}\"";

/// Terminal options as they appear in the settings file or on the command
/// line. Every field is optional so that caller-supplied values can be
/// layered over the configured defaults.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalProfile {
    pub name: Option<String>,
    pub shell: Option<String>,
    pub working_directory: Option<String>,
    pub auto_focus: Option<bool>,
    pub auto_clear: Option<bool>,
    pub hide_from_user: Option<bool>,
}

/// Fully merged options for one run of a command.
///
/// `auto_focus` and `auto_clear` direct the executor itself and are stripped
/// before the session provider sees the options; `hide_from_user` is always
/// forced off so the terminal stays visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalRunOptions {
    pub name: Option<String>,
    pub shell: Option<String>,
    pub working_directory: Option<String>,
    pub auto_focus: bool,
    pub auto_clear: bool,
    pub hide_from_user: bool,
}

/// The subset of [`TerminalRunOptions`] a session provider is allowed to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub name: Option<String>,
    pub shell: Option<String>,
    pub working_directory: Option<String>,
    pub hide_from_user: bool,
}

impl TerminalRunOptions {
    /// Layers `caller` over `defaults` field by field, then forces
    /// `hide_from_user` off.
    #[must_use]
    pub fn merge(defaults: &TerminalProfile, caller: &TerminalProfile) -> Self {
        Self {
            name: caller.name.clone().or_else(|| defaults.name.clone()),
            shell: caller.shell.clone().or_else(|| defaults.shell.clone()),
            working_directory: caller
                .working_directory
                .clone()
                .or_else(|| defaults.working_directory.clone()),
            auto_focus: caller
                .auto_focus
                .or(defaults.auto_focus)
                .unwrap_or_default(),
            auto_clear: caller
                .auto_clear
                .or(defaults.auto_clear)
                .unwrap_or_default(),
            hide_from_user: false,
        }
    }

    /// Strips the executor-level directives, leaving what the session
    /// provider is given.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            name: self.name.clone(),
            shell: self.shell.clone(),
            working_directory: self.working_directory.clone(),
            hide_from_user: self.hide_from_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>, auto_focus: Option<bool>) -> TerminalProfile {
        TerminalProfile {
            name: name.map(ToString::to_string),
            auto_focus,
            ..TerminalProfile::default()
        }
    }

    #[test]
    fn test_merge_caller_wins_over_defaults() {
        let defaults = profile(Some("default"), Some(false));
        let caller = profile(Some("caller"), Some(true));

        let merged = TerminalRunOptions::merge(&defaults, &caller);
        assert_eq!(merged.name, Some("caller".to_string()));
        assert!(merged.auto_focus);
    }

    #[test]
    fn test_merge_falls_back_to_defaults() {
        let defaults = profile(Some("default"), Some(true));
        let caller = TerminalProfile::default();

        let merged = TerminalRunOptions::merge(&defaults, &caller);
        assert_eq!(merged.name, Some("default".to_string()));
        assert!(merged.auto_focus);
        assert!(!merged.auto_clear);
    }

    #[test]
    fn test_merge_always_forces_visibility() {
        let defaults = TerminalProfile {
            hide_from_user: Some(true),
            ..TerminalProfile::default()
        };
        let caller = TerminalProfile {
            hide_from_user: Some(true),
            ..TerminalProfile::default()
        };

        let merged = TerminalRunOptions::merge(&defaults, &caller);
        assert!(!merged.hide_from_user);
        assert!(!merged.session_options().hide_from_user);
    }

    #[test]
    fn test_session_options_strip_control_flags() {
        let merged = TerminalRunOptions {
            name: Some("build".to_string()),
            auto_focus: true,
            auto_clear: true,
            ..TerminalRunOptions::default()
        };

        let session_options = merged.session_options();
        assert_eq!(session_options.name, Some("build".to_string()));
        // The stripped form has no focus/clear directives at all; the type
        // system enforces it.
    }
}
