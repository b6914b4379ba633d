//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure for the `cr`
//! binary using the `clap` crate.

use clap::Parser;
use command_runner_core::definitions::TerminalProfile;

/// Command-line arguments for the command-runner CLI tool.
///
/// Without a command name the tool opens the interactive picker; with one it
/// runs that stored command directly.
///
/// # Examples
///
/// ```bash
/// # Interactive mode - shows the command picker
/// cr
///
/// # Direct execution of a stored command
/// cr build
///
/// # Run with selected files available to the template
/// cr show-diff -F src/main.rs -F src/lib.rs
///
/// # Run the text currently selected in the host editor
/// cr --select-text
///
/// # Resolve and print without executing
/// cr --dry-run build
/// ```
#[derive(Parser, Debug)]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the settings YAML (commands, terminal defaults, config tree).
    ///
    /// If not provided, defaults to `~/.command-runner/commands.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Path to the persisted state YAML holding the recent command list.
    ///
    /// If not provided, defaults to `~/.command-runner/state.yml`.
    #[arg(long, short = 'l')]
    pub state_path: Option<String>,

    /// Stored command name to run directly, skipping the picker.
    #[arg(num_args(1))]
    pub command_name: Option<String>,

    /// A selected file made available to the template as `${selectedFile}` /
    /// `${selectedFiles}` (and appended when auto-append is configured).
    ///
    /// Multiple files can be provided with repeated `-F` flags.
    #[arg(long = "file", short = 'F', action = clap::ArgAction::Append)]
    pub files: Vec<String>,

    /// Terminal session name to reuse or create for this run.
    #[arg(long, short = 't')]
    pub terminal_name: Option<String>,

    /// Focus the terminal session and maximize its panel before sending.
    #[arg(long, action)]
    pub auto_focus: bool,

    /// Clear the terminal session before sending.
    #[arg(long, action)]
    pub auto_clear: bool,

    /// Run the current selection instead of a stored command.
    #[arg(long, action)]
    pub select_text: bool,

    /// Perform a dry run, which prints the resolved command but does not
    /// execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,
}

impl Args {
    /// The caller-side terminal options layered over the configured
    /// defaults. Unset flags stay `None` so they do not mask the defaults.
    #[must_use]
    pub fn terminal_options(&self) -> TerminalProfile {
        TerminalProfile {
            name: self.terminal_name.clone(),
            auto_focus: self.auto_focus.then_some(true),
            auto_clear: self.auto_clear.then_some(true),
            ..TerminalProfile::default()
        }
    }

    /// Selected files as quoted strings, the form templates see.
    #[must_use]
    pub fn quoted_files(&self) -> Vec<String> {
        self.files.iter().map(|file| format!("{file:?}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["cr"]);

        assert!(args.config_path.is_none());
        assert!(args.state_path.is_none());
        assert!(args.command_name.is_none());
        assert!(args.files.is_empty());
        assert!(args.terminal_name.is_none());
        assert!(!args.auto_focus);
        assert!(!args.auto_clear);
        assert!(!args.select_text);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "cr",
            "-c",
            "/custom/commands.yml",
            "-l",
            "/custom/state.yml",
            "-t",
            "runner",
            "-d",
        ]);

        assert_eq!(args.config_path, Some("/custom/commands.yml".to_string()));
        assert_eq!(args.state_path, Some("/custom/state.yml".to_string()));
        assert_eq!(args.terminal_name, Some("runner".to_string()));
        assert!(args.dry_run);
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "cr",
            "--config-path",
            "/custom/commands.yml",
            "--auto-focus",
            "--auto-clear",
            "--select-text",
        ]);

        assert_eq!(args.config_path, Some("/custom/commands.yml".to_string()));
        assert!(args.auto_focus);
        assert!(args.auto_clear);
        assert!(args.select_text);
    }

    #[test]
    fn test_args_command_name() {
        let args = Args::parse_from(["cr", "build"]);
        assert_eq!(args.command_name, Some("build".to_string()));
    }

    #[test]
    fn test_args_repeated_files() {
        let args = Args::parse_from(["cr", "show", "-F", "a.txt", "--file", "b.txt"]);

        assert_eq!(args.command_name, Some("show".to_string()));
        assert_eq!(args.files, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_quoted_files() {
        let args = Args::parse_from(["cr", "-F", "a.txt", "-F", "dir/b c.txt"]);
        assert_eq!(args.quoted_files(), vec!["\"a.txt\"", "\"dir/b c.txt\""]);
    }

    #[test]
    fn test_terminal_options_only_set_flags() {
        let args = Args::parse_from(["cr", "--auto-focus"]);
        let options = args.terminal_options();

        assert_eq!(options.auto_focus, Some(true));
        // Unset flags leave the configured defaults in charge.
        assert_eq!(options.auto_clear, None);
        assert_eq!(options.name, None);
    }

    #[test]
    fn test_terminal_options_with_name() {
        let args = Args::parse_from(["cr", "-t", "runner"]);
        assert_eq!(args.terminal_options().name, Some("runner".to_string()));
    }
}
