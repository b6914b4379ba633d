//! The capability surface the resolver and executor need from the host.
//!
//! Everything interactive or environment-dependent goes through [`Accessor`],
//! so the engine can run against the real host in the CLI and against
//! scripted doubles in tests.

use crate::definitions::CommandSet;
use crate::error::Result;

/// Well-known context variable scopes.
pub mod scopes {
    /// The workspace root the runner was started in.
    pub const WORKSPACE_FOLDER: &str = "workspaceFolder";
    /// The current editor selection, routed in from the host.
    pub const SELECTED_TEXT_SECTION: &str = "selectedTextSection";
    /// The current file, routed in from the host.
    pub const FILE: &str = "file";
}

/// Read access to the host: stored commands, configuration, environment,
/// interactive input, sub-command invocation and context variables.
pub trait Accessor {
    /// The named command templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn commands(&self) -> Result<CommandSet>;

    /// Dotted-key configuration lookup, scalars coerced to string.
    fn config(&self, key: &str) -> Option<String>;

    /// Process environment lookup.
    fn env(&self, name: &str) -> Option<String>;

    /// Prompts the user for a value. `None` means the prompt was cancelled
    /// or answered with nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt channel itself fails; a cancelled
    /// prompt is a value, not an error.
    fn input(&self, label: &str) -> Result<Option<String>>;

    /// Invokes an external command by identifier and returns its output
    /// coerced to a string, or `None` if it produced nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation itself fails.
    fn invoke(&self, id: &str) -> Result<Option<String>>;

    /// Context variable lookup; unknown scopes yield `None`.
    fn variable(&self, scope: &str) -> Option<String>;
}
