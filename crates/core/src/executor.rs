//! Command execution against a terminal session.
//!
//! [`Executor`] ties the pieces together: it merges terminal options,
//! acquires a session (find-or-create), applies the focus/clear directives,
//! composes the command text with the selected files, resolves the
//! placeholders and sends the result followed by `; exit` so the shell
//! inside the session terminates when the command finishes. The session
//! itself stays open until its process exits, at which point a one-shot
//! close handler decides whether the host should toggle its terminal panel.

use std::collections::HashMap;

use log::debug;

use crate::accessor::{scopes, Accessor};
use crate::definitions::{TerminalProfile, TerminalRunOptions};
use crate::error::Result;
use crate::resolve::resolve;
use crate::session::{find_or_create, SessionProvider};

/// Composes the literal command text sent into resolution: the raw template,
/// optionally followed by the space-joined selected files.
#[must_use]
pub fn compose(raw_template: &str, selected_files: &[String], auto_append: bool) -> String {
    if auto_append && !selected_files.is_empty() {
        format!("{} {}", raw_template, selected_files.join(" "))
    } else {
        raw_template.to_string()
    }
}

/// The highest-precedence bindings for one run: the first selected file and
/// the space-joined full list.
#[must_use]
pub fn predefined_bindings(selected_files: &[String]) -> HashMap<String, String> {
    HashMap::from([
        (
            "selectedFile".to_string(),
            selected_files.first().cloned().unwrap_or_default(),
        ),
        ("selectedFiles".to_string(), selected_files.join(" ")),
    ])
}

/// Runs raw command templates in terminal sessions.
pub struct Executor<'a, A: Accessor, P: SessionProvider> {
    accessor: &'a A,
    provider: &'a P,
    defaults: TerminalProfile,
    auto_append_selected_files: bool,
}

impl<'a, A: Accessor, P: SessionProvider> Executor<'a, A, P> {
    #[must_use]
    pub fn new(
        accessor: &'a A,
        provider: &'a P,
        defaults: TerminalProfile,
        auto_append_selected_files: bool,
    ) -> Self {
        Self {
            accessor,
            provider,
            defaults,
            auto_append_selected_files,
        }
    }

    #[must_use]
    pub fn accessor(&self) -> &A {
        self.accessor
    }

    /// Composes and resolves the final command text without touching any
    /// session. This is what a dry run prints.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures.
    pub fn compose_and_resolve(
        &self,
        raw_template: &str,
        selected_files: &[String],
    ) -> Result<String> {
        let composed = compose(raw_template, selected_files, self.auto_append_selected_files);
        debug!("--> Run Command: {composed}");

        let predefined = predefined_bindings(selected_files);
        resolve(&composed, &predefined, self.accessor)
    }

    /// Executes a raw command template in a terminal session.
    ///
    /// # Errors
    ///
    /// Returns an error if no session can be acquired, a host request
    /// fails, or placeholder resolution fails (in which case nothing is
    /// sent).
    pub fn execute(
        &self,
        raw_template: &str,
        caller: &TerminalProfile,
        selected_files: &[String],
    ) -> Result<()> {
        let merged = TerminalRunOptions::merge(&self.defaults, caller);
        let session = find_or_create(self.provider, &merged.session_options())?;

        if merged.auto_focus {
            self.provider.show(session)?;
            self.provider.maximize_panel()?;
        }

        if merged.auto_clear {
            self.provider.clear(session)?;
        }

        let resolved = self.compose_and_resolve(raw_template, selected_files)?;
        self.provider.send_text(session, &format!("{resolved}; exit"))?;

        self.provider.on_close(
            session,
            Box::new(|provider| {
                if provider.active().is_some() {
                    if let Err(e) = provider.toggle_panel() {
                        debug!("Panel toggle after session close failed: {e}");
                    }
                }
            }),
        )?;

        Ok(())
    }

    /// Runs the current editor selection as a command, bypassing the stored
    /// templates entirely.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Executor::execute`].
    pub fn execute_selected_text(
        &self,
        caller: &TerminalProfile,
        selected_files: &[String],
    ) -> Result<()> {
        let raw = self
            .accessor
            .variable(scopes::SELECTED_TEXT_SECTION)
            .unwrap_or_default();

        self.execute(&raw, caller, selected_files)
    }
}
