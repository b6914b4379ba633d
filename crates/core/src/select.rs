//! Command selection.
//!
//! The picker UI is behind the [`Picker`] trait; this module owns the flow
//! around it: synthesize an example entry for an empty command set, rank the
//! names by recency, prompt, persist the pick and hand the chosen template
//! to the executor. Cancellation is a silent no-op, and a picker failure
//! degrades to one as well (logged, never surfaced).

use log::debug;

use crate::accessor::Accessor;
use crate::definitions::{TerminalProfile, EXAMPLE_COMMAND_NAME, EXAMPLE_COMMAND_TEMPLATE};
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::recent::{rank, record, RECENT_STATE_KEY};
use crate::session::SessionProvider;
use crate::state::StateStore;

/// Prompt label shown above the picker list.
pub const PICK_PROMPT: &str = "Type or select command to run";

/// An interactive single-select list.
pub trait Picker {
    /// Presents `items` and suspends until the user selects one or cancels
    /// (`None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the UI itself fails; callers treat that as a
    /// cancellation.
    fn pick(&self, prompt: &str, items: &[String]) -> Result<Option<String>>;
}

/// Presents the ranked command list and returns the chosen `(name, raw
/// template)` pair, or `None` on cancellation. A successful pick is
/// persisted to the recent list before this returns.
///
/// # Errors
///
/// Returns an error if the command set or state store cannot be read or
/// written. Picker failures are not errors; they degrade to `None`.
pub fn pick_command<A: Accessor, S: StateStore + ?Sized>(
    picker: &dyn Picker,
    store: &mut S,
    accessor: &A,
) -> Result<Option<(String, String)>> {
    let mut commands = accessor.commands()?;

    if commands.is_empty() {
        commands.insert(
            EXAMPLE_COMMAND_NAME.to_string(),
            EXAMPLE_COMMAND_TEMPLATE.to_string(),
        );
    }

    let recent = store.get(RECENT_STATE_KEY)?;
    let display = rank(&commands, &recent);

    let chosen = match picker.pick(PICK_PROMPT, &display) {
        Ok(chosen) => chosen,
        Err(e) => {
            debug!("Picker failed, treating as cancellation: {e}");
            return Ok(None);
        }
    };

    let Some(chosen) = chosen else {
        return Ok(None);
    };

    record(store, &chosen, &display)?;

    let raw = commands
        .get(&chosen)
        .cloned()
        .ok_or_else(|| Error::CommandNotFound(chosen.clone()))?;

    Ok(Some((chosen, raw)))
}

/// Picks a command interactively and executes it. Cancellation runs
/// nothing and persists nothing.
///
/// # Errors
///
/// Propagates state store failures and execution failures.
pub fn pick_and_run<A: Accessor, P: SessionProvider, S: StateStore + ?Sized>(
    picker: &dyn Picker,
    store: &mut S,
    executor: &Executor<'_, A, P>,
    caller: &TerminalProfile,
    selected_files: &[String],
) -> Result<()> {
    match pick_command(picker, store, executor.accessor())? {
        Some((_, raw)) => executor.execute(&raw, caller, selected_files),
        None => Ok(()),
    }
}

/// Looks up a stored command by name, recording it as the most recent pick.
///
/// # Errors
///
/// Returns [`Error::CommandNotFound`] for an unknown name.
pub fn lookup_named<A: Accessor, S: StateStore + ?Sized>(
    accessor: &A,
    store: &mut S,
    name: &str,
) -> Result<String> {
    let commands = accessor.commands()?;
    let raw = commands
        .get(name)
        .cloned()
        .ok_or_else(|| Error::CommandNotFound(name.to_string()))?;

    let recent = store.get(RECENT_STATE_KEY)?;
    let display = rank(&commands, &recent);
    record(store, name, &display)?;

    Ok(raw)
}
