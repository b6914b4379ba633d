//! Recency ranking for the command picker.
//!
//! The display order puts recently chosen commands first, in their own
//! most-recent-first order, followed by the remaining commands in settings
//! file order. Writes deduplicate and cap the persisted list so it cannot
//! grow without bound.

use indexmap::IndexSet;

use crate::definitions::CommandSet;
use crate::error::Result;
use crate::state::StateStore;

/// Fixed key the recent list is persisted under.
pub const RECENT_STATE_KEY: &str = "COMMAND_RUNNER_RECENT";

/// Upper bound on the persisted recent list.
pub const MAX_RECENT_ENTRIES: usize = 30;

/// Computes the picker display order.
///
/// Recent names that no longer exist in the command set are dropped
/// silently; duplicates in a legacy persisted list collapse to their first
/// (most recent) occurrence.
#[must_use]
pub fn rank(commands: &CommandSet, recent: &[String]) -> Vec<String> {
    let mut ordered: IndexSet<&str> = IndexSet::with_capacity(commands.len());

    for name in recent {
        if commands.contains_key(name) {
            ordered.insert(name.as_str());
        }
    }

    for name in commands.keys() {
        ordered.insert(name.as_str());
    }

    ordered.into_iter().map(ToString::to_string).collect()
}

/// Records a pick: the selection moves to the front of the displayed order
/// and the result is deduplicated, capped and persisted.
///
/// # Errors
///
/// Returns an error if the state store cannot be written.
pub fn record<S: StateStore + ?Sized>(
    store: &mut S,
    selected: &str,
    displayed: &[String],
) -> Result<()> {
    let mut updated: IndexSet<&str> = IndexSet::with_capacity(displayed.len() + 1);
    updated.insert(selected);

    for name in displayed {
        updated.insert(name.as_str());
    }

    let updated: Vec<String> = updated
        .into_iter()
        .take(MAX_RECENT_ENTRIES)
        .map(ToString::to_string)
        .collect();

    store.set(RECENT_STATE_KEY, &updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStateStore {
        entries: HashMap<String, Vec<String>>,
    }

    impl StateStore for MemoryStateStore {
        fn get(&self, key: &str) -> Result<Vec<String>> {
            Ok(self.entries.get(key).cloned().unwrap_or_default())
        }

        fn set(&mut self, key: &str, values: &[String]) -> Result<()> {
            self.entries.insert(key.to_string(), values.to_vec());
            Ok(())
        }
    }

    fn command_set(names: &[&str]) -> CommandSet {
        names
            .iter()
            .map(|name| (name.to_string(), format!("echo {name}")))
            .collect()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_rank_without_recent_keeps_set_order() {
        let commands = command_set(&["build", "test", "lint"]);
        assert_eq!(rank(&commands, &[]), strings(&["build", "test", "lint"]));
    }

    #[test]
    fn test_rank_moves_recent_to_front_preserving_recent_order() {
        let commands = command_set(&["build", "test", "lint"]);
        let recent = strings(&["test", "build"]);

        assert_eq!(
            rank(&commands, &recent),
            strings(&["test", "build", "lint"])
        );
    }

    #[test]
    fn test_rank_drops_stale_recent_names() {
        let commands = command_set(&["build", "test"]);
        let recent = strings(&["deleted", "test"]);

        assert_eq!(rank(&commands, &recent), strings(&["test", "build"]));
    }

    #[test]
    fn test_rank_collapses_legacy_duplicates() {
        let commands = command_set(&["build", "test"]);
        let recent = strings(&["test", "build", "test", "test"]);

        assert_eq!(rank(&commands, &recent), strings(&["test", "build"]));
    }

    #[test]
    fn test_record_prepends_selection_and_dedups() {
        let mut store = MemoryStateStore::default();
        let displayed = strings(&["test", "build", "lint"]);

        record(&mut store, "build", &displayed).unwrap();

        assert_eq!(
            store.get(RECENT_STATE_KEY).unwrap(),
            strings(&["build", "test", "lint"])
        );
    }

    #[test]
    fn test_record_then_rank_is_idempotent_for_repeat_picks() {
        let commands = command_set(&["build", "test", "lint"]);
        let mut store = MemoryStateStore::default();

        let displayed = rank(&commands, &strings(&["test", "build"]));
        record(&mut store, "build", &displayed).unwrap();

        let next_display = rank(&commands, &store.get(RECENT_STATE_KEY).unwrap());
        assert_eq!(next_display, strings(&["build", "test", "lint"]));
    }

    #[test]
    fn test_record_caps_list_length() {
        let mut store = MemoryStateStore::default();
        let displayed: Vec<String> = (0..60).map(|i| format!("command-{i}")).collect();

        record(&mut store, "picked", &displayed).unwrap();

        let persisted = store.get(RECENT_STATE_KEY).unwrap();
        assert_eq!(persisted.len(), MAX_RECENT_ENTRIES);
        assert_eq!(persisted[0], "picked");
    }
}
