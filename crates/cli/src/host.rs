//! The production [`Accessor`]: settings file, process environment, stdin
//! prompts, sub-process invocation and process-level context variables.

use std::env;
use std::io::{stdin, stdout, Write};
use std::process::{Command, Stdio};

use log::debug;

use command_runner_core::accessor::{scopes, Accessor};
use command_runner_core::config::Settings;
use command_runner_core::definitions::CommandSet;
use command_runner_core::error::{Error, Result};

/// Environment variable carrying the host editor's current selection.
pub const SELECTION_ENV: &str = "COMMAND_RUNNER_SELECTION";
/// Environment variable carrying the host editor's current file.
pub const FILE_ENV: &str = "COMMAND_RUNNER_FILE";

pub struct HostAccessor {
    settings: Settings,
    shell: String,
    workspace_folder: String,
}

impl HostAccessor {
    #[must_use]
    pub fn new(settings: Settings, shell: String) -> Self {
        let workspace_folder = env::current_dir()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        Self {
            settings,
            shell,
            workspace_folder,
        }
    }
}

impl Accessor for HostAccessor {
    fn commands(&self) -> Result<CommandSet> {
        Ok(self.settings.commands.clone())
    }

    fn config(&self, key: &str) -> Option<String> {
        self.settings.lookup(key)
    }

    fn env(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn input(&self, label: &str) -> Result<Option<String>> {
        if label.is_empty() {
            print!("> ");
        } else {
            print!("{label}: ");
        }
        stdout().flush()?;

        let mut input = String::new();
        stdin().read_line(&mut input)?;

        let read_value = input.trim().to_string();
        Ok((!read_value.is_empty()).then_some(read_value))
    }

    fn invoke(&self, id: &str) -> Result<Option<String>> {
        debug!("Invoking external command `{id}`");

        let output = Command::new(&self.shell)
            .args(["-c", id])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Error::invocation(id, e))?;

        if !output.status.success() {
            return Err(Error::invocation(
                id,
                format!("exited with {}", output.status),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_string();
        Ok((!text.is_empty()).then_some(text))
    }

    fn variable(&self, scope: &str) -> Option<String> {
        match scope {
            scopes::WORKSPACE_FOLDER => Some(self.workspace_folder.clone()),
            scopes::SELECTED_TEXT_SECTION => env::var(SELECTION_ENV).ok(),
            scopes::FILE => env::var(FILE_ENV).ok(),
            _ => None,
        }
    }
}
