//! Persisted workspace state.
//!
//! The engine stores only ordered lists of strings under fixed keys (today
//! just the recent command list). [`StateStore`] is the seam; the production
//! implementation keeps the whole store in one YAML file, absent until the
//! first write.

use std::fs::File;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};

type StateMap = IndexMap<String, Vec<String>>;

/// A workspace-scoped key-value store for ordered string lists.
pub trait StateStore {
    /// Reads the list stored under `key`; an unset key is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Vec<String>>;

    /// Replaces the list stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, values: &[String]) -> Result<()>;
}

/// YAML-file-backed [`StateStore`].
pub struct FileStateStore {
    path: String,
}

impl FileStateStore {
    #[must_use]
    pub fn new(path: String) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<StateMap> {
        if !Path::new(&self.path).exists() {
            return Ok(StateMap::new());
        }

        let reader = File::open(&self.path)
            .map_err(|e| Error::io_error("state".to_string(), self.path.clone(), e))?;

        serde_yaml::from_reader(reader).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "state".to_string(),
                self.path.clone(),
                e,
            )
        })
    }

    fn write_all(&self, state: &StateMap) -> Result<()> {
        let writer = File::create(&self.path)
            .map_err(|e| Error::io_error("state".to_string(), self.path.clone(), e))?;

        serde_yaml::to_writer(writer, state).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                "state".to_string(),
                self.path.clone(),
                e,
            )
        })
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Vec<String>> {
        Ok(self.read_all()?.shift_remove(key).unwrap_or_default())
    }

    fn set(&mut self, key: &str, values: &[String]) -> Result<()> {
        let mut state = self.read_all()?;
        state.insert(key.to_string(), values.to_vec());
        self.write_all(&state)
    }
}
