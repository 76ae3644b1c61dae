//! Run store
//!
//! Name-addressed storage of [`RunRecord`]s under a single directory.
//!
//! # Critical Invariants
//!
//! - **One File Per Name**: a record named `n` lives at `<root>/n.json`
//! - **Listing-Relative Loads**: `load_run` indexes the most recent
//!   `list_runs` result, 1-based
//! - **No Silent Corruption**: files that do not describe a consistent run
//!   are reported as malformed, never partially loaded

use crate::models::{RunRecord, SimulationParameters, TimeSeries};
use crate::store::record_file::RunFile;
use crate::store::save_name::{resolve_save_name, NamePrompt, SaveName};
use crate::store::{record_file_name, DEFAULT_STORAGE_ROOT, RECORD_EXTENSION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record {}: {reason}", .path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("Cannot save {}: population at step {step} is {value}, which JSON cannot store", .path.display())]
    NonFinitePopulation { path: PathBuf, step: usize, value: f64 },

    #[error("Selection {selection} is out of range (1-{count})")]
    SelectionOutOfRange { selection: usize, count: usize },
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding record files
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_STORAGE_ROOT),
        }
    }
}

/// File-backed store of named runs
///
/// # Example
///
/// ```no_run
/// use population_simulator_core_rs::{simulate, RunStore, SimulationParameters, StoreConfig};
///
/// let params = SimulationParameters {
///     initial_population: 100,
///     growth_rate: 0.2,
///     time_steps: 10,
///     decay_interval: 3,
///     decay_percent: 0.3,
/// };
/// let mut store = RunStore::new(StoreConfig::default());
/// store.save_run("baseline", &params, &simulate(&params)).unwrap();
///
/// let files = store.list_runs().unwrap();
/// assert!(files.contains(&"baseline.json".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct RunStore {
    config: StoreConfig,

    /// File names from the most recent `list_runs` call
    listing: Vec<String>,
}

impl RunStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            listing: Vec::new(),
        }
    }

    /// Store rooted at `root`
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig { root: root.into() })
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Path of the record file for `name`
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.config.root.join(record_file_name(name))
    }

    /// Whether a record named `name` is stored
    pub fn contains(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    /// Create the storage root if it does not exist
    pub fn ensure_storage_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.config.root).map_err(|source| StoreError::StorageWrite {
            path: self.config.root.clone(),
            source,
        })
    }

    /// List record files under the root, sorted by file name
    ///
    /// A missing root lists as empty. The result becomes the listing that
    /// [`RunStore::load_run`] selects from.
    pub fn list_runs(&mut self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.config.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.listing.clear();
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::StorageRead {
                    path: self.config.root.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::StorageRead {
                path: self.config.root.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_record = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| ext == RECORD_EXTENSION);
            if !is_record {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(file_name.to_string());
            }
        }
        files.sort();

        tracing::debug!(root = %self.config.root.display(), count = files.len(), "listed runs");
        self.listing = files.clone();
        Ok(files)
    }

    /// Ask for a save name until one is accepted or the user cancels
    pub fn resolve_save_name<P>(&self, prompt: &mut P) -> SaveName
    where
        P: NamePrompt + ?Sized,
    {
        resolve_save_name(prompt, |name| self.contains(name))
    }

    /// Write a run under `name`, replacing any existing record
    ///
    /// Returns the path written.
    pub fn save_run(
        &self,
        name: &str,
        params: &SimulationParameters,
        series: &TimeSeries,
    ) -> Result<PathBuf, StoreError> {
        self.write_run_file(&RunFile::from_parts(name, params, series))
    }

    /// Write an existing record under its own name
    pub fn save_record(&self, record: &RunRecord) -> Result<PathBuf, StoreError> {
        self.write_run_file(&RunFile::from(record))
    }

    fn write_run_file(&self, file: &RunFile) -> Result<PathBuf, StoreError> {
        let path = self.record_path(&file.name);

        if let Some((step, value)) = file.first_non_finite() {
            return Err(StoreError::NonFinitePopulation { path, step, value });
        }

        self.ensure_storage_root()?;

        let bytes = file.to_json_bytes().map_err(|e| StoreError::StorageWrite {
            path: path.clone(),
            source: io::Error::from(e),
        })?;

        fs::write(&path, bytes).map_err(|source| StoreError::StorageWrite {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            name = %file.name,
            path = %path.display(),
            steps = file.time_data.len(),
            "run saved"
        );
        Ok(path)
    }

    /// Load the `selection`-th (1-based) file of the most recent listing
    pub fn load_run(&self, selection: usize) -> Result<RunRecord, StoreError> {
        let count = self.listing.len();
        if selection == 0 || selection > count {
            return Err(StoreError::SelectionOutOfRange { selection, count });
        }
        let path = self.config.root.join(&self.listing[selection - 1]);
        self.read_record(&path)
    }

    /// File name behind a listing selection, if in range
    pub fn listed_file(&self, selection: usize) -> Option<&str> {
        selection
            .checked_sub(1)
            .and_then(|i| self.listing.get(i))
            .map(String::as_str)
    }

    fn read_record(&self, path: &Path) -> Result<RunRecord, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::StorageRead {
            path: path.to_path_buf(),
            source,
        })?;

        let record = RunFile::from_json_slice(&bytes)
            .and_then(RunRecord::try_from)
            .map_err(|reason| {
                tracing::warn!(path = %path.display(), reason = %reason, "rejected malformed record");
                StoreError::MalformedRecord {
                    path: path.to_path_buf(),
                    reason,
                }
            })?;

        tracing::info!(name = %record.name(), path = %path.display(), "run loaded");
        Ok(record)
    }
}
