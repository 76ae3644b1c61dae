//! RunStore - named run persistence
//!
//! Records live as one file per run under a storage root. See
//! `run_store.rs` for the store, `record_file.rs` for the file layout and
//! `save_name.rs` for the save-name resolution loop.

pub mod record_file;
pub mod run_store;
pub mod save_name;

/// Extension of record files, without the dot
pub const RECORD_EXTENSION: &str = "json";

/// Default storage root, relative to the working directory
pub const DEFAULT_STORAGE_ROOT: &str = "saved_runs";

/// File name for a record called `name`
pub fn record_file_name(name: &str) -> String {
    format!("{}.{}", name, RECORD_EXTENSION)
}

// Re-export main types for convenience
pub use record_file::RunFile;
pub use run_store::{RunStore, StoreConfig, StoreError};
pub use save_name::{is_valid_record_name, resolve_save_name, NamePrompt, SaveName, SaveNameState};
