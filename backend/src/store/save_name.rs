//! Save-name resolution
//!
//! Choosing a name for a new record is an interactive loop: the user proposes
//! names until one is free, confirms overwriting a taken one, or gives up by
//! entering nothing. The loop is an explicit state machine driven through the
//! [`NamePrompt`] trait, so it runs the same against a terminal or a script.
//!
//! ```text
//! Prompting --(empty)--------> Cancelled
//! Prompting --(invalid)------> Prompting
//! Prompting --(free)---------> Accepted
//! Prompting --(taken)--------> ConfirmOverwrite
//! ConfirmOverwrite --(y)-----> Accepted
//! ConfirmOverwrite --(other)-> Prompting
//! ```

use crate::store::record_file_name;

/// Source of candidate names and overwrite answers
///
/// The notification hooks let an interactive front end report why a
/// candidate was not accepted. They default to doing nothing.
pub trait NamePrompt {
    /// Next candidate name. An empty answer cancels the save.
    fn next_name(&mut self) -> String;

    /// Answer to "overwrite `file_name`?". Only `y` (any case) confirms.
    fn confirm_overwrite(&mut self, file_name: &str) -> String;

    /// The user gave no name
    fn on_cancelled(&mut self) {}

    /// `name` cannot be used as a record name
    fn on_rejected(&mut self, _name: &str) {}

    /// The user declined to overwrite `file_name`
    fn on_declined(&mut self, _file_name: &str) {}
}

/// Outcome of save-name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveName {
    /// Save under this name, replacing any existing record
    Accepted(String),
    /// No name given; nothing should be written
    Cancelled,
}

/// States of the resolution loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveNameState {
    Prompting,
    ConfirmOverwrite(String),
    Accepted(String),
    Cancelled,
}

impl SaveNameState {
    /// Transition out of `Prompting` for a raw candidate
    pub fn after_name<F>(raw: &str, exists: F) -> SaveNameState
    where
        F: Fn(&str) -> bool,
    {
        let name = raw.trim();
        if name.is_empty() {
            SaveNameState::Cancelled
        } else if !is_valid_record_name(name) {
            SaveNameState::Prompting
        } else if exists(name) {
            SaveNameState::ConfirmOverwrite(name.to_string())
        } else {
            SaveNameState::Accepted(name.to_string())
        }
    }

    /// Transition out of `ConfirmOverwrite(name)` for an answer
    pub fn after_confirmation(name: String, answer: &str) -> SaveNameState {
        if answer.trim().eq_ignore_ascii_case("y") {
            SaveNameState::Accepted(name)
        } else {
            SaveNameState::Prompting
        }
    }
}

/// Whether `name` can be used as a file stem inside the storage root
///
/// Rejects path separators and the `.`/`..` directory names so a record can
/// never be written outside the root.
pub fn is_valid_record_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Run the resolution loop to a terminal state
///
/// `exists` reports whether a record with the given (trimmed) name is already
/// stored.
pub fn resolve_save_name<P, F>(prompt: &mut P, exists: F) -> SaveName
where
    P: NamePrompt + ?Sized,
    F: Fn(&str) -> bool,
{
    let mut state = SaveNameState::Prompting;
    loop {
        state = match state {
            SaveNameState::Prompting => {
                let raw = prompt.next_name();
                let next = SaveNameState::after_name(&raw, &exists);
                match &next {
                    SaveNameState::Prompting => prompt.on_rejected(raw.trim()),
                    SaveNameState::Cancelled => prompt.on_cancelled(),
                    _ => {}
                }
                next
            }
            SaveNameState::ConfirmOverwrite(name) => {
                let file_name = record_file_name(&name);
                let answer = prompt.confirm_overwrite(&file_name);
                let next = SaveNameState::after_confirmation(name, &answer);
                if next == SaveNameState::Prompting {
                    prompt.on_declined(&file_name);
                }
                next
            }
            SaveNameState::Accepted(name) => {
                tracing::debug!(name = %name, "save name accepted");
                return SaveName::Accepted(name);
            }
            SaveNameState::Cancelled => {
                tracing::debug!("save cancelled: no name given");
                return SaveName::Cancelled;
            }
        };
    }
}
