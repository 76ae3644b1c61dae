//! Line-oriented console over any reader/writer pair

use population_simulator_core_rs::NamePrompt;
use std::io::{self, BufRead, Write};

/// Blocking prompt/response console
///
/// Generic so the menu can be driven from a script in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Print `message` and read one line, without its line ending
    ///
    /// Returns `None` at end of input. Bytes that are not UTF-8 are replaced
    /// rather than failing the read, so bad input surfaces as an unparseable
    /// answer.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt, treating end of input and read failures as an empty answer
    fn answer_or_empty(&mut self, message: &str) -> String {
        match self.prompt(message) {
            Ok(Some(line)) => line,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(error = %e, "prompt failed; treating as empty answer");
                String::new()
            }
        }
    }

    /// Print a line from a prompt callback, where errors cannot be returned
    fn notify(&mut self, message: &str) {
        if let Err(e) = self.say(message) {
            tracing::warn!(error = %e, "failed to write to console");
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> NamePrompt for Console<R, W> {
    fn next_name(&mut self) -> String {
        self.answer_or_empty("Enter a name for this run (no spaces, no extension): ")
    }

    fn confirm_overwrite(&mut self, file_name: &str) -> String {
        self.answer_or_empty(&format!(
            "A file named '{}' already exists. Overwrite? (y/n): ",
            file_name
        ))
    }

    fn on_cancelled(&mut self) {
        self.notify("Save cancelled: no name given.");
    }

    fn on_rejected(&mut self, name: &str) {
        self.notify(&format!(
            "'{}' cannot be used as a run name (no path separators).",
            name
        ));
    }

    fn on_declined(&mut self, _file_name: &str) {
        self.notify("Please enter a different name.");
    }
}
