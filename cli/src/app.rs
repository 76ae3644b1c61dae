//! Menu loop
//!
//! Drives the simulator and the run store from a three-option menu. Every
//! failure is reported and control returns to the menu; only end of input or
//! an explicit exit ends the session.

use crate::console::Console;
use crate::error::CliError;
use crate::plot::Presenter;
use population_simulator_core_rs::{
    simulate, RunStore, SaveName, SimulationParameters, StoreError, TimeSeries,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Menu selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    RunNew,
    LoadSaved,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::RunNew),
            "2" => Some(MenuChoice::LoadSaved),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub struct App<R, W> {
    console: Console<R, W>,
    store: RunStore,
    presenter: Box<dyn Presenter>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(console: Console<R, W>, store: RunStore, presenter: Box<dyn Presenter>) -> Self {
        Self {
            console,
            store,
            presenter,
        }
    }

    /// Show the menu until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.say("\n--- Cell Population Simulator ---")?;
            self.console.say("[1] Run new simulation")?;
            self.console.say("[2] Load saved simulation")?;
            self.console.say("[3] Exit")?;

            let Some(input) = self.console.prompt("Enter selection: ")? else {
                tracing::debug!("input closed; leaving menu");
                return Ok(());
            };

            let outcome = match MenuChoice::parse(&input) {
                Some(MenuChoice::RunNew) => self.run_new_simulation(),
                Some(MenuChoice::LoadSaved) => self.load_saved_simulation(),
                Some(MenuChoice::Exit) => {
                    self.console.say("Exiting. Goodbye!")?;
                    return Ok(());
                }
                None => {
                    self.console.say("Invalid choice. Please enter 1, 2, or 3.")?;
                    continue;
                }
            };

            if let Err(err) = outcome {
                self.report(err)?;
            }
        }
    }

    fn report(&mut self, err: CliError) -> io::Result<()> {
        match err {
            CliError::Io(e) => Err(e),
            CliError::InputParse { field, value } => {
                tracing::debug!(field, value = %value, "parameter rejected");
                self.console.say("Input valid values for all parameters.")
            }
            CliError::InvalidParameters(e) => self
                .console
                .say(format!("Input valid values for all parameters. ({})", e)),
            CliError::Store(StoreError::SelectionOutOfRange { .. }) => {
                self.console.say("Invalid selection.")
            }
            other => {
                tracing::warn!(error = %other, "operation abandoned");
                self.console.say(format!("Error: {}", other))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Run new
    // ------------------------------------------------------------------------

    fn run_new_simulation(&mut self) -> Result<(), CliError> {
        let Some(params) = self.read_parameters()? else {
            return Ok(());
        };
        params.validate()?;

        self.console.say(format!(
            "Running simulation with: initial_population={}, growth_rate={}, time_steps={}, decay_interval={}, decay_percent={}",
            params.initial_population,
            params.growth_rate,
            params.time_steps,
            params.decay_interval,
            params.decay_percent
        ))?;
        let series = simulate(&params);

        if let Err(err) = self.present(&series) {
            // The run is still worth saving without a chart
            self.report(err)?;
        }

        self.save_flow(&params, &series)
    }

    /// Prompt for all five parameters; `None` if input ended
    fn read_parameters(&mut self) -> Result<Option<SimulationParameters>, CliError> {
        let Some(initial_population) = self.read_field::<i64>("Initial Population: ", "initial population")?
        else {
            return Ok(None);
        };
        let Some(growth_rate) = self.read_field::<f64>("Growth rate (e.g. 0.2 for 20%): ", "growth rate")?
        else {
            return Ok(None);
        };
        let Some(time_steps) = self.read_field::<usize>("Total time steps: ", "time steps")? else {
            return Ok(None);
        };
        let Some(decay_interval) =
            self.read_field::<usize>("Decay interval (e.g. every 10 steps): ", "decay interval")?
        else {
            return Ok(None);
        };
        let Some(decay_percent) =
            self.read_field::<f64>("Decay percent (e.g. 0.3 for 30%): ", "decay percent")?
        else {
            return Ok(None);
        };

        Ok(Some(SimulationParameters {
            initial_population,
            growth_rate,
            time_steps,
            decay_interval,
            decay_percent,
        }))
    }

    fn read_field<T: FromStr>(
        &mut self,
        prompt: &str,
        field: &'static str,
    ) -> Result<Option<T>, CliError> {
        match self.console.prompt(prompt)? {
            Some(raw) => parse_field(&raw, field).map(Some),
            None => Ok(None),
        }
    }

    fn save_flow(&mut self, params: &SimulationParameters, series: &TimeSeries) -> Result<(), CliError> {
        match self.store.resolve_save_name(&mut self.console) {
            SaveName::Accepted(name) => {
                let path = self.store.save_run(&name, params, series)?;
                self.console.say(format!("Run saved as {}", path.display()))?;
            }
            SaveName::Cancelled => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Load saved
    // ------------------------------------------------------------------------

    fn load_saved_simulation(&mut self) -> Result<(), CliError> {
        let files = self.store.list_runs()?;
        if files.is_empty() {
            self.console.say("No saved runs found.")?;
            return Ok(());
        }

        self.console.say("\nAvailable Saved Runs:")?;
        for (i, file) in files.iter().enumerate() {
            self.console.say(format!("[{}] {}", i + 1, file))?;
        }

        let Some(raw) = self.console.prompt("Select a run to load (number): ")? else {
            return Ok(());
        };
        let selection = match raw.trim().parse::<i64>() {
            // Zero and negatives fall out of range in the store
            Ok(n) => usize::try_from(n).unwrap_or(0),
            Err(_) => {
                self.console.say("Please enter a valid number.")?;
                return Ok(());
            }
        };

        let record = self.store.load_run(selection)?;
        let file = self.store.listed_file(selection).unwrap_or(record.name()).to_string();
        self.console.say(format!("Loaded '{}' successfully.", file))?;
        self.present(record.series())
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    /// Render and wait until the user is done looking at the chart
    fn present(&mut self, series: &TimeSeries) -> Result<(), CliError> {
        if let Some(path) = self.presenter.present(series)? {
            self.console.prompt(&format!(
                "Chart written to {}. (Press Enter to continue.)",
                path.display()
            ))?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_console(self) -> Console<R, W> {
        self.console
    }
}

fn parse_field<T: FromStr>(raw: &str, field: &'static str) -> Result<T, CliError> {
    raw.trim().parse::<T>().map_err(|_| CliError::InputParse {
        field,
        value: raw.trim().to_string(),
    })
}
