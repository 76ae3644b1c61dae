//! Population Simulator CLI
//!
//! Interactive menu for running growth/decay simulations, charting them, and
//! saving or reloading named runs.

mod app;
mod console;
mod error;
mod plot;

use app::App;
use clap::Parser;
use console::Console;
use plot::{DisabledPresenter, Presenter, SvgPresenter};
use population_simulator_core_rs::{RunStore, StoreConfig, DEFAULT_STORAGE_ROOT};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "popsim")]
#[command(about = "Simulate cell population growth with periodic decay")]
#[command(version)]
struct Cli {
    /// Directory holding saved runs
    #[arg(long, default_value = DEFAULT_STORAGE_ROOT)]
    storage_root: PathBuf,

    /// SVG file each chart is written to
    #[arg(long, default_value = "population_plot.svg")]
    plot_output: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    no_plot: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "debug")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the menu
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = RunStore::new(StoreConfig {
        root: cli.storage_root,
    });
    let presenter: Box<dyn Presenter> = if cli.no_plot {
        Box::new(DisabledPresenter)
    } else {
        Box::new(SvgPresenter::new(cli.plot_output))
    };

    tracing::info!(root = %store.root().display(), "starting session");

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    App::new(console, store, presenter).run()?;
    Ok(())
}
