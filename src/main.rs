//! Queue simulator CLI
//!
//! Simulate a single-server FIFO queue from comma separated input, keep named runs and compare
//! them.
//!
//! # Example
//!
//! ```bash
//! queue-sim simulate -i "1, 1, 1" -d "5, 5, 5" --name busy --save
//! queue-sim list
//! queue-sim compare <ID> <ID>
//! ```

use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use queue_sim::{
    compare::select_runs,
    report::{render_comparison, render_indicators, render_saved_list, render_table},
    JsonFileStore, RunStore, Scenario,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Queue simulator
///
/// Deterministic single-server, first-in-first-out queue simulation.
#[derive(Parser, Debug)]
#[command(name = "queue-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// File where saved runs are kept
    #[arg(
        long,
        global = true,
        env = "QUEUE_SIM_STORE",
        default_value = "queue_simulations.json"
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a queue and print the customer table and indicators
    Simulate {
        /// Inter-arrival intervals, comma separated
        #[arg(short, long, allow_hyphen_values = true)]
        intervals: String,

        /// Service durations, comma separated
        #[arg(short, long, allow_hyphen_values = true)]
        durations: String,

        /// Name for the run. A name is generated when saving without one.
        #[arg(short, long, default_value = "")]
        name: String,

        /// Save the run to the store
        #[arg(long)]
        save: bool,
    },

    /// List saved runs
    List,

    /// Print a saved run
    Show {
        /// Run id
        id: String,
    },

    /// Delete a saved run
    Delete {
        /// Run id
        id: String,
    },

    /// Delete every saved run
    Clear,

    /// Compare the indicators of saved runs
    Compare {
        /// Run ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,queue_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut store = JsonFileStore::new(args.store);
    debug!(store = %store.path().display(), command = ?args.command, "Running command");

    match args.command {
        Command::Simulate {
            intervals,
            durations,
            name,
            save,
        } => {
            let scenario = Scenario::from_text(name, &intervals, &durations);
            for warning in scenario.warnings() {
                eprintln!("warning: {warning}");
            }

            let run = scenario.simulate()?;
            print!("{}", render_table(&run.results));
            println!();
            print!("{}", render_indicators(&run.indicators));

            if save {
                let saved = store.save(&run)?;
                println!("\nSaved as {} ({})", saved.id, saved.name);
            }
        }
        Command::List => {
            let runs = store.list()?;
            if runs.is_empty() {
                println!("No saved runs.");
            } else {
                print!("{}", render_saved_list(&runs));
            }
        }
        Command::Show { id } => {
            let run = store
                .get(&id)?
                .ok_or_else(|| format!("no saved run with id {id}"))?;
            println!("{}", run.name);
            println!("Intervals: {}", join(&run.intervals));
            println!("Durations: {}", join(&run.durations));
            println!();
            print!("{}", render_table(&run.results));
            println!();
            print!("{}", render_indicators(&run.indicators));
        }
        Command::Delete { id } => {
            if store.delete(&id)? {
                println!("Deleted {id}");
            } else {
                return Err(format!("no saved run with id {id}").into());
            }
        }
        Command::Clear => {
            store.clear()?;
            println!("Deleted all saved runs.");
        }
        Command::Compare { ids } => {
            let runs = store.list()?;
            if let Some(missing) = ids.iter().find(|id| !runs.iter().any(|r| &r.id == *id)) {
                return Err(format!("no saved run with id {missing}").into());
            }

            let selected: Vec<_> = select_runs(&runs, &ids).into_iter().cloned().collect();
            print!("{}", render_comparison(&selected));
        }
    }

    Ok(())
}

/// Values as they would be typed back in.
fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
