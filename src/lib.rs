//! Deterministic single-server FIFO queue simulation.
//!
//! Give the engine two sequences of the same length: the time between consecutive customer
//! arrivals, and the time each customer needs to be served. It works out, for every customer, when
//! they arrived, when service started and ended, how long they waited and how long they spent in
//! the system. It also summarises the run: average interval, service time, wait and system time,
//! the total simulated time, the arrival rate λ and, by Little's Law, the average queue length.
//!
//! There is a single server and customers are served in arrival order. Nothing is random: the
//! same input always gives the same output.
//!
//! Around the engine there are the pieces an application needs: lenient parsing of comma separated
//! numbers, named scenarios, a store for saved runs, side-by-side comparison and plain-text
//! reports.
//!
//! See the README for an example.

#![deny(missing_docs)]

#[cfg(doctest)]
use doc_comment::doctest;
#[cfg(doctest)]
doctest!("../README.md");

pub mod compare;
mod engine;
pub mod error;
mod indicators;
pub mod parse;
pub mod report;
mod scenario;
pub mod store;

pub use engine::{CustomerRecord, SimulationEngine};
pub use error::{ScenarioError, StoreError, ValidationError};
pub use indicators::{Indicator, Indicators};
pub use parse::{parse_series, ParsedSeries};
pub use scenario::{Scenario, SimulationRun};
pub use store::{JsonFileStore, MemoryStore, RunStore, SavedRun};
