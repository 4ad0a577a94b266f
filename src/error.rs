//! Errors.

use std::fmt::{self, Display};

use thiserror::Error;

/// Input that an engine refuses to be built from.
///
/// Raised synchronously by [`SimulationEngine::new`](crate::SimulationEngine::new). No engine
/// exists afterwards, so there is no table or summary to confuse with an earlier run.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The two input sequences have different lengths.
    ///
    /// Recoverable: correct the input and construct a new engine.
    #[error("intervals and durations must have the same length: got {intervals} intervals and {durations} durations")]
    LengthMismatch {
        /// Number of inter-arrival intervals given.
        intervals: usize,
        /// Number of service durations given.
        durations: usize,
    },

    /// A value is below zero.
    #[error("{series} value at position {index} is negative: {value}")]
    Negative {
        /// Which input sequence holds the value.
        series: Series,
        /// Zero-based position in that sequence.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A value is NaN or infinite.
    #[error("{series} value at position {index} is not a finite number")]
    NotFinite {
        /// Which input sequence holds the value.
        series: Series,
        /// Zero-based position in that sequence.
        index: usize,
    },

    /// Every value is finite on its own, but the timeline they add up to is not.
    ///
    /// Either the clock would pass the largest representable time, or the total time is so small
    /// that the arrival rate would not be representable.
    #[error("the simulated timeline is out of range: intervals and durations add up to {horizon}")]
    Overflow {
        /// Sum of every interval and every duration. Bounds the time the last customer leaves.
        horizon: f64,
    },
}

/// One of the two input sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    /// Inter-arrival intervals.
    Intervals,
    /// Service durations.
    Durations,
}

impl Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Series::Intervals => "interval",
            Series::Durations => "duration",
        })
    }
}

/// A token dropped while parsing numeric text.
///
/// Soft: parsing carries on without the token. If dropping makes the two sequences differ in
/// length, the engine reports a [`ValidationError::LengthMismatch`] later.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ignored token {position} ({token:?}): not a number")]
pub struct ParseWarning {
    /// Zero-based position among the comma separated tokens, empty tokens included.
    pub position: usize,
    /// The trimmed token as written.
    pub token: String,
}

/// An error that occurred while simulating a named scenario.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScenarioError {
    /// At least one of the input sequences has no values.
    #[error("both the arrival intervals and the service durations are required")]
    EmptyInput,

    /// The engine rejected the input.
    #[error("invalid simulation input")]
    Invalid(#[from] ValidationError),

    /// The simulation panicked while running on a worker thread.
    #[error("the simulation panicked")]
    Panic,
}

/// An error raised by a [`RunStore`](crate::store::RunStore).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("unable to access the run store")]
    Io(#[from] std::io::Error),

    /// The runs could not be encoded.
    #[error("unable to serialize saved runs")]
    Serialization(#[from] serde_json::Error),

    /// Only runs with at least one customer can be saved.
    #[error("run a simulation before saving it")]
    EmptyRun,

    /// The run holds a NaN or infinite number, which JSON cannot represent.
    #[error("run holds a value that is not a finite number")]
    NotFinite,
}

/// Result type for engine construction.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
