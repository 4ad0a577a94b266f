//! The single-server FIFO calculation engine.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};
use tracing::{debug, span, Level};

use crate::{
    error::{Series, ValidationError, ValidationResult},
    indicators::Indicators,
};

/// What happened to one customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Sequential, starting at 1.
    pub customer_id: usize,
    /// Time since the previous arrival (or since the start, for the first customer).
    pub interval: f64,
    /// Service time required.
    pub duration: f64,
    /// Sum of all intervals up to and including this customer.
    pub arrival_time: f64,
    /// When the server started on this customer.
    pub service_start: f64,
    /// When the server finished with this customer.
    pub service_end: f64,
    /// Time spent in the queue.
    pub wait_time: f64,
    /// Time spent in the system: wait plus service.
    pub system_time: f64,
}

/// Runs a deterministic single-server FIFO queue over a fixed input pair.
///
/// The input pair is fixed at construction. The timeline and the indicators are computed once, on
/// the first read, and every later read returns the cached values. A new input pair needs a new
/// engine.
///
/// Negative, NaN and infinite values are rejected at construction, zeros are accepted. So are
/// inputs whose sum is not finite, since that sum bounds every service end. So for any engine that
/// exists, every time is finite, arrival times and service ends never decrease and no wait is
/// negative.
///
/// The cache is not synchronised: an engine can be moved to another thread but not shared between
/// threads. Independent engines can run in parallel.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    intervals: Vec<f64>,
    durations: Vec<f64>,
    outcome: OnceCell<Outcome>,
}

#[derive(Debug, Clone)]
struct Outcome {
    records: Vec<CustomerRecord>,
    indicators: Indicators,
}

impl SimulationEngine {
    /// Validate an input pair and create an engine for it.
    ///
    /// Fails if the sequences differ in length, if any value is negative or not finite, or if the
    /// values add up to a timeline that is out of range.
    pub fn new(
        intervals: impl Into<Vec<f64>>,
        durations: impl Into<Vec<f64>>,
    ) -> ValidationResult<Self> {
        let intervals = intervals.into();
        let durations = durations.into();

        if intervals.len() != durations.len() {
            return Err(ValidationError::LengthMismatch {
                intervals: intervals.len(),
                durations: durations.len(),
            });
        }
        check_series(Series::Intervals, &intervals)?;
        check_series(Series::Durations, &durations)?;
        check_horizon(&intervals, &durations)?;

        Ok(Self {
            intervals,
            durations,
            outcome: OnceCell::new(),
        })
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether there are no customers at all.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The inter-arrival intervals this engine was built with.
    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    /// The service durations this engine was built with.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Whether the simulation has already been computed.
    pub fn has_run(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Compute the timeline and indicators if that has not happened yet.
    ///
    /// Reads call this implicitly, so there is rarely a need to call it directly.
    pub fn run(&self) {
        self.outcome();
    }

    /// One record per customer, in ascending `customer_id` order.
    pub fn customer_table(&self) -> &[CustomerRecord] {
        &self.outcome().records
    }

    /// Aggregate indicators for the whole run.
    pub fn indicators(&self) -> Indicators {
        self.outcome().indicators
    }

    fn outcome(&self) -> &Outcome {
        self.outcome.get_or_init(|| self.simulate())
    }

    fn simulate(&self) -> Outcome {
        let span = span!(Level::INFO, "simulate",
            // Convert to u64 so tracing will treat this as an integer instead of a string.
            customers = self.len() as u64,
        );
        let _entered = span.enter();

        let records = timeline(&self.intervals, &self.durations);
        let indicators = Indicators::from_records(&records);

        debug!(
            total_simulated_time = indicators.total_simulated_time,
            avg_wait = indicators.avg_wait,
            "Simulation finished"
        );

        Outcome {
            records,
            indicators,
        }
    }
}

/// Walk the customers in order, carrying only the time the server becomes free.
fn timeline(intervals: &[f64], durations: &[f64]) -> Vec<CustomerRecord> {
    let mut records = Vec::with_capacity(intervals.len());
    let mut arrival_time = 0.0;
    let mut server_free_at = 0.0_f64;

    for (idx, (&interval, &duration)) in intervals.iter().zip(durations).enumerate() {
        arrival_time += interval;

        let service_start = server_free_at.max(arrival_time);
        let service_end = service_start + duration;
        let wait_time = service_start - arrival_time;

        records.push(CustomerRecord {
            customer_id: idx + 1,
            interval,
            duration,
            arrival_time,
            service_start,
            service_end,
            wait_time,
            // Same as `service_end - arrival_time`, without a second rounding step.
            system_time: wait_time + duration,
        });

        server_free_at = service_end;
    }

    records
}

fn check_series(series: Series, values: &[f64]) -> ValidationResult<()> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { series, index });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative {
                series,
                index,
                value,
            });
        }
    }
    Ok(())
}

/// Every service end is at most the sum of all intervals and durations, and the total time is at
/// least half of it.
fn check_horizon(intervals: &[f64], durations: &[f64]) -> ValidationResult<()> {
    let horizon = intervals.iter().sum::<f64>() + durations.iter().sum::<f64>();
    let max_rate = 2.0 * intervals.len() as f64 / horizon;

    if !horizon.is_finite() || (horizon > 0.0 && !max_rate.is_finite()) {
        return Err(ValidationError::Overflow { horizon });
    }
    Ok(())
}
