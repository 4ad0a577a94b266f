//! Aggregate performance indicators.

use serde::{Deserialize, Serialize};

use crate::engine::CustomerRecord;

/// Summary of one completed run. Every field is zero for a run without customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Mean inter-arrival interval.
    pub avg_interval: f64,
    /// Mean service duration.
    pub avg_duration: f64,
    /// Mean time spent waiting in the queue.
    pub avg_wait: f64,
    /// Mean time spent in the system.
    pub avg_system_time: f64,
    /// When the last customer left the server.
    pub total_simulated_time: f64,
    /// Customers per unit of total simulated time (λ).
    pub arrival_rate: f64,
    /// Mean number of customers waiting, by Little's Law: `arrival_rate * avg_wait`.
    ///
    /// The customer being served is not counted.
    pub avg_queue_length: f64,
}

impl Indicators {
    /// Aggregate a completed customer table.
    pub fn from_records(records: &[CustomerRecord]) -> Self {
        let total_simulated_time = records.last().map_or(0.0, |r| r.service_end);

        let arrival_rate = if total_simulated_time > 0.0 {
            records.len() as f64 / total_simulated_time
        } else {
            0.0
        };

        let avg_wait = mean(records.iter().map(|r| r.wait_time));

        Self {
            avg_interval: mean(records.iter().map(|r| r.interval)),
            avg_duration: mean(records.iter().map(|r| r.duration)),
            avg_wait,
            avg_system_time: mean(records.iter().map(|r| r.system_time)),
            total_simulated_time,
            arrival_rate,
            avg_queue_length: arrival_rate * avg_wait,
        }
    }

    /// Named values in display order, for tables and series.
    pub fn entries(&self) -> [(Indicator, f64); 7] {
        [
            (Indicator::AvgInterval, self.avg_interval),
            (Indicator::AvgDuration, self.avg_duration),
            (Indicator::AvgWait, self.avg_wait),
            (Indicator::AvgSystemTime, self.avg_system_time),
            (Indicator::ArrivalRate, self.arrival_rate),
            (Indicator::AvgQueueLength, self.avg_queue_length),
            (Indicator::TotalSimulatedTime, self.total_simulated_time),
        ]
    }

    /// The value of a single indicator.
    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::AvgInterval => self.avg_interval,
            Indicator::AvgDuration => self.avg_duration,
            Indicator::AvgWait => self.avg_wait,
            Indicator::AvgSystemTime => self.avg_system_time,
            Indicator::ArrivalRate => self.arrival_rate,
            Indicator::AvgQueueLength => self.avg_queue_length,
            Indicator::TotalSimulatedTime => self.total_simulated_time,
        }
    }
}

/// One of the fields of [`Indicators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// [`Indicators::avg_interval`]
    AvgInterval,
    /// [`Indicators::avg_duration`]
    AvgDuration,
    /// [`Indicators::avg_wait`]
    AvgWait,
    /// [`Indicators::avg_system_time`]
    AvgSystemTime,
    /// [`Indicators::arrival_rate`]
    ArrivalRate,
    /// [`Indicators::avg_queue_length`]
    AvgQueueLength,
    /// [`Indicators::total_simulated_time`]
    TotalSimulatedTime,
}

impl Indicator {
    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::AvgInterval => "Avg interval",
            Indicator::AvgDuration => "Avg service time",
            Indicator::AvgWait => "Avg wait",
            Indicator::AvgSystemTime => "Avg system time",
            Indicator::ArrivalRate => "Arrival rate (λ)",
            Indicator::AvgQueueLength => "Avg queue length",
            Indicator::TotalSimulatedTime => "Total simulated time",
        }
    }

    /// Decimal places used when displaying this indicator.
    pub fn precision(&self) -> usize {
        match self {
            Indicator::ArrivalRate => 4,
            _ => 2,
        }
    }
}

/// Arithmetic mean, or zero when there are no values.
///
/// Finite values can still add up past `f64::MAX`; those are scaled down before summing.
fn mean(values: impl ExactSizeIterator<Item = f64> + Clone) -> f64 {
    let len = values.len() as f64;
    if len == 0.0 {
        return 0.0;
    }
    let sum = values.clone().sum::<f64>();
    if sum.is_finite() {
        sum / len
    } else {
        values.map(|v| v / len).sum()
    }
}
