use approx::assert_relative_eq;
use assert_matches::assert_matches;
use queue_sim::{Indicators, SimulationEngine, ValidationError};

use crate::types::{busy, calm, engine, mixed};

/// Given customers who never overlap
/// When we simulate
/// Then nobody waits and the queue is always empty
#[test]
fn calm_queue() {
    let engine = engine(&calm());

    let ends: Vec<_> = engine.customer_table().iter().map(|c| c.service_end).collect();
    assert_eq!(ends, vec![5.0, 9.0, 11.0, 19.0, 23.0]);

    let indicators = engine.indicators();
    assert_eq!(indicators.avg_wait, 0.0);
    assert_eq!(indicators.avg_queue_length, 0.0);
    assert_eq!(indicators.total_simulated_time, 23.0);
    assert_relative_eq!(indicators.arrival_rate, 0.2174, epsilon = 1e-4);
    assert_eq!(indicators.avg_system_time, indicators.avg_duration);
}

/// Given customers who arrive faster than they are served
/// When we simulate
/// Then each one waits for everybody ahead of them
#[test]
fn busy_queue() {
    let engine = engine(&busy());

    let waits: Vec<_> = engine.customer_table().iter().map(|c| c.wait_time).collect();
    assert_eq!(waits, vec![0.0, 4.0, 8.0]);

    assert_eq!(
        engine.indicators(),
        Indicators {
            avg_interval: 1.0,
            avg_duration: 5.0,
            avg_wait: 4.0,
            avg_system_time: 9.0,
            total_simulated_time: 16.0,
            arrival_rate: 0.1875,
            avg_queue_length: 0.75,
        }
    );
}

#[test]
fn table_has_one_record_per_customer() {
    for n in [0, 1, 2, 10, 257] {
        let (intervals, durations) = mixed(n);
        let engine = SimulationEngine::new(intervals, durations).unwrap();

        assert_eq!(engine.customer_table().len(), n);
        assert_eq!(engine.len(), n);
    }
}

#[test]
fn timeline_invariants() {
    let (intervals, durations) = mixed(500);
    let engine = SimulationEngine::new(intervals, durations).unwrap();
    let table = engine.customer_table();

    for (idx, record) in table.iter().enumerate() {
        assert_eq!(record.customer_id, idx + 1);
        assert!(record.wait_time >= 0.0, "customer {} waited {}", idx + 1, record.wait_time);
        assert_eq!(record.wait_time, record.service_start - record.arrival_time);
        assert_eq!(record.system_time, record.wait_time + record.duration);
    }
    for pair in table.windows(2) {
        assert!(pair[0].arrival_time <= pair[1].arrival_time);
        assert!(pair[0].service_end <= pair[1].service_end);
    }

    let indicators = engine.indicators();
    assert_relative_eq!(
        indicators.avg_queue_length,
        indicators.arrival_rate * indicators.avg_wait
    );
    assert_eq!(
        indicators.total_simulated_time,
        table.last().unwrap().service_end
    );
}

#[test]
fn reads_are_idempotent() {
    let (intervals, durations) = mixed(64);
    let engine = SimulationEngine::new(intervals, durations).unwrap();

    let before = engine.indicators();
    let table: Vec<_> = engine.customer_table().to_vec();
    let after = engine.indicators();

    assert_eq!(before, after);
    assert_eq!(table, engine.customer_table());
}

#[test]
fn engines_are_independent() {
    let a = engine(&busy());
    let b = engine(&busy());
    let _ = a.customer_table();

    assert!(a.has_run());
    assert!(!b.has_run());
    assert_eq!(a.indicators(), b.indicators());
}

#[test]
fn no_customers() {
    let engine = SimulationEngine::new(Vec::new(), Vec::new()).unwrap();

    assert!(engine.customer_table().is_empty());
    assert_eq!(engine.indicators(), Indicators::default());
}

#[test]
fn mismatched_lengths_build_no_engine() {
    assert_matches!(
        SimulationEngine::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0]),
        Err(ValidationError::LengthMismatch {
            intervals: 3,
            durations: 2
        })
    );
}
