use queue_sim::{Scenario, SimulationEngine};

/// Each customer is served before the next one arrives.
pub fn calm() -> Scenario {
    Scenario::builder()
        .name("calm")
        .intervals(vec![2.0, 3.0, 4.0, 5.0, 6.0])
        .durations(vec![3.0, 4.0, 2.0, 5.0, 3.0])
        .build()
}

/// Customers arrive faster than they can be served.
pub fn busy() -> Scenario {
    Scenario::builder()
        .name("busy")
        .intervals(vec![1.0, 1.0, 1.0])
        .durations(vec![5.0, 5.0, 5.0])
        .build()
}

pub fn engine(scenario: &Scenario) -> SimulationEngine {
    SimulationEngine::new(scenario.intervals(), scenario.durations()).unwrap()
}

/// A reproducible mix of idle periods, bursts and zero-length values.
pub fn mixed(n: usize) -> (Vec<f64>, Vec<f64>) {
    let intervals = (0..n).map(|i| ((i * 7) % 5) as f64 * 0.5).collect();
    let durations = (0..n).map(|i| ((i * 3) % 4) as f64 * 0.75).collect();
    (intervals, durations)
}
