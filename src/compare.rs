//! Comparing several runs.

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::{
    error::ScenarioError,
    indicators::{Indicator, Indicators},
    scenario::{Scenario, SimulationRun},
    store::SavedRun,
};

/// Indicator values across several runs: the data behind a trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    labels: Vec<String>,
    series: Vec<(Indicator, Vec<f64>)>,
}

impl IndicatorSeries {
    /// Series over saved runs, labelled by run name, in the order given.
    pub fn from_runs(runs: &[SavedRun]) -> Self {
        Self::from_indicators(
            runs.iter()
                .map(|run| (run.name.clone(), run.indicators))
                .collect(),
        )
    }

    /// Series over arbitrary labelled summaries, in the order given.
    pub fn from_indicators(points: Vec<(String, Indicators)>) -> Self {
        let series = Indicators::default()
            .entries()
            .into_iter()
            .map(|(indicator, _)| {
                let values = points.iter().map(|(_, ind)| ind.get(indicator)).collect();
                (indicator, values)
            })
            .collect();

        Self {
            labels: points.into_iter().map(|(label, _)| label).collect(),
            series,
        }
    }

    /// One label per run.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Values of one indicator, one per run.
    pub fn get(&self, indicator: Indicator) -> &[f64] {
        self.series
            .iter()
            .find(|(i, _)| *i == indicator)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// All series, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, &[f64])> {
        self.series
            .iter()
            .map(|(indicator, values)| (*indicator, values.as_slice()))
    }

    /// Whether there are no runs.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Pick runs by id, keeping the order of `runs`.
pub fn select_runs<'a>(runs: &'a [SavedRun], ids: &[String]) -> Vec<&'a SavedRun> {
    runs.iter().filter(|run| ids.contains(&run.id)).collect()
}

/// Simulate several scenarios in parallel, one engine per scenario.
///
/// Each scenario runs on Tokio's blocking pool. Results come back in the order the scenarios were
/// given, whatever order they finish in.
pub async fn compare_scenarios(
    scenarios: Vec<Scenario>,
) -> Vec<Result<SimulationRun, ScenarioError>> {
    let count = scenarios.len();
    let mut tasks = JoinSet::new();

    for (idx, scenario) in scenarios.into_iter().enumerate() {
        tasks.spawn_blocking(move || (idx, scenario.simulate()));
    }

    let mut results: Vec<Option<Result<SimulationRun, ScenarioError>>> = vec![None; count];

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, result)) => {
                debug!(scenario = idx, ok = result.is_ok(), "Scenario finished");
                results[idx] = Some(result);
            }
            Err(e) => warn!(error = %e, "Scenario task failed"),
        }
    }

    results
        .into_iter()
        .map(|result| result.unwrap_or(Err(ScenarioError::Panic)))
        .collect()
}
