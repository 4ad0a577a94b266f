//! Named input pairs and their results.

use bon::bon;
use tracing::{info, span, Level};

use crate::{
    engine::{CustomerRecord, SimulationEngine},
    error::{ParseWarning, ScenarioError},
    indicators::Indicators,
    parse::parse_series,
};

/// A named pair of input sequences, as a person would enter them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    intervals: Vec<f64>,
    durations: Vec<f64>,
    warnings: Vec<ParseWarning>,
}

#[bon]
impl Scenario {
    #[allow(missing_docs)]
    #[builder]
    pub fn new(
        /// Display name. May be blank; stores pick a default name when saving.
        #[builder(default, into)]
        name: String,
        /// Inter-arrival intervals.
        intervals: Vec<f64>,
        /// Service durations.
        durations: Vec<f64>,
    ) -> Self {
        Self {
            name,
            intervals,
            durations,
            warnings: Vec::new(),
        }
    }
}

impl Scenario {
    /// Build a scenario from comma separated text, dropping tokens that are not numbers.
    ///
    /// The dropped tokens are available from [`Scenario::warnings`].
    pub fn from_text(name: impl Into<String>, intervals: &str, durations: &str) -> Self {
        let intervals = parse_series(intervals);
        let durations = parse_series(durations);

        let mut warnings = intervals.dropped;
        warnings.extend(durations.dropped);

        Self {
            name: name.into(),
            intervals: intervals.values,
            durations: durations.values,
            warnings,
        }
    }

    /// Display name, possibly blank.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inter-arrival intervals.
    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    /// Service durations.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Tokens dropped while parsing text input, intervals first.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Build an engine for this scenario.
    ///
    /// Unlike [`SimulationEngine::new`], empty input is refused: there is nothing to show for it.
    pub fn engine(&self) -> Result<SimulationEngine, ScenarioError> {
        if self.intervals.is_empty() || self.durations.is_empty() {
            return Err(ScenarioError::EmptyInput);
        }
        Ok(SimulationEngine::new(
            self.intervals.clone(),
            self.durations.clone(),
        )?)
    }

    /// Run the scenario to completion.
    pub fn simulate(&self) -> Result<SimulationRun, ScenarioError> {
        let span = span!(Level::INFO, "scenario", scenario.name = %self.name);
        let _entered = span.enter();

        let engine = self.engine()?;
        let run = SimulationRun {
            name: self.name.clone(),
            results: engine.customer_table().to_vec(),
            indicators: engine.indicators(),
            intervals: self.intervals.clone(),
            durations: self.durations.clone(),
        };

        info!(
            customers = run.results.len() as u64,
            avg_wait = run.indicators.avg_wait,
            "Scenario simulated"
        );

        Ok(run)
    }
}

/// A completed simulation: the inputs, the customer table and the indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    /// Display name of the scenario, possibly blank.
    pub name: String,
    /// Customer table.
    pub results: Vec<CustomerRecord>,
    /// Indicator summary.
    pub indicators: Indicators,
    /// The inter-arrival intervals simulated.
    pub intervals: Vec<f64>,
    /// The service durations simulated.
    pub durations: Vec<f64>,
}
