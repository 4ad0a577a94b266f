//! Persistence of named runs.
//!
//! A store is an append-only list of [`SavedRun`]s keyed by an opaque id. The engine knows nothing
//! about stores; callers save the [`SimulationRun`]s they want to keep.

use std::{
    fmt::Debug,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    engine::CustomerRecord, error::StoreError, indicators::Indicators, scenario::SimulationRun,
};

/// A run as it is kept in a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRun {
    /// Opaque identifier, unique within a store.
    pub id: String,
    /// Display name. Never blank.
    pub name: String,
    /// When the run was saved.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Customer table.
    pub results: Vec<CustomerRecord>,
    /// Indicator summary.
    pub indicators: Indicators,
    /// The inter-arrival intervals simulated.
    pub intervals: Vec<f64>,
    /// The service durations simulated.
    pub durations: Vec<f64>,
}

impl SavedRun {
    /// Prepare a run for saving: assign an id and a timestamp, and a name if it has none.
    ///
    /// The timestamp is kept to the millisecond, the precision it is stored with. Runs holding NaN
    /// or infinite numbers are refused: JSON writes them as `null` and the store could no longer
    /// be read back.
    pub fn new(run: &SimulationRun, timestamp: DateTime<Utc>) -> Result<Self, StoreError> {
        if run.results.is_empty() {
            return Err(StoreError::EmptyRun);
        }
        if !is_finite(run) {
            return Err(StoreError::NotFinite);
        }
        let timestamp = timestamp.trunc_subsecs(3);

        let name = match run.name.trim() {
            "" => format!(
                "Simulation {}",
                timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ),
            name => name.to_string(),
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            timestamp,
            results: run.results.clone(),
            indicators: run.indicators,
            intervals: run.intervals.clone(),
            durations: run.durations.clone(),
        })
    }
}

fn is_finite(run: &SimulationRun) -> bool {
    let records = run.results.iter().flat_map(|r| {
        [
            r.interval,
            r.duration,
            r.arrival_time,
            r.service_start,
            r.service_end,
            r.wait_time,
            r.system_time,
        ]
    });
    let indicators = run.indicators.entries().into_iter().map(|(_, v)| v);

    records
        .chain(indicators)
        .chain(run.intervals.iter().copied())
        .chain(run.durations.iter().copied())
        .all(f64::is_finite)
}

/// Somewhere to keep saved runs.
pub trait RunStore: Debug {
    /// Append a run, returning the record as stored.
    fn save(&mut self, run: &SimulationRun) -> Result<SavedRun, StoreError>;

    /// All saved runs, oldest first.
    fn list(&self) -> Result<Vec<SavedRun>, StoreError>;

    /// Look up a single run.
    fn get(&self, id: &str) -> Result<Option<SavedRun>, StoreError> {
        Ok(self.list()?.into_iter().find(|run| run.id == id))
    }

    /// Remove a run. Returns whether anything was removed; an unknown id is not an error.
    fn delete(&mut self, id: &str) -> Result<bool, StoreError>;

    /// Remove every run.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// A store that lives as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    runs: Vec<SavedRun>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for MemoryStore {
    fn save(&mut self, run: &SimulationRun) -> Result<SavedRun, StoreError> {
        let saved = SavedRun::new(run, Utc::now())?;
        self.runs.push(saved.clone());
        info!(id = %saved.id, name = %saved.name, "Saved run");
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedRun>, StoreError> {
        Ok(self.runs.clone())
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.runs.len();
        self.runs.retain(|run| run.id != id);
        Ok(self.runs.len() != before)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.runs.clear();
        Ok(())
    }
}

/// A store kept as a single JSON array in a file.
///
/// A missing file is an empty store. So is a file that cannot be decoded: its content is ignored
/// (with a warning) and replaced on the next write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by `path`. Nothing is read or written until the store is used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<SavedRun>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&data) {
            Ok(runs) => Ok(runs),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable run store");
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, runs: &[SavedRun]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(runs)?;
        fs::write(&self.path, json)?;

        debug!(path = %self.path.display(), runs = runs.len() as u64, "Wrote run store");
        Ok(())
    }
}

impl RunStore for JsonFileStore {
    fn save(&mut self, run: &SimulationRun) -> Result<SavedRun, StoreError> {
        let saved = SavedRun::new(run, Utc::now())?;

        let mut runs = self.load()?;
        runs.push(saved.clone());
        self.write(&runs)?;

        info!(id = %saved.id, name = %saved.name, "Saved run");
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedRun>, StoreError> {
        self.load()
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut runs = self.load()?;
        let before = runs.len();
        runs.retain(|run| run.id != id);

        if runs.len() == before {
            return Ok(false);
        }

        self.write(&runs)?;
        info!(id, "Deleted run");
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Cleared run store");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
