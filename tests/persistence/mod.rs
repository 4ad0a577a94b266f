use queue_sim::{
    JsonFileStore, MemoryStore, RunStore, Scenario, ScenarioError, StoreError, ValidationError,
};
use tempfile::TempDir;

use crate::types::{busy, calm};

fn exercise(store: &mut dyn RunStore) {
    let calm = store.save(&calm().simulate().unwrap()).unwrap();
    let busy = store.save(&busy().simulate().unwrap()).unwrap();

    let runs = store.list().unwrap();
    assert_eq!(runs, vec![calm.clone(), busy.clone()]);

    let loaded = store.get(&busy.id).unwrap().unwrap();
    assert_eq!(loaded.name, "busy");
    assert_eq!(loaded.intervals, vec![1.0, 1.0, 1.0]);
    assert_eq!(loaded.durations, vec![5.0, 5.0, 5.0]);
    assert_eq!(loaded.indicators.avg_queue_length, 0.75);
    assert_eq!(loaded.results.len(), 3);

    assert!(store.delete(&calm.id).unwrap());
    assert_eq!(store.list().unwrap(), vec![busy]);

    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn memory_store() {
    exercise(&mut MemoryStore::new());
}

#[test]
fn json_file_store() {
    let dir = TempDir::new().unwrap();
    exercise(&mut JsonFileStore::new(dir.path().join("runs.json")));
}

/// Given a run loaded back from a file
/// When we simulate its inputs again
/// Then we get exactly what was stored
#[test]
fn stored_runs_can_be_reproduced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("runs.json");

    let saved = JsonFileStore::new(&path)
        .save(&Scenario::from_text("again", "0.5, 1.25, 0, 3", "2, 0.75, 1.5, 0.1").simulate().unwrap())
        .unwrap();

    let loaded = JsonFileStore::new(&path).get(&saved.id).unwrap().unwrap();
    let rerun = Scenario::builder()
        .name(loaded.name.clone())
        .intervals(loaded.intervals.clone())
        .durations(loaded.durations.clone())
        .build()
        .simulate()
        .unwrap();

    assert_eq!(rerun.results, loaded.results);
    assert_eq!(rerun.indicators, loaded.indicators);
}

#[test]
fn saving_an_empty_run_fails() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("runs.json"));

    let empty = queue_sim::SimulationRun {
        name: String::new(),
        results: Vec::new(),
        indicators: Default::default(),
        intervals: Vec::new(),
        durations: Vec::new(),
    };

    assert!(matches!(store.save(&empty), Err(StoreError::EmptyRun)));
    assert!(!store.path().exists());
}

/// Given a file store with a run in it
/// When a scenario whose timeline overflows is simulated
/// Then it is refused and every earlier run survives later saves
#[test]
fn overflowing_scenario_never_reaches_the_store() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("runs.json"));

    let good = store.save(&calm().simulate().unwrap()).unwrap();

    let huge = Scenario::from_text("huge", "1e308, 1e308", "1, 1").simulate();
    assert!(matches!(
        huge,
        Err(ScenarioError::Invalid(ValidationError::Overflow { .. }))
    ));

    let third = store.save(&busy().simulate().unwrap()).unwrap();

    assert_eq!(store.list().unwrap(), vec![good, third]);
}
