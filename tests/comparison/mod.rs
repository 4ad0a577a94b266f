use queue_sim::{
    compare::{compare_scenarios, IndicatorSeries},
    report::render_comparison,
    Indicator, MemoryStore, RunStore, Scenario,
};

use crate::types::{busy, calm};

#[tokio::test]
async fn scenarios_run_concurrently_and_keep_their_order() {
    let scenarios: Vec<Scenario> = (1..=8)
        .map(|n| {
            Scenario::builder()
                .name(format!("{n} customers"))
                .intervals(vec![1.0; n])
                .durations(vec![2.0; n])
                .build()
        })
        .collect();

    let runs = compare_scenarios(scenarios).await;

    for (idx, run) in runs.into_iter().enumerate() {
        let run = run.unwrap();
        assert_eq!(run.name, format!("{} customers", idx + 1));
        assert_eq!(run.results.len(), idx + 1);
    }
}

#[test]
fn saved_runs_compare_side_by_side() {
    let mut store = MemoryStore::new();
    store.save(&calm().simulate().unwrap()).unwrap();
    store.save(&busy().simulate().unwrap()).unwrap();
    let runs = store.list().unwrap();

    let series = IndicatorSeries::from_runs(&runs);
    assert_eq!(series.labels(), &["calm".to_string(), "busy".to_string()]);
    assert_eq!(series.get(Indicator::AvgSystemTime), &[3.4, 9.0]);

    let table = render_comparison(&runs);
    let rate_row = table
        .lines()
        .find(|line| line.starts_with("Arrival rate"))
        .unwrap();
    assert!(rate_row.ends_with("0.2174  0.1875"), "{rate_row}");
}
