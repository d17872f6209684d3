use std::fs;
use std::path::Path;

use tempfile::tempdir;
use trawl_core::model::catalog::SHOAL_WORLD_ENTITY_TYPE;
use trawl_core::model::depth::Depth;
use trawl_core::model::species::Species;
use trawl_replay::config::ReplayConfig;
use trawl_replay::replay::{ReplayError, ReplayRunner};

fn write_events(dir: &Path, lines: &[String]) -> std::path::PathBuf {
    let path = dir.join("events.jsonl");
    fs::write(&path, lines.join("\n")).expect("write events");
    path
}

fn haddock_session() -> Vec<String> {
    vec![
        format!(r#"{{"type":"spawn_observed","identity":21,"kind_code":{SHOAL_WORLD_ENTITY_TYPE}}}"#),
        format!(
            r#"{{"type":"object_observed","identity":21,"kind_code":{}}}"#,
            Species::Haddock.kind_code()
        ),
        r#"{"type":"tick"}"#.to_string(),
        String::new(),
        r#"{"type":"narrative_text","delivery_class":"game","text":"<col=ef1020>The shoal swims closer to the surface.</col>"}"#.to_string(),
        r#"{"type":"tick","motion":{"identity":21,"position":{"x":3,"y":4,"plane":0},"target":{"x":5,"y":4,"plane":0}}}"#.to_string(),
        r#"{"type":"narrative_text","delivery_class":"game","text":"You catch two haddock."}"#.to_string(),
        r#"{"type":"narrative_text","delivery_class":"game","text":"You catch eleven haddock."}"#.to_string(),
        r#"{"type":"tick"}"#.to_string(),
    ]
}

fn load_config(output_dir: &Path, events: &Path, seeds: Option<&Path>) -> ReplayConfig {
    let seeds_line = seeds
        .map(|path| format!("  seeds: \"{}\"\n", path.display()))
        .unwrap_or_default();
    let yaml = format!(
        r#"
run_id: "test_smoke"
input:
  events: "{events}"
{seeds_line}outputs:
  timeline_jsonl: "{timeline}"
  summary_json: "{summary}"
highlight: ["haddock"]
logging:
  enable_structured: false
"#,
        events = events.display(),
        timeline = output_dir.join("{run_id}").join("timeline.jsonl").display(),
        summary = output_dir.join("{run_id}").join("summary.json").display(),
    );

    let mut cfg: ReplayConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn replay_smoke_test_writes_timeline_and_summary() {
    let dir = tempdir().expect("temp dir");
    let events = write_events(dir.path(), &haddock_session());
    let config = load_config(dir.path(), &events, None);
    let outputs = config.resolved_outputs().expect("outputs resolve");

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.run_id, "test_smoke");
    assert_eq!(summary.events_applied, 8);
    assert_eq!(summary.seed_entries, 0);
    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.resolved_ticks, 2);
    assert_eq!(summary.quantity_errors, 1);
    assert_eq!(summary.final_quantity, 2);
    let tracked = summary.final_snapshot.tracked.as_ref().expect("shoal tracked");
    assert_eq!(tracked.depth, Depth::Medium);
    assert_eq!(tracked.path_points, 1);

    assert!(summary.timeline_path.ends_with("test_smoke/timeline.jsonl"));
    let timeline = fs::read_to_string(&summary.timeline_path).expect("timeline readable");
    let rows: Vec<serde_json::Value> = timeline
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["tick"], 0);
    assert_eq!(rows[0]["resolved"], false);
    assert_eq!(rows[1]["resolved"], true);
    assert_eq!(rows[1]["highlight"]["label"], "Haddock Shoal");
    assert_eq!(rows[1]["snapshot"]["tracked"]["depth"], "medium");

    let summary_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&summary.summary_path).expect("summary readable"),
    )
    .expect("summary decodes");
    assert_eq!(summary_json["quantity_errors"], 1);
    assert_eq!(summary_json["final_snapshot"]["quantity"], 2);
}

#[test]
fn malformed_event_reports_its_line() {
    let dir = tempdir().expect("temp dir");
    let mut lines = haddock_session();
    lines.insert(2, r#"{"type":"splash"}"#.to_string());
    let events = write_events(dir.path(), &lines);
    let config = load_config(dir.path(), &events, None);
    let outputs = config.resolved_outputs().expect("outputs resolve");

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let err = runner.run().expect_err("unknown event type");
    assert!(matches!(err, ReplayError::Event { line: 3, .. }));
}

#[test]
fn seeded_history_is_attached_on_spawn() {
    let dir = tempdir().expect("temp dir");
    let seeds = dir.path().join("shoals.properties");
    fs::write(
        &seeds,
        "shoalpath.21=1, 1, 0 | 2, 1, 0\nshoalstops.21=2, 1, 0\n",
    )
    .expect("write seeds");
    let events = write_events(dir.path(), &haddock_session());
    let config = load_config(dir.path(), &events, Some(&seeds));
    let outputs = config.resolved_outputs().expect("outputs resolve");

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("replay completes");
    assert_eq!(summary.seed_entries, 2);
    let tracked = summary.final_snapshot.tracked.expect("shoal tracked");
    assert_eq!(tracked.path_points, 3);
    assert_eq!(tracked.stop_points, 1);
}

#[test]
fn missing_seed_table_aborts_the_run() {
    let dir = tempdir().expect("temp dir");
    let events = write_events(dir.path(), &haddock_session());
    let missing = dir.path().join("absent.properties");
    let config = load_config(dir.path(), &events, Some(&missing));
    let outputs = config.resolved_outputs().expect("outputs resolve");

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let err = runner.run().expect_err("seed table missing");
    assert!(matches!(err, ReplayError::SeedTable { .. }));
}

#[test]
fn missing_event_log_is_rejected_up_front() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), &dir.path().join("nope.jsonl"), None);
    let outputs = config.resolved_outputs().expect("outputs resolve");
    assert!(matches!(
        ReplayRunner::new(config, outputs),
        Err(ReplayError::MissingEvents { .. })
    ));
}
