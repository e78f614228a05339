use std::fs;
use std::path::Path;

use hexhand_bench::config::BenchmarkConfig;
use hexhand_bench::replay::ReplayRunner;
use tempfile::tempdir;

fn load_config(output_dir: &Path, extra: &str) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
tracker:
  max_hypotheses: 400
queries: [road, city]
scenarios:
  - name: "red"
    localities:
      - {{ token: 6, resource: grain, building: city }}
      - {{ token: 8, resource: brick, building: settlement }}
      - {{ token: 8, resource: ore, building: settlement, robbed: true }}
    events:
      - {{ kind: roll, value: 6 }}
      - {{ kind: roll, value: 8 }}
      - {{ kind: gained_unknown, amount: 1 }}
      - {{ kind: built, piece: road }}
{extra}
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("events.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn read_rows(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("jsonl readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect()
}

#[test]
fn scripted_scenario_narrows_to_the_spent_hand() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "");
    let outputs = config.resolved_outputs();

    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.scenarios, 1);
    assert_eq!(summary.rows_written, 4);
    assert_eq!(summary.telemetry_path, None);

    let rows = read_rows(&summary.jsonl_path);
    assert_eq!(rows.len(), 4);
    let hypotheses: Vec<u64> = rows
        .iter()
        .map(|row| row["hypotheses"].as_u64().expect("hypothesis count"))
        .collect();
    assert_eq!(hypotheses, vec![1, 1, 5, 1]);
    assert_eq!(rows[3]["event"], "built");
    assert_eq!(rows[3]["outcomes"][0], "applied");
    assert_eq!(rows[3]["presence"][2].as_f64(), Some(1.0));
    assert_eq!(rows[3]["affordability"]["road"].as_f64(), Some(0.0));
    assert!(rows[3].get("truth_covered").is_none());

    let report = &summary.reports[0];
    assert_eq!(report.peak_hypotheses, 5);
    assert_eq!(report.final_hypotheses, 1);
    assert_eq!(report.overflow_resets, 0);
    assert_eq!(report.truth_coverage(), None);

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| red | 4 | 4 | 5 | 1 | 0 | 0 | n/a |"));
}

#[test]
fn events_path_streams_are_loaded_from_jsonl() {
    let dir = tempdir().expect("temp dir");
    let events_path = dir.path().join("blue.jsonl");
    fs::write(
        &events_path,
        concat!(
            "{\"kind\":\"gained\",\"resources\":[4,0,0,0,0]}\n",
            "\n",
            "{\"kind\":\"sea_trade_scalar\",\"cost\":4}\n",
            "{\"kind\":\"sea_trade_resolved\",\"gain\":[0,0,0,0,1]}\n",
        ),
    )
    .expect("write events");

    let extra = format!(
        "  - name: \"blue\"\n    events_path: \"{}\"",
        events_path.display()
    );
    let config = load_config(dir.path(), &extra);
    let outputs = config.resolved_outputs();
    let summary = ReplayRunner::new(config, outputs)
        .expect("runner created")
        .run()
        .expect("replay completes");

    assert_eq!(summary.scenarios, 2);
    assert_eq!(summary.rows_written, 7);
    let rows = read_rows(&summary.jsonl_path);
    let blue: Vec<_> = rows.iter().filter(|row| row["scenario"] == "blue").collect();
    assert_eq!(blue.len(), 3);
    assert_eq!(blue[1]["trade_pending"], true);
    assert_eq!(blue[2]["trade_pending"], false);
    assert_eq!(blue[2]["hypotheses"].as_u64(), Some(1));
    assert_eq!(blue[2]["presence"][4].as_f64(), Some(1.0));
}

#[test]
fn synthetic_runs_are_reproducible() {
    let extra = concat!(
        "synthetic:\n  seed: 4242\n  opponents: 2\n  events: 60\n",
        "sampling:\n  seed: 5\n  hands: 3",
    );

    let first = tempdir().expect("temp dir");
    let config = load_config(first.path(), extra);
    let outputs = config.resolved_outputs();
    let a = ReplayRunner::new(config, outputs)
        .expect("runner created")
        .run()
        .expect("replay completes");

    let second = tempdir().expect("temp dir");
    let config = load_config(second.path(), extra);
    let outputs = config.resolved_outputs();
    let b = ReplayRunner::new(config, outputs)
        .expect("runner created")
        .run()
        .expect("replay completes");

    assert_eq!(a.scenarios, 3);
    assert_eq!(a.rows_written, 4 + 2 * 60);
    let rows = read_rows(&a.jsonl_path);
    assert_eq!(rows, read_rows(&b.jsonl_path));
    assert!(rows.iter().all(|row| row["sampled_hands"].as_array().map(Vec::len) == Some(3)));

    for report in a.reports.iter().filter(|r| r.name.starts_with("synthetic_")) {
        assert_eq!(report.events, 60);
        assert!(report.truth_hits.is_some());
        assert!(report.peak_hypotheses <= 400 || report.overflow_resets > 0);
    }
}

#[test]
fn structured_runs_report_the_run_scoped_telemetry_path() {
    let dir = tempdir().expect("temp dir");
    let mut config = load_config(dir.path(), "");
    config.logging.enable_structured = true;
    let outputs = config.resolved_outputs();
    let summary = ReplayRunner::new(config, outputs)
        .expect("runner created")
        .run()
        .expect("replay completes");

    assert_eq!(
        summary.telemetry_path,
        Some(dir.path().join("test_smoke.telemetry.jsonl"))
    );
}
