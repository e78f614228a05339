use std::path::PathBuf;

use clap::Parser;

use hexhand_bench::config::{BenchmarkConfig, ResolvedOutputs, SyntheticConfig};
use hexhand_bench::logging::init_logging;
use hexhand_bench::replay::ReplayRunner;

/// Replay harness for opponent hand tracking.
#[derive(Debug, Parser)]
#[command(
    name = "hexhand-bench",
    author,
    version,
    about = "Deterministic belief-tracking replay harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the RNG seed for synthetic opponents.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of events generated per synthetic opponent.
    #[arg(long, value_name = "EVENTS")]
    events: Option<usize>,

    /// Override the hypothesis cap for every tracker.
    #[arg(long, value_name = "COUNT")]
    max_hypotheses: Option<usize>,

    /// Exit after validating the configuration (nothing is replayed).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if cli.seed.is_some() || cli.events.is_some() {
        let synthetic = config.synthetic.get_or_insert_with(SyntheticConfig::default);
        if let Some(seed) = cli.seed {
            synthetic.seed = Some(seed);
        }
        if let Some(events) = cli.events {
            synthetic.events = events;
        }
    }

    if let Some(max_hypotheses) = cli.max_hypotheses {
        config.tracker.max_hypotheses = max_hypotheses;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let scenario_count = config.scenarios.len();
    let synthetic_count = config.synthetic.as_ref().map_or(0, |s| s.opponents);

    println!(
        "Loaded configuration '{run_id}' with {scenario_count} scripted scenario{} and {synthetic_count} synthetic opponent{} (cap {})",
        if scenario_count == 1 { "" } else { "s" },
        if synthetic_count == 1 { "" } else { "s" },
        config.tracker.max_hypotheses
    );

    let _telemetry = init_logging(&config.logging, &outputs)?;
    let runner = ReplayRunner::new(config, outputs)?;

    if cli.validate_only {
        let names: Vec<&str> = runner.stream_names().collect();
        println!("Validation-only mode: replay skipped ({}).", names.join(", "));
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} streams → {} rows at {}",
        summary.scenarios,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for report in &summary.reports {
        let coverage = report
            .truth_coverage()
            .map(|value| format!(", truth coverage {:.1}%", value * 100.0))
            .unwrap_or_default();
        println!(
            "  {}: {} events, peak {} hypotheses, {} overflow reset{}{coverage}",
            report.name,
            report.events,
            report.peak_hypotheses,
            report.overflow_resets,
            if report.overflow_resets == 1 { "" } else { "s" }
        );
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
