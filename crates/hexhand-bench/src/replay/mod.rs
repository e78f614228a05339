pub mod synthetic;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hexhand_core::belief::MonopolyState;
use hexhand_core::game::event::{EventError, GameEvent};
use hexhand_core::model::harbor::HarborSet;
use hexhand_core::model::production::Locality;
use hexhand_core::model::vector::ResourceVector;
use hexhand_core::OpponentTracker;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event, info_span};

use crate::config::{BenchmarkConfig, ResolvedOutputs, ScenarioConfig};
use crate::report::{ReplaySummary, ScenarioReport};

/// Replays every configured event stream through a fresh tracker.
pub struct ReplayRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    streams: Vec<EventStream>,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub scenarios: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub reports: Vec<ScenarioReport>,
}

/// One opponent's observations, with the true hand per step when it is known.
struct EventStream {
    name: String,
    harbors: HarborSet,
    localities: Vec<Locality>,
    events: Vec<GameEvent>,
    truth: Option<Vec<ResourceVector>>,
}

impl EventStream {
    fn from_scenario(scenario: &ScenarioConfig) -> Result<Self, RunnerError> {
        let events = match scenario.events_path.as_ref() {
            Some(path) => load_events(path)?,
            None => scenario.events.clone(),
        };
        Ok(Self {
            name: scenario.name.clone(),
            harbors: scenario.harbors,
            localities: scenario.localities.clone(),
            events,
            truth: None,
        })
    }
}

impl From<synthetic::SyntheticOpponent> for EventStream {
    fn from(opponent: synthetic::SyntheticOpponent) -> Self {
        Self {
            name: opponent.name,
            harbors: opponent.harbors,
            localities: opponent.localities,
            events: opponent.events,
            truth: Some(opponent.truth),
        }
    }
}

#[derive(Debug, Serialize)]
struct EventLogRow<'a> {
    run_id: &'a str,
    scenario: &'a str,
    step: usize,
    event: &'static str,
    outcomes: Vec<&'static str>,
    hypotheses: usize,
    summary_hash: u64,
    expected: [f32; 5],
    presence: [f32; 5],
    entropy: f32,
    affordability: &'a BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    truth_covered: Option<bool>,
    monopoly_armed: bool,
    trade_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    sampled_hands: Option<Vec<ResourceVector>>,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration, loading any external event files.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let mut streams = config
            .scenarios
            .iter()
            .map(EventStream::from_scenario)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(synthetic) = config.synthetic.as_ref() {
            streams.extend(synthetic::generate(synthetic).into_iter().map(EventStream::from));
        }
        if streams.is_empty() {
            return Err(RunnerError::NoStreams);
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            streams,
        })
    }

    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|stream| stream.name.as_str())
    }

    /// Execute the replay, streaming one JSONL row per event to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rows_written = 0usize;
        let mut reports = Vec::with_capacity(self.streams.len());

        for stream in &self.streams {
            let report = self.replay_stream(stream, &mut writer, &mut rows_written)?;
            reports.push(report);
        }
        writer.flush()?;

        let summary = ReplaySummary {
            run_id: self.config.run_id.clone(),
            scenarios: reports,
        };
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self.logging_enabled.then(|| self.outputs.telemetry.clone());

        Ok(RunSummary {
            scenarios: self.streams.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
            reports: summary.scenarios,
        })
    }

    fn replay_stream(
        &self,
        stream: &EventStream,
        writer: &mut BufWriter<File>,
        rows_written: &mut usize,
    ) -> Result<ScenarioReport, RunnerError> {
        let span = info_span!(
            target: "hexhand_bench::scenario",
            "scenario",
            run_id = %self.config.run_id,
            scenario = %stream.name,
            synthetic = stream.truth.is_some(),
            localities = stream.localities.len() as u64
        );
        let _entered = span.enter();

        let mut tracker = OpponentTracker::new(&self.config.tracker).with_harbors(stream.harbors);
        let mut report = ScenarioReport::new(stream.name.clone(), stream.truth.is_some());
        let mut sampler = self
            .config
            .sampling
            .as_ref()
            .map(|sampling| (StdRng::seed_from_u64(sampling.seed.unwrap_or(0)), sampling.hands));

        for (step, game_event) in stream.events.iter().enumerate() {
            let outcomes = tracker.apply_event(game_event, &stream.localities);
            let metrics = tracker.metrics();
            let affordability = self.affordability(&tracker);
            let truth_covered = stream
                .truth
                .as_ref()
                .and_then(|truth| truth.get(step))
                .map(|hand| tracker.beliefs().contains(hand));
            let sampled_hands = sampler
                .as_mut()
                .map(|(rng, hands)| tracker.sample_hands(*hands, rng));

            if self.logging_enabled && tracing::enabled!(Level::DEBUG) {
                event!(
                    target: "hexhand_bench::event",
                    Level::DEBUG,
                    step = step as u32,
                    kind = game_event.label(),
                    hypotheses = metrics.hypotheses as u64,
                    summary_hash = metrics.summary_hash
                );
            }

            let row = EventLogRow {
                run_id: &self.config.run_id,
                scenario: &stream.name,
                step,
                event: game_event.label(),
                outcomes: outcomes.iter().map(|outcome| outcome.as_str()).collect(),
                hypotheses: metrics.hypotheses,
                summary_hash: metrics.summary_hash,
                expected: metrics.expected_per_category,
                presence: metrics.presence_per_category,
                entropy: metrics.total_entropy(),
                affordability: &affordability,
                truth_covered,
                monopoly_armed: matches!(tracker.monopoly_state(), MonopolyState::Armed { .. }),
                trade_pending: tracker.pending_trade().is_some(),
                sampled_hands,
            };
            serde_json::to_writer(&mut *writer, &row)?;
            writer.write_all(b"\n")?;
            *rows_written += 1;

            report.record(&outcomes, &metrics, &affordability, truth_covered);
        }

        if self.logging_enabled {
            log_scenario(&report, &tracker);
        }
        Ok(report)
    }

    fn affordability(&self, tracker: &OpponentTracker) -> BTreeMap<String, f64> {
        self.config
            .queries
            .iter()
            .map(|piece| {
                (
                    piece.as_str().to_string(),
                    tracker.affordability_ratio(&piece.cost()),
                )
            })
            .collect()
    }
}

fn log_scenario(report: &ScenarioReport, tracker: &OpponentTracker) {
    let beliefs = tracker.beliefs();
    event!(
        target: "hexhand_bench::scenario",
        Level::INFO,
        events = report.events as u32,
        peak_hypotheses = report.peak_hypotheses as u32,
        final_hypotheses = beliefs.len() as u32,
        hypothesis_cap = beliefs.max_hypotheses() as u32,
        overflow_resets = report.overflow_resets as u32,
        exhausted_updates = report.exhausted_updates as u32,
        truth_coverage = report.truth_coverage()
    );
}

fn load_events(path: &Path) -> Result<Vec<GameEvent>, RunnerError> {
    let input = fs::read_to_string(path)?;
    GameEvent::parse_lines(&input).map_err(|source| RunnerError::Events {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("failed to load events from {path:?}: {source}")]
    Events {
        path: PathBuf,
        #[source]
        source: EventError,
    },
    #[error("configuration produced no event streams")]
    NoStreams,
}
