use hexhand_core::config::TrackerConfig;
use hexhand_core::game::event::GameEvent;
use hexhand_core::model::harbor::HarborSet;
use hexhand_core::model::piece::Piece;
use hexhand_core::model::production::Locality;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SYNTHETIC_EVENTS: usize = 200;
const DEFAULT_SYNTHETIC_OPPONENTS: usize = 3;
const DEFAULT_SAMPLED_HANDS: usize = 4;
const MAX_SAMPLED_HANDS: usize = 64;
const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
    #[serde(default)]
    pub synthetic: Option<SyntheticConfig>,
    #[serde(default = "default_queries")]
    pub queries: Vec<Piece>,
    #[serde(default)]
    pub sampling: Option<SamplingConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    /// Load and validate a replay configuration from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: BenchmarkConfig = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }

    /// Checks every block; performs no I/O, so event files are only opened by the runner.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_run_id(&self.run_id)?;
        self.tracker
            .validate()
            .map_err(|err| ValidationError::Tracker(err.to_string()))?;

        let mut names = HashSet::new();
        for scenario in &self.scenarios {
            scenario.validate()?;
            if !names.insert(scenario.name.as_str()) {
                return Err(ValidationError::DuplicateScenario(scenario.name.clone()));
            }
        }
        if let Some(synthetic) = &self.synthetic {
            synthetic.validate()?;
        }
        if self.scenarios.is_empty() && self.synthetic.is_none() {
            return Err(ValidationError::NoEventSource);
        }
        if let Some(sampling) = &self.sampling {
            sampling.validate()?;
        }
        if self.queries.is_empty() {
            return Err(ValidationError::Empty { field: "queries" });
        }
        self.outputs.validate()
    }

    /// Output paths with `{run_id}` substituted.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let jsonl = self.outputs.jsonl_path(&self.run_id);
        let telemetry = jsonl.with_file_name(format!("{}.telemetry.jsonl", self.run_id));
        ResolvedOutputs {
            summary_md: self.outputs.summary_path(&self.run_id),
            jsonl,
            telemetry,
        }
    }
}

/// One opponent followed through a scripted event list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub harbors: HarborSet,
    #[serde(default)]
    pub localities: Vec<Locality>,
    /// Inline events; mutually exclusive with `events_path`.
    #[serde(default)]
    pub events: Vec<GameEvent>,
    /// JSONL file with one event per line.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
}

impl ScenarioConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "scenarios.name",
            });
        }
        if !self.events.is_empty() && self.events_path.is_some() {
            return Err(ValidationError::ConflictingEvents(self.name.clone()));
        }
        Ok(())
    }
}

/// Seeded random event streams checked against a ground-truth hand.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SyntheticConfig {
    pub seed: Option<u64>,
    #[serde(default = "default_synthetic_opponents")]
    pub opponents: usize,
    #[serde(default = "default_synthetic_events")]
    pub events: usize,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: None,
            opponents: DEFAULT_SYNTHETIC_OPPONENTS,
            events: DEFAULT_SYNTHETIC_EVENTS,
        }
    }
}

impl SyntheticConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.opponents == 0 {
            return Err(ValidationError::Empty {
                field: "synthetic.opponents",
            });
        }
        if self.events == 0 {
            return Err(ValidationError::Empty {
                field: "synthetic.events",
            });
        }
        Ok(())
    }
}

/// Concrete hands drawn from the beliefs after every event.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SamplingConfig {
    pub seed: Option<u64>,
    #[serde(default = "default_sampled_hands")]
    pub hands: usize,
}

impl SamplingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_SAMPLED_HANDS).contains(&self.hands) {
            return Err(ValidationError::OutOfRange {
                field: "sampling.hands",
                value: self.hands,
                max: MAX_SAMPLED_HANDS,
            });
        }
        Ok(())
    }
}

fn default_sampled_hands() -> usize {
    DEFAULT_SAMPLED_HANDS
}

fn default_synthetic_opponents() -> usize {
    DEFAULT_SYNTHETIC_OPPONENTS
}

fn default_synthetic_events() -> usize {
    DEFAULT_SYNTHETIC_EVENTS
}

fn default_queries() -> Vec<Piece> {
    Piece::ALL.to_vec()
}

/// Path templates for the replay artifacts; `{run_id}` is substituted.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "outputs.jsonl",
            });
        }
        if self.summary_md.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "outputs.summary_md",
            });
        }
        Ok(())
    }

    fn jsonl_path(&self, run_id: &str) -> PathBuf {
        PathBuf::from(self.jsonl.replace(RUN_ID_PLACEHOLDER, run_id))
    }

    fn summary_path(&self, run_id: &str) -> PathBuf {
        PathBuf::from(self.summary_md.replace(RUN_ID_PLACEHOLDER, run_id))
    }
}

/// Structured telemetry is off unless `enable_structured` is set.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default)]
    pub tracing_level: TraceLevel,
}

/// Verbosity for the replay targets, spelled as in `RUST_LOG`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl TraceLevel {
    pub const fn level(self) -> Level {
        match self {
            TraceLevel::Trace => Level::TRACE,
            TraceLevel::Debug => Level::DEBUG,
            TraceLevel::Info => Level::INFO,
            TraceLevel::Warn => Level::WARN,
            TraceLevel::Error => Level::ERROR,
        }
    }
}

fn check_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() {
        return Err(ValidationError::Empty { field: "run_id" });
    }
    match run_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        Some(bad) => Err(ValidationError::RunId {
            run_id: run_id.to_string(),
            bad,
        }),
        None => Ok(()),
    }
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    /// Structured log, written beside the JSONL rows as `<run_id>.telemetry.jsonl`.
    pub telemetry: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open replay config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("replay config {path:?} is not valid YAML")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("replay config {path:?} rejected: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("run_id {run_id:?} contains {bad:?}; use letters, digits, '.', '_' or '-'")]
    RunId { run_id: String, bad: char },
    #[error("tracker: {0}")]
    Tracker(String),
    #[error("scenario {0:?} is defined more than once")]
    DuplicateScenario(String),
    #[error("scenario {0:?} sets both inline events and events_path")]
    ConflictingEvents(String),
    #[error("no scripted scenarios and no synthetic block")]
    NoEventSource,
    #[error("{field} is {value}; expected 1..={max}")]
    OutOfRange {
        field: &'static str,
        value: usize,
        max: usize,
    },
}
