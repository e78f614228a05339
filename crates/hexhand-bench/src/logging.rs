use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs, TraceLevel};

/// Overrides the configured filter when set, using `RUST_LOG` syntax.
pub const FILTER_ENV: &str = "HEXHAND_LOG";

/// Targets raised to the configured level; everything else stays at `warn`.
const REPLAY_TARGETS: [&str; 2] = ["hexhand_core::belief", "hexhand_bench"];

/// Flushes the telemetry writer when dropped.
pub struct TelemetryGuard {
    _flush: WorkerGuard,
    pub path: PathBuf,
}

/// Installs a JSON subscriber writing to the run's `<run_id>.telemetry.jsonl`.
///
/// Each line carries the enclosing `scenario` span, so per-event records can be
/// grouped without repeating the run and scenario names on every event.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<TelemetryGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let path = outputs.telemetry.clone();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory {}", dir.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("creating telemetry log {}", path.display()))?;
    let (writer, flush) = NonBlockingBuilder::default().lossy(false).finish(file);

    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(logging.tracing_level)));

    let subscriber = fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when several runs share a process.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(TelemetryGuard { _flush: flush, path }))
}

fn filter_directives(level: TraceLevel) -> String {
    let level = level.level().as_str().to_ascii_lowercase();
    REPLAY_TARGETS
        .iter()
        .fold(String::from("warn"), |mut directives, target| {
            directives.push_str(&format!(",{target}={level}"));
            directives
        })
}
