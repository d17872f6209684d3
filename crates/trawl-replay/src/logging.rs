use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{Level, event};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

use crate::config::{ReplayConfig, ResolvedOutputs};

/// Keeps the telemetry writer flushing until the replay ends.
pub struct TelemetryGuard {
    _worker: WorkerGuard,
    pub path: PathBuf,
}

/// Send tracker events for this run to its telemetry JSONL file.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// [`LoggingConfig::filter_directives`](crate::config::LoggingConfig::filter_directives).
pub fn init_logging(
    config: &ReplayConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<TelemetryGuard>> {
    let logging = &config.logging;
    if !logging.enable_structured {
        return Ok(None);
    }

    let directives = logging.filter_directives();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directives))
        .with_context(|| format!("building telemetry filter from '{directives}'"))?;

    let path = outputs.telemetry_jsonl.clone();
    let (writer, worker) = NonBlockingBuilder::default()
        .lossy(false)
        .finish(create_telemetry_file(&path)?);

    let installed = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init()
        .is_ok();

    // Only a subscriber installed here writes to this run's file.
    if installed {
        event!(
            target: "trawl_replay::logging",
            Level::INFO,
            run_id = %config.run_id,
            telemetry = %path.display(),
            filter = %directives,
            "telemetry enabled"
        );
    }

    Ok(Some(TelemetryGuard {
        _worker: worker,
        path,
    }))
}

fn create_telemetry_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating telemetry log {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(enable_structured: bool) -> ReplayConfig {
        let yaml = format!(
            "run_id: dock\ninput:\n  events: e.jsonl\noutputs:\n  timeline_jsonl: t.jsonl\n  summary_json: s.json\nlogging:\n  enable_structured: {enable_structured}\n"
        );
        serde_yaml::from_str(&yaml).expect("parse yaml")
    }

    #[test]
    fn disabled_logging_creates_nothing() {
        let dir = tempdir().expect("temp dir");
        let cfg = config(false);
        let outputs = ResolvedOutputs {
            timeline_jsonl: dir.path().join("t.jsonl"),
            summary_json: dir.path().join("s.json"),
            telemetry_jsonl: dir.path().join("dock.telemetry.jsonl"),
        };
        let guard = init_logging(&cfg, &outputs).expect("init");
        assert!(guard.is_none());
        assert!(!outputs.telemetry_jsonl.exists());
    }

    #[test]
    fn telemetry_file_creates_missing_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("runs").join("dock").join("dock.telemetry.jsonl");
        create_telemetry_file(&path).expect("file created");
        assert!(path.is_file());
    }
}
