mod timeline;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};
use trawl_core::belief::telemetry::BeliefMetrics;
use trawl_core::game::{Observation, Session, SessionError, SessionSnapshot};
use trawl_core::track::seed::{SeedError, SeedFile, SeedSource, SeedTable};

use crate::config::{ReplayConfig, ResolvedOutputs};
use timeline::{Highlight, TimelineRow};

/// Drives a recorded observation log through a fresh [`Session`].
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run and written to `summary_json`.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub run_id: String,
    pub events_applied: usize,
    /// Path and stop entries in the seed table when the run started.
    pub seed_entries: usize,
    pub ticks: usize,
    pub resolved_ticks: usize,
    pub resolved_tick_ratio: f64,
    pub quantity_errors: usize,
    pub final_quantity: i64,
    pub final_snapshot: SessionSnapshot,
    pub timeline_path: PathBuf,
    pub summary_path: PathBuf,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Result<Self, ReplayError> {
        if !config.input.events.is_file() {
            return Err(ReplayError::MissingEvents {
                path: config.input.events.clone(),
            });
        }
        Ok(Self { config, outputs })
    }

    /// Replay every event, streaming one timeline row per tick.
    pub fn run(&self) -> Result<ReplaySummary, ReplayError> {
        ensure_parent(self.outputs.timeline_jsonl.parent())?;
        ensure_parent(self.outputs.summary_json.parent())?;

        let (seeds, seed_entries) = self.seed_source()?;
        let mut session =
            Session::new(self.config.nets.slots, seeds).with_crew(self.config.crew.roster());

        let reader = BufReader::new(File::open(&self.config.input.events)?);
        let mut writer = BufWriter::new(File::create(&self.outputs.timeline_jsonl)?);

        let mut events_applied = 0usize;
        let mut ticks = 0usize;
        let mut resolved_ticks = 0usize;
        let mut quantity_errors = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let observation: Observation =
                serde_json::from_str(&line).map_err(|source| ReplayError::Event {
                    line: line_number,
                    source,
                })?;

            match session.apply(&observation) {
                Ok(outcome) => {
                    event!(
                        target: "trawl_replay::replay",
                        Level::TRACE,
                        line = line_number,
                        outcome = ?outcome,
                        "observation applied"
                    );
                }
                Err(SessionError::Seed(source)) => {
                    return Err(ReplayError::Seed {
                        line: line_number,
                        source,
                    });
                }
                Err(err) => {
                    quantity_errors += 1;
                    event!(
                        target: "trawl_replay::replay",
                        Level::ERROR,
                        line = line_number,
                        error = %err,
                        "observation rejected"
                    );
                }
            }
            events_applied += 1;

            if observation.is_tick() {
                let row = self.timeline_row(ticks, &session);
                if row.resolved {
                    resolved_ticks += 1;
                }
                serde_json::to_writer(&mut writer, &row)?;
                writer.write_all(b"\n")?;
                ticks += 1;
            }
        }

        writer.flush()?;

        let summary = ReplaySummary {
            run_id: self.config.run_id.clone(),
            events_applied,
            seed_entries,
            ticks,
            resolved_ticks,
            resolved_tick_ratio: ratio(resolved_ticks, ticks),
            quantity_errors,
            final_quantity: session.quantity(),
            final_snapshot: SessionSnapshot::capture(&session),
            timeline_path: self.outputs.timeline_jsonl.clone(),
            summary_path: self.outputs.summary_json.clone(),
        };

        let file = File::create(&self.outputs.summary_json)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;

        event!(
            target: "trawl_replay::replay",
            Level::INFO,
            run_id = %summary.run_id,
            events = summary.events_applied,
            ticks = summary.ticks,
            quantity_errors = summary.quantity_errors,
            "replay complete"
        );

        Ok(summary)
    }

    fn seed_source(&self) -> Result<(Box<dyn SeedSource>, usize), ReplayError> {
        let Some(path) = self.config.input.seeds.as_ref() else {
            return Ok((Box::new(SeedTable::empty()), 0));
        };
        // Fail before the first spawn if the table is already unreadable.
        let table = SeedTable::load(path).map_err(|source| ReplayError::SeedTable { source })?;
        if table.is_empty() {
            event!(
                target: "trawl_replay::replay",
                Level::WARN,
                seeds = %path.display(),
                "seed table has no entries"
            );
        }
        Ok((Box::new(SeedFile::new(path.clone())), table.len()))
    }

    fn timeline_row(&self, tick: usize, session: &Session) -> TimelineRow {
        let tracked = session.current_tracked_entity();
        let metrics = tracked.map(|entity| BeliefMetrics::from_belief(entity.belief()));
        let highlight = tracked
            .and_then(|entity| entity.species())
            .filter(|species| self.config.is_highlighted(*species))
            .map(Highlight::for_species);

        TimelineRow {
            run_id: self.config.run_id.clone(),
            tick,
            resolved: metrics.as_ref().is_some_and(BeliefMetrics::is_resolved),
            highlight,
            metrics,
            snapshot: SessionSnapshot::capture(session),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), ReplayError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("event log {path:?} does not exist")]
    MissingEvents { path: PathBuf },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize output: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("event log line {line} is not a valid observation: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("seed table rejected: {source}")]
    SeedTable {
        #[source]
        source: SeedError,
    },
    #[error("seed table failed at event line {line}: {source}")]
    Seed {
        line: usize,
        #[source]
        source: SeedError,
    },
}
