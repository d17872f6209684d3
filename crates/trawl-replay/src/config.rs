use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use trawl_core::model::net::DEFAULT_NET_SLOTS;
use trawl_core::model::species::Species;
use trawl_core::observe::crew::{Actor, CrewRoster};

const MAX_NET_SLOTS: usize = 4;
const RUN_ID_PLACEHOLDER: &str = "{run_id}";

/// Targets that follow `logging.tracing_level` unless overridden.
const TRACKER_TARGETS: [&str; 4] = [
    "trawl_core::belief",
    "trawl_core::registry",
    "trawl_core::session",
    "trawl_replay",
];

/// Root replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub run_id: String,
    pub input: InputConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub nets: NetsConfig,
    #[serde(default)]
    pub crew: CrewConfig,
    /// Species worth highlighting; every species when absent.
    #[serde(default)]
    pub highlight: Option<Vec<Species>>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReplayConfig {
    /// Read and validate a replay configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::load(path).map_err(|kind| ConfigError {
            path: path.to_path_buf(),
            kind,
        })
    }

    fn load(path: &Path) -> Result<Self, ConfigErrorKind> {
        let text = fs::read_to_string(path)?;
        let mut cfg: ReplayConfig = serde_yaml::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_run_id(&self.run_id)?;
        self.input.validate()?;
        self.resolved_outputs()?;
        self.nets.validate()?;
        self.crew.validate(self.nets.slots)?;
        self.logging.validate()
    }

    /// Output paths for this run with `{run_id}` substituted.
    pub fn resolved_outputs(&self) -> Result<ResolvedOutputs, ValidationError> {
        self.outputs.resolve(&self.run_id)
    }

    pub fn is_highlighted(&self, species: Species) -> bool {
        self.highlight
            .as_ref()
            .is_none_or(|list| list.contains(&species))
    }
}

/// Recorded inputs to replay.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InputConfig {
    pub events: PathBuf,
    #[serde(default)]
    pub seeds: Option<PathBuf>,
}

impl InputConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.events.as_os_str().is_empty() {
            return Err(ValidationError::field("input.events", "path must not be empty"));
        }
        if self
            .seeds
            .as_ref()
            .is_some_and(|seeds| seeds.as_os_str().is_empty())
        {
            return Err(ValidationError::field(
                "input.seeds",
                "path must not be empty when present",
            ));
        }
        Ok(())
    }
}

/// Output artifact templates; `{run_id}` is the only placeholder.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub timeline_jsonl: String,
    pub summary_json: String,
    /// Defaults to `<run_id>.telemetry.jsonl` beside the summary.
    #[serde(default)]
    pub telemetry_jsonl: Option<String>,
}

impl OutputsConfig {
    fn resolve(&self, run_id: &str) -> Result<ResolvedOutputs, ValidationError> {
        let timeline_jsonl = expand_run_id("outputs.timeline_jsonl", &self.timeline_jsonl, run_id)?;
        let summary_json = expand_run_id("outputs.summary_json", &self.summary_json, run_id)?;
        let telemetry_jsonl = match &self.telemetry_jsonl {
            Some(template) => expand_run_id("outputs.telemetry_jsonl", template, run_id)?,
            None => summary_json.with_file_name(format!("{run_id}.telemetry.jsonl")),
        };
        Ok(ResolvedOutputs {
            timeline_jsonl,
            summary_json,
            telemetry_jsonl,
        })
    }
}

fn expand_run_id(
    field: &'static str,
    template: &str,
    run_id: &str,
) -> Result<PathBuf, ValidationError> {
    let expanded = template.trim().replace(RUN_ID_PLACEHOLDER, run_id);
    if expanded.is_empty() {
        return Err(ValidationError::field(field, "path must not be empty"));
    }
    if expanded.contains(['{', '}']) {
        return Err(ValidationError::field(
            field,
            format!("'{template}' uses a placeholder other than {RUN_ID_PLACEHOLDER}"),
        ));
    }
    Ok(PathBuf::from(expanded))
}

/// Concrete output paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub timeline_jsonl: PathBuf,
    pub summary_json: PathBuf,
    pub telemetry_jsonl: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NetsConfig {
    #[serde(default = "default_net_slots")]
    pub slots: usize,
}

impl Default for NetsConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_NET_SLOTS,
        }
    }
}

impl NetsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.slots == 0 || self.slots > MAX_NET_SLOTS {
            return Err(ValidationError::field(
                "nets.slots",
                format!("net slots must be between 1 and {MAX_NET_SLOTS}"),
            ));
        }
        Ok(())
    }
}

fn default_net_slots() -> usize {
    DEFAULT_NET_SLOTS
}

/// Who works which net when a session starts.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CrewConfig {
    #[serde(default)]
    pub self_slot: Option<usize>,
    #[serde(default)]
    pub members: Vec<CrewMemberConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CrewMemberConfig {
    pub name: String,
    pub assignment: i32,
}

impl CrewConfig {
    fn validate(&self, slots: usize) -> Result<(), ValidationError> {
        if let Some(slot) = self.self_slot.filter(|slot| *slot >= slots) {
            return Err(ValidationError::field(
                "crew.self_slot",
                format!("slot {slot} is outside the {slots} configured nets"),
            ));
        }

        let mut seen = HashSet::new();
        for member in &self.members {
            if member.name.trim().is_empty() {
                return Err(ValidationError::field(
                    "crew.members.name",
                    "crew member name must not be empty",
                ));
            }
            if !seen.insert(member.name.as_str()) {
                return Err(ValidationError::field(
                    "crew.members",
                    format!("crew member '{}' defined more than once", member.name),
                ));
            }
        }
        Ok(())
    }

    pub fn roster(&self) -> CrewRoster {
        let mut roster = match self.self_slot {
            Some(slot) => CrewRoster::new().with_local_slot(slot),
            None => CrewRoster::new(),
        };
        for member in &self.members {
            roster.assign(Actor::Named(member.name.clone()), member.assignment);
        }
        roster
    }
}

/// Structured telemetry is off unless `enable_structured` is set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Per-target level overrides, e.g. `trawl_core::belief: trace`.
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            targets: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        parse_level("logging.tracing_level", &self.tracing_level)?;
        for (target, level) in &self.targets {
            if target.trim().is_empty() {
                return Err(ValidationError::field(
                    "logging.targets",
                    "target must not be empty",
                ));
            }
            parse_level("logging.targets", level)?;
        }
        Ok(())
    }

    pub fn level(&self) -> Level {
        self.tracing_level.trim().parse().unwrap_or(Level::INFO)
    }

    /// `EnvFilter` directives: other crates at `warn`, tracker targets at
    /// the configured level, then the per-target overrides.
    pub fn filter_directives(&self) -> String {
        let base = self.level().as_str().to_ascii_lowercase();
        let defaults = TRACKER_TARGETS
            .into_iter()
            .filter(|target| !self.targets.contains_key(*target))
            .map(|target| format!("{target}={base}"));
        let overrides = self.targets.iter().map(|(target, level)| {
            format!("{}={}", target.trim(), level.trim().to_ascii_lowercase())
        });
        std::iter::once("warn".to_string())
            .chain(defaults)
            .chain(overrides)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn parse_level(field: &'static str, level: &str) -> Result<Level, ValidationError> {
    level.trim().parse().map_err(|_| {
        ValidationError::field(field, format!("'{level}' is not a tracing level"))
    })
}

/// Run ids name output files, so they stay within `[A-Za-z0-9._-]` and
/// never start with a dot.
fn check_run_id(run_id: &str) -> Result<(), ValidationError> {
    let message = if run_id.is_empty() {
        "run_id must not be empty"
    } else if run_id.starts_with('.') {
        "run_id must not start with '.'"
    } else if !run_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        "run_id may only contain alphanumeric characters, '.', '_' or '-'"
    } else {
        return Ok(());
    };
    Err(ValidationError::field("run_id", message))
}

/// A replay configuration file that could not be used.
#[derive(Debug, Error)]
#[error("replay config {path:?} unusable")]
pub struct ConfigError {
    pub path: PathBuf,
    #[source]
    pub kind: ConfigErrorKind,
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("cannot read file")]
    Read(#[from] std::io::Error),
    #[error("malformed YAML")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A config field that failed validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    fn field(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            message: message.into(),
        }
    }
}
