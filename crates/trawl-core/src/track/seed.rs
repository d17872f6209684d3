//! Optional path/stop history seeded from a `key=value` table.
//!
//! Keys are `shoalpath.<id>` and `shoalstops.<id>`; each value is a list of
//! `x, y, plane` triples separated by `|` or `;`.

use crate::model::point::WorldPoint;
use crate::track::entity::WorldViewId;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PATH_PREFIX: &str = "shoalpath.";
const STOPS_PREFIX: &str = "shoalstops.";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed table {path:?} is unavailable: {source}")]
    SeedResourceUnavailable {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("seed key '{key}' has an invalid point '{token}'")]
    InvalidSeedPoint { key: String, token: String },
    #[error("seed key '{key}' does not end in a numeric id")]
    InvalidSeedKey { key: String },
}

/// History for one identity; empty when the table has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedHistory {
    pub path: Vec<WorldPoint>,
    pub stops: Vec<WorldPoint>,
}

/// Anything that can provide seed history at entity construction time.
pub trait SeedSource {
    fn history_for(&self, identity: WorldViewId) -> Result<SeedHistory, SeedError>;
}

/// Parsed, in-memory seed table.
#[derive(Debug, Clone, Default)]
pub struct SeedTable {
    paths: HashMap<WorldViewId, Vec<WorldPoint>>,
    stops: HashMap<WorldViewId, Vec<WorldPoint>>,
}

impl SeedTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|source| SeedError::SeedResourceUnavailable {
                source,
                path: path.to_path_buf(),
            })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SeedError> {
        let mut table = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();

            let (target, id) = if let Some(id) = key.strip_prefix(PATH_PREFIX) {
                (&mut table.paths, id)
            } else if let Some(id) = key.strip_prefix(STOPS_PREFIX) {
                (&mut table.stops, id)
            } else {
                continue;
            };

            let id: WorldViewId = id.trim().parse().map_err(|_| SeedError::InvalidSeedKey {
                key: key.to_string(),
            })?;
            target.insert(id, parse_points(key, value)?);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.paths.len() + self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeedSource for SeedTable {
    fn history_for(&self, identity: WorldViewId) -> Result<SeedHistory, SeedError> {
        Ok(SeedHistory {
            path: self.paths.get(&identity).cloned().unwrap_or_default(),
            stops: self.stops.get(&identity).cloned().unwrap_or_default(),
        })
    }
}

/// Seed table read from disk on every lookup, so a missing file surfaces
/// when an entity is constructed.
#[derive(Debug, Clone)]
pub struct SeedFile {
    path: PathBuf,
}

impl SeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for SeedFile {
    fn history_for(&self, identity: WorldViewId) -> Result<SeedHistory, SeedError> {
        SeedTable::load(&self.path)?.history_for(identity)
    }
}

fn parse_points(key: &str, value: &str) -> Result<Vec<WorldPoint>, SeedError> {
    value
        .split(['|', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_point(key, token))
        .collect()
}

fn parse_point(key: &str, token: &str) -> Result<WorldPoint, SeedError> {
    let invalid = || SeedError::InvalidSeedPoint {
        key: key.to_string(),
        token: token.to_string(),
    };
    let parts = token
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    match parts.as_slice() {
        [x, y, plane] => Ok(WorldPoint::new(*x, *y, *plane)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "\
# recorded routes
shoalpath.12=3200, 3201, 0|3204, 3201, 0 ; 3210, 3199, 0
shoalstops.12=3210, 3199, 0
shoalpath.40=
unrelated.key=1
";

    #[test]
    fn parses_both_delimiters() {
        let table = SeedTable::parse(TABLE).unwrap();
        let history = table.history_for(12).unwrap();
        assert_eq!(
            history.path,
            vec![
                WorldPoint::new(3200, 3201, 0),
                WorldPoint::new(3204, 3201, 0),
                WorldPoint::new(3210, 3199, 0),
            ]
        );
        assert_eq!(history.stops, vec![WorldPoint::new(3210, 3199, 0)]);
    }

    #[test]
    fn missing_or_empty_entries_are_empty_history() {
        let table = SeedTable::parse(TABLE).unwrap();
        assert_eq!(table.history_for(40).unwrap(), SeedHistory::default());
        assert_eq!(table.history_for(99).unwrap(), SeedHistory::default());
    }

    #[test]
    fn malformed_point_is_rejected() {
        let err = SeedTable::parse("shoalpath.3=1, 2").unwrap_err();
        assert!(matches!(err, SeedError::InvalidSeedPoint { ref token, .. } if token == "1, 2"));
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let err = SeedTable::parse("shoalstops.abc=1, 2, 0").unwrap_err();
        assert!(matches!(err, SeedError::InvalidSeedKey { .. }));
    }

    #[test]
    fn seed_file_reports_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let source = SeedFile::new(dir.path().join("shoals.properties"));
        let err = source.history_for(1).unwrap_err();
        assert!(matches!(err, SeedError::SeedResourceUnavailable { .. }));
    }

    #[test]
    fn seed_file_reads_on_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoals.properties");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let source = SeedFile::new(&path);
        assert_eq!(source.history_for(12).unwrap().stops.len(), 1);
    }
}
