//! Filesystem persistence: team metadata, tournament config, and the
//! generated db record.
//!
//! Layout mirrors the data directory convention: `teams/*.json` for per-team
//! metadata, `tournament.json` for config, `generated/db.json` for the
//! output record consumed by the presentation layer.

use crate::models::{BracketDb, MatchRecord, Team, TeamId, TournamentConfig};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Errors from reading or writing persisted tournament data.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::Json(e) => write!(f, "JSON error: {}", e),
            StorageError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

impl From<csv::Error> for StorageError {
    fn from(e: csv::Error) -> Self {
        StorageError::Csv(e)
    }
}

/// Load team metadata from a directory of `*.json` files, keyed by team id.
///
/// A missing directory is an empty roster, not an error. Files that fail to
/// parse are skipped with a warning so one bad team file never blocks a build.
pub fn load_teams(dir: &Path) -> Result<HashMap<TeamId, Team>, StorageError> {
    let mut teams = HashMap::new();
    if !dir.is_dir() {
        return Ok(teams);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str::<Team>(&raw) {
            Ok(team) => {
                teams.insert(team.id.clone(), team);
            }
            Err(e) => {
                log::warn!("Skipping unreadable team file {}: {}", path.display(), e);
            }
        }
    }
    Ok(teams)
}

/// Bulk-import team metadata from CSV with `id,name,logo` headers.
/// An empty logo column becomes no logo.
pub fn import_teams_csv(reader: impl Read) -> Result<Vec<Team>, StorageError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut teams = Vec::new();
    for record in csv_reader.deserialize() {
        let mut team: Team = record?;
        if team.logo.as_deref().is_some_and(|l| l.trim().is_empty()) {
            team.logo = None;
        }
        teams.push(team);
    }
    Ok(teams)
}

/// Load the tournament configuration (meta + ordered participants).
pub fn load_config(path: &Path) -> Result<TournamentConfig, StorageError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Load the match list from a previously generated db record.
///
/// Absent or malformed data is discarded with a warning and the rebuild
/// proceeds with default (zero) scores; this is never fatal.
pub fn load_previous_bracket(path: &Path) -> Option<Vec<MatchRecord>> {
    if !path.is_file() {
        return None;
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Could not read previous db {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str::<BracketDb>(&raw) {
        Ok(db) => Some(db.bracket),
        Err(e) => {
            log::warn!(
                "Could not restore previous results from {}: {}; starting fresh",
                path.display(),
                e
            );
            None
        }
    }
}

/// Write the db record as pretty-printed JSON, creating parent directories.
pub fn write_db(path: &Path, db: &BracketDb) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(db)?;
    fs::write(path, raw)?;
    Ok(())
}
