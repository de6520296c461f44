// Storage implementation for the historical data files
//
// The aggregate tables and the skater roster are produced by an offline
// pipeline and read here once at startup; this layer never writes to the
// aggregate file.

use std::fs;
use std::path::PathBuf;

use log::{debug, warn};

use crate::aggregates::AggregateStats;
use crate::errors::PackleaderError;
use crate::roster::CompetitorProfile;

const AGGREGATES_FILE: &str = "aggregates.json";
const ROSTER_FILE: &str = "roster.jsonl";

/// Trait defining the interface for loading historical data.
///
/// The strategy engine itself only sees the loaded values; this seam exists
/// so tests and alternative frontends can supply data without touching disk.
pub trait StatsStorage {
    /// Load the aggregate statistics tables
    fn load_aggregates(&self) -> Result<AggregateStats, PackleaderError>;

    /// Load the full competitor roster
    fn load_roster(&self) -> Result<Vec<CompetitorProfile>, PackleaderError>;
}

/// File-based historical data storage: one JSON document for the aggregate
/// tables and a JSON-lines file for the roster, both under a data directory.
pub struct FileBasedStorage {
    data_path: PathBuf,
}

impl FileBasedStorage {
    /// Create a storage instance rooted at the given directory.
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path }
    }

    /// Create storage in the default application data directory.
    pub fn new_default() -> Result<Self, PackleaderError> {
        Ok(Self::new(Self::default_data_path()?))
    }

    /// Default data directory for historical files.
    pub fn default_data_path() -> Result<PathBuf, PackleaderError> {
        let app_data_dir = dirs::data_dir().ok_or(PackleaderError::NoDataDir)?;
        Ok(app_data_dir.join("packleader"))
    }

    fn aggregates_path(&self) -> PathBuf {
        self.data_path.join(AGGREGATES_FILE)
    }

    fn roster_path(&self) -> PathBuf {
        self.data_path.join(ROSTER_FILE)
    }

    /// Write a roster file, one profile per line. Used by import tooling and
    /// tests; the strategy engine never calls this.
    pub fn save_roster(&self, roster: &[CompetitorProfile]) -> Result<(), PackleaderError> {
        if !self.data_path.exists() {
            fs::create_dir_all(&self.data_path)
                .map_err(|e| PackleaderError::RosterWriteError { source: e })?;
        }
        serde_jsonlines::write_json_lines(self.roster_path(), roster)
            .map_err(|e| PackleaderError::RosterWriteError { source: e })
    }

    /// Write the aggregate tables document. Counterpart of `save_roster` for
    /// seeding test fixtures and local data directories.
    pub fn save_aggregates(&self, stats: &AggregateStats) -> Result<(), PackleaderError> {
        if !self.data_path.exists() {
            fs::create_dir_all(&self.data_path)
                .map_err(|e| PackleaderError::AggregateIoError { source: e })?;
        }
        let content = serde_json::to_string_pretty(stats)
            .map_err(|e| PackleaderError::AggregateParseError { source: e })?;
        fs::write(self.aggregates_path(), content)
            .map_err(|e| PackleaderError::AggregateIoError { source: e })
    }
}

impl StatsStorage for FileBasedStorage {
    fn load_aggregates(&self) -> Result<AggregateStats, PackleaderError> {
        let path = self.aggregates_path();
        if !path.exists() {
            // Historical coverage is optional; the engine degrades to its
            // documented defaults with empty tables.
            warn!(
                "No aggregate statistics file at {:?}, using empty tables",
                path
            );
            return Ok(AggregateStats::default());
        }

        debug!("Loading aggregate statistics from {:?}", path);
        let content = fs::read_to_string(&path)
            .map_err(|e| PackleaderError::AggregateIoError { source: e })?;
        serde_json::from_str(&content)
            .map_err(|e| PackleaderError::AggregateParseError { source: e })
    }

    fn load_roster(&self) -> Result<Vec<CompetitorProfile>, PackleaderError> {
        let path = self.roster_path();
        if !path.exists() {
            return Err(PackleaderError::MissingRosterFile {
                path: format!("{:?}", path),
            });
        }

        debug!("Loading roster from {:?}", path);
        let roster = serde_jsonlines::json_lines(&path)
            .map_err(|e| PackleaderError::RosterIoError { source: e })?
            .collect::<Result<Vec<CompetitorProfile>, std::io::Error>>()
            .map_err(|e| PackleaderError::RosterIoError { source: e })?;
        debug!("Loaded {} skater profiles", roster.len());
        Ok(roster)
    }
}

/// Find a skater by exact name in a loaded roster.
pub fn find_skater<'a>(
    roster: &'a [CompetitorProfile],
    name: &str,
) -> Result<&'a CompetitorProfile, PackleaderError> {
    roster
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PackleaderError::UnknownSkater {
            name: name.to_string(),
        })
}
