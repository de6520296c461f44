// Core data structures for the competitor roster

use serde::{Deserialize, Serialize};

pub mod custom;
pub use custom::build_custom_skater;

/// Classification of when in a race a skater typically makes their passes.
///
/// Styles are derived upstream from phase-split pass counts and stored on the
/// skater record. Every per-style table in the strategy engine matches on this
/// enum exhaustively, so adding a style is a compile-time-checked exercise.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Leads from the start and defends
    FrontRunner,
    /// Builds through the middle of the race
    MidSurge,
    /// Sits in the pack and attacks in the closing laps
    LateMover,
    /// No dominant phase
    #[default]
    Balanced,
    /// Rarely overtakes at all
    NoPasses,
}

impl Style {
    /// Stable string tag used as a key in the style-matchup tables.
    ///
    /// Matches the serde representation so JSON aggregates and in-memory
    /// lookups agree.
    pub fn tag(&self) -> &'static str {
        match self {
            Style::FrontRunner => "front_runner",
            Style::MidSurge => "mid_surge",
            Style::LateMover => "late_mover",
            Style::Balanced => "balanced",
            Style::NoPasses => "no_passes",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::FrontRunner => write!(f, "Front Runner"),
            Style::MidSurge => write!(f, "Mid-Race Surger"),
            Style::LateMover => write!(f, "Late Mover"),
            Style::Balanced => write!(f, "Balanced"),
            Style::NoPasses => write!(f, "Rarely Passes"),
        }
    }
}

/// Career medal counts for a skater.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct MedalCounts {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl MedalCounts {
    /// Weighted medal count: gold 3, silver 2, bronze 1.
    pub fn weighted(&self) -> u32 {
        self.gold * 3 + self.silver * 2 + self.bronze
    }
}

/// Race-discipline metrics. All rates are per-race fractions in 0.0-1.0.
///
/// Different historical sources cover different seasons, so any of these can
/// be absent upstream; they default to 0 rather than failing deserialization.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(default)]
pub struct DisciplineStats {
    pub penalty_rate: f64,
    pub crash_rate: f64,
    pub clean_race_pct: f64,
}

/// Aggregated overtaking record for a skater.
///
/// Invariants maintained by the upstream aggregation (and by
/// [`build_custom_skater`]): `net_passes = passes_made - passes_against`, and
/// `avg_passes_per_race = passes_made / races` when `races > 0`, else 0.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct SkaterStats {
    pub races: u32,
    pub passes_made: u32,
    pub passes_against: u32,
    pub net_passes: i64,
    pub avg_passes_per_race: f64,
    /// Passes made in the first third of races
    pub passes_early: u32,
    /// Passes made in the middle third of races
    pub passes_middle: u32,
    /// Passes made in the final third of races
    pub passes_late: u32,
    pub style: Style,
    /// Composite danger rating, 0-100
    pub threat_score: f64,
    pub medals: MedalCounts,
    pub discipline: DisciplineStats,
}

impl SkaterStats {
    /// Net passes per race; 0 for skaters with no recorded races.
    pub fn net_per_race(&self) -> f64 {
        if self.races > 0 {
            self.net_passes as f64 / self.races as f64
        } else {
            0.0
        }
    }
}

/// A single skater in the roster.
///
/// Profiles are immutable once constructed. They come either from the
/// historical aggregation pipeline (loaded through
/// [`crate::aggregates::StatsStorage`]) or from [`build_custom_skater`]; both
/// produce the same shape so a profile flows through every strategy component
/// unmodified.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct CompetitorProfile {
    pub name: String,
    #[serde(default)]
    pub nationality: String,
    /// Flag glyph for display (e.g., "🇺🇸")
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age_category: Option<String>,
    #[serde(default)]
    pub stats: SkaterStats,
}
