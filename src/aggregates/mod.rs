// Historical aggregate statistics consumed by the strategy engine
//
// Everything in this module is precomputed upstream and treated as read-only.
// Accessors return Option or empty slices for missing distance/lane
// combinations; historical coverage is inherently incomplete, so a missing
// key degrades to documented defaults in the engine rather than failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::roster::Style;

pub mod storage;
pub use storage::{FileBasedStorage, StatsStorage};

/// Historical win/top-2 rates for one starting lane at one distance.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct LaneStats {
    /// Fraction of historical races won from this lane (0.0-1.0)
    pub win_rate: f64,
    /// Fraction of historical races finished top-2 from this lane (0.0-1.0)
    pub top2_rate: f64,
    /// Number of races behind the rates
    #[serde(default)]
    pub sample: u32,
}

/// Distribution of historical overtakes across race phases, as percentages
/// summing to roughly 100.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(default)]
pub struct OvertakeTiming {
    pub early_pct: f64,
    pub middle_pct: f64,
    pub late_pct: f64,
}

/// Overtake count observed on one lap, for per-lap chart data.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LapOvertakes {
    pub lap: u32,
    pub count: u32,
}

/// Historical head-to-head record for one style-vs-style pairing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct StyleMatchup {
    /// Win rate for the row style against the column style (0.0-1.0)
    pub win_rate: f64,
    /// Number of historical meetings behind the rate
    #[serde(default)]
    pub sample: u32,
}

/// The full set of precomputed aggregate tables, keyed by distance string
/// (e.g. "500") and, where applicable, lane number or style tag.
///
/// Lane and style keys are strings for JSON friendliness; the typed accessors
/// below are the intended lookup surface.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct AggregateStats {
    /// distance -> lane -> win/top-2 rates
    pub lane_advantage: HashMap<String, HashMap<String, LaneStats>>,
    /// distance -> overtake phase distribution
    pub overtake_timing: HashMap<String, OvertakeTiming>,
    /// distance -> laps with historically elevated overtake frequency
    pub hotspot_laps: HashMap<String, Vec<u32>>,
    /// distance -> per-lap overtake counts
    pub lap_overtakes: HashMap<String, Vec<LapOvertakes>>,
    /// my style tag -> opponent style tag -> head-to-head record
    pub style_matchups: HashMap<String, HashMap<String, StyleMatchup>>,
}

impl AggregateStats {
    /// Win/top-2 rates for a lane at a distance, if covered by history.
    pub fn lane_stats(&self, distance: &str, lane: u32) -> Option<&LaneStats> {
        self.lane_advantage
            .get(distance)
            .and_then(|lanes| lanes.get(&lane.to_string()))
    }

    /// Overtake phase distribution for a distance, if covered by history.
    pub fn overtake_timing(&self, distance: &str) -> Option<&OvertakeTiming> {
        self.overtake_timing.get(distance)
    }

    /// Hotspot laps for a distance; empty for uncovered distances.
    pub fn hotspots(&self, distance: &str) -> &[u32] {
        self.hotspot_laps
            .get(distance)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Per-lap overtake counts for a distance; empty for uncovered distances.
    pub fn lap_overtakes(&self, distance: &str) -> &[LapOvertakes] {
        self.lap_overtakes
            .get(distance)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Head-to-head record for a style pairing, if covered by history.
    pub fn style_matchup(&self, mine: Style, theirs: Style) -> Option<&StyleMatchup> {
        self.style_matchups
            .get(mine.tag())
            .and_then(|row| row.get(theirs.tag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> AggregateStats {
        let mut stats = AggregateStats::default();
        stats.lane_advantage.insert(
            "500".to_string(),
            HashMap::from([(
                "1".to_string(),
                LaneStats {
                    win_rate: 0.31,
                    top2_rate: 0.52,
                    sample: 120,
                },
            )]),
        );
        stats
            .hotspot_laps
            .insert("1000".to_string(), vec![4, 7]);
        stats.style_matchups.insert(
            "front_runner".to_string(),
            HashMap::from([(
                "late_mover".to_string(),
                StyleMatchup {
                    win_rate: 0.58,
                    sample: 22,
                },
            )]),
        );
        stats
    }

    #[test]
    fn test_lane_stats_lookup() {
        let stats = sample_stats();
        let lane = stats.lane_stats("500", 1).unwrap();
        assert_eq!(lane.win_rate, 0.31);
        assert!(stats.lane_stats("500", 3).is_none());
        assert!(stats.lane_stats("1500", 1).is_none());
    }

    #[test]
    fn test_missing_distance_degrades_to_empty() {
        let stats = sample_stats();
        assert!(stats.hotspots("500").is_empty());
        assert_eq!(stats.hotspots("1000"), &[4, 7]);
        assert!(stats.lap_overtakes("500").is_empty());
        assert!(stats.overtake_timing("500").is_none());
    }

    #[test]
    fn test_style_matchup_lookup_uses_tags() {
        let stats = sample_stats();
        let matchup = stats
            .style_matchup(Style::FrontRunner, Style::LateMover)
            .unwrap();
        assert_eq!(matchup.sample, 22);
        assert!(stats
            .style_matchup(Style::LateMover, Style::FrontRunner)
            .is_none());
    }

    #[test]
    fn test_aggregates_deserialize_from_partial_json() {
        let stats: AggregateStats = serde_json::from_str(
            r#"{"lane_advantage": {"500": {"2": {"win_rate": 0.2, "top2_rate": 0.4}}}}"#,
        )
        .unwrap();
        assert!(stats.lane_stats("500", 2).is_some());
        assert!(stats.style_matchups.is_empty());
    }
}
