// The strategy recommendation engine
//
// Every function in this module tree is pure: a race setup plus the read-only
// historical aggregates goes in, a StrategyResult comes out. Nothing here
// blocks, retries, or shares mutable state, so callers can run orchestrations
// concurrently without locks.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::aggregates::{AggregateStats, LaneStats, LapOvertakes};
use crate::roster::CompetitorProfile;

pub mod advice;
pub mod lap_plan;
pub mod matchup;
pub mod pace;
pub mod threat;
pub mod win_probability;

pub use advice::AdviceItem;
pub use lap_plan::{ActionClass, LapPlanItem, RacePhase};
pub use matchup::{MatchupInsight, MatchupVerdict};
pub use pace::Pace;
pub use threat::{OpponentThreat, ThreatLevel, build_opponent_threat, threat_level};
pub use win_probability::WinProbability;

/// One opponent selected for the race setup, with an optional lane
/// assignment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RaceEntry {
    pub profile: CompetitorProfile,
    pub lane: Option<u32>,
}

impl RaceEntry {
    pub fn new(profile: CompetitorProfile) -> Self {
        Self {
            profile,
            lane: None,
        }
    }

    pub fn with_lane(profile: CompetitorProfile, lane: u32) -> Self {
        Self {
            profile,
            lane: Some(lane),
        }
    }
}

/// The complete pre-race tactical plan. Produced once per generate call;
/// immutable; no lifecycle beyond display.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StrategyResult {
    pub distance: String,
    pub lane: u32,
    pub pace: Pace,
    pub advice: Vec<AdviceItem>,
    pub lap_plan: Vec<LapPlanItem>,
    /// Selected opponents, sorted by descending threat score
    pub opponents: Vec<OpponentThreat>,
    pub matchups: Vec<MatchupInsight>,
    /// Historical rates for the chosen lane, when covered
    pub lane_stats: Option<LaneStats>,
    pub win_probability: WinProbability,
    /// Per-lap overtake counts for the distance, for chart display
    pub overtake_chart: Vec<LapOvertakes>,
}

/// Generate the full tactical plan for a race setup.
///
/// Sequences the sub-models in dependency order: threat-evaluate and sort the
/// opponent field, plan the pace, analyze style matchups for the top threats,
/// estimate win probability, generate the advice list, and expand the
/// lap-by-lap plan. Deterministic: identical inputs produce identical
/// results.
pub fn generate_strategy(
    skater: &CompetitorProfile,
    distance: &str,
    lane: u32,
    entries: &[RaceEntry],
    stats: &AggregateStats,
) -> StrategyResult {
    let mut opponents: Vec<OpponentThreat> = entries
        .iter()
        .map(|entry| build_opponent_threat(&entry.profile, entry.lane))
        .collect();
    // Stable sort keeps selection order for equal scores
    opponents.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));

    let style = skater.stats.style;
    let race_pace = pace::plan_pace(style, distance, lane, &opponents);
    let matchups = matchup::analyze_matchups(style, &opponents, stats);
    let lane_stats = stats.lane_stats(distance, lane).copied();
    let win_probability = win_probability::estimate_win_probability(
        skater,
        lane,
        &opponents,
        &matchups,
        lane_stats.as_ref(),
    );

    let hotspots = stats.hotspots(distance);
    let advice = advice::generate_advice(
        style,
        distance,
        lane,
        lane_stats.as_ref(),
        &opponents,
        &race_pace,
        stats.overtake_timing(distance),
        hotspots,
        &matchups,
        &win_probability,
    );

    let total = lap_plan::total_laps(distance);
    let plan = lap_plan::build_lap_plan(total, hotspots, &race_pace, style);

    StrategyResult {
        distance: distance.to_string(),
        lane,
        pace: race_pace,
        advice,
        lap_plan: plan,
        opponents,
        matchups,
        lane_stats,
        win_probability,
        overtake_chart: stats.lap_overtakes(distance).to_vec(),
    }
}
