// Win and podium probability estimation

use serde::{Deserialize, Serialize};

use crate::aggregates::LaneStats;
use crate::roster::{CompetitorProfile, SkaterStats};
use crate::strategy::matchup::MatchupInsight;
use crate::strategy::threat::OpponentThreat;

/// Assumed win percentage for a lane with no historical coverage.
pub(crate) const DEFAULT_LANE_WIN_PCT: f64 = 20.0;
/// Assumed top-2 percentage for a lane with no historical coverage.
pub(crate) const DEFAULT_LANE_TOP2_PCT: f64 = 40.0;

/// Win and podium probability estimate, with the additive components that
/// produced it. `overall` is clamped to 1-99 and `podium` to 2-99 so the
/// model never claims certainty in either direction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WinProbability {
    pub overall: u8,
    pub podium: u8,
    /// Historical lane win percentage used as the base
    pub lane_base: f64,
    /// Logistic strength differential vs the field, in -50..50
    pub strength_adj: i32,
    /// Mean matchup contribution, clamped to -15..15
    pub matchup_adj: f64,
    pub has_opponents: bool,
    pub explanation: String,
}

/// Composite 0-100 strength rating for a skater.
///
/// Blends the threat score with per-race net passing, passing volume, and a
/// weighted medal count, each contribution clamped so one outlier stat cannot
/// dominate the composite.
pub(crate) fn composite_strength(stats: &SkaterStats) -> f64 {
    let strength = 0.4 * stats.threat_score
        + (stats.net_per_race() * 15.0).clamp(-10.0, 30.0)
        + (stats.avg_passes_per_race * 5.0).clamp(0.0, 20.0)
        + (stats.medals.weighted() as f64 * 2.0).clamp(0.0, 20.0);
    strength.clamp(0.0, 100.0)
}

/// Estimate win and podium probability for the race setup.
///
/// The estimate is the lane's historical base rate plus a strength
/// differential and a matchup adjustment. The differential runs the strength
/// gap through a logistic curve so it saturates at ±50 for large skill gaps
/// instead of growing unbounded. With no opponents selected, the field is
/// modeled as average (equal to the competitor's own strength) rather than
/// weak, so the differential collapses to zero and the estimate is lane-only.
pub fn estimate_win_probability(
    skater: &CompetitorProfile,
    lane: u32,
    opponents: &[OpponentThreat],
    insights: &[MatchupInsight],
    lane_stats: Option<&LaneStats>,
) -> WinProbability {
    let lane_base = lane_stats
        .map(|l| l.win_rate * 100.0)
        .unwrap_or(DEFAULT_LANE_WIN_PCT);
    let lane_top2 = lane_stats
        .map(|l| l.top2_rate * 100.0)
        .unwrap_or(DEFAULT_LANE_TOP2_PCT);

    let my_strength = composite_strength(&skater.stats);
    let avg_opp_strength = if opponents.is_empty() {
        my_strength
    } else {
        opponents
            .iter()
            .map(|o| composite_strength(&o.profile.stats))
            .sum::<f64>()
            / opponents.len() as f64
    };

    let delta = my_strength - avg_opp_strength;
    let strength_adj = (50.0 * (2.0 / (1.0 + (-delta / 20.0).exp()) - 1.0)).round() as i32;

    let matchup_adj = if insights.is_empty() {
        0.0
    } else {
        let mean = insights
            .iter()
            .map(|i| (i.win_rate - 0.5) * 30.0)
            .sum::<f64>()
            / insights.len() as f64;
        mean.clamp(-15.0, 15.0)
    };

    let overall =
        (lane_base + strength_adj as f64 + matchup_adj).round().clamp(1.0, 99.0) as u8;
    let podium = (lane_top2 + 0.8 * strength_adj as f64 + 0.5 * matchup_adj)
        .round()
        .clamp(2.0, 99.0) as u8;

    let explanation = if opponents.is_empty() {
        format!(
            "Lane {} base rate {:.0}%; no opponents selected, so the estimate reflects lane history only",
            lane, lane_base
        )
    } else {
        format!(
            "Lane {} base rate {:.0}%, strength differential {:+} vs a field of {}, style matchups {:+.1}",
            lane,
            lane_base,
            strength_adj,
            opponents.len(),
            matchup_adj
        )
    };

    WinProbability {
        overall,
        podium,
        lane_base,
        strength_adj,
        matchup_adj,
        has_opponents: !opponents.is_empty(),
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::LaneStats;
    use crate::roster::{MedalCounts, Style};
    use crate::strategy::matchup::MatchupVerdict;
    use crate::strategy::threat::build_opponent_threat;
    use proptest::prelude::*;

    fn skater(threat: f64, races: u32, made: u32, against: u32) -> CompetitorProfile {
        CompetitorProfile {
            name: "Me".to_string(),
            stats: SkaterStats {
                races,
                passes_made: made,
                passes_against: against,
                net_passes: made as i64 - against as i64,
                avg_passes_per_race: if races > 0 {
                    made as f64 / races as f64
                } else {
                    0.0
                },
                threat_score: threat,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn insight(win_rate: f64, verdict: MatchupVerdict) -> MatchupInsight {
        MatchupInsight {
            opponent: "Opp".to_string(),
            opponent_style: Style::Balanced,
            verdict,
            win_rate,
            sample: 10,
            note: String::new(),
        }
    }

    #[test]
    fn test_no_opponents_yields_zero_strength_adjustment() {
        let me = skater(80.0, 20, 60, 10);
        let win = estimate_win_probability(&me, 4, &[], &[], None);
        assert!(!win.has_opponents);
        assert_eq!(win.strength_adj, 0);
        assert_eq!(win.overall, 20); // default lane base, no adjustments
        assert!(win.explanation.contains("lane history only"));
    }

    #[test]
    fn test_lane_history_feeds_base_rates() {
        let me = skater(50.0, 10, 10, 10);
        let lane = LaneStats {
            win_rate: 0.35,
            top2_rate: 0.6,
            sample: 80,
        };
        let win = estimate_win_probability(&me, 1, &[], &[], Some(&lane));
        assert!((win.lane_base - 35.0).abs() < 1e-9);
        assert_eq!(win.overall, 35);
        assert_eq!(win.podium, 60);
    }

    #[test]
    fn test_stronger_field_lowers_estimate() {
        let me = skater(30.0, 10, 5, 10);
        let strong = build_opponent_threat(&skater(90.0, 30, 90, 10), None);
        let win = estimate_win_probability(&me, 3, &[strong], &[], None);
        assert!(win.has_opponents);
        assert!(win.strength_adj < 0);
        assert!((win.overall as f64) < DEFAULT_LANE_WIN_PCT);
    }

    #[test]
    fn test_matchup_adjustment_is_mean_and_clamped() {
        let me = skater(50.0, 10, 10, 10);
        let insights = vec![
            insight(0.8, MatchupVerdict::Advantage),
            insight(0.6, MatchupVerdict::Advantage),
        ];
        let win = estimate_win_probability(&me, 3, &[], &insights, None);
        // ((0.3 + 0.1) * 30) / 2 = 6.0
        assert!((win.matchup_adj - 6.0).abs() < 1e-9);

        let extreme = vec![insight(1.0, MatchupVerdict::Advantage)];
        let win = estimate_win_probability(&me, 3, &[], &extreme, None);
        assert_eq!(win.matchup_adj, 15.0);
    }

    #[test]
    fn test_composite_strength_clamps_each_term() {
        // Huge medal haul and passing record still cap their contributions
        let stats = SkaterStats {
            races: 10,
            passes_made: 200,
            passes_against: 0,
            net_passes: 200,
            avg_passes_per_race: 20.0,
            threat_score: 100.0,
            medals: MedalCounts {
                gold: 50,
                silver: 0,
                bronze: 0,
            },
            ..Default::default()
        };
        assert_eq!(composite_strength(&stats), 100.0);
    }

    proptest! {
        #[test]
        fn prop_probabilities_stay_in_range(
            my_threat in 0.0f64..100.0,
            opp_threat in 0.0f64..100.0,
            win_rate in 0.0f64..1.0,
            lane_win in 0.0f64..1.0,
            lane_top2 in 0.0f64..1.0,
        ) {
            let me = skater(my_threat, 10, 30, 5);
            let opp = build_opponent_threat(&skater(opp_threat, 10, 30, 5), None);
            let insights = vec![insight(win_rate, MatchupVerdict::Even)];
            let lane = LaneStats { win_rate: lane_win, top2_rate: lane_top2, sample: 10 };

            let win = estimate_win_probability(&me, 2, &[opp], &insights, Some(&lane));
            prop_assert!((1..=99).contains(&win.overall));
            prop_assert!((2..=99).contains(&win.podium));
            prop_assert!((-50..=50).contains(&win.strength_adj));
            prop_assert!((-15.0..=15.0).contains(&win.matchup_adj));
        }
    }
}
