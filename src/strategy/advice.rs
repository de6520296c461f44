// Rule-based tactical advice generation
//
// Advice is built by a fixed sequence of independent predicate+formatter
// rules over an accumulating list. Each rule appends zero or one item and
// never suppresses another; the ordering of the rules is part of the
// contract with the presentation layer.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::aggregates::{LaneStats, OvertakeTiming};
use crate::roster::Style;
use crate::strategy::matchup::{MatchupInsight, MatchupVerdict};
use crate::strategy::pace::Pace;
use crate::strategy::threat::OpponentThreat;
use crate::strategy::win_probability::WinProbability;

/// Opponent penalty rate above which a penalty-risk warning fires.
pub(crate) const PENALTY_RATE_WARNING: f64 = 0.15;
/// Opponent crash rate above which a crash-risk warning fires.
pub(crate) const CRASH_RATE_WARNING: f64 = 0.10;
/// Threat score the top-ranked opponent needs before a dedicated warning.
pub(crate) const TOP_THREAT_WARNING_SCORE: f64 = 50.0;
/// Effort share at which a plan counts as front- or back-loaded.
pub(crate) const LOADED_PACE_PCT: u32 = 38;

/// One tactical tip: a display icon and templated text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdviceItem {
    pub icon: String,
    pub text: String,
}

impl AdviceItem {
    fn new(icon: &str, text: String) -> Self {
        Self {
            icon: icon.to_string(),
            text,
        }
    }
}

/// When in a race a given style typically strikes, for threat warnings.
fn attack_window(style: Style) -> &'static str {
    match style {
        Style::FrontRunner => "from the gun",
        Style::MidSurge => "mid-race",
        Style::LateMover => "in the closing laps",
        Style::Balanced => "at any point",
        Style::NoPasses => "rarely, but holds position hard",
    }
}

/// Build the ordered advice list for a race setup.
///
/// Expects `opponents` sorted by descending threat. Rules fire in a fixed
/// priority order: probability framing, strength gap, top threat, overtake
/// timing, hotspots, style tip, matchup disadvantage, penalty risk, crash
/// risk, and finally the pace summary, which always fires last.
#[allow(clippy::too_many_arguments)]
pub fn generate_advice(
    style: Style,
    distance: &str,
    lane: u32,
    lane_stats: Option<&LaneStats>,
    opponents: &[OpponentThreat],
    pace: &Pace,
    timing: Option<&OvertakeTiming>,
    hotspots: &[u32],
    insights: &[MatchupInsight],
    win: &WinProbability,
) -> Vec<AdviceItem> {
    let mut advice = Vec::new();

    // Win-probability framing
    if win.overall >= 60 {
        advice.push(AdviceItem::new(
            "🏆",
            format!(
                "You're the favorite from lane {} ({}% win estimate) — race to control, not to gamble",
                lane, win.overall
            ),
        ));
    } else if win.overall <= 30 {
        let lane_note = lane_stats
            .map(|l| format!("; lane {} wins only {:.0}% of races historically", lane, l.win_rate * 100.0))
            .unwrap_or_default();
        advice.push(AdviceItem::new(
            "⚠️",
            format!(
                "Long odds ({}% win estimate{}) — a clean conservative race won't be enough, pick your risks",
                win.overall, lane_note
            ),
        ));
    } else {
        advice.push(AdviceItem::new(
            "🎯",
            format!(
                "Open race ({}% win estimate) — execution on the key laps decides it",
                win.overall
            ),
        ));
    }

    // Strength-gap callout
    if win.strength_adj >= 15 {
        advice.push(AdviceItem::new(
            "💪",
            "You out-class this field on paper — take the front early and make them come around you"
                .to_string(),
        ));
    } else if win.strength_adj <= -15 {
        advice.push(AdviceItem::new(
            "🛡️",
            "The field is stronger on paper — follow, conserve, and strike when the leaders tangle"
                .to_string(),
        ));
    }

    // Top-threat warning
    if let Some(top) = opponents.first() {
        if top.score() >= TOP_THREAT_WARNING_SCORE {
            advice.push(AdviceItem::new(
                "👀",
                format!(
                    "Watch {} (threat {:.0}) — a {} who typically strikes {}",
                    top.profile.name,
                    top.score(),
                    top.profile.stats.style,
                    attack_window(top.profile.stats.style)
                ),
            ));
        }
    }

    // Overtake-timing insight
    if let Some(timing) = timing {
        let phases = [
            ("early", timing.early_pct),
            ("middle", timing.middle_pct),
            ("late", timing.late_pct),
        ];
        if let Some((phase, pct)) = phases.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1)) {
            if pct > 0.0 {
                advice.push(AdviceItem::new(
                    "⏱️",
                    format!(
                        "{:.0}% of passes at {}m historically happen in the {} laps — time yours accordingly",
                        pct, distance, phase
                    ),
                ));
            }
        }
    }

    // Hotspot-lap callout
    if !hotspots.is_empty() {
        advice.push(AdviceItem::new(
            "🔥",
            format!(
                "Laps {} see the most overtakes at {}m — expect traffic and protect your line",
                hotspots.iter().map(|l| l.to_string()).join(", "),
                distance
            ),
        ));
    }

    // Style-specific tip
    let style_tip = match style {
        Style::FrontRunner => (
            "🚀",
            "Get to the front before the first corner and control the tempo from there",
        ),
        Style::MidSurge => (
            "📈",
            "Stay in contact through the early laps, then surge mid-race before the sprinters wind up",
        ),
        Style::LateMover => (
            "⏳",
            "Be patient — sit third or fourth, keep the leaders in reach, and launch in the final laps",
        ),
        Style::Balanced => (
            "⚖️",
            "Stay flexible — read the race and take whichever opening appears, early or late",
        ),
        Style::NoPasses => (
            "📌",
            "Your record shows few passes — start position is everything, fight for the early inside line",
        ),
    };
    advice.push(AdviceItem::new(style_tip.0, style_tip.1.to_string()));

    // Matchup-disadvantage warning
    let disadvantaged: Vec<&str> = insights
        .iter()
        .filter(|i| i.verdict == MatchupVerdict::Disadvantage)
        .map(|i| i.opponent.as_str())
        .collect();
    if !disadvantaged.is_empty() {
        advice.push(AdviceItem::new(
            "♟️",
            format!(
                "Style disadvantage against {} — don't trade moves on their terms",
                disadvantaged.join(", ")
            ),
        ));
    }

    // Opponent discipline warnings
    let penalty_prone: Vec<&str> = opponents
        .iter()
        .filter(|o| o.profile.stats.discipline.penalty_rate > PENALTY_RATE_WARNING)
        .map(|o| o.profile.name.as_str())
        .collect();
    if !penalty_prone.is_empty() {
        advice.push(AdviceItem::new(
            "🚨",
            format!(
                "{} draw penalties at a high rate — leave room in contact situations and let the officials work",
                penalty_prone.join(", ")
            ),
        ));
    }

    let crash_prone: Vec<&str> = opponents
        .iter()
        .filter(|o| o.profile.stats.discipline.crash_rate > CRASH_RATE_WARNING)
        .map(|o| o.profile.name.as_str())
        .collect();
    if !crash_prone.is_empty() {
        advice.push(AdviceItem::new(
            "💥",
            format!(
                "{} carry elevated crash rates — stay off their line in the corners, especially late",
                crash_prone.join(", ")
            ),
        ));
    }

    // Pace summary, always last
    let summary = if pace.early >= LOADED_PACE_PCT {
        format!(
            "Front-loaded plan ({}/{}/{}) — bank your advantage early and defend it",
            pace.early, pace.middle, pace.late
        )
    } else if pace.late >= LOADED_PACE_PCT {
        format!(
            "Back-loaded plan ({}/{}/{}) — conserve early, everything rides on the final laps",
            pace.early, pace.middle, pace.late
        )
    } else {
        format!(
            "Even plan ({}/{}/{}) — steady effort, respond to moves as they come",
            pace.early, pace.middle, pace.late
        )
    };
    advice.push(AdviceItem::new("📋", summary));

    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CompetitorProfile, DisciplineStats, SkaterStats};
    use crate::strategy::threat::build_opponent_threat;

    fn base_win() -> WinProbability {
        WinProbability {
            overall: 45,
            podium: 55,
            lane_base: 25.0,
            strength_adj: 0,
            matchup_adj: 0.0,
            has_opponents: true,
            explanation: String::new(),
        }
    }

    fn base_pace() -> Pace {
        Pace {
            early: 33,
            middle: 34,
            late: 33,
        }
    }

    fn opponent_with_discipline(name: &str, penalty_rate: f64, crash_rate: f64) -> OpponentThreat {
        let profile = CompetitorProfile {
            name: name.to_string(),
            stats: SkaterStats {
                threat_score: 40.0,
                discipline: DisciplineStats {
                    penalty_rate,
                    crash_rate,
                    clean_race_pct: 0.8,
                },
                ..Default::default()
            },
            ..Default::default()
        };
        build_opponent_threat(&profile, None)
    }

    fn advice_for(opponents: &[OpponentThreat], win: &WinProbability, pace: &Pace) -> Vec<AdviceItem> {
        generate_advice(
            Style::Balanced,
            "1000",
            4,
            None,
            opponents,
            pace,
            None,
            &[],
            &[],
            win,
        )
    }

    #[test]
    fn test_framing_fires_first_and_pace_summary_last() {
        let advice = advice_for(&[], &base_win(), &base_pace());
        assert!(advice.first().unwrap().text.contains("45% win estimate"));
        assert!(advice.last().unwrap().text.contains("Even plan"));
    }

    #[test]
    fn test_penalty_warning_gated_on_rate() {
        let risky = vec![opponent_with_discipline("Risky Skater", 0.2, 0.0)];
        let advice = advice_for(&risky, &base_win(), &base_pace());
        assert!(advice.iter().any(|a| a.text.contains("penalties")));

        let clean = vec![opponent_with_discipline("Clean Skater", 0.1, 0.0)];
        let advice = advice_for(&clean, &base_win(), &base_pace());
        assert!(!advice.iter().any(|a| a.text.contains("penalties")));
    }

    #[test]
    fn test_crash_warning_gated_on_rate() {
        let risky = vec![opponent_with_discipline("Crashy Skater", 0.0, 0.12)];
        let advice = advice_for(&risky, &base_win(), &base_pace());
        assert!(advice.iter().any(|a| a.text.contains("crash rates")));

        let clean = vec![opponent_with_discipline("Stable Skater", 0.0, 0.1)];
        let advice = advice_for(&clean, &base_win(), &base_pace());
        assert!(!advice.iter().any(|a| a.text.contains("crash rates")));
    }

    #[test]
    fn test_top_threat_warning_gated_on_score() {
        let strong = vec![opponent_with_discipline("Big Name", 0.0, 0.0)];
        // threat 40 in the helper, below the 50 gate
        let advice = advice_for(&strong, &base_win(), &base_pace());
        assert!(!advice.iter().any(|a| a.text.starts_with("Watch")));

        let mut profile = strong[0].profile.clone();
        profile.stats.threat_score = 64.0;
        let field = vec![build_opponent_threat(&profile, None)];
        let advice = advice_for(&field, &base_win(), &base_pace());
        assert!(advice.iter().any(|a| a.text.starts_with("Watch Big Name")));
    }

    #[test]
    fn test_strength_gap_callouts() {
        let mut win = base_win();
        win.strength_adj = 20;
        let advice = advice_for(&[], &win, &base_pace());
        assert!(advice.iter().any(|a| a.text.contains("out-class")));

        win.strength_adj = -20;
        let advice = advice_for(&[], &win, &base_pace());
        assert!(advice.iter().any(|a| a.text.contains("stronger on paper")));

        win.strength_adj = 5;
        let advice = advice_for(&[], &win, &base_pace());
        assert!(!advice.iter().any(|a| a.text.contains("on paper")));
    }

    #[test]
    fn test_timing_and_hotspot_rules() {
        let timing = OvertakeTiming {
            early_pct: 20.0,
            middle_pct: 30.0,
            late_pct: 50.0,
        };
        let advice = generate_advice(
            Style::LateMover,
            "1000",
            2,
            None,
            &[],
            &base_pace(),
            Some(&timing),
            &[5, 7],
            &[],
            &base_win(),
        );
        assert!(advice
            .iter()
            .any(|a| a.text.contains("50% of passes") && a.text.contains("late laps")));
        assert!(advice.iter().any(|a| a.text.contains("Laps 5, 7")));
    }

    #[test]
    fn test_pace_summary_classification() {
        let front = Pace {
            early: 40,
            middle: 35,
            late: 25,
        };
        let advice = advice_for(&[], &base_win(), &front);
        assert!(advice.last().unwrap().text.contains("Front-loaded"));

        let back = Pace {
            early: 25,
            middle: 35,
            late: 40,
        };
        let advice = advice_for(&[], &base_win(), &back);
        assert!(advice.last().unwrap().text.contains("Back-loaded"));
    }
}
