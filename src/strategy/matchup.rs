// Style-vs-style matchup analysis

use serde::{Deserialize, Serialize};

use crate::aggregates::AggregateStats;
use crate::roster::Style;
use crate::strategy::threat::OpponentThreat;

/// Minimum historical meetings before a matchup entry is trusted.
pub(crate) const MIN_MATCHUP_SAMPLE: u32 = 5;
/// Win rate above which a matchup counts as an advantage.
pub(crate) const ADVANTAGE_WIN_RATE: f64 = 0.55;
/// Win rate below which a matchup counts as a disadvantage.
pub(crate) const DISADVANTAGE_WIN_RATE: f64 = 0.45;
/// Only the strongest opponents are worth a dedicated insight.
pub(crate) const MAX_MATCHUP_OPPONENTS: usize = 3;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchupVerdict {
    Advantage,
    Even,
    Disadvantage,
}

/// Qualitative read on one opponent based on the historical record of the
/// competitor's style against theirs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchupInsight {
    pub opponent: String,
    pub opponent_style: Style,
    pub verdict: MatchupVerdict,
    /// Historical win rate of my style against the opponent's (0.0-1.0)
    pub win_rate: f64,
    pub sample: u32,
    pub note: String,
}

/// Compare the competitor's style against each of the top opponents by
/// threat, using the historical style-vs-style win-rate table.
///
/// Opponents whose pairing has no table entry, or whose sample is below
/// [`MIN_MATCHUP_SAMPLE`], are skipped rather than guessed at. Expects the
/// opponent list already sorted by descending threat.
pub fn analyze_matchups(
    my_style: Style,
    opponents: &[OpponentThreat],
    stats: &AggregateStats,
) -> Vec<MatchupInsight> {
    opponents
        .iter()
        .take(MAX_MATCHUP_OPPONENTS)
        .filter_map(|opponent| {
            let opp_style = opponent.profile.stats.style;
            let matchup = stats.style_matchup(my_style, opp_style)?;
            if matchup.sample < MIN_MATCHUP_SAMPLE {
                return None;
            }

            let verdict = if matchup.win_rate > ADVANTAGE_WIN_RATE {
                MatchupVerdict::Advantage
            } else if matchup.win_rate < DISADVANTAGE_WIN_RATE {
                MatchupVerdict::Disadvantage
            } else {
                MatchupVerdict::Even
            };

            let note = match verdict {
                MatchupVerdict::Advantage => format!(
                    "You historically beat {} skaters {:.0}% of the time",
                    opp_style,
                    matchup.win_rate * 100.0
                ),
                MatchupVerdict::Disadvantage => format!(
                    "{} skaters historically beat your style {:.0}% of the time",
                    opp_style,
                    (1.0 - matchup.win_rate) * 100.0
                ),
                MatchupVerdict::Even => format!(
                    "Even history against {} skaters ({:.0}% win rate)",
                    opp_style,
                    matchup.win_rate * 100.0
                ),
            };

            Some(MatchupInsight {
                opponent: opponent.profile.name.clone(),
                opponent_style: opp_style,
                verdict,
                win_rate: matchup.win_rate,
                sample: matchup.sample,
                note,
            })
        })
        .collect()
}
