// Opponent threat evaluation

use serde::{Deserialize, Serialize};

use crate::roster::CompetitorProfile;

pub(crate) const HIGH_THREAT_SCORE: f64 = 60.0;
pub(crate) const MEDIUM_THREAT_SCORE: f64 = 30.0;

/// Coarse danger classification derived from the 0-100 threat score.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatLevel::High => write!(f, "High"),
            ThreatLevel::Medium => write!(f, "Medium"),
            ThreatLevel::Low => write!(f, "Low"),
        }
    }
}

/// Classify a threat score into a level. Step function with fixed thresholds:
/// ≥60 high, ≥30 medium, else low.
pub fn threat_level(score: f64) -> ThreatLevel {
    if score >= HIGH_THREAT_SCORE {
        ThreatLevel::High
    } else if score >= MEDIUM_THREAT_SCORE {
        ThreatLevel::Medium
    } else {
        ThreatLevel::Low
    }
}

/// A selected opponent in the race setup: their profile, an optional starting
/// lane, and the derived threat level. Built fresh per race setup and
/// discarded once the strategy result is produced.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OpponentThreat {
    pub profile: CompetitorProfile,
    pub lane: Option<u32>,
    pub level: ThreatLevel,
}

impl OpponentThreat {
    /// The opponent's precomputed threat score (0 when absent upstream, via
    /// the data model defaults).
    pub fn score(&self) -> f64 {
        self.profile.stats.threat_score
    }
}

/// Evaluate one opponent for the race setup. Pure mapping: the score is read
/// from the profile, the level is a step function of the score.
pub fn build_opponent_threat(
    profile: &CompetitorProfile,
    lane: Option<u32>,
) -> OpponentThreat {
    OpponentThreat {
        profile: profile.clone(),
        lane,
        level: threat_level(profile.stats.threat_score),
    }
}
