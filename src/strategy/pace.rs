// Effort-allocation planning across race phases

use serde::{Deserialize, Serialize};

use crate::roster::Style;
use crate::strategy::threat::OpponentThreat;

/// Mean opponent threat score above which the plan conserves early and
/// sprints late.
pub(crate) const STRONG_FIELD_THREAT: f64 = 50.0;
/// Mean opponent threat score below which the plan presses the advantage
/// early.
pub(crate) const WEAK_FIELD_THREAT: f64 = 25.0;

/// Effort allocation across the early, middle, and late thirds of a race, as
/// integer percentages that always sum to exactly 100. Derived fresh per
/// invocation and never persisted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pace {
    pub early: u32,
    pub middle: u32,
    pub late: u32,
}

/// Per-style base allocation, before any adjustment.
fn style_base(style: Style) -> (f64, f64, f64) {
    match style {
        Style::FrontRunner => (40.0, 35.0, 25.0),
        Style::MidSurge => (30.0, 40.0, 30.0),
        Style::LateMover => (25.0, 35.0, 40.0),
        Style::Balanced | Style::NoPasses => (33.0, 34.0, 33.0),
    }
}

/// Derive the effort-allocation plan for a race.
///
/// Starts from the per-style base triple and applies additive adjustments in
/// a fixed order: distance (sprints shift weight earlier, endurance races
/// later), lane (inside lanes trade early for middle, outside lanes trade
/// late for early), then field strength (strong fields conserve early and
/// sprint, weak fields press early). Only after all adjustments is the triple
/// normalized back to a 100% split; normalizing first would change outcomes.
pub fn plan_pace(
    style: Style,
    distance: &str,
    lane: u32,
    opponents: &[OpponentThreat],
) -> Pace {
    let (mut early, mut middle, mut late) = style_base(style);

    match distance {
        "500" => {
            early += 8.0;
            late -= 8.0;
        }
        "1500" => {
            early -= 8.0;
            late += 8.0;
        }
        _ => {}
    }

    if lane <= 2 {
        early -= 5.0;
        middle += 5.0;
    } else if lane >= 4 {
        late -= 5.0;
        early += 5.0;
    }

    if !opponents.is_empty() {
        let avg_threat =
            opponents.iter().map(|o| o.score()).sum::<f64>() / opponents.len() as f64;
        if avg_threat > STRONG_FIELD_THREAT {
            early -= 6.0;
            late += 6.0;
        } else if avg_threat < WEAK_FIELD_THREAT {
            early += 6.0;
            late -= 6.0;
        }
    }

    normalize(early, middle, late)
}

/// Normalize a raw triple to integer percentages summing to exactly 100:
/// early and middle by proportional rounding, late as the remainder. A late
/// remainder that rounds below zero is clamped to 0 with the difference
/// returned to middle, so the sum invariant holds even at the extremes.
fn normalize(early: f64, middle: f64, late: f64) -> Pace {
    let total = early + middle + late;
    let early_pct = (early * 100.0 / total).round() as i64;
    let mut middle_pct = (middle * 100.0 / total).round() as i64;
    let mut late_pct = 100 - early_pct - middle_pct;
    if late_pct < 0 {
        middle_pct += late_pct;
        late_pct = 0;
    }
    Pace {
        early: early_pct as u32,
        middle: middle_pct as u32,
        late: late_pct as u32,
    }
}
