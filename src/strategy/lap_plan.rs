// Per-lap action planning

use serde::{Deserialize, Serialize};

use crate::roster::Style;
use crate::strategy::pace::Pace;

/// Phase effort share at or above which a non-hotspot lap is a push lap.
pub(crate) const PHASE_PUSH_PCT: u32 = 35;

/// Which third of the race a lap falls in, by fractional position:
/// ≤1/3 early, ≤2/3 mid, else late.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RacePhase {
    Early,
    Mid,
    Late,
}

impl std::fmt::Display for RacePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RacePhase::Early => write!(f, "Early"),
            RacePhase::Mid => write!(f, "Mid"),
            RacePhase::Late => write!(f, "Late"),
        }
    }
}

/// Presentation class for a lap action.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionClass {
    Hold,
    Push,
    Conserve,
    Overtake,
}

/// One entry of the lap-by-lap plan.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LapPlanItem {
    pub lap: u32,
    pub phase: RacePhase,
    /// Whether this lap is a historical overtake hotspot
    pub hotspot: bool,
    pub action: String,
    pub class: ActionClass,
}

/// Total laps skated for a distance; unrecognized distances fall back to the
/// 1000m lap count rather than failing.
pub fn total_laps(distance: &str) -> u32 {
    match distance {
        "500" => 5,
        "1000" => 9,
        "1500" => 14,
        _ => 9,
    }
}

pub(crate) fn race_phase(lap: u32, total: u32) -> RacePhase {
    let frac = lap as f64 / total as f64;
    if frac <= 1.0 / 3.0 {
        RacePhase::Early
    } else if frac <= 2.0 / 3.0 {
        RacePhase::Mid
    } else {
        RacePhase::Late
    }
}

/// Expand the pace allocation and hotspot laps into a per-lap action
/// sequence.
///
/// The decision table runs in priority order: lap 1 always positions, the
/// final lap always sprints, the second-to-last lap attacks for late movers
/// and pushes for everyone else, a hotspot lap gets a style-conditioned
/// overtake cue, and remaining laps fall back to a phase-based pace
/// comparison.
pub fn build_lap_plan(
    total: u32,
    hotspots: &[u32],
    pace: &Pace,
    style: Style,
) -> Vec<LapPlanItem> {
    (1..=total)
        .map(|lap| {
            let phase = race_phase(lap, total);
            let hotspot = hotspots.contains(&lap);
            let frac = lap as f64 / total as f64;

            let (action, class) = if lap == 1 {
                ("Position", ActionClass::Hold)
            } else if lap == total {
                ("Sprint", ActionClass::Push)
            } else if lap == total - 1 {
                match style {
                    Style::LateMover => ("Attack", ActionClass::Push),
                    _ => ("Push", ActionClass::Push),
                }
            } else if hotspot {
                match style {
                    Style::FrontRunner if frac <= 0.5 => ("Attack", ActionClass::Overtake),
                    Style::LateMover if frac > 0.6 => ("Attack", ActionClass::Overtake),
                    Style::MidSurge if (0.3..=0.7).contains(&frac) => {
                        ("Surge", ActionClass::Overtake)
                    }
                    _ => ("Ready", ActionClass::Overtake),
                }
            } else {
                match phase {
                    RacePhase::Early if pace.early >= PHASE_PUSH_PCT => {
                        ("Push", ActionClass::Push)
                    }
                    RacePhase::Early => ("Conserve", ActionClass::Conserve),
                    RacePhase::Mid => ("Hold", ActionClass::Hold),
                    RacePhase::Late if pace.late >= PHASE_PUSH_PCT => {
                        ("Push", ActionClass::Push)
                    }
                    RacePhase::Late => ("Hold", ActionClass::Hold),
                }
            };

            LapPlanItem {
                lap,
                phase,
                hotspot,
                action: action.to_string(),
                class,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even_pace() -> Pace {
        Pace {
            early: 33,
            middle: 34,
            late: 33,
        }
    }

    #[test]
    fn test_total_laps_per_distance() {
        assert_eq!(total_laps("500"), 5);
        assert_eq!(total_laps("1000"), 9);
        assert_eq!(total_laps("1500"), 14);
        assert_eq!(total_laps("777"), 9);
    }

    #[test]
    fn test_first_and_last_laps_are_fixed() {
        let plan = build_lap_plan(5, &[], &even_pace(), Style::Balanced);
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[0].action, "Position");
        assert_eq!(plan[0].class, ActionClass::Hold);
        assert_eq!(plan[4].action, "Sprint");
        assert_eq!(plan[4].class, ActionClass::Push);
    }

    #[test]
    fn test_penultimate_lap_attacks_for_late_movers() {
        let plan = build_lap_plan(9, &[], &even_pace(), Style::LateMover);
        assert_eq!(plan[7].action, "Attack");

        let plan = build_lap_plan(9, &[], &even_pace(), Style::FrontRunner);
        assert_eq!(plan[7].action, "Push");
    }

    #[test]
    fn test_hotspot_actions_follow_style_windows() {
        // Lap 3 of 9 is at 33% of the race
        let plan = build_lap_plan(9, &[3], &even_pace(), Style::FrontRunner);
        assert_eq!(plan[2].action, "Attack");
        assert_eq!(plan[2].class, ActionClass::Overtake);
        assert!(plan[2].hotspot);

        // Too early for a late mover
        let plan = build_lap_plan(9, &[3], &even_pace(), Style::LateMover);
        assert_eq!(plan[2].action, "Ready");

        // Lap 7 of 9 is at 78%, past the late-mover threshold
        let plan = build_lap_plan(9, &[7], &even_pace(), Style::LateMover);
        assert_eq!(plan[6].action, "Attack");

        // 33% sits inside the mid-surge window
        let plan = build_lap_plan(9, &[3], &even_pace(), Style::MidSurge);
        assert_eq!(plan[2].action, "Surge");

        let plan = build_lap_plan(9, &[3], &even_pace(), Style::Balanced);
        assert_eq!(plan[2].action, "Ready");
        assert_eq!(plan[2].class, ActionClass::Overtake);
    }

    #[test]
    fn test_phase_fallback_compares_pace() {
        let front_loaded = Pace {
            early: 40,
            middle: 35,
            late: 25,
        };
        let plan = build_lap_plan(9, &[], &front_loaded, Style::Balanced);
        // Laps 2-3 are early-phase, non-hotspot
        assert_eq!(plan[1].action, "Push");
        assert_eq!(plan[2].action, "Push");
        // Late phase below threshold holds
        assert_eq!(plan[6].action, "Hold");

        let back_loaded = Pace {
            early: 25,
            middle: 35,
            late: 40,
        };
        let plan = build_lap_plan(9, &[], &back_loaded, Style::Balanced);
        assert_eq!(plan[1].action, "Conserve");
        assert_eq!(plan[1].class, ActionClass::Conserve);
        assert_eq!(plan[6].action, "Push");
    }

    #[test]
    fn test_phase_labels_use_thirds() {
        let plan = build_lap_plan(9, &[], &even_pace(), Style::Balanced);
        assert_eq!(plan[2].phase, RacePhase::Early); // 3/9
        assert_eq!(plan[3].phase, RacePhase::Mid); // 4/9
        assert_eq!(plan[5].phase, RacePhase::Mid); // 6/9
        assert_eq!(plan[6].phase, RacePhase::Late); // 7/9
    }
}
