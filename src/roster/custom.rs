// Builder for manually-entered competitor profiles

use crate::errors::PackleaderError;
use crate::roster::{CompetitorProfile, SkaterStats, Style};

/// Race count assumed for a manually-entered skater. The skill sliders are
/// per-race rates, so totals are derived by multiplying against this.
pub(crate) const ASSUMED_RACES: u32 = 10;

/// Build a well-formed [`CompetitorProfile`] from manually entered skill
/// sliders, for skaters not present in the historical roster.
///
/// `pass_rate` and `passed_rate` are per-race overtake rates in 0-10;
/// `threat` is the composite danger rating in 0-100. Totals assume a fixed
/// record of [`ASSUMED_RACES`] races, and the made passes are split across
/// race phases using fixed per-style ratios so the derived profile behaves
/// like its historical counterparts in every downstream component. Medals,
/// discipline metrics, and optional identity fields are zeroed.
pub fn build_custom_skater(
    name: &str,
    nationality: &str,
    flag: &str,
    style: Style,
    pass_rate: f64,
    passed_rate: f64,
    threat: f64,
) -> Result<CompetitorProfile, PackleaderError> {
    validate_slider("pass_rate", pass_rate, 0.0, 10.0)?;
    validate_slider("passed_rate", passed_rate, 0.0, 10.0)?;
    validate_slider("threat", threat, 0.0, 100.0)?;

    let passes_made = (pass_rate * ASSUMED_RACES as f64).round() as u32;
    let passes_against = (passed_rate * ASSUMED_RACES as f64).round() as u32;
    let (passes_early, passes_middle, passes_late) = split_passes(style, passes_made);

    Ok(CompetitorProfile {
        name: name.to_string(),
        nationality: nationality.to_string(),
        flag: flag.to_string(),
        gender: None,
        age_category: None,
        stats: SkaterStats {
            races: ASSUMED_RACES,
            passes_made,
            passes_against,
            net_passes: passes_made as i64 - passes_against as i64,
            avg_passes_per_race: passes_made as f64 / ASSUMED_RACES as f64,
            passes_early,
            passes_middle,
            passes_late,
            style,
            threat_score: threat,
            ..Default::default()
        },
    })
}

fn validate_slider(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), PackleaderError> {
    if !value.is_finite() || value < min || value > max {
        return Err(PackleaderError::InvalidUserInput {
            field: field.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Allocate made passes across race phases using fixed per-style ratios.
///
/// The remainder after rounding always lands on the last computed phase so
/// the three counts sum exactly to `made`.
fn split_passes(style: Style, made: u32) -> (u32, u32, u32) {
    let made_f = made as f64;
    match style {
        Style::FrontRunner => {
            let early = (made_f * 0.5).round() as u32;
            let middle = (made_f * 0.3).round() as u32;
            (early, middle, made - early - middle)
        }
        Style::LateMover => {
            let early = (made_f * 0.2).round() as u32;
            let middle = (made_f * 0.3).round() as u32;
            (early, middle, made - early - middle)
        }
        Style::MidSurge => {
            let early = (made_f * 0.25).round() as u32;
            let middle = (made_f * 0.5).round() as u32;
            (early, middle, made - early - middle)
        }
        Style::Balanced | Style::NoPasses => {
            let early = made / 3;
            let middle = made / 3;
            (early, middle, made - early - middle)
        }
    }
}
