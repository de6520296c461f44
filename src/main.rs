use std::path::PathBuf;

use clap::{Parser, Subcommand, arg};
use itertools::Itertools;
use log::info;

use packleader::aggregates::storage::find_skater;
use packleader::errors::PackleaderError;
use packleader::strategy::RaceEntry;
use packleader::{FileBasedStorage, StatsStorage, generate_strategy};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a pre-race tactical plan
    Plan {
        /// Name of the skater to plan for, as recorded in the roster
        #[arg(short, long)]
        skater: String,

        /// Race distance in meters (500, 1000, 1500)
        #[arg(short, long, default_value = "1000")]
        distance: String,

        /// Starting lane
        #[arg(short, long, default_value_t = 4)]
        lane: u32,

        /// Opponent names; repeat the flag for each opponent
        #[arg(short, long)]
        opponent: Vec<String>,

        /// Data directory holding aggregates.json and roster.jsonl
        #[arg(long)]
        data: Option<PathBuf>,

        /// Emit the full result as JSON instead of a readable report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the roster sorted by threat score
    Roster {
        /// Data directory holding roster.jsonl
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn storage_for(data: Option<PathBuf>) -> Result<FileBasedStorage, PackleaderError> {
    match data {
        Some(path) => Ok(FileBasedStorage::new(path)),
        None => FileBasedStorage::new_default(),
    }
}

fn plan(
    skater_name: &str,
    distance: &str,
    lane: u32,
    opponent_names: &[String],
    data: Option<PathBuf>,
    json: bool,
) -> Result<(), PackleaderError> {
    let storage = storage_for(data)?;
    let roster = storage.load_roster()?;
    let stats = storage.load_aggregates()?;

    let skater = find_skater(&roster, skater_name)?;
    let entries = opponent_names
        .iter()
        .map(|name| Ok(RaceEntry::new(find_skater(&roster, name)?.clone())))
        .collect::<Result<Vec<RaceEntry>, PackleaderError>>()?;
    info!(
        "Planning {}m from lane {} against {} opponents",
        distance,
        lane,
        entries.len()
    );

    let result = generate_strategy(skater, distance, lane, &entries, &stats);

    if json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|e| PackleaderError::AggregateParseError { source: e })?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "{} — {}m from lane {}",
        skater.name, result.distance, result.lane
    );
    println!(
        "Win estimate {}% / podium {}% ({})",
        result.win_probability.overall,
        result.win_probability.podium,
        result.win_probability.explanation
    );
    println!(
        "Pace: {}% early / {}% middle / {}% late",
        result.pace.early, result.pace.middle, result.pace.late
    );

    if !result.opponents.is_empty() {
        println!("\nOpponents:");
        for opponent in &result.opponents {
            println!(
                "  {} — threat {:.0} ({}), {}",
                opponent.profile.name,
                opponent.score(),
                opponent.level,
                opponent.profile.stats.style
            );
        }
    }

    if !result.matchups.is_empty() {
        println!("\nMatchups:");
        for insight in &result.matchups {
            println!("  {} — {}", insight.opponent, insight.note);
        }
    }

    println!("\nAdvice:");
    for item in &result.advice {
        println!("  {} {}", item.icon, item.text);
    }

    println!("\nLap plan:");
    for lap in &result.lap_plan {
        let marker = if lap.hotspot { " (hotspot)" } else { "" };
        println!("  Lap {:>2} [{}] {}{}", lap.lap, lap.phase, lap.action, marker);
    }

    Ok(())
}

fn roster_report(data: Option<PathBuf>) -> Result<(), PackleaderError> {
    let storage = storage_for(data)?;
    let roster = storage.load_roster()?;

    for profile in roster
        .iter()
        .sorted_by(|a, b| b.stats.threat_score.total_cmp(&a.stats.threat_score))
    {
        println!(
            "{:>5.1}  {}  {} {} ({}, {} races)",
            profile.stats.threat_score,
            packleader::threat_level(profile.stats.threat_score),
            profile.flag,
            profile.name,
            profile.stats.style,
            profile.stats.races
        );
    }
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    match &cli.command {
        Commands::Plan {
            skater,
            distance,
            lane,
            opponent,
            data,
            json,
        } => {
            plan(skater, distance, *lane, opponent, data.clone(), *json)
                .expect("Error while generating the race plan");
        }
        Commands::Roster { data } => {
            roster_report(data.clone()).expect("Error while listing the roster");
        }
    };
}
