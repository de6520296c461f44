// Library interface for packleader
// This allows integration tests to access internal modules

pub mod aggregates;
pub mod errors;
pub mod roster;
pub mod strategy;

// Re-export commonly used types
pub use aggregates::{AggregateStats, FileBasedStorage, StatsStorage};
pub use errors::PackleaderError;
pub use roster::{CompetitorProfile, Style, build_custom_skater};
pub use strategy::{
    RaceEntry, StrategyResult, build_opponent_threat, generate_strategy, threat_level,
};
