// Error types for packleader

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum PackleaderError {
    // Errors loading aggregate statistics
    #[snafu(display("Could not find application data directory for historical statistics"))]
    NoDataDir,
    #[snafu(display("Error reading aggregate statistics file"))]
    AggregateIoError { source: io::Error },
    #[snafu(display("Error parsing aggregate statistics file"))]
    AggregateParseError { source: serde_json::Error },

    // Errors loading and saving the skater roster
    #[snafu(display("Roster file not found: {path}"))]
    MissingRosterFile { path: String },
    #[snafu(display("Error reading roster file"))]
    RosterIoError { source: io::Error },
    #[snafu(display("Error writing roster file"))]
    RosterWriteError { source: io::Error },
    #[snafu(display("Unknown skater: {name}"))]
    UnknownSkater { name: String },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
}
