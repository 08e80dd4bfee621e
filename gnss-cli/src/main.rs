//! Command line tool for GNSS time conversions,
//! broadcast ephemeris to SP3 conversion and SP3 analysis.
//! Refer to README for command line arguments.

mod cli; // command line interface
mod export; // csv exports
mod fops;

use cli::Cli;

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    StdioError(#[from] std::io::Error),
    #[error("gnss-tools error: {0}")]
    GnssToolsError(#[from] gnss_tools::prelude::Error),
    #[error("invalid date time \"{0}\"")]
    DateTimeParsing(String),
    #[error("unknown time system \"{0}\"")]
    UnknownTimeSystem(String),
    #[error("csv export error")]
    CsvError(#[from] csv::Error),
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();

    match cli.matches.subcommand() {
        Some(("week", submatches)) => fops::week(submatches),
        Some(("utc", submatches)) => fops::utc(submatches),
        Some(("convert", submatches)) => fops::convert(submatches),
        Some(("analyze", submatches)) => fops::analyze(submatches),
        _ => Ok(()),
    }
} // main
