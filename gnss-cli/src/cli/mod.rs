use clap::{ArgMatches, ColorChoice, Command};

mod analyze;
mod convert;
mod time;

pub struct Cli {
    /// Arguments passed by user
    pub matches: ArgMatches,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }
    fn command() -> Command {
        Command::new("gnss-cli")
            .version(env!("CARGO_PKG_VERSION"))
            .about("GNSS time conversions, broadcast to SP3 conversion and SP3 analysis")
            .long_about(
                "gnss-cli is a command line tool to convert GNSS week counters,
convert broadcast ephemerides (RINEX navigation) to SP3,
and analyze SP3 precise orbit products.",
            )
            .arg_required_else_help(true)
            .color(ColorChoice::Always)
            .subcommand(time::week_subcommand())
            .subcommand(time::utc_subcommand())
            .subcommand(convert::subcommand())
            .subcommand(analyze::subcommand())
    }
}
