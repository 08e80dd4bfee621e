// SP3 analysis opmode
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn subcommand() -> Command {
    Command::new("analyze")
        .arg_required_else_help(true)
        .about(
            "SP3 RMS analysis. With a single file, the RMS of each satellite around its mean state.
With a reference file, the RMS of the (test - reference) deltas.",
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("fp")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILEPATH")
                .action(ArgAction::Set)
                .required(true)
                .help("SP3 file to analyze (test product)"),
        )
        .arg(
            Arg::new("reference")
                .short('r')
                .long("ref")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILEPATH")
                .action(ArgAction::Set)
                .help("Reference SP3 file"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILEPATH")
                .action(ArgAction::Set)
                .help("Export RMS table as CSV"),
        )
}
