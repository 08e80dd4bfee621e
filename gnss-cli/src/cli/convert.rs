// broadcast to SP3 opmode
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

pub fn subcommand() -> Command {
    Command::new("convert")
        .arg_required_else_help(true)
        .about(
            "Broadcast ephemerides (RINEX navigation) to SP3 conversion.
Satellite states are computed from the closest ephemeris, on a uniform time grid.",
        )
        .arg(
            Arg::new("file")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILEPATH")
                .action(ArgAction::Set)
                .required(true)
                .help("RINEX navigation file (.n, .p, .nav, .rnx, .YYn, .YYp, optionally gzip compressed)"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .value_parser(value_parser!(f64))
                .action(ArgAction::Set)
                .default_value("900")
                .help("Sampling interval, in seconds. 60 to 3600 is recommended."),
        )
        .arg(
            Arg::new("agency")
                .long("agency")
                .value_name("AGENCY")
                .action(ArgAction::Set)
                .default_value("GNSS")
                .help("Agency written in the SP3 header"),
        )
        .arg(
            Arg::new("crs")
                .long("crs")
                .value_name("SYSTEM")
                .action(ArgAction::Set)
                .default_value("IGS14")
                .help("Coordinates system written in the SP3 header"),
        )
        .arg(
            Arg::new("orbit-type")
                .long("orbit-type")
                .value_name("TYPE")
                .action(ArgAction::Set)
                .default_value("FIT")
                .help("Orbit type written in the SP3 header"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .value_name("FILEPATH")
                .action(ArgAction::Set)
                .help("Custom output file. Defaults to <input base name>.sp3 in the current folder."),
        )
}
