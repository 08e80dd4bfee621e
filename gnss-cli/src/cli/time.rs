// time conversion opmodes
use clap::{value_parser, Arg, ArgAction, Command};

pub fn week_subcommand() -> Command {
    Command::new("week")
        .arg_required_else_help(true)
        .about("UTC date time to GPS and BeiDou week counters and time of week.")
        .arg(
            Arg::new("datetime")
                .value_name("DATETIME")
                .action(ArgAction::Set)
                .required(true)
                .help("UTC date time, for example \"2020-06-25T00:00:00 UTC\""),
        )
}

pub fn utc_subcommand() -> Command {
    Command::new("utc")
        .arg_required_else_help(true)
        .about("Week counter and time of week to UTC date time.")
        .arg(
            Arg::new("week")
                .long("week")
                .short('w')
                .value_name("WEEK")
                .value_parser(value_parser!(i64))
                .action(ArgAction::Set)
                .required(true)
                .help("Week counter"),
        )
        .arg(
            Arg::new("tow")
                .long("tow")
                .short('t')
                .value_name("SECONDS")
                .value_parser(value_parser!(f64))
                .action(ArgAction::Set)
                .required(true)
                .help("Time of week, in seconds"),
        )
        .arg(
            Arg::new("system")
                .long("system")
                .short('s')
                .value_name("SYSTEM")
                .action(ArgAction::Set)
                .default_value("gps")
                .help("Time system the week counter refers to: \"gps\" or \"bds\""),
        )
}
