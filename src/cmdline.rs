use clap::{command, value_parser, Arg, ArgAction, Command};

pub fn register_args() -> Command {
    command!() // requires `cargo` feature
        .next_line_help(true)
        .arg(
            Arg::new("interval")
                .required(false)
                .default_value("10")
                .long("interval")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .help("Seconds to sleep between two consecutive samples"),
        )
        .arg(
            Arg::new("duration")
                .required(false)
                .default_value("600")
                .long("duration")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u64))
                .help("Total collection time in seconds"),
        )
        .arg(
            Arg::new("output-directory")
                .required(false)
                .default_value(".")
                .long("output-directory")
                .action(ArgAction::Set)
                .help("Directory where the pressure log should be written"),
        )
}
