pub mod database;
pub mod logging;

use clap::{
    Arg, ArgAction, ArgMatches, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_PORT: &str = "port";
pub const ARG_MIGRATE: &str = "migrate";
pub const CMD_MIGRATE: &str = "migrate";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("soundcollide")
        .about("User profile registration and project association")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("SOUNDCOLLIDE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_MIGRATE)
                .long(ARG_MIGRATE)
                .help("Apply database migrations before serving")
                .env("SOUNDCOLLIDE_MIGRATE")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new(CMD_MIGRATE).about("Apply database migrations and exit"));

    let command = database::with_args(command);
    logging::with_args(command)
}

/// Matches holding the global arguments, wherever they were given.
#[must_use]
pub fn effective(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().map_or(matches, |(_, sub)| sub)
}
