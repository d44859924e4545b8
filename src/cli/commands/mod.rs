pub mod digest;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_DSN: &str = "dsn";
pub const ARG_ID: &str = "id";
pub const ARG_EMAIL: &str = "email";

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .long(ARG_ID)
        .help("Account id (UUID)")
        .required(true)
}

fn subcommands() -> [Command; 6] {
    [
        Command::new("hash").about("Read a secret from stdin and print its digest"),
        Command::new("schema").about("Create the accounts table"),
        Command::new("create")
            .about("Create an account; reads {\"secret\", \"secret_confirmation\"} JSON from stdin")
            .arg(
                Arg::new(ARG_EMAIL)
                    .long(ARG_EMAIL)
                    .help("Account email")
                    .required(true),
            ),
        Command::new("verify")
            .about("Read a secret from stdin and check it against the account")
            .arg(id_arg()),
        Command::new("status")
            .about("Show whether the account has a secret set")
            .arg(id_arg()),
        Command::new("update")
            .about("Guarded update; reads {\"current_secret\", \"secret\", \"secret_confirmation\", \"email\"} JSON from stdin")
            .arg(id_arg()),
    ]
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("pasvorto")
        .about("Password credentials with guarded updates")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long(ARG_DSN)
                .help("Database connection string")
                .env("PASVORTO_DSN")
                .hide_env_values(true)
                .global(true),
        )
        .subcommands(subcommands());

    let command = digest::with_args(command);
    logging::with_args(command)
}
