use crate::credential::DigestConfig;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_DIGEST_MEMORY_KIB: &str = "digest-memory-kib";
pub const ARG_DIGEST_ITERATIONS: &str = "digest-iterations";
pub const ARG_DIGEST_PARALLELISM: &str = "digest-parallelism";
pub const ARG_PEPPER: &str = "pepper";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DIGEST_MEMORY_KIB)
                .long(ARG_DIGEST_MEMORY_KIB)
                .help("Argon2 memory cost in KiB for new digests")
                .env("PASVORTO_DIGEST_MEMORY_KIB")
                .default_value("19456")
                .global(true)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_DIGEST_ITERATIONS)
                .long(ARG_DIGEST_ITERATIONS)
                .help("Argon2 iterations for new digests")
                .env("PASVORTO_DIGEST_ITERATIONS")
                .default_value("2")
                .global(true)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_DIGEST_PARALLELISM)
                .long(ARG_DIGEST_PARALLELISM)
                .help("Argon2 lanes for new digests")
                .env("PASVORTO_DIGEST_PARALLELISM")
                .default_value("1")
                .global(true)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new(ARG_PEPPER)
                .long(ARG_PEPPER)
                .help("Server-side secret mixed into every digest")
                .env("PASVORTO_PEPPER")
                .hide_env_values(true)
                .global(true),
        )
}

/// Build the digest configuration from parsed arguments.
///
/// # Errors
/// Returns an error if a cost argument is missing.
pub fn parse(matches: &ArgMatches) -> Result<DigestConfig> {
    let memory = matches
        .get_one::<u32>(ARG_DIGEST_MEMORY_KIB)
        .copied()
        .context("missing --digest-memory-kib")?;
    let iterations = matches
        .get_one::<u32>(ARG_DIGEST_ITERATIONS)
        .copied()
        .context("missing --digest-iterations")?;
    let parallelism = matches
        .get_one::<u32>(ARG_DIGEST_PARALLELISM)
        .copied()
        .context("missing --digest-parallelism")?;

    let mut config = DigestConfig::default()
        .with_memory_cost_kib(memory)
        .with_iterations(iterations)
        .with_parallelism(parallelism);

    if let Some(pepper) = matches.get_one::<String>(ARG_PEPPER) {
        config = config.with_pepper(SecretString::from(pepper.clone()));
    }

    Ok(config)
}
