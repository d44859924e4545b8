use crate::cli::{actions::read_secret, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use std::io::{BufRead, Write};

/// Print a fresh digest of the secret read from `input`.
/// # Errors
/// Returns an error if the secret is blank or hashing fails.
pub fn execute<R: BufRead, W: Write>(
    globals: &GlobalArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let secret = read_secret(input)?;
    if secret.expose_secret().is_empty() {
        return Err(anyhow!("secret can't be blank"));
    }

    let digest = globals.digest_engine()?.hash(secret.expose_secret())?;
    writeln!(output, "{digest}")?;
    Ok(())
}
