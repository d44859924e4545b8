pub mod create;
pub mod hash;
pub mod schema;
pub mod status;
pub mod update;
pub mod verify;

// Internal "interpreter" for `Action`.
mod run;

use crate::{cli::globals::GlobalArgs, error::Error};
use anyhow::{anyhow, Context, Result};
use secrecy::{zeroize::Zeroize, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use std::io::{BufRead, Read, Write};
use uuid::Uuid;

/// An account-scoped action.
#[derive(Debug)]
pub struct Target {
    pub globals: GlobalArgs,
    pub id: Uuid,
}

#[derive(Debug)]
pub enum Action {
    Hash(GlobalArgs),
    Schema(GlobalArgs),
    Create { globals: GlobalArgs, email: String },
    Verify(Target),
    Status(Target),
    Update(Target),
}

impl Action {
    /// Execute the action against stdin/stdout.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Read one line of secret input, without its line terminator.
pub(crate) fn read_secret<R: BufRead>(input: &mut R) -> Result<SecretString> {
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read secret")?;
    let secret = SecretString::from(line.trim_end_matches(['\r', '\n']).to_string());
    line.zeroize();
    Ok(secret)
}

/// Parse a JSON document carrying secrets, wiping the raw buffer afterwards.
pub(crate) fn read_json<R: Read, T: DeserializeOwned>(input: &mut R) -> Result<T> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("failed to read request")?;
    let parsed = serde_json::from_str(&raw).context("invalid JSON request");
    raw.zeroize();
    parsed
}

pub(crate) fn write_json<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *output, value)?;
    writeln!(output)?;
    Ok(())
}

/// Print the outcome of a save; field errors are printed and turned into a failure.
pub(crate) fn report<W: Write, T: Serialize>(
    output: &mut W,
    result: Result<T, Error>,
) -> Result<()> {
    match result {
        Ok(value) => write_json(output, &value),
        Err(Error::Invalid(errors)) => {
            write_json(output, &json!({ "errors": &errors }))?;
            Err(anyhow!("validation failed: {errors}"))
        }
        Err(err) => Err(err.into()),
    }
}
