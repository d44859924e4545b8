use crate::{
    account::{Account, SecretPair},
    cli::actions::{read_json, report},
    service::Credentials,
    store::AccountStore,
};
use anyhow::Result;
use std::io::{Read, Write};
use tracing::info;

/// Create an account for `email` with the secret pair read from `input`.
/// # Errors
/// Returns an error if the request is malformed, validation fails or the store fails.
pub async fn execute<S: AccountStore, R: Read, W: Write>(
    credentials: &Credentials<S>,
    email: String,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let secrets: SecretPair = read_json(input)?;

    let mut account = Account::new(email);
    secrets.assign(&mut account);

    let result = credentials.create(&mut account).await;
    if result.is_ok() {
        info!(account_id = %account.id(), "account created");
    }
    report(output, result.map(|()| account.view()))
}
