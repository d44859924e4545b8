use crate::{
    account::UpdateWithSecret,
    cli::actions::{read_json, report},
    service::Credentials,
    store::AccountStore,
};
use anyhow::Result;
use std::io::{Read, Write};
use uuid::Uuid;

/// Run a guarded update on account `id` with the request read from `input`.
/// # Errors
/// Returns an error if the request is malformed, the update is rejected or the store fails.
pub async fn execute<S: AccountStore, R: Read, W: Write>(
    credentials: &Credentials<S>,
    id: Uuid,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let request: UpdateWithSecret = read_json(input)?;
    let result = credentials.update_with_secret(id, request).await;
    report(output, result.map(|account| account.view()))
}
