use crate::{cli::actions::write_json, service::Credentials, store::AccountStore};
use anyhow::Result;
use serde_json::json;
use std::io::Write;
use uuid::Uuid;

/// Print whether account `id` has a usable secret.
/// # Errors
/// Returns an error if the account is unknown or cannot be loaded.
pub async fn execute<S: AccountStore, W: Write>(
    credentials: &Credentials<S>,
    id: Uuid,
    output: &mut W,
) -> Result<()> {
    let has_secret = credentials.has_stored_digest(id).await?;
    write_json(output, &json!({ "id": id, "has_secret": has_secret }))
}
