use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use tracing::info;

/// Apply the accounts schema to the configured database.
/// # Errors
/// Returns an error if the connection or a schema statement fails.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    globals.store().await?.apply_schema().await?;
    info!("schema applied");
    Ok(())
}
