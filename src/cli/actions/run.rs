use crate::cli::actions::{create, hash, schema, status, update, verify, Action};
use anyhow::Result;
use std::io::{stdin, stdout};

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let mut input = stdin().lock();
    let mut output = stdout().lock();

    match action {
        Action::Hash(globals) => hash::execute(&globals, &mut input, &mut output),
        Action::Schema(globals) => schema::execute(&globals).await,
        Action::Create { globals, email } => {
            let credentials = globals.credentials().await?;
            create::execute(&credentials, email, &mut input, &mut output).await
        }
        Action::Verify(target) => {
            let credentials = target.globals.credentials().await?;
            verify::execute(&credentials, target.id, &mut input, &mut output).await
        }
        Action::Status(target) => {
            let credentials = target.globals.credentials().await?;
            status::execute(&credentials, target.id, &mut output).await
        }
        Action::Update(target) => {
            let credentials = target.globals.credentials().await?;
            update::execute(&credentials, target.id, &mut input, &mut output).await
        }
    }
}
