use crate::{cli::actions::read_secret, service::Credentials, store::AccountStore};
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use std::io::{BufRead, Write};
use uuid::Uuid;

/// Check the secret read from `input` against account `id`; prints `true` or `false`.
/// # Errors
/// Returns an error if the account is unknown or the secret does not match.
pub async fn execute<S: AccountStore, R: BufRead, W: Write>(
    credentials: &Credentials<S>,
    id: Uuid,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let secret = read_secret(input)?;
    let matches = credentials
        .matches_secret(id, secret.expose_secret())
        .await?;

    writeln!(output, "{matches}")?;
    if matches {
        Ok(())
    } else {
        Err(anyhow!("secret does not match"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::account::{Account, SecretPair};
    use crate::cli::actions::test_support::credentials;
    use std::io::Cursor;

    #[tokio::test]
    async fn prints_match_result() {
        let credentials = credentials();
        let mut account = Account::new("user@example.com");
        SecretPair::new("123456", "123456").assign(&mut account);
        credentials.create(&mut account).await.unwrap();

        let mut output = Vec::new();
        execute(
            &credentials,
            account.id(),
            &mut Cursor::new("123456\n"),
            &mut output,
        )
        .await
        .unwrap();
        assert_eq!(output, b"true\n");

        let mut output = Vec::new();
        let result = execute(
            &credentials,
            account.id(),
            &mut Cursor::new("654321\n"),
            &mut output,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(output, b"false\n");
    }

    #[tokio::test]
    async fn unknown_account_fails() {
        let mut output = Vec::new();
        let result = execute(
            &credentials(),
            Uuid::new_v4(),
            &mut Cursor::new("123456\n"),
            &mut output,
        )
        .await;
        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
