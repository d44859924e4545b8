//! Presence and confirmation rules run before every save.

use super::{
    entity::Credential,
    errors::{CredentialError, FieldErrors},
};
use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;

/// Validate the transient fields of `credential`.
///
/// `new_record` marks the holder's first save, where a secret is mandatory.
/// On later saves an empty new secret means "leave the secret unchanged".
///
/// # Errors
/// Returns every failed rule, at most one per field.
pub fn validate(credential: &Credential, new_record: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    match credential.new_secret() {
        Some(secret) => {
            let confirmed = credential
                .secret_confirmation()
                .is_some_and(|confirmation| {
                    bool::from(
                        secret
                            .expose_secret()
                            .as_bytes()
                            .ct_eq(confirmation.expose_secret().as_bytes()),
                    )
                });
            if !confirmed {
                errors.add(CredentialError::ConfirmationMismatch);
            }
        }
        None if new_record => errors.add(CredentialError::MissingInitialSecret),
        None => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
