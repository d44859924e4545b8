//! End-to-end behaviour of credential creation, verification and guarded
//! updates against the in-memory store.

use pasvorto::{
    account::{Account, SecretPair, UpdateWithSecret},
    credential::{DigestConfig, DigestEngine, Field},
    service::Credentials,
    store::{AccountStore, MemoryStore},
    Error,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn credentials() -> Result<Credentials<MemoryStore>> {
    let digest = DigestEngine::new(
        DigestConfig::default()
            .with_memory_cost_kib(64)
            .with_iterations(1),
    )?;
    Ok(Credentials::new(MemoryStore::new(), digest))
}

fn new_user(secret: Option<&str>) -> Account {
    let mut account = Account::new("user@test.com");
    if let Some(secret) = secret {
        SecretPair::new(secret, secret).assign(&mut account);
    }
    account
}

async fn create_user(credentials: &Credentials<MemoryStore>) -> Result<Account> {
    let mut account = new_user(Some("123456"));
    credentials.create(&mut account).await?;
    Ok(account)
}

async fn reload(credentials: &Credentials<MemoryStore>, account: &Account) -> Result<Account> {
    credentials
        .store()
        .load(account.id())
        .await?
        .ok_or_else(|| "account vanished".into())
}

fn field_errors(err: &Error, field: Field) -> String {
    err.field_errors()
        .map(|errors| errors.get(field).join(" "))
        .unwrap_or_default()
}

#[tokio::test]
async fn creating_with_secret_stores_digest() -> Result<()> {
    let credentials = credentials()?;
    let account = create_user(&credentials).await?;

    let digest = account.credential().stored_digest();
    assert!(!digest.is_empty());
    assert_ne!(digest, "123456");
    assert!(!digest.contains("123456"));
    Ok(())
}

#[tokio::test]
async fn creating_without_secret_fails() -> Result<()> {
    let credentials = credentials()?;

    for mut account in [new_user(None), {
        let mut account = new_user(None);
        SecretPair::new("", "").assign(&mut account);
        account
    }] {
        let err = credentials.create(&mut account).await.err().ok_or("expected failure")?;

        assert_eq!(field_errors(&err, Field::Secret), "can't be blank");
        assert!(account.credential().stored_digest().is_empty());
        assert!(account.is_new_record());
        assert!(credentials.store().load(account.id()).await?.is_none());
    }
    Ok(())
}

#[tokio::test]
async fn changing_secret_rotates_digest() -> Result<()> {
    let credentials = credentials()?;
    let mut account = create_user(&credentials).await?;
    let old_digest = account.credential().stored_digest().to_string();

    SecretPair::new("new_password", "new_password").assign(&mut account);
    credentials.save(&mut account).await?;

    let account = reload(&credentials, &account).await?;
    assert_ne!(account.credential().stored_digest(), old_digest);
    assert!(account
        .credential()
        .matches_secret(credentials.digest(), "new_password"));
    assert!(!account
        .credential()
        .matches_secret(credentials.digest(), "123456"));
    Ok(())
}

#[tokio::test]
async fn verifies_only_the_correct_secret() -> Result<()> {
    let credentials = credentials()?;
    let account = create_user(&credentials).await?;

    assert!(credentials.matches_secret(account.id(), "123456").await?);
    assert!(!credentials.matches_secret(account.id(), "654321").await?);
    assert!(!credentials.matches_secret(account.id(), "").await?);
    assert!(credentials.has_stored_digest(account.id()).await?);
    Ok(())
}

#[tokio::test]
async fn updates_secret_with_valid_current_secret() -> Result<()> {
    let credentials = credentials()?;
    let account = create_user(&credentials).await?;

    let updated = credentials
        .update_with_secret(
            account.id(),
            UpdateWithSecret::new()
                .with_current_secret("123456")
                .with_secret("pass321", "pass321"),
        )
        .await?;

    assert!(!updated.credential().has_transient_secrets());
    assert!(credentials.matches_secret(account.id(), "pass321").await?);
    assert!(!credentials.matches_secret(account.id(), "123456").await?);
    Ok(())
}

#[tokio::test]
async fn invalid_current_secret_is_rejected() -> Result<()> {
    let credentials = credentials()?;
    let account = create_user(&credentials).await?;

    let err = credentials
        .update_with_secret(
            account.id(),
            UpdateWithSecret::new()
                .with_current_secret("other")
                .with_secret("pass321", "pass321"),
        )
        .await
        .err()
        .ok_or("expected rejection")?;

    assert!(field_errors(&err, Field::CurrentSecret).contains("is invalid"));
    assert!(credentials.matches_secret(account.id(), "123456").await?);
    Ok(())
}

#[tokio::test]
async fn missing_current_secret_is_rejected() -> Result<()> {
    let credentials = credentials()?;
    let account = create_user(&credentials).await?;

    let err = credentials
        .update_with_secret(
            account.id(),
            UpdateWithSecret::new().with_secret("pass321", "pass321"),
        )
        .await
        .err()
        .ok_or("expected rejection")?;

    assert!(field_errors(&err, Field::CurrentSecret).contains("can't be blank"));
    assert!(credentials.matches_secret(account.id(), "123456").await?);
    Ok(())
}

#[tokio::test]
async fn blank_secret_fields_are_ignored() -> Result<()> {
    let credentials = credentials()?;
    let account = create_user(&credentials).await?;
    let digest = account.credential().stored_digest().to_string();

    let updated = credentials
        .update_with_secret(
            account.id(),
            UpdateWithSecret::new()
                .with_current_secret("123456")
                .with_email("new@email.com"),
        )
        .await?;

    assert_eq!(updated.email(), "new@email.com");
    let reloaded = reload(&credentials, &account).await?;
    assert_eq!(reloaded.email(), "new@email.com");
    assert_eq!(reloaded.credential().stored_digest(), digest);
    assert!(credentials.matches_secret(account.id(), "123456").await?);
    Ok(())
}

#[tokio::test]
async fn mismatched_confirmation_rejects_whole_attempt() -> Result<()> {
    let credentials = credentials()?;
    let mut account = create_user(&credentials).await?;
    let digest = account.credential().stored_digest().to_string();

    let err = credentials
        .apply_update(
            &mut account,
            UpdateWithSecret::new()
                .with_current_secret("123456")
                .with_secret("pass321", "other")
                .with_email("new@email.com"),
        )
        .await
        .err()
        .ok_or("expected validation failure")?;

    assert_eq!(field_errors(&err, Field::SecretConfirmation), "doesn't match");
    assert!(field_errors(&err, Field::CurrentSecret).is_empty());

    assert_eq!(account.email(), "user@test.com");
    assert_eq!(account.credential().stored_digest(), digest);

    let reloaded = reload(&credentials, &account).await?;
    assert_eq!(reloaded.email(), "user@test.com");
    assert!(credentials.matches_secret(account.id(), "123456").await?);
    assert!(!credentials.matches_secret(account.id(), "pass321").await?);
    Ok(())
}

#[tokio::test]
async fn secret_fields_are_cleared_after_every_attempt() -> Result<()> {
    let credentials = credentials()?;
    let mut account = create_user(&credentials).await?;
    assert!(!account.credential().has_transient_secrets());

    let attempts = [
        UpdateWithSecret::new()
            .with_current_secret("123456")
            .with_secret("pass321", "other"),
        UpdateWithSecret::new()
            .with_current_secret("wrong")
            .with_secret("pass321", "pass321"),
        UpdateWithSecret::new().with_secret("pass321", "pass321"),
        UpdateWithSecret::new()
            .with_current_secret("123456")
            .with_secret("pass321", "pass321"),
    ];

    for attempt in attempts {
        let _ = credentials.apply_update(&mut account, attempt).await;

        let credential = account.credential();
        assert!(credential.new_secret().is_none());
        assert!(credential.secret_confirmation().is_none());
        assert!(credential.current_secret().is_none());
        assert!(!credential.has_transient_secrets());
    }

    assert!(credentials.matches_secret(account.id(), "pass321").await?);
    Ok(())
}

#[tokio::test]
async fn failed_save_clears_secret_fields() -> Result<()> {
    let credentials = credentials()?;
    let mut account = create_user(&credentials).await?;

    SecretPair::new("pass321", "other").assign(&mut account);
    assert!(credentials.save(&mut account).await.is_err());

    assert!(!account.credential().has_transient_secrets());
    assert!(account
        .credential()
        .matches_secret(credentials.digest(), "123456"));
    Ok(())
}
