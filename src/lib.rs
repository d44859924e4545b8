//! # Pasvorto (password credentials)
//!
//! `pasvorto` owns the password credential of an account record: creating a
//! secret, verifying it, and changing it through a guarded update that first
//! re-proves knowledge of the current secret.
//!
//! ## Storage
//!
//! Secrets are never stored in clear. The persisted value is an Argon2id PHC
//! string carrying its own salt and cost, so verification needs nothing but
//! the digest and the configured pepper (if any).
//!
//! ## Transient secrets
//!
//! Candidate secrets live on the entity only for the duration of a save
//! attempt. They are held as [`secrecy::SecretString`] and wiped at the end of
//! every attempt, successful or not, so re-rendering or logging an entity after
//! a failure never leaks secret material.
//!
//! ## Guarded updates
//!
//! [`service::Credentials::update_with_secret`] requires a valid current secret
//! for every call, including calls that only touch non-secret attributes. A
//! rejected or invalid attempt leaves the persisted record untouched.

pub mod account;
pub mod cli;
pub mod credential;
pub mod error;
pub mod service;
pub mod store;

pub use error::Error;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
