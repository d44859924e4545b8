//! Password credential primitives: digests, entity state, validation and
//! field-level error reporting.

pub mod digest;
pub mod entity;
pub mod errors;
pub mod validation;

pub use digest::{DigestConfig, DigestEngine, DigestError};
pub use entity::{BeforeSave, Credential};
pub use errors::{CredentialError, Field, FieldErrors};
pub use validation::validate;
