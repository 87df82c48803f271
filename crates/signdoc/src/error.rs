//! Error types for the signing handler.

use signdoc_aminojson::{CanonicalError, EncodeError, SignDocError};
use signdoc_core::{DecodeError, SchemaError};
use thiserror::Error;

/// Errors that can occur while producing sign bytes.
#[derive(Debug, Error)]
pub enum Error {
    /// The body bytes failed wire validation.
    #[error("invalid transaction body: {0}")]
    Decode(#[from] DecodeError),

    /// The transaction cannot be signed by this signer.
    #[error("cannot build sign doc: {0}")]
    SignDoc(#[from] SignDocError),

    /// A message could not be rendered as amino JSON.
    #[error("amino JSON encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("canonicalization failed: {0}")]
    Canonical(#[from] CanonicalError),

    /// A descriptor was rejected while building the registry.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl Error {
    /// Whether the body was rejected for carrying an unknown field.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Error::Decode(e) if e.is_unknown_field())
    }
}

/// Result type for signing operations.
pub type Result<T> = std::result::Result<T, Error>;
