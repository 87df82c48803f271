//! Error types for legacy amino JSON signing.

use signdoc_core::DecodeError;
use thiserror::Error;

/// Precondition failures while assembling a sign document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignDocError {
    #[error("legacy amino JSON does not support protobuf extension options")]
    ExtensionOptions,

    #[error("got empty signer address in legacy amino JSON handler")]
    EmptySignerAddress,

    #[error("tipper cannot be empty")]
    EmptyTipper,

    #[error("fee cannot be absent when tipper is not signer")]
    MissingFee,
}

/// Failures while rendering a sign document as JSON.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("field {0} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("field {0} holds a non-finite float")]
    NonFiniteFloat(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while re-emitting JSON in canonical form.
#[derive(Debug, Error)]
pub enum CanonicalError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A coin string that is not `<amount><denom>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coin expression: {0:?}")]
pub struct ParseCoinError(pub String);
