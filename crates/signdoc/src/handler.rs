//! The legacy amino JSON sign-mode handler.
//!
//! The handler ties the pieces together: it checks the raw body bytes for
//! unknown fields, builds the sign document, renders it, and sorts it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use signdoc_aminojson::{sort_json, AminoJsonEncoder, SignDoc, SignerData, TxData, TX_BODY};
use signdoc_core::{DecodeError, Registry, Resolver, UnknownFieldValidator};

use crate::config::HandlerConfig;
use crate::error::Result;

/// Signing modes this crate can produce bytes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignMode {
    LegacyAminoJson,
}

impl SignMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SignMode::LegacyAminoJson => "SIGN_MODE_LEGACY_AMINO_JSON",
        }
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces legacy amino JSON sign bytes.
///
/// The resolver is shared and never mutated, so one handler can serve any
/// number of threads.
pub struct SignModeHandler<R: Resolver = Registry> {
    resolver: Arc<R>,
    config: HandlerConfig,
}

impl<R: Resolver> SignModeHandler<R> {
    /// Create a handler with the default configuration.
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, HandlerConfig::default())
    }

    pub fn with_config(resolver: R, config: HandlerConfig) -> Self {
        Self::from_shared(Arc::new(resolver), config)
    }

    /// Create a handler over a resolver shared with other components.
    pub fn from_shared(resolver: Arc<R>, config: HandlerConfig) -> Self {
        Self { resolver, config }
    }

    pub fn mode(&self) -> SignMode {
        SignMode::LegacyAminoJson
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Check the raw body for unknown fields.
    ///
    /// Returns whether unknown non-critical fields were skipped, which only
    /// happens when the configuration allows them.
    pub fn validate_body(&self, body_bytes: &[u8]) -> Result<bool> {
        validate_body(self.resolver.as_ref(), &self.config, body_bytes)
    }

    /// Compute the bytes `signer` signs for `tx`.
    pub fn get_sign_bytes(&self, signer: &SignerData, tx: &TxData) -> Result<Vec<u8>> {
        sign_bytes(self.resolver.as_ref(), &self.config, signer, tx)
    }
}

impl<R: Resolver> Clone for SignModeHandler<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            config: self.config.clone(),
        }
    }
}

impl<R: Resolver> fmt::Debug for SignModeHandler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignModeHandler")
            .field("mode", &self.mode())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One-shot strict sign bytes with the default configuration.
pub fn build_sign_bytes<R: Resolver + ?Sized>(
    resolver: &R,
    tx: &TxData,
    signer: &SignerData,
) -> Result<Vec<u8>> {
    sign_bytes(resolver, &HandlerConfig::default(), signer, tx)
}

fn validate_body<R: Resolver + ?Sized>(resolver: &R, config: &HandlerConfig, body_bytes: &[u8]) -> Result<bool> {
    let descriptor = resolver
        .find_message(TX_BODY)
        .ok_or_else(|| DecodeError::UnresolvableType(TX_BODY.to_string()))?;
    let validator = UnknownFieldValidator::new(resolver, config.validator_options());
    let skipped = validator.validate(body_bytes, descriptor).into_result()?;
    if skipped {
        tracing::debug!("body carries unknown non-critical fields");
    }
    Ok(skipped)
}

fn sign_bytes<R: Resolver + ?Sized>(
    resolver: &R,
    config: &HandlerConfig,
    signer: &SignerData,
    tx: &TxData,
) -> Result<Vec<u8>> {
    tracing::debug!(
        chain_id = %signer.chain_id,
        account_number = signer.account_number,
        sequence = signer.sequence,
        "computing legacy amino JSON sign bytes"
    );

    let result = encode_sign_bytes(resolver, config, signer, tx);
    if let Err(e) = &result {
        tracing::warn!("Rejected transaction for signer {:?}: {}", signer.address, e);
    }
    result
}

fn encode_sign_bytes<R: Resolver + ?Sized>(
    resolver: &R,
    config: &HandlerConfig,
    signer: &SignerData,
    tx: &TxData,
) -> Result<Vec<u8>> {
    validate_body(resolver, config, &tx.body_bytes)?;

    let doc = SignDoc::build(&tx.body, &tx.auth_info, signer)?;
    let json = AminoJsonEncoder::new(resolver)
        .with_max_depth(config.max_recursion_depth)
        .encode(&doc)?;
    let bytes = sort_json(&json)?;

    tracing::debug!(len = bytes.len(), "sign bytes ready");
    Ok(bytes)
}
