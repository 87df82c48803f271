//! Transaction data handed to the signer.
//!
//! The validator sees `body_bytes`; the sign-doc builder sees the parsed
//! `body` and `auth_info`. Both must describe the same transaction.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use signdoc_core::wire::{append_bytes_field, append_varint_field};
use signdoc_core::Any;

use crate::error::ParseCoinError;
use crate::schema::body_fields;

/// An amount of one denomination. The amount is a decimal integer string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = ParseCoinError;

    /// Parse `<amount><denom>`, e.g. `100stake`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoinError(s.to_string());
        let split = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(err)?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() || !is_valid_denom(denom) {
            return Err(err());
        }
        Ok(Coin::new(amount, denom))
    }
}

/// `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (3..=128).contains(&denom.len())
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
}

/// The fee a transaction declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
    pub payer: String,
    pub granter: String,
}

/// A tip paid by `tipper` to whoever relays the transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub amount: Vec<Coin>,
    pub tipper: String,
}

/// The parts of a transaction body that matter for signing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBody {
    /// Order is part of the signed content.
    pub messages: Vec<Any>,
    pub memo: String,
    pub timeout_height: u64,
    pub extension_options: Vec<Any>,
    pub non_critical_extension_options: Vec<Any>,
}

impl TxBody {
    /// Encode the body in field-number order, omitting default values.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for message in &self.messages {
            append_bytes_field(&mut buf, body_fields::MESSAGES, &message.to_bytes());
        }
        if !self.memo.is_empty() {
            append_bytes_field(&mut buf, body_fields::MEMO, self.memo.as_bytes());
        }
        if self.timeout_height != 0 {
            append_varint_field(&mut buf, body_fields::TIMEOUT_HEIGHT, self.timeout_height);
        }
        for option in &self.extension_options {
            append_bytes_field(&mut buf, body_fields::EXTENSION_OPTIONS, &option.to_bytes());
        }
        for option in &self.non_critical_extension_options {
            append_bytes_field(
                &mut buf,
                body_fields::NON_CRITICAL_EXTENSION_OPTIONS,
                &option.to_bytes(),
            );
        }
        buf
    }

    pub fn has_extension_options(&self) -> bool {
        !self.extension_options.is_empty() || !self.non_critical_extension_options.is_empty()
    }
}

/// Fee and tip information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub fee: Option<Fee>,
    pub tip: Option<Tip>,
}

/// Per-signer context, passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerData {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub address: String,
}

/// A transaction as the signer sees it: raw body bytes plus parsed parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxData {
    pub body_bytes: Bytes,
    pub body: TxBody,
    pub auth_info: AuthInfo,
}

impl TxData {
    /// Build tx data whose body bytes are the encoding of `body`.
    pub fn new(body: TxBody, auth_info: AuthInfo) -> Self {
        Self {
            body_bytes: Bytes::from(body.to_bytes()),
            body,
            auth_info,
        }
    }

    /// Pair parsed parts with body bytes received from elsewhere.
    pub fn with_body_bytes(body_bytes: impl Into<Bytes>, body: TxBody, auth_info: AuthInfo) -> Self {
        Self {
            body_bytes: body_bytes.into(),
            body,
            auth_info,
        }
    }
}
