//! # signdoc
//!
//! The unified API for producing legacy amino JSON sign bytes from protobuf
//! transactions.
//!
//! ## Overview
//!
//! Signing a transaction in legacy mode takes four steps, all performed by
//! [`SignModeHandler::get_sign_bytes`]:
//!
//! - **Validate**: the raw body bytes must contain no field the schema does
//!   not know, including inside nested envelopes
//! - **Build**: the body, auth info, and signer data become a [`SignDoc`]
//! - **Encode**: the document is rendered as amino JSON
//! - **Sort**: the JSON is re-emitted with sorted keys
//!
//! ## Usage
//!
//! ```rust,no_run
//! use signdoc::aminojson::{tx_registry, AuthInfo, SignerData, TxBody, TxData};
//! use signdoc::SignModeHandler;
//!
//! fn example() -> signdoc::Result<Vec<u8>> {
//!     let handler = SignModeHandler::new(tx_registry()?);
//!     let tx = TxData::new(TxBody::default(), AuthInfo::default());
//!     let signer = SignerData {
//!         chain_id: "test-1".into(),
//!         address: "cosmos1...".into(),
//!         ..Default::default()
//!     };
//!     handler.get_sign_bytes(&signer, &tx)
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `signdoc::core` - Wire scanner, descriptors, registry, and validator
//! - `signdoc::aminojson` - Tx data, sign doc builder, encoder, canonicalizer

pub mod config;
pub mod error;
pub mod handler;

// Re-export component crates
pub use signdoc_aminojson as aminojson;
pub use signdoc_core as core;

pub use config::HandlerConfig;
pub use error::{Error, Result};
pub use handler::{build_sign_bytes, SignMode, SignModeHandler};

// Re-export commonly used types
pub use signdoc_aminojson::{AuthInfo, Coin, Fee, SignDoc, SignerData, Tip, TxBody, TxData};
pub use signdoc_core::{
    validate_allow_non_critical, validate_no_unknown_fields, Any, DecodeError, FieldDescriptor,
    Kind, MessageDescriptor, Registry, Resolver, SchemaError, UnknownFieldValidator, Validation,
    ValidatorOptions,
};
