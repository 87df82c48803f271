//! # signdoc aminojson
//!
//! Legacy amino JSON sign documents.
//!
//! Producing sign bytes takes three steps:
//!
//! 1. [`SignDoc::build`] checks the transaction against the signer and
//!    assembles the fields a signature commits to.
//! 2. [`AminoJsonEncoder`] renders the document as JSON, decoding each
//!    message through its descriptor.
//! 3. [`sort_json`] re-emits the JSON with sorted keys, so the bytes do not
//!    depend on field declaration order.
//!
//! ## Key Types
//!
//! - [`TxData`] - Body bytes plus the parsed body and auth info
//! - [`SignerData`] - Chain id, account number, sequence, and address
//! - [`SignDoc`] - The immutable document a signer commits to
//! - [`AminoValue`] - Ordered JSON tree produced by the encoder

pub mod canonical;
pub mod encoder;
pub mod error;
pub mod schema;
pub mod sign_doc;
pub mod tx;

pub use canonical::{canonical_json_bytes, sort_json};
pub use encoder::{AminoJsonEncoder, AminoValue};
pub use error::{CanonicalError, EncodeError, ParseCoinError, SignDocError};
pub use schema::{coin_descriptor, register_tx_types, tx_body_descriptor, tx_registry, COIN, TX_BODY};
pub use sign_doc::{SignDoc, SignFee};
pub use tx::{AuthInfo, Coin, Fee, SignerData, Tip, TxBody, TxData};
