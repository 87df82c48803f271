//! Descriptors for the transaction types this crate signs.

use signdoc_core::{FieldDescriptor, Kind, MessageDescriptor, Registry, SchemaError, ANY_TYPE_NAME};

pub const TX_BODY: &str = "cosmos.tx.v1beta1.TxBody";
pub const COIN: &str = "cosmos.base.v1beta1.Coin";

/// Field numbers of `TxBody`.
pub(crate) mod body_fields {
    pub const MESSAGES: u32 = 1;
    pub const MEMO: u32 = 2;
    pub const TIMEOUT_HEIGHT: u32 = 3;
    pub const EXTENSION_OPTIONS: u32 = 1023;
    // Carries the non-critical bit.
    pub const NON_CRITICAL_EXTENSION_OPTIONS: u32 = 2047;
}

pub fn tx_body_descriptor() -> MessageDescriptor {
    use self::body_fields::*;

    MessageDescriptor::new(TX_BODY)
        .with_field(FieldDescriptor::new(MESSAGES, "messages", Kind::message(ANY_TYPE_NAME)).repeated())
        .with_field(FieldDescriptor::new(MEMO, "memo", Kind::String))
        .with_field(FieldDescriptor::new(TIMEOUT_HEIGHT, "timeout_height", Kind::Uint64))
        .with_field(
            FieldDescriptor::new(EXTENSION_OPTIONS, "extension_options", Kind::message(ANY_TYPE_NAME))
                .repeated(),
        )
        .with_field(
            FieldDescriptor::new(
                NON_CRITICAL_EXTENSION_OPTIONS,
                "non_critical_extension_options",
                Kind::message(ANY_TYPE_NAME),
            )
            .repeated(),
        )
}

pub fn coin_descriptor() -> MessageDescriptor {
    MessageDescriptor::new(COIN)
        .with_field(FieldDescriptor::new(1, "denom", Kind::String))
        .with_field(FieldDescriptor::new(2, "amount", Kind::String))
}

/// Add the transaction types to `registry`.
pub fn register_tx_types(registry: &mut Registry) -> Result<(), SchemaError> {
    registry.register_all([tx_body_descriptor(), coin_descriptor()])
}

/// A fresh registry with the envelope and transaction types.
pub fn tx_registry() -> Result<Registry, SchemaError> {
    let mut registry = Registry::new();
    register_tx_types(&mut registry)?;
    Ok(registry)
}
