//! Error types for signdoc core.

use thiserror::Error;

use crate::wire::WireType;

/// Low-level failures while partitioning a buffer into fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unexpected end of buffer")]
    Truncated,

    #[error("varint overflows 64 bits")]
    VarintOverflow,

    #[error("invalid field number: {0}")]
    InvalidFieldNumber(u64),

    #[error("invalid wire type: {0}")]
    InvalidWireType(u8),

    #[error("length prefix {len} exceeds remaining {remaining} bytes")]
    LengthOverflow { len: u64, remaining: usize },

    #[error("group encoding is not supported (field {0})")]
    UnsupportedGroup(u32),
}

/// Errors raised while walking a message against its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed encoding: {0}")]
    Malformed(#[from] WireError),

    #[error("could not consume field value for tag {number}, wire type {wire_type}: {source}")]
    FieldValue {
        number: u32,
        wire_type: WireType,
        source: WireError,
    },

    #[error("unknown field in {type_name}: {{TagNum: {number}, WireType: {wire_type}}}")]
    UnknownField {
        type_name: String,
        number: u32,
        wire_type: WireType,
    },

    #[error("invalid wire type {wire_type} for field {field}")]
    WireTypeMismatch { field: String, wire_type: WireType },

    #[error("unable to resolve type: {0}")]
    UnresolvableType(String),

    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("message nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),
}

impl DecodeError {
    /// True when the error reports a field absent from the schema.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, DecodeError::UnknownField { .. })
    }
}

/// Errors raised while registering descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("type already registered: {0}")]
    DuplicateType(String),

    #[error("duplicate field number {number} in {type_name}")]
    DuplicateFieldNumber { type_name: String, number: u32 },

    #[error("duplicate field name {name} in {type_name}")]
    DuplicateFieldName { type_name: String, name: String },

    #[error("field number {number} out of range in {type_name}")]
    FieldNumberOutOfRange { type_name: String, number: u32 },

    #[error("field {field} in {type_name} has an empty message type")]
    MissingMessageType { type_name: String, field: String },
}

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
