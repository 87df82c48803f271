//! The typed envelope (`google.protobuf.Any`).
//!
//! An envelope carries a type URL and the encoded bytes of a message of that
//! type. Validation must resolve the URL and recurse into the payload, so
//! unknown fields cannot hide inside one.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::descriptor::{FieldDescriptor, Kind, MessageDescriptor};
use crate::error::{DecodeError, Result};
use crate::registry::message_name_from_type_url;
use crate::wire::{append_bytes_field, consume_bytes, Scanner, WireType};

/// Fully-qualified name of the envelope type.
pub const ANY_TYPE_NAME: &str = "google.protobuf.Any";

mod fields {
    pub const TYPE_URL: u32 = 1;
    pub const VALUE: u32 = 2;
}

/// Descriptor for the envelope itself.
pub fn any_descriptor() -> MessageDescriptor {
    MessageDescriptor::new(ANY_TYPE_NAME)
        .with_field(FieldDescriptor::new(fields::TYPE_URL, "type_url", Kind::String))
        .with_field(FieldDescriptor::new(fields::VALUE, "value", Kind::Bytes))
}

/// An owned envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Any {
    pub type_url: String,
    pub value: Bytes,
}

impl Any {
    pub fn new(type_url: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            type_url: type_url.into(),
            value: value.into(),
        }
    }

    /// The fully-qualified message name from the type URL.
    pub fn message_name(&self) -> &str {
        message_name_from_type_url(&self.type_url)
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        AnyRef::decode(buf).map(|any| any.to_owned())
    }

    /// Append the encoded envelope. Empty fields are omitted.
    pub fn encode_to(&self, buf: &mut Vec<u8>) {
        if !self.type_url.is_empty() {
            append_bytes_field(buf, fields::TYPE_URL, self.type_url.as_bytes());
        }
        if !self.value.is_empty() {
            append_bytes_field(buf, fields::VALUE, &self.value);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf);
        buf
    }
}

/// A borrowed envelope view over an encoded buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyRef<'a> {
    pub type_url: &'a str,
    pub value: &'a [u8],
}

impl<'a> AnyRef<'a> {
    /// Extract `type_url` and `value`. The last occurrence of each wins;
    /// other fields are skipped.
    pub fn decode(buf: &'a [u8]) -> Result<Self> {
        let mut any = AnyRef::default();
        for field in Scanner::new(buf) {
            let field = field?;
            match field.tag.number {
                fields::TYPE_URL | fields::VALUE if field.tag.wire_type != WireType::Bytes => {
                    return Err(DecodeError::WireTypeMismatch {
                        field: format!("{ANY_TYPE_NAME}.{}", field.tag.number),
                        wire_type: field.tag.wire_type,
                    });
                }
                fields::TYPE_URL => {
                    let (raw, _) = consume_bytes(field.value)?;
                    any.type_url = std::str::from_utf8(raw).map_err(|_| {
                        DecodeError::InvalidEnvelope("type_url is not valid UTF-8".into())
                    })?;
                }
                fields::VALUE => {
                    any.value = consume_bytes(field.value)?.0;
                }
                _ => {}
            }
        }
        Ok(any)
    }

    pub fn message_name(&self) -> &'a str {
        message_name_from_type_url(self.type_url)
    }

    pub fn to_owned(self) -> Any {
        Any::new(self.type_url, Bytes::copy_from_slice(self.value))
    }
}
