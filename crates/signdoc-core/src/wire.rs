//! Wire scanner for the protobuf binary encoding.
//!
//! This module partitions a byte buffer into `(tag, value)` pairs without
//! interpreting any value. It knows how wide each wire type is and nothing
//! else; schema checks live in [`crate::unknown`].
//!
//! Group encoding (wire types 3 and 4) is recognized in tags, but group
//! values are never consumed here. Callers that meet one get
//! [`WireError::UnsupportedGroup`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Largest field number the encoding allows.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// A varint never occupies more than this many bytes.
pub const MAX_VARINT_LEN: usize = 10;

/// Field numbers with this bit set are non-critical.
///
/// This is a protocol-wide convention fixed at bit 11. Moving it changes
/// which already-deployed fields are treated as safe to ignore.
pub const NON_CRITICAL_BIT: u32 = 1 << 10;

/// Returns true if an unknown field with this number may be ignored.
pub const fn is_non_critical(number: u32) -> bool {
    number & NON_CRITICAL_BIT != 0
}

/// The six wire types of the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    Bytes = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Try to parse from the low three bits of a tag.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::Bytes),
            3 => Some(Self::StartGroup),
            4 => Some(Self::EndGroup),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Varint => "varint",
            Self::Fixed64 => "fixed64",
            Self::Bytes => "bytes",
            Self::StartGroup => "start_group",
            Self::EndGroup => "end_group",
            Self::Fixed32 => "fixed32",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub const fn new(number: u32, wire_type: WireType) -> Self {
        Self { number, wire_type }
    }

    pub const fn is_non_critical(&self) -> bool {
        is_non_critical(self.number)
    }
}

/// Decode a varint, returning the value and the bytes it occupied.
pub fn consume_varint(buf: &[u8]) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().enumerate().take(MAX_VARINT_LEN) {
        // The tenth byte may only contribute the top bit.
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(WireError::VarintOverflow);
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            return Ok((value, i + 1));
        }
    }
    Err(WireError::Truncated)
}

/// Decode a field header.
pub fn consume_tag(buf: &[u8]) -> Result<(Tag, usize), WireError> {
    let (raw, len) = consume_varint(buf)?;
    let number = raw >> 3;
    if number == 0 || number > u64::from(MAX_FIELD_NUMBER) {
        return Err(WireError::InvalidFieldNumber(number));
    }
    let wire = (raw & 0x7) as u8;
    let wire_type = WireType::from_u8(wire).ok_or(WireError::InvalidWireType(wire))?;
    Ok((Tag::new(number as u32, wire_type), len))
}

/// Strip a length prefix, returning the payload and the total bytes consumed.
pub fn consume_bytes(buf: &[u8]) -> Result<(&[u8], usize), WireError> {
    let (len, prefix) = consume_varint(buf)?;
    let remaining = buf.len() - prefix;
    if len > remaining as u64 {
        return Err(WireError::LengthOverflow { len, remaining });
    }
    let end = prefix + len as usize;
    Ok((&buf[prefix..end], end))
}

/// Width in bytes of the value that starts at `buf` for the given wire type.
pub fn consume_field_value(number: u32, wire_type: WireType, buf: &[u8]) -> Result<usize, WireError> {
    match wire_type {
        WireType::Varint => consume_varint(buf).map(|(_, len)| len),
        WireType::Fixed32 => fixed_width(buf, 4),
        WireType::Fixed64 => fixed_width(buf, 8),
        WireType::Bytes => consume_bytes(buf).map(|(_, len)| len),
        WireType::StartGroup | WireType::EndGroup => Err(WireError::UnsupportedGroup(number)),
    }
}

/// Split a packed list into raw elements of `element` wire type.
///
/// `value` still carries its length prefix. The payload must hold whole
/// elements only.
pub fn packed_elements(
    number: u32,
    element: WireType,
    value: &[u8],
) -> Result<Vec<&[u8]>, WireError> {
    let (mut payload, _) = consume_bytes(value)?;
    let mut elements = Vec::new();
    while !payload.is_empty() {
        let len = consume_field_value(number, element, payload)?;
        elements.push(&payload[..len]);
        payload = &payload[len..];
    }
    Ok(elements)
}

fn fixed_width(buf: &[u8], width: usize) -> Result<usize, WireError> {
    if buf.len() < width {
        Err(WireError::Truncated)
    } else {
        Ok(width)
    }
}

/// One field occurrence: its tag and the raw value bytes.
///
/// For [`WireType::Bytes`] the value still carries its length prefix; use
/// [`consume_bytes`] to reach the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub tag: Tag,
    pub value: &'a [u8],
}

/// A cursor over a buffer of encoded fields.
///
/// As an iterator it yields one [`Field`] per occurrence and stops after
/// the first error.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read the next header and advance past it.
    pub fn read_tag(&mut self) -> Result<(Tag, usize), WireError> {
        let (tag, len) = consume_tag(&self.buf[self.pos..])?;
        self.pos += len;
        Ok((tag, len))
    }

    /// Read the raw value for a header just returned by [`Self::read_tag`].
    pub fn read_value(&mut self, tag: Tag) -> Result<&'a [u8], WireError> {
        let rest = &self.buf[self.pos..];
        let len = consume_field_value(tag.number, tag.wire_type, rest)?;
        self.pos += len;
        Ok(&rest[..len])
    }

    fn read_field(&mut self) -> Result<Field<'a>, WireError> {
        let (tag, _) = self.read_tag()?;
        let value = self.read_value(tag)?;
        Ok(Field { tag, value })
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Field<'a>, WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }
        let result = self.read_field();
        if result.is_err() {
            self.pos = self.buf.len();
        }
        Some(result)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Append a varint.
pub fn append_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Append a field header.
pub fn append_tag(buf: &mut Vec<u8>, number: u32, wire_type: WireType) {
    append_varint(buf, (u64::from(number) << 3) | u64::from(wire_type.to_u8()));
}

pub fn append_varint_field(buf: &mut Vec<u8>, number: u32, value: u64) {
    append_tag(buf, number, WireType::Varint);
    append_varint(buf, value);
}

pub fn append_bytes_field(buf: &mut Vec<u8>, number: u32, value: &[u8]) {
    append_tag(buf, number, WireType::Bytes);
    append_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

pub fn append_fixed32_field(buf: &mut Vec<u8>, number: u32, value: u32) {
    append_tag(buf, number, WireType::Fixed32);
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn append_fixed64_field(buf: &mut Vec<u8>, number: u32, value: u64) {
    append_tag(buf, number, WireType::Fixed64);
    buf.extend_from_slice(&value.to_le_bytes());
}
