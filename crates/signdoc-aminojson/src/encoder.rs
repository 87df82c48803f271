//! Legacy amino JSON encoding of a [`SignDoc`].
//!
//! The encoder emits fields in the order the schema declares them, not
//! sorted. Sorting is a separate pass (see [`crate::canonical`]), so the
//! final bytes never depend on declaration order.
//!
//! Messages inside the document are decoded through their descriptors:
//! - field names come from the descriptor
//! - default scalars, empty lists, and absent messages are omitted unless the
//!   field is marked `dont_omit_empty`
//! - 64-bit integers become strings, 32-bit integers, enums, and floats
//!   become numbers, bytes become base64
//! - an envelope renders as `{"type": <amino name>, "value": {...}}`
//! - a singular message sent more than once is merged, as a protobuf
//!   decoder would merge it
//! - unknown fields are skipped

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;
use signdoc_core::wire::{consume_bytes, consume_varint, packed_elements};
use signdoc_core::{
    AnyRef, DecodeError, FieldDescriptor, Kind, MessageDescriptor, Resolver, Scanner, WireError,
    ANY_TYPE_NAME, DEFAULT_MAX_DEPTH,
};

use crate::error::EncodeError;
use crate::sign_doc::{SignDoc, SignFee};
use crate::tx::Coin;

/// JSON key names of the sign document.
mod keys {
    pub const ACCOUNT_NUMBER: &str = "account_number";
    pub const TIMEOUT_HEIGHT: &str = "timeout_height";
    pub const CHAIN_ID: &str = "chain_id";
    pub const SEQUENCE: &str = "sequence";
    pub const MEMO: &str = "memo";
    pub const MSGS: &str = "msgs";
    pub const FEE: &str = "fee";
    pub const AMOUNT: &str = "amount";
    pub const GAS: &str = "gas";
    pub const PAYER: &str = "payer";
    pub const GRANTER: &str = "granter";
    pub const DENOM: &str = "denom";
    pub const TYPE: &str = "type";
    pub const VALUE: &str = "value";
}

/// An ordered JSON tree. Object entries serialize in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum AminoValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<AminoValue>),
    Object(Vec<(String, AminoValue)>),
}

impl AminoValue {
    fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }
}

impl Serialize for AminoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AminoValue::Null => serializer.serialize_unit(),
            AminoValue::Bool(b) => serializer.serialize_bool(*b),
            AminoValue::Number(n) => n.serialize(serializer),
            AminoValue::String(s) => serializer.serialize_str(s),
            AminoValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            AminoValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

fn entry(key: &str, value: AminoValue) -> (String, AminoValue) {
    (key.to_string(), value)
}

/// A decoded scalar plus whether it equals the proto3 default.
struct Decoded {
    value: AminoValue,
    is_default: bool,
}

impl Decoded {
    fn new(value: AminoValue, is_default: bool) -> Self {
        Self { value, is_default }
    }

    fn int(n: i64) -> Self {
        Self::new(AminoValue::Number(n.into()), n == 0)
    }

    fn uint(n: u64) -> Self {
        Self::new(AminoValue::Number(n.into()), n == 0)
    }

    fn int_string(n: i64) -> Self {
        Self::new(AminoValue::String(n.to_string()), n == 0)
    }

    fn uint_string(n: u64) -> Self {
        Self::new(AminoValue::String(n.to_string()), n == 0)
    }
}

/// Renders sign documents, resolving message types through `resolver`.
#[derive(Debug)]
pub struct AminoJsonEncoder<'r, R: ?Sized> {
    resolver: &'r R,
    max_depth: usize,
}

impl<'r, R: Resolver + ?Sized> AminoJsonEncoder<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Serialize `doc` as schema-ordered JSON text.
    pub fn encode(&self, doc: &SignDoc) -> Result<Vec<u8>, EncodeError> {
        let value = self.sign_doc_value(doc)?;
        tracing::debug!(
            chain_id = doc.chain_id(),
            msgs = doc.msgs().len(),
            "encoded amino JSON sign doc"
        );
        Ok(serde_json::to_vec(&value)?)
    }

    pub fn sign_doc_value(&self, doc: &SignDoc) -> Result<AminoValue, EncodeError> {
        let msgs = doc
            .msgs()
            .iter()
            .map(|msg| {
                let any = AnyRef {
                    type_url: &msg.type_url,
                    value: &msg.value,
                };
                self.any_value(any, 1)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(7);
        entries.push(entry(
            keys::ACCOUNT_NUMBER,
            AminoValue::string(doc.account_number().to_string()),
        ));
        if doc.timeout_height() != 0 {
            entries.push(entry(
                keys::TIMEOUT_HEIGHT,
                AminoValue::string(doc.timeout_height().to_string()),
            ));
        }
        entries.push(entry(keys::CHAIN_ID, AminoValue::string(doc.chain_id())));
        entries.push(entry(keys::SEQUENCE, AminoValue::string(doc.sequence().to_string())));
        entries.push(entry(keys::MEMO, AminoValue::string(doc.memo())));
        entries.push(entry(keys::MSGS, AminoValue::Array(msgs)));
        entries.push(entry(keys::FEE, fee_value(doc.fee())));

        Ok(AminoValue::Object(entries))
    }

    /// Render an envelope as `{"type", "value"}`.
    pub fn any_value(&self, any: AnyRef<'_>, depth: usize) -> Result<AminoValue, EncodeError> {
        let descriptor = self
            .resolver
            .find_by_type_url(any.type_url)
            .ok_or_else(|| DecodeError::UnresolvableType(any.message_name().to_string()))?;
        let type_name = descriptor.amino_name().unwrap_or(any.type_url);
        let value = self.message_value(descriptor, any.value, depth)?;

        Ok(AminoValue::Object(vec![
            entry(keys::TYPE, AminoValue::string(type_name)),
            entry(keys::VALUE, value),
        ]))
    }

    /// Decode `bytes` as a `descriptor` message into an ordered object.
    pub fn message_value(
        &self,
        descriptor: &MessageDescriptor,
        bytes: &[u8],
        depth: usize,
    ) -> Result<AminoValue, EncodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::DepthExceeded(self.max_depth).into());
        }

        let fields = descriptor.fields();
        let mut slots: Vec<Vec<Decoded>> = fields.iter().map(|_| Vec::new()).collect();
        // Singular message payloads, concatenated across occurrences.
        let mut merged: Vec<Option<Vec<u8>>> = fields.iter().map(|_| None).collect();

        for occurrence in Scanner::new(bytes) {
            let occurrence = occurrence.map_err(DecodeError::from)?;
            let tag = occurrence.tag;
            let Some(index) = descriptor.field_index(tag.number) else {
                continue;
            };
            let field = &fields[index];

            if !field.accepts(tag.wire_type) {
                return Err(DecodeError::WireTypeMismatch {
                    field: format!("{}.{}", descriptor.full_name(), field.name),
                    wire_type: tag.wire_type,
                }
                .into());
            }

            if let Some(element) = field.packed_element(tag.wire_type) {
                let elements = packed_elements(field.number, element, occurrence.value)
                    .map_err(DecodeError::from)?;
                for raw in elements {
                    slots[index].push(self.decode(descriptor, field, raw, depth)?);
                }
            } else if !field.is_repeated() && field.kind.message_type().is_some() {
                merged[index]
                    .get_or_insert_with(Vec::new)
                    .extend_from_slice(payload(occurrence.value)?);
            } else {
                slots[index].push(self.decode(descriptor, field, occurrence.value, depth)?);
            }
        }

        for (index, payload) in merged.into_iter().enumerate() {
            let (Some(payload), Some(type_name)) = (payload, fields[index].kind.message_type())
            else {
                continue;
            };
            let value = self.nested_value(type_name, &payload, depth + 1)?;
            slots[index].push(Decoded::new(value, false));
        }

        let mut entries = Vec::new();
        for (field, values) in fields.iter().zip(slots) {
            if field.is_repeated() {
                if !values.is_empty() || field.dont_omit_empty {
                    let items = values.into_iter().map(|d| d.value).collect();
                    entries.push(entry(&field.name, AminoValue::Array(items)));
                }
                continue;
            }
            // Last occurrence wins for scalars; messages were merged above.
            match values.into_iter().last() {
                Some(d) if !d.is_default || field.dont_omit_empty => {
                    entries.push(entry(&field.name, d.value));
                }
                None if field.dont_omit_empty => {
                    entries.push(entry(&field.name, zero_value(&field.kind)));
                }
                _ => {}
            }
        }

        Ok(AminoValue::Object(entries))
    }

    fn decode(
        &self,
        owner: &MessageDescriptor,
        field: &FieldDescriptor,
        raw: &[u8],
        depth: usize,
    ) -> Result<Decoded, EncodeError> {
        let field_name = || format!("{}.{}", owner.full_name(), field.name);

        let decoded = match &field.kind {
            Kind::Bool => {
                let v = varint(raw)?;
                Decoded::new(AminoValue::Bool(v != 0), v == 0)
            }
            Kind::Enum | Kind::Int32 => Decoded::int(i64::from(varint(raw)? as i32)),
            Kind::Sint32 => {
                let n = varint(raw)? as u32;
                Decoded::int(i64::from(((n >> 1) as i32) ^ -((n & 1) as i32)))
            }
            Kind::Uint32 => Decoded::uint(u64::from(varint(raw)? as u32)),
            Kind::Int64 => Decoded::int_string(varint(raw)? as i64),
            Kind::Sint64 => {
                let n = varint(raw)?;
                Decoded::int_string(((n >> 1) as i64) ^ -((n & 1) as i64))
            }
            Kind::Uint64 => Decoded::uint_string(varint(raw)?),
            Kind::Fixed32 => Decoded::uint(u64::from(u32::from_le_bytes(fixed(raw)?))),
            Kind::Sfixed32 => Decoded::int(i64::from(i32::from_le_bytes(fixed(raw)?))),
            Kind::Fixed64 => Decoded::uint_string(u64::from_le_bytes(fixed(raw)?)),
            Kind::Sfixed64 => Decoded::int_string(i64::from_le_bytes(fixed(raw)?)),
            Kind::Float => float(f64::from(f32::from_le_bytes(fixed(raw)?)), field_name)?,
            Kind::Double => float(f64::from_le_bytes(fixed(raw)?), field_name)?,
            Kind::String => {
                let payload = payload(raw)?;
                let s = std::str::from_utf8(payload)
                    .map_err(|_| EncodeError::InvalidUtf8(field_name()))?;
                Decoded::new(AminoValue::string(s), s.is_empty())
            }
            Kind::Bytes => {
                let payload = payload(raw)?;
                Decoded::new(AminoValue::String(BASE64.encode(payload)), payload.is_empty())
            }
            Kind::Message(type_name) | Kind::Group(type_name) => {
                let payload = payload(raw)?;
                Decoded::new(self.nested_value(type_name, payload, depth + 1)?, false)
            }
        };
        Ok(decoded)
    }

    fn nested_value(&self, type_name: &str, payload: &[u8], depth: usize) -> Result<AminoValue, EncodeError> {
        if type_name == ANY_TYPE_NAME {
            return self.any_value(AnyRef::decode(payload)?, depth);
        }
        let descriptor = self
            .resolver
            .find_message(type_name)
            .ok_or_else(|| DecodeError::UnresolvableType(type_name.to_string()))?;
        self.message_value(descriptor, payload, depth)
    }
}

fn fee_value(fee: &SignFee) -> AminoValue {
    let mut entries = vec![
        entry(
            keys::AMOUNT,
            AminoValue::Array(fee.amount().iter().map(coin_value).collect()),
        ),
        entry(keys::GAS, AminoValue::string(fee.gas().to_string())),
    ];
    if !fee.payer().is_empty() {
        entries.push(entry(keys::PAYER, AminoValue::string(fee.payer())));
    }
    if !fee.granter().is_empty() {
        entries.push(entry(keys::GRANTER, AminoValue::string(fee.granter())));
    }
    AminoValue::Object(entries)
}

fn coin_value(coin: &Coin) -> AminoValue {
    AminoValue::Object(vec![
        entry(keys::DENOM, AminoValue::string(coin.denom.as_str())),
        entry(keys::AMOUNT, AminoValue::string(coin.amount.as_str())),
    ])
}

/// Value rendered for an absent `dont_omit_empty` field.
fn zero_value(kind: &Kind) -> AminoValue {
    match kind {
        Kind::Bool => AminoValue::Bool(false),
        Kind::Int64 | Kind::Sint64 | Kind::Uint64 | Kind::Fixed64 | Kind::Sfixed64 => {
            AminoValue::string("0")
        }
        Kind::String | Kind::Bytes => AminoValue::string(""),
        Kind::Message(_) | Kind::Group(_) => AminoValue::Null,
        _ => AminoValue::Number(0.into()),
    }
}

fn varint(raw: &[u8]) -> Result<u64, DecodeError> {
    Ok(consume_varint(raw)?.0)
}

fn fixed<const N: usize>(raw: &[u8]) -> Result<[u8; N], DecodeError> {
    raw.try_into()
        .map_err(|_| DecodeError::Malformed(WireError::Truncated))
}

fn payload(raw: &[u8]) -> Result<&[u8], DecodeError> {
    Ok(consume_bytes(raw)?.0)
}

fn float(value: f64, field_name: impl Fn() -> String) -> Result<Decoded, EncodeError> {
    let number = Number::from_f64(value).ok_or_else(|| EncodeError::NonFiniteFloat(field_name()))?;
    Ok(Decoded::new(AminoValue::Number(number), value == 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::{AuthInfo, Fee, SignerData, Tip, TxBody};
    use signdoc_core::wire::{
        append_bytes_field, append_fixed32_field, append_fixed64_field, append_varint,
        append_varint_field,
    };
    use signdoc_core::{Any, Registry};

    fn registry() -> Registry {
        let mut registry = crate::schema::tx_registry().unwrap();
        registry
            .register_all([
                MessageDescriptor::new("test.MsgSend")
                    .with_amino_name("test/MsgSend")
                    .with_field(FieldDescriptor::new(1, "from_address", Kind::String))
                    .with_field(FieldDescriptor::new(2, "to_address", Kind::String))
                    .with_field(
                        FieldDescriptor::new(3, "amount", Kind::message(crate::schema::COIN))
                            .repeated()
                            .dont_omit_empty(),
                    ),
                MessageDescriptor::new("test.Scalars")
                    .with_field(FieldDescriptor::new(1, "flag", Kind::Bool))
                    .with_field(FieldDescriptor::new(2, "small", Kind::Int32))
                    .with_field(FieldDescriptor::new(3, "big", Kind::Uint64))
                    .with_field(FieldDescriptor::new(4, "signed", Kind::Sint64))
                    .with_field(FieldDescriptor::new(5, "blob", Kind::Bytes))
                    .with_field(FieldDescriptor::new(6, "ratio", Kind::Fixed32))
                    .with_field(FieldDescriptor::new(7, "wide", Kind::Sfixed64))
                    .with_field(FieldDescriptor::new(8, "ids", Kind::Uint32).repeated())
                    .with_field(FieldDescriptor::new(9, "zero_kept", Kind::Uint64).dont_omit_empty())
                    .with_field(FieldDescriptor::new(10, "nested", Kind::message(ANY_TYPE_NAME))),
                MessageDescriptor::new("test.Holder")
                    .with_field(FieldDescriptor::new(1, "coin", Kind::message(crate::schema::COIN)))
                    .with_field(FieldDescriptor::new(2, "scalars", Kind::message("test.Scalars"))),
            ])
            .unwrap();
        registry
    }

    fn coin_bytes(denom: &str, amount: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 1, denom.as_bytes());
        append_bytes_field(&mut buf, 2, amount.as_bytes());
        buf
    }

    fn msg_send() -> Any {
        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 1, b"alice");
        append_bytes_field(&mut buf, 2, b"bob");
        append_bytes_field(&mut buf, 3, &coin_bytes("stake", "10"));
        Any::new("/test.MsgSend", buf)
    }

    fn doc(auth_info: AuthInfo, signer: &str, timeout_height: u64) -> SignDoc {
        let body = TxBody {
            messages: vec![msg_send()],
            memo: "hello".into(),
            timeout_height,
            ..Default::default()
        };
        let signer = SignerData {
            chain_id: "test-1".into(),
            account_number: 7,
            sequence: 3,
            address: signer.into(),
        };
        SignDoc::build(&body, &auth_info, &signer).unwrap()
    }

    fn declared_fee() -> AuthInfo {
        AuthInfo {
            fee: Some(Fee {
                amount: vec![Coin::new("100", "stake")],
                gas_limit: 200_000,
                ..Default::default()
            }),
            tip: None,
        }
    }

    fn render(value: &AminoValue) -> String {
        serde_json::to_string(value).unwrap()
    }

    #[test]
    fn test_sign_doc_in_schema_order() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);
        let bytes = encoder.encode(&doc(declared_fee(), "alice", 0)).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            concat!(
                r#"{"account_number":"7","chain_id":"test-1","sequence":"3","memo":"hello","#,
                r#""msgs":[{"type":"test/MsgSend","value":{"from_address":"alice","to_address":"bob","#,
                r#""amount":[{"denom":"stake","amount":"10"}]}}],"#,
                r#""fee":{"amount":[{"denom":"stake","amount":"100"}],"gas":"200000"}}"#
            )
        );
    }

    #[test]
    fn test_timeout_height_rendered_when_set() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);
        let text = render(&encoder.sign_doc_value(&doc(declared_fee(), "alice", 42)).unwrap());
        assert!(text.starts_with(r#"{"account_number":"7","timeout_height":"42","#));
    }

    #[test]
    fn test_tipper_fee_placeholder() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);
        let auth = AuthInfo {
            tip: Some(Tip {
                amount: vec![Coin::new("1", "stake")],
                tipper: "alice".into(),
            }),
            ..declared_fee()
        };
        let text = render(&encoder.sign_doc_value(&doc(auth, "alice", 0)).unwrap());
        assert!(text.ends_with(r#""fee":{"amount":[],"gas":"0"}}"#));
    }

    #[test]
    fn test_payer_and_granter_rendered_when_set() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);
        let auth = AuthInfo {
            fee: Some(Fee {
                amount: vec![],
                gas_limit: 1,
                payer: "payer1".into(),
                granter: "granter1".into(),
            }),
            tip: None,
        };
        let text = render(&encoder.sign_doc_value(&doc(auth, "alice", 0)).unwrap());
        assert!(text.ends_with(r#""fee":{"amount":[],"gas":"1","payer":"payer1","granter":"granter1"}}"#));
    }

    #[test]
    fn test_scalar_rendering() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut packed = Vec::new();
        append_varint(&mut packed, 1);
        append_varint(&mut packed, 2);

        let mut buf = Vec::new();
        append_varint_field(&mut buf, 1, 1);
        append_varint_field(&mut buf, 2, (-5i64) as u64);
        append_varint_field(&mut buf, 3, u64::MAX);
        append_varint_field(&mut buf, 4, 3); // zigzag(-2)
        append_bytes_field(&mut buf, 5, &[0xde, 0xad, 0xbe, 0xef]);
        append_fixed32_field(&mut buf, 6, 9);
        append_fixed64_field(&mut buf, 7, (-1i64) as u64);
        append_bytes_field(&mut buf, 8, &packed);
        append_varint_field(&mut buf, 8, 3);

        let any = AnyRef {
            type_url: "/test.Scalars",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert_eq!(
            text,
            concat!(
                r#"{"type":"/test.Scalars","value":{"flag":true,"small":-5,"#,
                r#""big":"18446744073709551615","signed":"-2","blob":"3q2+7w==","ratio":9,"#,
                r#""wide":"-1","ids":[1,2,3],"zero_kept":"0"}}"#
            )
        );
    }

    #[test]
    fn test_defaults_omitted() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut buf = Vec::new();
        append_varint_field(&mut buf, 1, 0);
        append_varint_field(&mut buf, 3, 0);
        append_bytes_field(&mut buf, 5, &[]);

        let any = AnyRef {
            type_url: "/test.Scalars",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert_eq!(text, r#"{"type":"/test.Scalars","value":{"zero_kept":"0"}}"#);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 1, b"first");
        append_bytes_field(&mut buf, 1, b"second");

        let any = AnyRef {
            type_url: "/test.MsgSend",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert_eq!(
            text,
            r#"{"type":"test/MsgSend","value":{"from_address":"second","amount":[]}}"#
        );
    }

    #[test]
    fn test_repeated_message_occurrences_merge() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut denom = Vec::new();
        append_bytes_field(&mut denom, 1, b"stake");
        let mut amount = Vec::new();
        append_bytes_field(&mut amount, 2, b"1000000");

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 1, &denom);
        append_bytes_field(&mut buf, 1, &amount);

        let any = AnyRef {
            type_url: "/test.Holder",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert_eq!(
            text,
            r#"{"type":"/test.Holder","value":{"coin":{"denom":"stake","amount":"1000000"}}}"#
        );
    }

    #[test]
    fn test_merged_message_keeps_last_scalar_and_appends_lists() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut first = Vec::new();
        append_varint_field(&mut first, 2, 1);
        append_varint_field(&mut first, 8, 1);
        let mut second = Vec::new();
        append_varint_field(&mut second, 2, 2);
        append_varint_field(&mut second, 8, 2);

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 2, &first);
        append_bytes_field(&mut buf, 2, &second);

        let any = AnyRef {
            type_url: "/test.Holder",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert_eq!(
            text,
            r#"{"type":"/test.Holder","value":{"scalars":{"small":2,"ids":[1,2],"zero_kept":"0"}}}"#
        );
    }

    #[test]
    fn test_truncated_packed_list_fails() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 8, &[0x96]);
        let any = AnyRef {
            type_url: "/test.Scalars",
            value: &buf,
        };
        assert!(matches!(
            encoder.any_value(any, 1),
            Err(EncodeError::Decode(DecodeError::Malformed(WireError::Truncated)))
        ));
    }

    #[test]
    fn test_nested_envelope() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 10, &msg_send().to_bytes());

        let any = AnyRef {
            type_url: "/test.Scalars",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert!(text.contains(r#""nested":{"type":"test/MsgSend","value":{"from_address":"alice""#));
    }

    #[test]
    fn test_unresolvable_message() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);
        let any = AnyRef {
            type_url: "/test.Missing",
            value: &[],
        };
        assert!(matches!(
            encoder.any_value(any, 1),
            Err(EncodeError::Decode(DecodeError::UnresolvableType(name))) if name == "test.Missing"
        ));
    }

    #[test]
    fn test_unknown_fields_not_rendered() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry);

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 1, b"alice");
        append_bytes_field(&mut buf, 1030, b"extra");

        let any = AnyRef {
            type_url: "/test.MsgSend",
            value: &buf,
        };
        let text = render(&encoder.any_value(any, 1).unwrap());
        assert!(!text.contains("extra"));
    }

    #[test]
    fn test_depth_limit() {
        let registry = registry();
        let encoder = AminoJsonEncoder::new(&registry).with_max_depth(1);

        let mut buf = Vec::new();
        append_bytes_field(&mut buf, 10, &msg_send().to_bytes());
        let any = AnyRef {
            type_url: "/test.Scalars",
            value: &buf,
        };
        assert!(matches!(
            encoder.any_value(any, 1),
            Err(EncodeError::Decode(DecodeError::DepthExceeded(1)))
        ));
    }
}
