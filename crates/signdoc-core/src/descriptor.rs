//! Structural message descriptors.
//!
//! A [`MessageDescriptor`] is the schema the validator checks a buffer
//! against: which field numbers exist, what kind each one is, and which
//! message type a nested field carries. Nested types are referenced by
//! fully-qualified name and looked up through a [`crate::Resolver`], so
//! self-referential schemas need no special handling.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::wire::{WireType, MAX_FIELD_NUMBER};

/// The declared kind of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Enum,
    Int32,
    Sint32,
    Uint32,
    Int64,
    Sint64,
    Uint64,
    Sfixed32,
    Fixed32,
    Float,
    Sfixed64,
    Fixed64,
    Double,
    String,
    Bytes,
    /// A nested message, by fully-qualified type name.
    Message(String),
    /// A nested group, by fully-qualified type name.
    Group(String),
}

impl Kind {
    pub fn message(full_name: impl Into<String>) -> Self {
        Self::Message(full_name.into())
    }

    /// The nested type name for message and group kinds.
    pub fn message_type(&self) -> Option<&str> {
        match self {
            Self::Message(name) | Self::Group(name) => Some(name),
            _ => None,
        }
    }

    /// Whether a value of this kind may be encoded with `wire_type`.
    pub fn accepts(&self, wire_type: WireType) -> bool {
        match self {
            Self::Int32
            | Self::Int64
            | Self::Sint32
            | Self::Sint64
            | Self::Uint32
            | Self::Uint64
            | Self::Bool
            | Self::Enum => wire_type == WireType::Varint,
            Self::Fixed64 | Self::Sfixed64 | Self::Double => wire_type == WireType::Fixed64,
            Self::String | Self::Bytes | Self::Message(_) | Self::Group(_) => {
                wire_type == WireType::Bytes
            }
            Self::Fixed32 | Self::Sfixed32 | Self::Float => wire_type == WireType::Fixed32,
        }
    }

    /// Scalar numeric kinds, which repeated fields may pack.
    pub fn is_packable(&self) -> bool {
        self.packed_wire_type().is_some()
    }

    /// Wire type of one element inside a packed list.
    pub fn packed_wire_type(&self) -> Option<WireType> {
        match self {
            Self::String | Self::Bytes | Self::Message(_) | Self::Group(_) => None,
            Self::Fixed32 | Self::Sfixed32 | Self::Float => Some(WireType::Fixed32),
            Self::Fixed64 | Self::Sfixed64 | Self::Double => Some(WireType::Fixed64),
            _ => Some(WireType::Varint),
        }
    }
}

/// Whether a field holds one value or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    Optional,
    Repeated,
}

/// A single field of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub number: u32,
    pub name: String,
    pub kind: Kind,
    pub cardinality: Cardinality,
    /// Render the field in legacy JSON even when it holds the default value.
    pub dont_omit_empty: bool,
}

impl FieldDescriptor {
    pub fn new(number: u32, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            number,
            name: name.into(),
            kind,
            cardinality: Cardinality::Optional,
            dont_omit_empty: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn dont_omit_empty(mut self) -> Self {
        self.dont_omit_empty = true;
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    /// Wire compatibility, including packed encoding for repeated scalars.
    pub fn accepts(&self, wire_type: WireType) -> bool {
        self.kind.accepts(wire_type) || self.packed_element(wire_type).is_some()
    }

    /// Element wire type when an occurrence with `wire_type` is a packed list.
    pub fn packed_element(&self, wire_type: WireType) -> Option<WireType> {
        if self.is_repeated() && wire_type == WireType::Bytes {
            self.kind.packed_wire_type()
        } else {
            None
        }
    }
}

/// The schema of one message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    full_name: String,
    amino_name: Option<String>,
    fields: Vec<FieldDescriptor>,
    by_number: HashMap<u32, usize>,
}

impl MessageDescriptor {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            amino_name: None,
            fields: Vec::new(),
            by_number: HashMap::new(),
        }
    }

    /// Set the legacy name used when this type sits inside an envelope.
    pub fn with_amino_name(mut self, name: impl Into<String>) -> Self {
        self.amino_name = Some(name.into());
        self
    }

    /// Append a field. Declaration order is kept for encoding.
    ///
    /// A repeated number keeps the first declaration for lookups;
    /// [`Self::check`] reports it.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.by_number.entry(field.number).or_insert(self.fields.len());
        self.fields.push(field);
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn amino_name(&self) -> Option<&str> {
        self.amino_name.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&i| &self.fields[i])
    }

    /// Position of a field in declaration order.
    pub fn field_index(&self, number: u32) -> Option<usize> {
        self.by_number.get(&number).copied()
    }

    /// Structural sanity checks, run on registration.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut names = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(SchemaError::FieldNumberOutOfRange {
                    type_name: self.full_name.clone(),
                    number: field.number,
                });
            }
            if self.by_number.get(&field.number) != Some(&i) {
                return Err(SchemaError::DuplicateFieldNumber {
                    type_name: self.full_name.clone(),
                    number: field.number,
                });
            }
            if names.insert(field.name.as_str(), i).is_some() {
                return Err(SchemaError::DuplicateFieldName {
                    type_name: self.full_name.clone(),
                    name: field.name.clone(),
                });
            }
            if matches!(field.kind.message_type(), Some(name) if name.is_empty()) {
                return Err(SchemaError::MissingMessageType {
                    type_name: self.full_name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}
