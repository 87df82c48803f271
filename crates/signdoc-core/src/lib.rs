//! # signdoc core
//!
//! Strict wire-format checks for signed transactions.
//!
//! This crate performs no I/O and keeps no state between calls. It operates
//! on byte buffers and on descriptors supplied by a [`Resolver`].
//!
//! ## Key Types
//!
//! - [`Scanner`] - Cursor that splits a buffer into `(tag, value)` pairs
//! - [`MessageDescriptor`] - Field numbers, kinds, and nested types of a message
//! - [`Registry`] - Read-only descriptor table implementing [`Resolver`]
//! - [`Validation`] - Outcome of an unknown-field walk
//!
//! ## Critical and non-critical fields
//!
//! A field number with bit 11 set (`number & 1024 != 0`) is non-critical: a
//! reader whose schema lacks it may skip it. Any other unknown field makes
//! the whole message invalid, including fields nested inside envelopes.

pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod unknown;
pub mod wire;

pub use descriptor::{Cardinality, FieldDescriptor, Kind, MessageDescriptor};
pub use envelope::{any_descriptor, Any, AnyRef, ANY_TYPE_NAME};
pub use error::{DecodeError, SchemaError, WireError};
pub use registry::{message_name_from_type_url, Registry, Resolver};
pub use unknown::{
    reject_unknown_fields, validate_allow_non_critical, validate_no_unknown_fields,
    UnknownFieldValidator, Validation, ValidatorOptions, DEFAULT_MAX_DEPTH,
};
pub use wire::{is_non_critical, Field, Scanner, Tag, WireType, NON_CRITICAL_BIT};
