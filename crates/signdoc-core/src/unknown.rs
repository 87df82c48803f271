//! Unknown-field rejection.
//!
//! Walks an encoded message against its descriptor without decoding it and
//! rejects any field the schema does not declare. Field numbers with
//! [`NON_CRITICAL_BIT`](crate::wire::NON_CRITICAL_BIT) set may optionally be
//! tolerated; every other unknown field is fatal. Nested messages and
//! envelopes are checked with the same rules, recursively.
//!
//! The walk is a pure function: each call returns its own [`Validation`]
//! and parents OR the child flag into theirs.

use tracing::trace;

use crate::descriptor::MessageDescriptor;
use crate::envelope::{AnyRef, ANY_TYPE_NAME};
use crate::error::{DecodeError, Result};
use crate::registry::Resolver;
use crate::wire::{consume_bytes, packed_elements, Scanner};

/// Default cap on message nesting.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Knobs for a validation walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Tolerate unknown fields whose number has the non-critical bit set.
    pub allow_non_critical: bool,
    /// Deepest message nesting accepted before the walk gives up.
    pub max_depth: usize,
}

impl ValidatorOptions {
    pub fn strict() -> Self {
        Self {
            allow_non_critical: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn allow_non_critical() -> Self {
        Self {
            allow_non_critical: true,
            ..Self::strict()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Outcome of a walk.
///
/// The flag is reported even when `error` is set: a non-critical field may
/// have been seen before the walk failed.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub has_unknown_non_criticals: bool,
    pub error: Option<DecodeError>,
}

impl Validation {
    fn ok(has_unknown_non_criticals: bool) -> Self {
        Self {
            has_unknown_non_criticals,
            error: None,
        }
    }

    fn fail(has_unknown_non_criticals: bool, error: impl Into<DecodeError>) -> Self {
        Self {
            has_unknown_non_criticals,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the flag on failure.
    pub fn into_result(self) -> Result<bool> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.has_unknown_non_criticals),
        }
    }
}

/// A nested message to descend into, resolved once before recursion.
enum Nested<'d, 'a> {
    Known(&'d MessageDescriptor, &'a [u8]),
    Envelope(AnyRef<'a>),
}

/// Validates buffers against descriptors from one resolver.
#[derive(Debug)]
pub struct UnknownFieldValidator<'r, R: ?Sized> {
    resolver: &'r R,
    options: ValidatorOptions,
}

impl<'r, R: Resolver + ?Sized> UnknownFieldValidator<'r, R> {
    pub fn new(resolver: &'r R, options: ValidatorOptions) -> Self {
        Self { resolver, options }
    }

    /// Walk `bytes` as an encoded `descriptor` message.
    pub fn validate(&self, bytes: &[u8], descriptor: &MessageDescriptor) -> Validation {
        self.walk(bytes, descriptor, 0)
    }

    fn walk(&self, bytes: &[u8], descriptor: &MessageDescriptor, depth: usize) -> Validation {
        if depth > self.options.max_depth {
            return Validation::fail(false, DecodeError::DepthExceeded(self.options.max_depth));
        }

        let mut seen = false;
        let mut scanner = Scanner::new(bytes);

        while !scanner.is_empty() {
            let (tag, _) = match scanner.read_tag() {
                Ok(tag) => tag,
                Err(e) => return Validation::fail(seen, e),
            };

            let field = descriptor.field_by_number(tag.number);
            trace!(
                type_name = descriptor.full_name(),
                number = tag.number,
                wire_type = %tag.wire_type,
                known = field.is_some(),
                "scanned field"
            );

            if field.is_none() {
                let critical = !tag.is_non_critical();
                if !critical {
                    seen = true;
                }
                if critical || !self.options.allow_non_critical {
                    return Validation::fail(
                        seen,
                        DecodeError::UnknownField {
                            type_name: descriptor.full_name().to_string(),
                            number: tag.number,
                            wire_type: tag.wire_type,
                        },
                    );
                }
            }

            let value = match scanner.read_value(tag) {
                Ok(value) => value,
                Err(source) => {
                    return Validation::fail(
                        seen,
                        DecodeError::FieldValue {
                            number: tag.number,
                            wire_type: tag.wire_type,
                            source,
                        },
                    )
                }
            };

            // Tolerated non-critical field: never interpreted.
            let Some(field) = field else { continue };

            if !field.accepts(tag.wire_type) {
                return Validation::fail(
                    seen,
                    DecodeError::WireTypeMismatch {
                        field: format!("{}.{}", descriptor.full_name(), field.name),
                        wire_type: tag.wire_type,
                    },
                );
            }

            if let Some(element) = field.packed_element(tag.wire_type) {
                if let Err(source) = packed_elements(tag.number, element, value) {
                    return Validation::fail(
                        seen,
                        DecodeError::FieldValue {
                            number: tag.number,
                            wire_type: element,
                            source,
                        },
                    );
                }
                continue;
            }

            let Some(type_name) = field.kind.message_type() else {
                continue;
            };

            let payload = match consume_bytes(value) {
                Ok((payload, _)) => payload,
                Err(e) => return Validation::fail(seen, e),
            };

            let child = self.descend(type_name, payload, depth + 1);
            seen |= child.has_unknown_non_criticals;
            if let Some(err) = child.error {
                return Validation::fail(seen, err);
            }
        }

        Validation::ok(seen)
    }

    fn descend(&self, type_name: &str, payload: &[u8], depth: usize) -> Validation {
        let mut seen = false;

        let nested = if type_name == ANY_TYPE_NAME {
            // Typecheck the envelope's own fields before trusting them.
            let any_descriptor = match self.find(ANY_TYPE_NAME) {
                Ok(d) => d,
                Err(e) => return Validation::fail(false, e),
            };
            let frame = self.walk(payload, any_descriptor, depth);
            if frame.error.is_some() {
                return frame;
            }
            seen = frame.has_unknown_non_criticals;
            match AnyRef::decode(payload) {
                Ok(any) => Nested::Envelope(any),
                Err(e) => return Validation::fail(seen, e),
            }
        } else {
            match self.find(type_name) {
                Ok(d) => Nested::Known(d, payload),
                Err(e) => return Validation::fail(false, e),
            }
        };

        let (descriptor, bytes) = match nested {
            Nested::Known(descriptor, bytes) => (descriptor, bytes),
            Nested::Envelope(any) => match self.find(any.message_name()) {
                Ok(d) => (d, any.value),
                Err(e) => return Validation::fail(seen, e),
            },
        };

        let child = self.walk(bytes, descriptor, depth);
        Validation {
            has_unknown_non_criticals: seen || child.has_unknown_non_criticals,
            error: child.error,
        }
    }

    fn find(&self, full_name: &str) -> Result<&'r MessageDescriptor> {
        let resolver: &'r R = self.resolver;
        resolver
            .find_message(full_name)
            .ok_or_else(|| DecodeError::UnresolvableType(full_name.to_string()))
    }
}

/// Walk `bytes` with an explicit non-critical policy and the default depth.
pub fn reject_unknown_fields<R: Resolver + ?Sized>(
    bytes: &[u8],
    descriptor: &MessageDescriptor,
    allow_non_critical: bool,
    resolver: &R,
) -> Validation {
    let options = ValidatorOptions {
        allow_non_critical,
        ..ValidatorOptions::strict()
    };
    UnknownFieldValidator::new(resolver, options).validate(bytes, descriptor)
}

/// Strict check: any unknown field, critical or not, is an error.
pub fn validate_no_unknown_fields<R: Resolver + ?Sized>(
    bytes: &[u8],
    descriptor: &MessageDescriptor,
    resolver: &R,
) -> Result<()> {
    reject_unknown_fields(bytes, descriptor, false, resolver)
        .into_result()
        .map(|_| ())
}

/// Lenient check: unknown non-critical fields are tolerated and reported.
pub fn validate_allow_non_critical<R: Resolver + ?Sized>(
    bytes: &[u8],
    descriptor: &MessageDescriptor,
    resolver: &R,
) -> Validation {
    reject_unknown_fields(bytes, descriptor, true, resolver)
}
