//! Schema resolution.
//!
//! The [`Registry`] is built once, then shared read-only across every
//! validation and encoding call. Nothing mutates it after construction,
//! so it can sit behind an `Arc` and serve any number of threads.

use std::collections::HashMap;

use crate::descriptor::MessageDescriptor;
use crate::envelope::any_descriptor;
use crate::error::SchemaError;

/// Looks up message descriptors by fully-qualified name.
pub trait Resolver {
    fn find_message(&self, full_name: &str) -> Option<&MessageDescriptor>;

    /// Resolve the message a type URL points at.
    fn find_by_type_url(&self, type_url: &str) -> Option<&MessageDescriptor> {
        self.find_message(message_name_from_type_url(type_url))
    }
}

/// The fully-qualified name carried by a type URL: everything after the last `/`.
pub fn message_name_from_type_url(type_url: &str) -> &str {
    match type_url.rfind('/') {
        Some(i) => &type_url[i + 1..],
        None => type_url,
    }
}

/// An in-memory descriptor table.
#[derive(Debug, Clone)]
pub struct Registry {
    messages: HashMap<String, MessageDescriptor>,
}

impl Registry {
    /// A registry holding only `google.protobuf.Any`.
    pub fn new() -> Self {
        let any = any_descriptor();
        let mut messages = HashMap::new();
        messages.insert(any.full_name().to_string(), any);
        Self { messages }
    }

    /// Add a descriptor after checking its structure.
    pub fn register(&mut self, descriptor: MessageDescriptor) -> Result<(), SchemaError> {
        descriptor.check()?;
        if self.messages.contains_key(descriptor.full_name()) {
            return Err(SchemaError::DuplicateType(descriptor.full_name().to_string()));
        }
        self.messages
            .insert(descriptor.full_name().to_string(), descriptor);
        Ok(())
    }

    /// Register several descriptors, stopping at the first failure.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = MessageDescriptor>,
    ) -> Result<(), SchemaError> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(())
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.messages.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for Registry {
    fn find_message(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(full_name)
    }
}
