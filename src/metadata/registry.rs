//! In-memory metadata registry.
//!
//! [`MetadataRegistry`] is a [`MetadataScanner`] backed by a plain map:
//! hosts declare every class and its markers up front through a small
//! fluent API, and the graph scans the result. There is no runtime
//! reflection anywhere; what you register is exactly what the graph sees.
//!
//! # Examples
//!
//! ```rust
//! use lifewire::metadata::MetadataRegistry;
//! use lifewire::core::ClassToken;
//! use lifewire::State;
//!
//! let server = ClassToken::named("app.Server");
//! let database = ClassToken::named("app.Database");
//!
//! let mut registry = MetadataRegistry::new();
//! registry
//!     .class(database.clone())
//!     .execute_before("connect", State::Initialized, vec![]);
//! registry
//!     .class(server.clone())
//!     .inject_field("db", database.clone(), State::Resolved)
//!     .execute("serve", vec![]);
//!
//! use lifewire::metadata::MetadataScanner;
//! assert!(registry.knows(&server));
//! assert_eq!(registry.fields(&server).len(), 1);
//! ```

use std::collections::HashMap;

use crate::core::ClassToken;
use crate::metadata::{FieldDescriptor, MetadataScanner, MethodDescriptor, ParameterDescriptor};
use crate::state::State;

#[derive(Debug, Clone, Default)]
struct ClassMetadata {
    fields: Vec<FieldDescriptor>,
    methods: Vec<MethodDescriptor>,
}

/// Map-backed scanner for explicitly declared wiring metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    classes: HashMap<ClassToken, ClassMetadata>,
}

impl MetadataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class (idempotent) and return a handle for attaching
    /// fields and methods to it.
    pub fn class(&mut self, class: ClassToken) -> ClassEntry<'_> {
        let metadata = self.classes.entry(class).or_default();
        ClassEntry {
            metadata,
        }
    }

    /// Number of declared classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl MetadataScanner for MetadataRegistry {
    fn knows(&self, class: &ClassToken) -> bool {
        self.classes.contains_key(class)
    }

    fn fields(&self, class: &ClassToken) -> Vec<FieldDescriptor> {
        self.classes.get(class).map(|m| m.fields.clone()).unwrap_or_default()
    }

    fn methods(&self, class: &ClassToken) -> Vec<MethodDescriptor> {
        self.classes.get(class).map(|m| m.methods.clone()).unwrap_or_default()
    }
}

/// Fluent handle for one class's metadata.
#[derive(Debug)]
pub struct ClassEntry<'a> {
    metadata: &'a mut ClassMetadata,
}

impl ClassEntry<'_> {
    /// Add a field carrying an inject marker with the given required state.
    pub fn inject_field(
        self,
        name: impl Into<String>,
        declared_type: ClassToken,
        state: State,
    ) -> Self {
        self.metadata.fields.push(FieldDescriptor::injected(name, declared_type, state));
        self
    }

    /// Add a field carrying an inject marker with the default required
    /// state ([`State::INJECT_DEFAULT`]).
    pub fn require_field(self, name: impl Into<String>, declared_type: ClassToken) -> Self {
        self.inject_field(name, declared_type, State::INJECT_DEFAULT)
    }

    /// Add a field without any marker.
    pub fn plain_field(self, name: impl Into<String>, declared_type: ClassToken) -> Self {
        self.metadata.fields.push(FieldDescriptor::plain(name, declared_type));
        self
    }

    /// Add a method marked to run at the default start state.
    pub fn execute(self, name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        self.metadata.methods.push(MethodDescriptor::execute(name, parameters));
        self
    }

    /// Add a method marked to run before the given state.
    pub fn execute_before(
        self,
        name: impl Into<String>,
        state: State,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        self.metadata.methods.push(MethodDescriptor::execute_before(name, state, parameters));
        self
    }

    /// Add a method without a lifecycle marker.
    pub fn plain_method(self, name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        self.metadata.methods.push(MethodDescriptor::plain(name, parameters));
        self
    }
}
