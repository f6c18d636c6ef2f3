//! Registry for converters.

use crate::converter::{Converter, ConverterDecl};
use indexmap::IndexMap;
use std::sync::Arc;

/// Registry of available converters.
///
/// Holds converter declarations together with their implementations and
/// answers which converter reads one format and writes another.
#[derive(Clone)]
pub struct Registry {
    /// Converter declarations indexed by ID.
    declarations: IndexMap<String, ConverterDecl>,
    /// Converter implementations indexed by ID.
    implementations: IndexMap<String, Arc<dyn Converter>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            declarations: IndexMap::new(),
            implementations: IndexMap::new(),
        }
    }

    /// Register a converter with its implementation.
    ///
    /// A converter registered under an existing ID replaces the old one.
    pub fn register(&mut self, converter: impl Converter + 'static) {
        let decl = converter.decl().clone();
        let id = decl.id.clone();
        self.declarations.insert(id.clone(), decl);
        self.implementations.insert(id, Arc::new(converter));
    }

    /// Get a converter implementation by ID.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Converter>> {
        self.implementations.get(id).cloned()
    }

    /// Iterate over all declarations in registration order.
    pub fn declarations(&self) -> impl Iterator<Item = &ConverterDecl> {
        self.declarations.values()
    }

    /// Find the first converter that reads `from` and writes `to`.
    pub fn find(&self, from: &str, to: &str) -> Option<Arc<dyn Converter>> {
        self.declarations
            .values()
            .find(|decl| decl.handles(from, to))
            .and_then(|decl| self.get(&decl.id))
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
