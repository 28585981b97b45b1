//! Scriptable symbol model.

use std::collections::{HashMap, HashSet};

use declgen::host::{LanguageLevel, SymbolModel};
use declgen::model::DeclRef;
use parking_lot::Mutex;

/// In-memory [`SymbolModel`] for tests.
///
/// Type queries are recorded so tests can assert which host lookups a run
/// performed.
#[derive(Debug, Default)]
pub struct FakeHost {
    level: Option<LanguageLevel>,
    types: HashSet<String>,
    names: HashMap<u64, String>,
    queries: Mutex<Vec<String>>,
}

impl FakeHost {
    /// Host at the latest language level with no referenced types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language level.
    #[must_use]
    pub const fn with_level(mut self, major: u16, minor: u16) -> Self {
        self.level = Some(LanguageLevel::new(major, minor));
        self
    }

    /// Make `metadata_name` resolvable.
    #[must_use]
    pub fn with_type(mut self, metadata_name: &str) -> Self {
        self.types.insert(metadata_name.to_owned());
        self
    }

    /// Report `name` as the qualified name of declaration `id`.
    #[must_use]
    pub fn with_name(mut self, id: u64, name: &str) -> Self {
        self.names.insert(id, name.to_owned());
        self
    }

    /// Every `has_type` query made so far, in call order.
    #[must_use]
    pub fn type_queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

impl SymbolModel for FakeHost {
    fn language_level(&self) -> LanguageLevel {
        self.level.unwrap_or_default()
    }

    fn has_type(&self, metadata_name: &str) -> bool {
        self.queries.lock().push(metadata_name.to_owned());
        self.types.contains(metadata_name)
    }

    fn qualified_name(&self, reference: DeclRef) -> Option<String> {
        self.names.get(&reference.0).cloned()
    }
}
