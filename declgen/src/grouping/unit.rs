//! Emission keys and units.

use std::collections::HashSet;

use crate::model::Accessibility;

/// Identity of one generated declaration.
///
/// Keys order by namespace (global first), then accessibility, then name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmissionKey {
    /// Target namespace; `None` for the global namespace.
    pub namespace: Option<String>,
    /// Requested accessibility of the generated declaration.
    pub accessibility: Accessibility,
    /// Target declaration name.
    pub name: String,
}

impl EmissionKey {
    /// Namespace-qualified target name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Members that render into one generated declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmissionUnit<M> {
    /// Unit identity.
    pub key: EmissionKey,
    /// Effective accessibility: the key's tier capped by the least
    /// accessible member.
    pub accessibility: Accessibility,
    /// Members in declaration order.
    pub members: Vec<M>,
    /// Imports of all members, deduplicated in first-seen order.
    pub imports: Vec<String>,
}

/// Concatenate import lists, keeping the first occurrence of each import.
#[must_use]
pub fn merge_imports<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|import| seen.insert(*import))
        .cloned()
        .collect()
}
