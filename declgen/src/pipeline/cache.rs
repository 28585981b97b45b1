//! Memo of rendered units across generation runs.

use std::collections::HashMap;

use crate::GenResult;
use crate::render::{AsyncUnitRenderModel, UnionRenderModel};

/// Render model identifying one cached unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CacheKey {
    Union(UnionRenderModel),
    Async(AsyncUnitRenderModel),
}

#[derive(Clone, Debug)]
struct Entry {
    text: String,
    used: bool,
}

/// Counters describing the most recent completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Units whose text was reused.
    pub reused: usize,
    /// Units rendered afresh.
    pub rendered: usize,
    /// Entries dropped because the run no longer produced them.
    pub evicted: usize,
}

/// Caller-owned memo from render models to generated text.
///
/// A unit is re-rendered only when its render model differs structurally
/// from every model seen in the previous run. Entries the latest run did
/// not use are evicted when the run completes. Entries belong to the
/// templates that rendered them: a run with different templates starts
/// from an empty cache.
#[derive(Clone, Debug, Default)]
pub struct IncrementalCache {
    entries: HashMap<CacheKey, Entry>,
    templates: Option<u64>,
    current: CacheStats,
    stats: CacheStats,
}

impl IncrementalCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.templates = None;
    }

    /// Counters of the most recent completed run.
    ///
    /// A cancelled or failed run leaves the counters of the run before it.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Start a run rendering with the templates identified by `templates`.
    pub(crate) fn begin_run(&mut self, templates: u64) {
        if self.templates != Some(templates) {
            if !self.entries.is_empty() {
                tracing::debug!(
                    entries = self.entries.len(),
                    "templates changed; dropping cached units"
                );
            }
            self.entries.clear();
            self.templates = Some(templates);
        }
        for entry in self.entries.values_mut() {
            entry.used = false;
        }
        self.current = CacheStats::default();
    }

    pub(crate) fn get_or_render<F>(&mut self, key: CacheKey, render: F) -> GenResult<String>
    where
        F: FnOnce() -> GenResult<String>,
    {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.used = true;
            self.current.reused += 1;
            return Ok(entry.text.clone());
        }
        let text = render()?;
        self.current.rendered += 1;
        self.entries.insert(
            key,
            Entry {
                text: text.clone(),
                used: true,
            },
        );
        Ok(text)
    }

    pub(crate) fn finish_run(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.used);
        self.current.evicted = before - self.entries.len();
        self.stats = self.current;
    }
}
