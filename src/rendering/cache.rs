//! Memoized lookups for a single render pass

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::content::{Page, Redirect};
use crate::error::Result;

/// Everything resolved while rendering one request. Each kind of token has
/// its own table, so identifiers of different kinds never collide. Lookups
/// that found nothing are remembered too. Nothing here is ever invalidated:
/// create a fresh cache for each request and drop it afterwards.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    pub(crate) pages: HashMap<String, Option<Page>>,
    pub(crate) redirects: HashMap<String, Option<Redirect>>,
    pub(crate) langbars: HashMap<u64, Option<String>>,
    pub(crate) share_buttons: HashMap<u64, String>,
    stylesheets: Vec<String>,
}

impl ResolutionCache {
    pub fn new() -> ResolutionCache {
        ResolutionCache::default()
    }

    /// Markup that needs to go into the document head as a result of the
    /// tokens rendered so far.
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub(crate) fn include_stylesheet(&mut self, markup: String) {
        if !self
            .stylesheets
            .contains(&markup)
        {
            self.stylesheets
                .push(markup);
        }
    }

    pub(crate) fn has_stylesheets(&self) -> bool {
        !self
            .stylesheets
            .is_empty()
    }

    /// Forget everything, for a caller that keeps one cache around between
    /// requests.
    pub fn reset(&mut self) {
        self.pages
            .clear();
        self.redirects
            .clear();
        self.langbars
            .clear();
        self.share_buttons
            .clear();
        self.stylesheets
            .clear();
    }
}

/// Return the remembered value for `key`, or run `lookup` and remember what
/// it returns. Failures are not remembered.
pub(crate) fn memoize<K, V, F>(table: &mut HashMap<K, V>, key: K, kind: &str, lookup: F) -> Result<V>
where
    K: Eq + Hash + std::fmt::Debug,
    V: Clone,
    F: FnOnce() -> Result<V>,
{
    if let Some(value) = table.get(&key) {
        debug!(?key, "{} cache hit", kind);
        return Ok(value.clone());
    }

    let value = lookup()?;
    table.insert(key, value.clone());
    Ok(value)
}
