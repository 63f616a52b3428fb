use crate::config::PurgeConfig;
use crate::enumerate::{EntryEnumeration, GroupEnumeration};
use crate::store::CacheStore;
use std::ffi::CString;

/// Best-effort purge of a URL cache store.
///
/// Groups go first: entries bound to a group can only be removed by deleting
/// the group. Every failure is absorbed; `run` always returns normally and
/// the only observable result is what is gone from the store afterwards.
pub struct CachePurger<S> {
    store: S,
    config: PurgeConfig,
}

impl<S: CacheStore> CachePurger<S> {
    pub fn new(store: S, config: PurgeConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn run(&self) {
        if self.config.purge_groups {
            self.eradicate_groups();
        }
        self.eradicate_entries();
    }

    fn eradicate_groups(&self) {
        tracing::debug!("deleting cache groups");
        for group in GroupEnumeration::open(&self.store) {
            match self.store.delete_group(group) {
                Ok(()) => tracing::trace!(group, "deleted cache group"),
                Err(err) => tracing::debug!(group, error = %err, "cache group not deleted"),
            }
        }
    }

    fn eradicate_entries(&self) {
        let pattern = match self.config.url_search_pattern.as_deref().map(CString::new) {
            None => None,
            Some(Ok(pattern)) => Some(pattern),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "url search pattern unusable; skipping entries");
                return;
            }
        };
        tracing::debug!(pattern = ?pattern, "deleting cache entries");
        let Some(entries) = EntryEnumeration::open(&self.store, pattern.as_deref()) else {
            return;
        };
        for name in entries {
            match self.store.delete_entry(&name) {
                Ok(()) => tracing::trace!(entry = ?name, "deleted cache entry"),
                Err(err) => tracing::debug!(entry = ?name, error = %err, "cache entry not deleted"),
            }
        }
    }
}
