//! Iterators over cache groups and cache entries.
//!
//! Both advance lazily: `next()` moves the OS cursor only when the caller
//! asks for the following item, so the item just yielded can be deleted
//! before the enumeration continues.

use crate::buffer::{probe_required_len, retry_grown};
use crate::error::CoreError;
use crate::store::{CacheStore, GroupId};
use std::ffi::{CStr, CString};

pub struct GroupEnumeration<'s, S: CacheStore> {
    store: &'s S,
    handle: Option<S::Enumeration>,
    pending: Option<GroupId>,
}

impl<'s, S: CacheStore> GroupEnumeration<'s, S> {
    pub fn open(store: &'s S) -> Self {
        match store.find_first_group() {
            Ok((handle, first)) => Self {
                store,
                handle: Some(handle),
                pending: Some(first),
            },
            Err(err) => {
                tracing::debug!(error = %err, "no cache groups to enumerate");
                Self {
                    store,
                    handle: None,
                    pending: None,
                }
            }
        }
    }
}

impl<S: CacheStore> Iterator for GroupEnumeration<'_, S> {
    type Item = GroupId;

    fn next(&mut self) -> Option<GroupId> {
        if let Some(first) = self.pending.take() {
            return Some(first);
        }
        let handle = self.handle.as_ref()?;
        match self.store.find_next_group(handle) {
            Ok(group) => Some(group),
            Err(err) => {
                end_of_enumeration("group", &err);
                self.handle = None;
                None
            }
        }
    }
}

pub struct EntryEnumeration<'s, S: CacheStore> {
    store: &'s S,
    buffer: S::Buffer,
    handle: Option<S::Enumeration>,
    started: bool,
}

impl<'s, S: CacheStore> EntryEnumeration<'s, S> {
    /// Probes the size of the first entry, allocates for it, and starts the
    /// enumeration. `None` when there is nothing to enumerate.
    pub fn open(store: &'s S, pattern: Option<&CStr>) -> Option<Self> {
        let required = probe_required_len(store, |s, buf| s.find_first_entry(pattern, buf))?;
        let mut buffer = store.allocate(required);
        match store.find_first_entry(pattern, &mut buffer) {
            Ok(handle) => Some(Self {
                store,
                buffer,
                handle: Some(handle),
                started: false,
            }),
            Err(err) => {
                tracing::debug!(error = %err, "cache entry enumeration did not start");
                None
            }
        }
    }

    fn advance(&mut self) -> bool {
        let Some(handle) = self.handle.as_ref() else {
            return false;
        };
        let advanced = retry_grown(self.store, &mut self.buffer, |store, buf| {
            store.find_next_entry(handle, buf)
        });
        match advanced {
            Ok(()) => true,
            Err(err) => {
                end_of_enumeration("entry", &err);
                self.handle = None;
                false
            }
        }
    }
}

impl<S: CacheStore> Iterator for EntryEnumeration<'_, S> {
    type Item = CString;

    fn next(&mut self) -> Option<CString> {
        loop {
            if self.handle.is_none() {
                return None;
            }
            if self.started {
                if !self.advance() {
                    return None;
                }
            } else {
                self.started = true;
            }
            match self.store.source_name(&self.buffer) {
                Some(name) => return Some(name),
                None => tracing::debug!("skipping cache entry without a source name"),
            }
        }
    }
}

fn end_of_enumeration(kind: &str, err: &CoreError) {
    match err {
        CoreError::NoMoreItems => tracing::trace!(kind, "enumeration exhausted"),
        _ => tracing::debug!(kind, error = %err, "enumeration stopped early"),
    }
}
