//! Grow-and-retry handling for calls that report their required buffer size.

use crate::error::{CoreError, CoreResult};
use crate::store::{CacheStore, RawBuffer};

/// Replaces `buffer` with a fresh allocation of exactly `len` bytes.
///
/// The old allocation is released first so only one is ever outstanding.
/// Contents are not preserved; the next call overwrites them.
pub fn regrow<S: CacheStore>(store: &S, buffer: &mut S::Buffer, len: u32) {
    tracing::debug!(from = buffer.len(), to = len, "growing cache entry buffer");
    buffer.release();
    *buffer = store.allocate(len);
}

/// Runs `call` once. If it reports the buffer too small, regrows `buffer` to
/// the reported size and runs `call` a second time, returning that result.
pub fn retry_grown<S, T, F>(store: &S, buffer: &mut S::Buffer, mut call: F) -> CoreResult<T>
where
    S: CacheStore,
    F: FnMut(&S, &mut S::Buffer) -> CoreResult<T>,
{
    match call(store, buffer) {
        Err(CoreError::InsufficientBuffer { required }) => {
            regrow(store, buffer, required);
            call(store, buffer)
        }
        other => other,
    }
}

/// Asks the store how large the first entry is by handing it an empty buffer.
///
/// Returns the required size only when the call fails with the growth signal;
/// any other outcome means there is nothing to enumerate. A handle opened by
/// an unexpected success is dropped immediately.
pub fn probe_required_len<S, F>(store: &S, mut call: F) -> Option<u32>
where
    S: CacheStore,
    F: FnMut(&S, &mut S::Buffer) -> CoreResult<S::Enumeration>,
{
    let mut empty = store.allocate(0);
    match call(store, &mut empty) {
        Err(CoreError::InsufficientBuffer { required }) => Some(required),
        Err(err) => {
            tracing::debug!(error = %err, "entry size probe found nothing to enumerate");
            None
        }
        Ok(_) => None,
    }
}
