//! The OS-call boundary of the purger.
//!
//! `CacheStore` mirrors the WinINet cache-management calls one to one so the
//! purge logic can run against the real cache or an in-memory fake.

use crate::error::CoreResult;
use std::ffi::{CStr, CString};

/// WinINet `GROUPID`.
pub type GroupId = i64;

/// Caller-owned memory filled by an entry enumeration call.
///
/// Dropping a buffer frees its allocation. `release` frees it early and
/// leaves a zero-length buffer whose drop is a no-op.
pub trait RawBuffer {
    fn len(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&mut self);
}

pub trait CacheStore {
    /// Live enumeration handle. Dropping it ends the enumeration.
    type Enumeration;
    type Buffer: RawBuffer;

    /// Starts enumerating every cache group. `Err(NoMoreItems)` means there
    /// are none, or the platform has no groups.
    fn find_first_group(&self) -> CoreResult<(Self::Enumeration, GroupId)>;

    fn find_next_group(&self, handle: &Self::Enumeration) -> CoreResult<GroupId>;

    /// Deletes a group, flushing member URLs that belong to no other group.
    fn delete_group(&self, group: GroupId) -> CoreResult<()>;

    fn allocate(&self, len: u32) -> Self::Buffer;

    /// Starts enumerating entries matching `pattern` (`None` = all) and writes
    /// the first entry into `buffer`. Fails with `InsufficientBuffer` when
    /// `buffer` cannot hold it.
    fn find_first_entry(
        &self,
        pattern: Option<&CStr>,
        buffer: &mut Self::Buffer,
    ) -> CoreResult<Self::Enumeration>;

    /// Writes the next entry into `buffer`, with the same size contract as
    /// `find_first_entry`.
    fn find_next_entry(&self, handle: &Self::Enumeration, buffer: &mut Self::Buffer)
        -> CoreResult<()>;

    /// Source URL of the entry currently held in `buffer`.
    fn source_name(&self, buffer: &Self::Buffer) -> Option<CString>;

    fn delete_entry(&self, source_name: &CStr) -> CoreResult<()>;
}
