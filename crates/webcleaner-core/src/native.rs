//! WinINet-backed cache store.

use crate::error::{CoreError, CoreResult};
use crate::store::{CacheStore, GroupId, RawBuffer};
use std::ffi::{c_char, CStr, CString};
use std::mem::size_of;
use windows::core::{Error as WinError, HRESULT, PCSTR};
use windows::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_INSUFFICIENT_BUFFER, ERROR_NO_MORE_ITEMS, HANDLE,
};
use windows::Win32::Networking::WinInet::{
    DeleteUrlCacheEntryA, DeleteUrlCacheGroup, FindCloseUrlCache, FindFirstUrlCacheEntryA,
    FindFirstUrlCacheGroup, FindNextUrlCacheEntryA, FindNextUrlCacheGroup,
    INTERNET_CACHE_ENTRY_INFOA,
};

const CACHEGROUP_SEARCH_ALL: u32 = 0x0;
const CACHEGROUP_FLAG_FLUSHURL_ONDELETE: u32 = 0x2;

/// The current user's WinINet URL cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCacheStore;

/// Find handle from `FindFirstUrlCacheGroup` / `FindFirstUrlCacheEntryA`,
/// closed with `FindCloseUrlCache` on drop.
///
/// Group handles are closed the same way: WinINet documents the call for
/// entry enumerations only, but it accepts any find handle and leaving group
/// handles open leaks them for the life of the process.
pub struct FindHandle(HANDLE);

impl Drop for FindHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = FindCloseUrlCache(self.0);
        }
    }
}

/// Entry buffer backed by `u64` words so the descriptor at its start is
/// suitably aligned.
pub struct NativeBuffer {
    words: Vec<u64>,
    len: u32,
}

impl NativeBuffer {
    fn entry_ptr(&mut self) -> Option<*mut INTERNET_CACHE_ENTRY_INFOA> {
        if self.len == 0 {
            None
        } else {
            Some(self.words.as_mut_ptr().cast())
        }
    }
}

impl RawBuffer for NativeBuffer {
    fn len(&self) -> u32 {
        self.len
    }

    fn release(&mut self) {
        self.words = Vec::new();
        self.len = 0;
    }
}

fn win32(code: u32) -> HRESULT {
    HRESULT::from_win32(code)
}

fn classify(err: &WinError) -> CoreError {
    let code = err.code();
    if code == win32(ERROR_NO_MORE_ITEMS.0) || code == win32(ERROR_FILE_NOT_FOUND.0) {
        CoreError::NoMoreItems
    } else {
        CoreError::Os((code.0 as u32) & 0xFFFF)
    }
}

/// Like `classify`, but recognises the growth signal and carries the size
/// the call wrote back.
fn classify_sized(err: &WinError, required: u32) -> CoreError {
    if err.code() == win32(ERROR_INSUFFICIENT_BUFFER.0) {
        CoreError::InsufficientBuffer { required }
    } else {
        classify(err)
    }
}

impl CacheStore for NativeCacheStore {
    type Enumeration = FindHandle;
    type Buffer = NativeBuffer;

    fn find_first_group(&self) -> CoreResult<(FindHandle, GroupId)> {
        let mut group: GroupId = 0;
        let handle = unsafe {
            FindFirstUrlCacheGroup(0, CACHEGROUP_SEARCH_ALL, None, 0, &mut group, None)
        }
        .map_err(|e| classify(&e))?;
        Ok((FindHandle(handle), group))
    }

    fn find_next_group(&self, handle: &FindHandle) -> CoreResult<GroupId> {
        let mut group: GroupId = 0;
        unsafe { FindNextUrlCacheGroup(handle.0, &mut group, None) }.map_err(|e| classify(&e))?;
        Ok(group)
    }

    fn delete_group(&self, group: GroupId) -> CoreResult<()> {
        unsafe { DeleteUrlCacheGroup(group, CACHEGROUP_FLAG_FLUSHURL_ONDELETE, None) }
            .map_err(|e| classify(&e))
    }

    fn allocate(&self, len: u32) -> NativeBuffer {
        let words = (len as usize).div_ceil(size_of::<u64>());
        NativeBuffer {
            words: vec![0; words],
            len,
        }
    }

    fn find_first_entry(
        &self,
        pattern: Option<&CStr>,
        buffer: &mut NativeBuffer,
    ) -> CoreResult<FindHandle> {
        let pattern = pattern.map_or(PCSTR::null(), |p| PCSTR(p.as_ptr().cast()));
        let mut size = buffer.len;
        let handle = unsafe { FindFirstUrlCacheEntryA(pattern, buffer.entry_ptr(), &mut size) }
            .map_err(|e| classify_sized(&e, size))?;
        Ok(FindHandle(handle))
    }

    fn find_next_entry(&self, handle: &FindHandle, buffer: &mut NativeBuffer) -> CoreResult<()> {
        let mut size = buffer.len;
        unsafe { FindNextUrlCacheEntryA(handle.0, buffer.entry_ptr(), &mut size) }
            .map_err(|e| classify_sized(&e, size))
    }

    fn source_name(&self, buffer: &NativeBuffer) -> Option<CString> {
        if (buffer.len as usize) < size_of::<INTERNET_CACHE_ENTRY_INFOA>() {
            return None;
        }
        // SAFETY: the buffer holds a descriptor written by the last successful
        // find call, and the source name points into the same buffer.
        unsafe {
            let info = &*(buffer.words.as_ptr() as *const INTERNET_CACHE_ENTRY_INFOA);
            if info.lpszSourceUrlName.is_null() {
                return None;
            }
            Some(CStr::from_ptr(info.lpszSourceUrlName.0 as *const c_char).to_owned())
        }
    }

    fn delete_entry(&self, source_name: &CStr) -> CoreResult<()> {
        unsafe { DeleteUrlCacheEntryA(PCSTR(source_name.as_ptr().cast())) }
            .map_err(|e| classify(&e))
    }
}
