//! Windows implementation using psapi via kernel32 (`K32*` entry points)

use core::ffi::c_void;
use std::mem::{size_of, zeroed};

use windows_sys::Win32::Foundation::{CloseHandle, GetLastError, ERROR_INVALID_PARAMETER, HANDLE};
use windows_sys::Win32::System::ProcessStatus::{
    K32GetPerformanceInfo, K32QueryWorkingSet, PERFORMANCE_INFORMATION,
};
use windows_sys::Win32::System::Threading::{
    GetCurrentProcess, OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};

use wsmem_core::codes;
use wsmem_core::constants::SLOT_BYTES;
use wsmem_core::error::{OsError, OsResult};
use wsmem_core::perf::PerformanceSnapshot;
use wsmem_core::traits::{PerformanceQuery, ProcessAccess, WorkingSetQuery};
use wsmem_core::kdebug;

/// Process handle; real handles are closed on drop
#[derive(Debug)]
pub struct ProcessHandle {
    raw: HANDLE,
    /// False for the current-process pseudo-handle
    owned: bool,
}

impl ProcessHandle {
    #[inline]
    pub fn as_raw(&self) -> HANDLE {
        self.raw
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if self.owned {
            // SAFETY: `raw` came from a successful OpenProcess and is closed once.
            unsafe {
                CloseHandle(self.raw);
            }
        }
    }
}

#[inline]
fn last_error() -> u32 {
    // SAFETY: reads thread-local state only.
    unsafe { GetLastError() }
}

/// Windows OS layer
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsSystem;

impl WindowsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessAccess for WindowsSystem {
    type Handle = ProcessHandle;

    fn current_process(&self) -> ProcessHandle {
        // SAFETY: returns a constant pseudo-handle; no release needed.
        let raw = unsafe { GetCurrentProcess() };
        ProcessHandle { raw, owned: false }
    }

    fn open_process(&self, pid: u32) -> OsResult<ProcessHandle> {
        let access = PROCESS_VM_READ | PROCESS_QUERY_INFORMATION;
        // SAFETY: plain FFI call; a zero handle signals failure.
        let raw = unsafe { OpenProcess(access, 0, pid) };
        if raw == 0 {
            let code = last_error();
            kdebug!("OpenProcess({}) failed: {}", pid, code);
            return Err(match code {
                ERROR_INVALID_PARAMETER => OsError::NotFound,
                other => OsError::from_code(other),
            });
        }
        Ok(ProcessHandle { raw, owned: true })
    }
}

impl WorkingSetQuery for WindowsSystem {
    fn query_working_set(&self, handle: &ProcessHandle, buf: &mut [usize]) -> OsResult<()> {
        // The size argument is a DWORD
        let cb = buf
            .len()
            .checked_mul(SLOT_BYTES)
            .and_then(|bytes| u32::try_from(bytes).ok())
            .ok_or(OsError::Code(codes::NOT_ENOUGH_MEMORY))?;

        // SAFETY: `buf` is a word-aligned PSAPI_WORKING_SET_INFORMATION of `cb`
        // bytes (header word followed by PSAPI_WORKING_SET_BLOCK slots).
        let ok = unsafe { K32QueryWorkingSet(handle.raw, buf.as_mut_ptr() as *mut c_void, cb) };
        if ok == 0 {
            return Err(OsError::from_code(last_error()));
        }
        Ok(())
    }
}

impl PerformanceQuery for WindowsSystem {
    fn performance_info(&self) -> OsResult<PerformanceSnapshot> {
        let cb = size_of::<PERFORMANCE_INFORMATION>() as u32;
        // SAFETY: plain-old-data record, valid when zeroed; only read on success.
        let info = unsafe {
            let mut info: PERFORMANCE_INFORMATION = zeroed();
            info.cb = cb;
            if K32GetPerformanceInfo(&mut info, cb) == 0 {
                return Err(OsError::from_code(last_error()));
            }
            info
        };

        Ok(PerformanceSnapshot {
            commit_total: info.CommitTotal as u64,
            commit_limit: info.CommitLimit as u64,
            commit_peak: info.CommitPeak as u64,
            physical_total: info.PhysicalTotal as u64,
            physical_available: info.PhysicalAvailable as u64,
            system_cache: info.SystemCache as u64,
            kernel_total: info.KernelTotal as u64,
            kernel_paged: info.KernelPaged as u64,
            kernel_nonpaged: info.KernelNonpaged as u64,
            page_size: info.PageSize as u64,
            handle_count: info.HandleCount,
            process_count: info.ProcessCount,
            thread_count: info.ThreadCount,
        })
    }
}
