//! Unix implementation
//!
//! Unix has no per-page working-set API comparable to psapi, so the query
//! reports `Unsupported`. Process lookup and the page size still work,
//! which keeps error handling and reports meaningful off Windows.

use wsmem_core::error::{OsError, OsResult};
use wsmem_core::perf::PerformanceSnapshot;
use wsmem_core::traits::{PerformanceQuery, ProcessAccess, WorkingSetQuery};

/// Process reference by pid (no OS resource to release)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    pid: libc::pid_t,
}

impl ProcessHandle {
    #[inline]
    pub fn pid(&self) -> libc::pid_t {
        self.pid
    }
}

#[inline]
fn errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

fn sysconf(name: libc::c_int) -> Option<u64> {
    // SAFETY: sysconf has no memory-safety preconditions.
    let v = unsafe { libc::sysconf(name) };
    u64::try_from(v).ok()
}

/// Unix OS layer
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixSystem;

impl UnixSystem {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessAccess for UnixSystem {
    type Handle = ProcessHandle;

    fn current_process(&self) -> ProcessHandle {
        // SAFETY: getpid never fails.
        ProcessHandle { pid: unsafe { libc::getpid() } }
    }

    fn open_process(&self, pid: u32) -> OsResult<ProcessHandle> {
        // pid 0 and negative pids address process groups
        let pid = match libc::pid_t::try_from(pid) {
            Ok(p) if p > 0 => p,
            _ => return Err(OsError::NotFound),
        };

        // SAFETY: signal 0 only checks existence and permission.
        if unsafe { libc::kill(pid, 0) } != 0 {
            return Err(match errno() {
                libc::ESRCH => OsError::NotFound,
                libc::EPERM => OsError::AccessDenied,
                other => OsError::Code(other as u32),
            });
        }
        Ok(ProcessHandle { pid })
    }
}

impl WorkingSetQuery for UnixSystem {
    fn query_working_set(&self, _handle: &ProcessHandle, _buf: &mut [usize]) -> OsResult<()> {
        Err(OsError::Unsupported)
    }
}

impl PerformanceQuery for UnixSystem {
    fn performance_info(&self) -> OsResult<PerformanceSnapshot> {
        let page_size = sysconf(libc::_SC_PAGESIZE).ok_or_else(|| OsError::Code(errno() as u32))?;

        let mut snap = PerformanceSnapshot::with_page_size(page_size);
        snap.physical_total = sysconf(libc::_SC_PHYS_PAGES).unwrap_or(0);
        #[cfg(target_os = "linux")]
        {
            snap.physical_available = sysconf(libc::_SC_AVPHYS_PAGES).unwrap_or(0);
        }
        Ok(snap)
    }
}
