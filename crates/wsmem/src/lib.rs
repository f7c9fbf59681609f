//! # wsmem - process working-set sizes
//!
//! Reads the resident pages of a process and splits them into shared and
//! private bytes.
//!
//! ## Quick Start
//!
//! ```ignore
//! // Current process
//! let size = wsmem::working_set_size(None)?;
//! println!("{} bytes resident, {} private", size.total, size.private);
//!
//! // Another process (needs PROCESS_VM_READ | PROCESS_QUERY_INFORMATION)
//! let pages = wsmem::query_working_set(Some(1234))?;
//! println!("{} pages, {} shared", pages.len(), pages.shared_count());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  working_set_size(pid) / query_working_set   │
//! └──────────────────────────────────────────────┘
//!          │                         │
//!          ▼                         ▼
//!  ┌──────────────────┐     ┌──────────────────┐
//!  │ WorkingSetReader │     │ PerformanceQuery │
//!  │  grow-and-retry  │     │   (page size)    │
//!  └──────────────────┘     └──────────────────┘
//!          │                         │
//!          └────────────┬────────────┘
//!                       ▼
//!        ┌─────────────────────────────┐
//!        │ CurrentSystem (psapi / libc)│
//!        └─────────────────────────────┘
//! ```
//!
//! Every call takes a fresh handle, a fresh working set and a fresh page
//! size; nothing is cached.

pub use wsmem_core::{
    compute_sizes, OsError, PageDescriptor, PerformanceSnapshot, WorkingSet, WorkingSetReader,
    WorkingSetSize, WsError, WsResult,
};
pub use wsmem_core::traits::{PerformanceQuery, ProcessAccess, WorkingSetQuery};
pub use wsmem_core::constants;
pub use wsmem_core::{kdebug, kerror, kinfo, kprint, kprintln, ktrace, kwarn};
pub use wsmem_runtime::{CurrentSystem, ProcessHandle, ReaderConfig};

/// Working set of `pid`, or of the current process when `None`
pub fn query_working_set(pid: Option<u32>) -> WsResult<WorkingSet> {
    query_working_set_with(&CurrentSystem::new(), pid, &ReaderConfig::from_env())
}

/// Total, shared and private working-set bytes of `pid` (or the current process)
pub fn working_set_size(pid: Option<u32>) -> WsResult<WorkingSetSize> {
    working_set_size_with(&CurrentSystem::new(), pid, &ReaderConfig::from_env())
}

/// System performance counters
pub fn performance_info() -> WsResult<PerformanceSnapshot> {
    Ok(CurrentSystem::new().performance_info()?)
}

/// [`query_working_set`] against an explicit OS layer
pub fn query_working_set_with<A>(api: &A, pid: Option<u32>, config: &ReaderConfig) -> WsResult<WorkingSet>
where
    A: WorkingSetQuery + ?Sized,
{
    config.validate()?;

    // Handle lives until the query returns
    let handle = match pid {
        None => api.current_process(),
        Some(pid) => api.open_process(pid).map_err(|e| {
            kdebug!("open pid {}: {}", pid, e);
            WsError::from(e)
        })?,
    };

    WorkingSetReader::new(api)
        .growth_step(config.growth_step)
        .query(&handle)
}

/// [`working_set_size`] against an explicit OS layer
pub fn working_set_size_with<A>(api: &A, pid: Option<u32>, config: &ReaderConfig) -> WsResult<WorkingSetSize>
where
    A: WorkingSetQuery + PerformanceQuery + ?Sized,
{
    let working_set = query_working_set_with(api, pid, config)?;
    let perf = api.performance_info()?;
    Ok(compute_sizes(&working_set, perf.page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsmem_core::fake::{FakeHandle, FakeSystem};

    fn config() -> ReaderConfig {
        ReaderConfig::default()
    }

    #[test]
    fn test_end_to_end_sizes() {
        let sys = FakeSystem::new(4096);
        sys.set_counts(10, 3);

        let size = working_set_size_with(&sys, None, &config()).unwrap();
        assert_eq!(size, WorkingSetSize { total: 40960, shared: 12288, private: 28672 });
    }

    #[test]
    fn test_empty_working_set() {
        let sys = FakeSystem::new(4096);
        let size = working_set_size_with(&sys, None, &config()).unwrap();
        assert_eq!(size, WorkingSetSize::default());
    }

    #[test]
    fn test_no_caching_between_calls() {
        let sys = FakeSystem::new(4096);
        sys.set_counts(10, 3);
        let first = working_set_size_with(&sys, None, &config()).unwrap();

        sys.set_counts(25, 5);
        sys.set_page_size(8192);
        let second = working_set_size_with(&sys, None, &config()).unwrap();

        assert_eq!(first.total, 10 * 4096);
        assert_eq!(second.total, 25 * 8192);
        assert_eq!(second.shared, 5 * 8192);
        assert_eq!(sys.query_calls(), 2);
        assert_eq!(sys.perf_calls(), 2);
    }

    #[test]
    fn test_pid_selects_handle() {
        let sys = FakeSystem::new(4096);
        sys.set_counts(4, 0);

        query_working_set_with(&sys, Some(1234), &config()).unwrap();
        query_working_set_with(&sys, None, &config()).unwrap();
        assert_eq!(
            sys.queried_handles(),
            vec![FakeHandle::Pid(1234), FakeHandle::Current]
        );
    }

    #[test]
    fn test_permission_denied_on_open() {
        let sys = FakeSystem::new(4096);
        sys.deny_pid(4);

        let err = working_set_size_with(&sys, Some(4), &config()).unwrap_err();
        assert_eq!(err, WsError::PermissionDenied);
        assert_eq!(sys.query_calls(), 0);
    }

    #[test]
    fn test_missing_process() {
        let sys = FakeSystem::new(4096);
        sys.missing_pid(42);

        let err = query_working_set_with(&sys, Some(42), &config()).unwrap_err();
        assert_eq!(err, WsError::ProcessNotFound);
    }

    #[test]
    fn test_permission_denied_on_query_not_retried() {
        let sys = FakeSystem::new(4096);
        sys.fail_query(OsError::AccessDenied);

        let err = working_set_size_with(&sys, None, &config()).unwrap_err();
        assert_eq!(err, WsError::PermissionDenied);
        assert_eq!(sys.query_calls(), 1);
        assert_eq!(sys.perf_calls(), 0);
    }

    #[test]
    fn test_performance_failure_propagates() {
        let sys = FakeSystem::new(4096);
        sys.set_counts(3, 1);
        sys.fail_performance(OsError::Code(1450));

        let err = working_set_size_with(&sys, None, &config()).unwrap_err();
        assert_eq!(err, WsError::Os(1450));
    }

    #[test]
    fn test_retries_hidden_from_caller() {
        let sys = FakeSystem::new(4096);
        sys.set_counts(10, 3);
        sys.fail_insufficient(4);

        let size = working_set_size_with(&sys, None, &config().growth_step(2)).unwrap();
        assert_eq!(size.total, 40960);
        assert_eq!(sys.query_calls(), 5);
    }

    #[test]
    fn test_invalid_config() {
        let sys = FakeSystem::new(4096);
        let err = query_working_set_with(&sys, None, &config().growth_step(0)).unwrap_err();
        assert!(matches!(err, WsError::InvalidConfig(_)));
        assert_eq!(sys.query_calls(), 0);
    }
}
