//! Scripted OS layer
//!
//! An in-memory stand-in for the OS working-set and performance APIs.
//! It behaves like the real one (rejects buffers that are too small and
//! reports the required count in the header) and can additionally be
//! scripted to fail, deny access, or grow the working set between calls.
//!
//! ```ignore
//! let sys = FakeSystem::new(4096);
//! sys.set_pages(pages);
//! sys.fail_insufficient(2);
//! let ws = WorkingSetReader::new(&sys).query(&sys.current_process())?;
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::constants::HEADER_WORDS;
use crate::error::{OsError, OsResult};
use crate::page::PageDescriptor;
use crate::perf::PerformanceSnapshot;
use crate::traits::{PerformanceQuery, ProcessAccess, WorkingSetQuery};

/// Handle issued by [`FakeSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeHandle {
    Current,
    Pid(u32),
}

#[derive(Default)]
struct FakeState {
    pages: Vec<PageDescriptor>,
    page_size: u64,
    insufficient_remaining: usize,
    query_failure: Option<OsError>,
    perf_failure: Option<OsError>,
    open_failures: HashMap<u32, OsError>,
    grow_per_query: usize,
    overstate: usize,
    query_calls: usize,
    perf_calls: usize,
    buffer_sizes: Vec<usize>,
    queried: Vec<FakeHandle>,
}

/// Scripted implementation of the OS-layer traits
pub struct FakeSystem {
    state: Mutex<FakeState>,
}

impl FakeSystem {
    /// Empty working set with the given page size
    pub fn new(page_size: u64) -> Self {
        Self {
            state: Mutex::new(FakeState {
                page_size,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not hide the state from the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the working set
    pub fn set_pages(&self, pages: Vec<PageDescriptor>) {
        self.state().pages = pages;
    }

    /// Replace the working set with `total` pages, the first `shared` shared
    pub fn set_counts(&self, total: usize, shared: usize) {
        let pages = (0..total)
            .map(|i| PageDescriptor::new(4, u8::from(i < shared), i < shared, i))
            .collect();
        self.set_pages(pages);
    }

    pub fn set_page_size(&self, page_size: u64) {
        self.state().page_size = page_size;
    }

    /// Report `InsufficientBuffer` for the next `k` queries
    pub fn fail_insufficient(&self, k: usize) {
        self.state().insufficient_remaining = k;
    }

    /// Fail every query (after scripted insufficient replies) with `err`
    pub fn fail_query(&self, err: OsError) {
        self.state().query_failure = Some(err);
    }

    /// Fail every performance read with `err`
    pub fn fail_performance(&self, err: OsError) {
        self.state().perf_failure = Some(err);
    }

    /// Refuse to open `pid` with access denied
    pub fn deny_pid(&self, pid: u32) {
        self.state().open_failures.insert(pid, OsError::AccessDenied);
    }

    /// Refuse to open `pid` because it does not exist
    pub fn missing_pid(&self, pid: u32) {
        self.state().open_failures.insert(pid, OsError::NotFound);
    }

    /// Append `n` private pages before answering each query
    pub fn grow_per_query(&self, n: usize) {
        self.state().grow_per_query = n;
    }

    /// Add `extra` to the entry count reported on success
    pub fn overstate_count(&self, extra: usize) {
        self.state().overstate = extra;
    }

    pub fn query_calls(&self) -> usize {
        self.state().query_calls
    }

    pub fn perf_calls(&self) -> usize {
        self.state().perf_calls
    }

    /// Buffer length in words passed to each query, in order
    pub fn buffer_sizes(&self) -> Vec<usize> {
        self.state().buffer_sizes.clone()
    }

    /// Handles passed to each query, in order
    pub fn queried_handles(&self) -> Vec<FakeHandle> {
        self.state().queried.clone()
    }
}

impl ProcessAccess for FakeSystem {
    type Handle = FakeHandle;

    fn current_process(&self) -> FakeHandle {
        FakeHandle::Current
    }

    fn open_process(&self, pid: u32) -> OsResult<FakeHandle> {
        match self.state().open_failures.get(&pid) {
            Some(err) => Err(*err),
            None => Ok(FakeHandle::Pid(pid)),
        }
    }
}

impl WorkingSetQuery for FakeSystem {
    fn query_working_set(&self, handle: &FakeHandle, buf: &mut [usize]) -> OsResult<()> {
        let mut st = self.state();
        st.query_calls += 1;
        st.buffer_sizes.push(buf.len());
        st.queried.push(*handle);

        if st.grow_per_query > 0 {
            let start = st.pages.len();
            let grow = st.grow_per_query;
            st.pages
                .extend((start..start + grow).map(|vpn| PageDescriptor::new(4, 0, false, vpn)));
        }

        if buf.len() < HEADER_WORDS {
            return Err(OsError::InsufficientBuffer);
        }

        if st.insufficient_remaining > 0 {
            st.insufficient_remaining -= 1;
            buf[0] = st.pages.len();
            return Err(OsError::InsufficientBuffer);
        }

        if let Some(err) = st.query_failure {
            return Err(err);
        }

        let capacity = buf.len() - HEADER_WORDS;
        if st.pages.len() > capacity {
            buf[0] = st.pages.len();
            return Err(OsError::InsufficientBuffer);
        }

        for (slot, page) in buf[HEADER_WORDS..].iter_mut().zip(st.pages.iter()) {
            *slot = page.raw();
        }
        buf[0] = st.pages.len() + st.overstate;
        Ok(())
    }
}

impl PerformanceQuery for FakeSystem {
    fn performance_info(&self) -> OsResult<PerformanceSnapshot> {
        let mut st = self.state();
        st.perf_calls += 1;
        if let Some(err) = st.perf_failure {
            return Err(err);
        }
        Ok(PerformanceSnapshot {
            physical_total: 1 << 20,
            physical_available: 1 << 19,
            page_size: st.page_size,
            process_count: 1,
            thread_count: 1,
            ..Default::default()
        })
    }
}
