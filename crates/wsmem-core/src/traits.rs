//! OS-layer traits
//!
//! These traits define the interface between the platform-agnostic core
//! and platform-specific runtime implementations. Each trait models one
//! capability; tests substitute a scripted implementation.

use crate::error::OsResult;
use crate::perf::PerformanceSnapshot;

/// Acquiring process handles
pub trait ProcessAccess: Send + Sync {
    /// Handle owned by the caller for the duration of a query.
    ///
    /// Implementations that need explicit release do it on `Drop`.
    type Handle;

    /// Handle to the calling process. Never fails.
    fn current_process(&self) -> Self::Handle;

    /// Open a process with read + query-information access
    ///
    /// Fails with `AccessDenied` if the rights are refused, or `NotFound`
    /// if no such process exists.
    fn open_process(&self, pid: u32) -> OsResult<Self::Handle>;
}

/// The working-set query primitive
pub trait WorkingSetQuery: ProcessAccess {
    /// Fill `buf` with the working set of `handle`.
    ///
    /// `buf[0]` is the `NumberOfEntries` header, `buf[1..]` the descriptor
    /// slots. On success the header holds the number of entries written.
    /// When the slots cannot hold the working set, returns
    /// `InsufficientBuffer` and, if known, leaves the required count in
    /// the header.
    fn query_working_set(&self, handle: &Self::Handle, buf: &mut [usize]) -> OsResult<()>;
}

/// Reading the system performance counters
pub trait PerformanceQuery: Send + Sync {
    fn performance_info(&self) -> OsResult<PerformanceSnapshot>;
}
