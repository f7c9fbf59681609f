//! # wsmem-core
//!
//! Core types and traits for querying a process's working set.
//!
//! This crate is platform-agnostic and contains no OS-specific code.
//! All platform-specific implementations are in `wsmem-runtime`.
//!
//! ## Modules
//!
//! - `page` - Working-set page descriptor (bit-exact with `PSAPI_WORKING_SET_BLOCK`)
//! - `working_set` - Ordered list of resident page descriptors
//! - `perf` - System-wide performance counters snapshot
//! - `size` - Total/shared/private size triple and its calculator
//! - `reader` - Buffer-growth retry loop around the working-set query
//! - `traits` - OS-layer capability traits
//! - `error` - Error types
//! - `kprint` - Kernel-style debug printing macros
//! - `env` - Environment variable utilities
//! - `fake` - Scripted OS layer for tests (feature `fake-os`)

pub mod page;
pub mod working_set;
pub mod perf;
pub mod size;
pub mod reader;
pub mod traits;
pub mod error;
pub mod kprint;
pub mod env;

#[cfg(any(test, feature = "fake-os"))]
pub mod fake;

// Re-exports for convenience
pub use page::PageDescriptor;
pub use working_set::WorkingSet;
pub use perf::PerformanceSnapshot;
pub use size::{compute_sizes, WorkingSetSize};
pub use reader::WorkingSetReader;
pub use traits::{PerformanceQuery, ProcessAccess, WorkingSetQuery};
pub use error::{OsError, OsResult, WsError, WsResult};
pub use env::{env_get, env_get_bool, env_get_opt, env_get_str, env_is_set};

/// Constants for the working-set buffer layout
pub mod constants {
    /// Descriptor slots added to the buffer on every attempt
    pub const DEFAULT_GROWTH_STEP: usize = 4096;

    /// Words occupied by the `NumberOfEntries` header in front of the entries
    pub const HEADER_WORDS: usize = 1;

    /// Size of one descriptor slot in bytes (`ULONG_PTR`)
    pub const SLOT_BYTES: usize = core::mem::size_of::<usize>();

    /// Bytes per decimal megabyte, as used in benchmark reports
    pub const BYTES_PER_MB: f64 = 1000.0 * 1000.0;
}

/// Win32 error codes the OS layer distinguishes
pub mod codes {
    /// `ERROR_ACCESS_DENIED`
    pub const ACCESS_DENIED: u32 = 5;

    /// `ERROR_BAD_LENGTH` - working-set buffer too small
    pub const BAD_LENGTH: u32 = 24;

    /// `ERROR_INVALID_PARAMETER` - `OpenProcess` on a pid that does not exist
    pub const INVALID_PARAMETER: u32 = 87;

    /// `ERROR_NOT_ENOUGH_MEMORY`
    pub const NOT_ENOUGH_MEMORY: u32 = 8;

    /// `ERROR_CALL_NOT_IMPLEMENTED`
    pub const CALL_NOT_IMPLEMENTED: u32 = 120;
}
