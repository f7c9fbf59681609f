//! # wsmem-runtime
//!
//! Platform-specific OS layer for working-set queries.
//!
//! This crate provides:
//! - Process handle acquisition (current process / by pid)
//! - The working-set query primitive (psapi `QueryWorkingSet`)
//! - System performance counters (psapi `GetPerformanceInfo`)
//! - Reader configuration
//!
//! `CurrentSystem` is the backend for the target platform. Only Windows
//! exposes working sets; on Unix the query reports `Unsupported`.

pub mod config;

pub use config::ReaderConfig;

// Platform detection
cfg_if::cfg_if! {
    if #[cfg(windows)] {
        mod platform_windows;
        pub use platform_windows::{ProcessHandle, WindowsSystem as CurrentSystem};
    } else if #[cfg(unix)] {
        mod platform_unix;
        pub use platform_unix::{ProcessHandle, UnixSystem as CurrentSystem};
    } else {
        compile_error!("Unsupported platform");
    }
}
