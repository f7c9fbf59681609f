//! Error types for working-set queries

use core::fmt;

use crate::codes;

/// Result type for raw OS-layer calls
pub type OsResult<T> = Result<T, OsError>;

/// Result type for working-set operations
pub type WsResult<T> = Result<T, WsError>;

/// A classified failure reported by the OS layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsError {
    /// Buffer too small for the working set (`ERROR_BAD_LENGTH`)
    InsufficientBuffer,

    /// Access rights denied for the process
    AccessDenied,

    /// No process with the requested identifier
    NotFound,

    /// The platform has no working-set API
    Unsupported,

    /// Any other OS error code, untranslated
    Code(u32),
}

impl OsError {
    /// Classify a raw Win32 error code
    pub fn from_code(code: u32) -> Self {
        match code {
            codes::ACCESS_DENIED => OsError::AccessDenied,
            codes::BAD_LENGTH => OsError::InsufficientBuffer,
            other => OsError::Code(other),
        }
    }

    /// Raw Win32 error code for this failure
    pub fn code(&self) -> u32 {
        match self {
            OsError::InsufficientBuffer => codes::BAD_LENGTH,
            OsError::AccessDenied => codes::ACCESS_DENIED,
            OsError::NotFound => codes::INVALID_PARAMETER,
            OsError::Unsupported => codes::CALL_NOT_IMPLEMENTED,
            OsError::Code(code) => *code,
        }
    }
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsError::InsufficientBuffer => write!(f, "buffer too small"),
            OsError::AccessDenied => write!(f, "access denied"),
            OsError::NotFound => write!(f, "no such process"),
            OsError::Unsupported => write!(f, "not supported on this platform"),
            OsError::Code(code) => write!(f, "OS error {}", code),
        }
    }
}

impl std::error::Error for OsError {}

/// Errors surfaced to callers of the working-set API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsError {
    /// The OS denied read/query access to the process
    PermissionDenied,

    /// No process with the requested identifier
    ProcessNotFound,

    /// Any other OS failure, carrying the raw error code
    Os(u32),

    /// Working-set queries are not available on this platform
    Unsupported,

    /// The OS reported more entries than the buffer can hold
    MalformedReply { reported: usize, capacity: usize },

    /// Reader configuration rejected
    InvalidConfig(&'static str),
}

impl fmt::Display for WsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WsError::PermissionDenied => write!(f, "permission denied"),
            WsError::ProcessNotFound => write!(f, "process not found"),
            WsError::Os(code) => write!(f, "OS error: {}", code),
            WsError::Unsupported => write!(f, "working-set queries not supported on this platform"),
            WsError::MalformedReply { reported, capacity } => write!(
                f,
                "OS reported {} entries for a buffer of {}",
                reported, capacity
            ),
            WsError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for WsError {}

impl From<OsError> for WsError {
    fn from(e: OsError) -> Self {
        match e {
            OsError::AccessDenied => WsError::PermissionDenied,
            OsError::NotFound => WsError::ProcessNotFound,
            OsError::Unsupported => WsError::Unsupported,
            other => WsError::Os(other.code()),
        }
    }
}
