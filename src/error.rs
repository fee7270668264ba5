//! Error types for the virtual file layer.
//!
//! Failures are reported twice, matching the archive-reader contract this
//! crate emulates: the failing operation returns a [`VfsError`] through its
//! `Result`, and the handle records a [`LastError`] snapshot that the
//! error-query primitive exposes until the next successful operation.

use crate::transport::TransportError;

/// Error code returned by the error query when no failure is recorded.
pub const NO_ERROR: i32 = 0;

/// An error raised by a virtual file operation.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// The adapter is read-only; write is never attempted.
    #[error("writing unsupported")]
    WriteUnsupported,

    /// A read would run past the end of the resource. Detected locally,
    /// before any transport call.
    #[error("read past end of resource (offset {offset} + {len} > {size})")]
    ReadOutOfBounds { offset: u64, len: u64, size: u64 },

    /// A seek computed a position outside `[0, size]`.
    #[error("seeking out of bounds (position {candidate} not in 0..={size})")]
    SeekOutOfBounds { candidate: i128, size: u64 },

    /// The handle was closed and may no longer be used.
    #[error("handle is closed")]
    Closed,

    /// A local filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying HTTP transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl VfsError {
    /// Stable numeric code for the error-query convention. Never 0.
    pub fn code(&self) -> i32 {
        match self {
            VfsError::WriteUnsupported => 1,
            VfsError::ReadOutOfBounds { .. } => 2,
            VfsError::SeekOutOfBounds { .. } => 3,
            VfsError::Closed => 4,
            VfsError::Io(_) => 5,
            VfsError::Transport(_) => 6,
        }
    }
}

/// Snapshot of the most recent failure, kept on the handle for the
/// error-query primitive. Cleared whenever an operation succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub code: i32,
    pub message: String,
}

impl From<&VfsError> for LastError {
    fn from(err: &VfsError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
