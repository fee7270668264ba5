//! The virtual file table: the seven file primitives an archive parser
//! invokes believing it is talking to a local file.
//!
//! [`VirtualFile`] is the table itself, expressed as a trait. Two backends
//! implement it: [`HttpRangeFile`], which realizes reads as HTTP Range
//! requests, and [`LocalFile`], the plain filesystem variant. [`VfsReader`]
//! bridges any backend to `std::io::Read + Seek` for Rust archive readers.

mod http;
mod local;

pub use http::HttpRangeFile;
pub use local::LocalFile;

use std::io;

use crate::error::{LastError, VfsError, NO_ERROR};

/// Reference point for a seek, matching the archive-reader convention.
///
/// Note that `End` is subtractive: a seek of `delta` from `End` lands at
/// `size - delta`, so `seek(0, End)` positions at the end of the resource.
/// This differs from `std::io::SeekFrom::End`, which adds a signed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Start,
    Current,
    End,
}

/// The seven file primitives, minus open: opening is each backend's
/// constructor, since a failed probe must produce no handle at all.
///
/// All operations are synchronous and blocking, and a handle must not be
/// shared between threads mid-operation; one handle serves one logical
/// reader, which is how archive parsers consume it.
pub trait VirtualFile {
    /// Read exactly `buf.len()` bytes at the current offset, advancing the
    /// offset on success. Fails without any transport call if the read would
    /// run past the end of the resource. A zero-length read trivially
    /// succeeds.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, VfsError>;

    /// Always fails: the adapter is read-only. The offset is never touched.
    fn write(&mut self, buf: &[u8]) -> Result<usize, VfsError>;

    /// Current logical offset. Infallible.
    fn tell(&self) -> u64;

    /// Move the offset to `delta` relative to `origin`, returning the new
    /// offset. A target outside `[0, len]` fails and leaves the offset
    /// unchanged. Purely logical bookkeeping; no transport interaction.
    fn seek(&mut self, delta: i64, origin: SeekOrigin) -> Result<u64, VfsError>;

    /// Release the underlying resource. Further operations fail with
    /// [`VfsError::Closed`].
    fn close(&mut self) -> Result<(), VfsError>;

    /// Total byte length of the resource, fixed at open time.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent failure, or `None` if the last operation succeeded.
    fn last_error(&self) -> Option<&LastError>;

    /// Numeric form of the error query: 0 means no error.
    fn last_error_code(&self) -> i32 {
        self.last_error().map_or(NO_ERROR, |e| e.code)
    }
}

/// Adapts a [`VirtualFile`] to `std::io::Read + Seek` so ordinary Rust ZIP
/// crates can drive a remote archive.
///
/// Unlike the raw table, `Read::read` here follows `std::io` semantics: a
/// read at or past the end of the resource returns `Ok(0)` instead of an
/// out-of-bounds error, and oversized requests are clamped to the remaining
/// bytes.
pub struct VfsReader<F: VirtualFile> {
    inner: F,
}

impl<F: VirtualFile> VfsReader<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

fn to_io_error(err: VfsError) -> io::Error {
    match err {
        VfsError::Io(e) => e,
        VfsError::ReadOutOfBounds { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
        VfsError::SeekOutOfBounds { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
        other => io::Error::other(other),
    }
}

impl<F: VirtualFile> io::Read for VfsReader<F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.inner.len().saturating_sub(self.inner.tell());
        let want = (buf.len() as u64).min(remaining) as usize;
        if want == 0 {
            return Ok(0);
        }
        self.inner.read(&mut buf[..want]).map_err(to_io_error)
    }
}

impl<F: VirtualFile> io::Seek for VfsReader<F> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (delta, origin) = match pos {
            io::SeekFrom::Start(p) => {
                let delta = i64::try_from(p)
                    .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset too large"))?;
                (delta, SeekOrigin::Start)
            }
            io::SeekFrom::Current(d) => (d, SeekOrigin::Current),
            // std's End adds a signed offset; the table's End subtracts.
            io::SeekFrom::End(d) => {
                let delta = d.checked_neg().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "offset too large")
                })?;
                (delta, SeekOrigin::End)
            }
        };
        self.inner.seek(delta, origin).map_err(to_io_error)
    }
}
