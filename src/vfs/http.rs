//! HTTP Range-backed remote handle.
//!
//! [`HttpRangeFile`] emulates a random-access, read-only file over a remote
//! HTTP resource. The resource length is fetched once at open time via a
//! metadata probe; after that, the handle is pure bookkeeping (offset plus
//! last error) and every read is realized as exactly one ranged GET for the
//! inclusive interval `[offset, offset + n - 1]`. There is no read-ahead,
//! no caching, and no retry: a caller that wants fewer round-trips should
//! request larger chunks, and a caller that wants retries owns that policy.

use tracing::debug;

use super::{SeekOrigin, VirtualFile};
use crate::error::{LastError, VfsError};
use crate::transport::{HttpTransport, RangeTransport, TransportConfig};

/// A read-only random-access view of a remote HTTP resource.
///
/// Generic over the transport so tests can substitute one; callers normally
/// use [`HttpRangeFile::open`], which builds an [`HttpTransport`].
#[derive(Debug)]
pub struct HttpRangeFile<T: RangeTransport = HttpTransport> {
    // None once the handle is closed.
    transport: Option<T>,
    url: String,
    size: u64,
    offset: u64,
    last_error: Option<LastError>,
}

impl HttpRangeFile<HttpTransport> {
    /// Open `url` with a default-configured HTTP transport.
    ///
    /// Issues a metadata probe to learn the resource length; if the probe
    /// fails, no handle is produced. A declared length of 0 is a valid
    /// empty resource, not an error.
    pub fn open(url: impl Into<String>) -> Result<Self, VfsError> {
        Self::open_with_config(url, TransportConfig::default())
    }

    /// Open `url` with explicit transport configuration.
    pub fn open_with_config(
        url: impl Into<String>,
        config: TransportConfig,
    ) -> Result<Self, VfsError> {
        let transport = HttpTransport::new(config)?;
        Self::open_with(url, transport)
    }
}

impl<T: RangeTransport> HttpRangeFile<T> {
    /// Open `url` over a caller-supplied transport.
    pub fn open_with(url: impl Into<String>, transport: T) -> Result<Self, VfsError> {
        let url = url.into();
        let size = transport.content_length(&url)?;
        debug!(%url, size, "opened remote file");
        Ok(Self {
            transport: Some(transport),
            url,
            size,
            offset: 0,
            last_error: None,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    // Record the failure for the error query, then hand it to the caller.
    fn fail(&mut self, err: VfsError) -> VfsError {
        self.last_error = Some(LastError::from(&err));
        err
    }
}

impl<T: RangeTransport> VirtualFile for HttpRangeFile<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, VfsError> {
        let n = buf.len() as u64;
        if n == 0 {
            self.last_error = None;
            return Ok(0);
        }

        // Strict bound: a read ending exactly at `size` touches the final
        // byte and is legal; one past it is not. Checked locally so no
        // malformed range request ever reaches the wire.
        if self.offset + n > self.size {
            return Err(self.fail(VfsError::ReadOutOfBounds {
                offset: self.offset,
                len: n,
                size: self.size,
            }));
        }

        let transport = match self.transport.as_ref() {
            Some(t) => t,
            None => return Err(self.fail(VfsError::Closed)),
        };

        let end = self.offset + n - 1;
        match transport.read_range(&self.url, self.offset, end, buf) {
            Ok(read) => {
                self.offset += read as u64;
                self.last_error = None;
                Ok(read)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize, VfsError> {
        Err(self.fail(VfsError::WriteUnsupported))
    }

    fn tell(&self) -> u64 {
        self.offset
    }

    fn seek(&mut self, delta: i64, origin: SeekOrigin) -> Result<u64, VfsError> {
        let candidate: i128 = match origin {
            SeekOrigin::Start => delta as i128,
            SeekOrigin::Current => self.offset as i128 + delta as i128,
            SeekOrigin::End => self.size as i128 - delta as i128,
        };

        if candidate < 0 || candidate > self.size as i128 {
            return Err(self.fail(VfsError::SeekOutOfBounds {
                candidate,
                size: self.size,
            }));
        }

        self.offset = candidate as u64;
        self.last_error = None;
        Ok(self.offset)
    }

    fn close(&mut self) -> Result<(), VfsError> {
        self.transport = None;
        Ok(())
    }

    fn len(&self) -> u64 {
        self.size
    }

    fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }
}
