//! HTTP transport consumed by the remote handle.
//!
//! The virtual file layer needs exactly two things from a transport: a
//! metadata probe that reports a resource's total byte length, and a ranged
//! GET that fills a caller-owned buffer with an inclusive byte interval.
//! [`RangeTransport`] captures that contract; [`HttpTransport`] implements it
//! with a blocking `reqwest` client. Tests substitute their own transports.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{header, StatusCode};
use tracing::debug;

/// Configuration for [`HttpTransport`], passed at construction time.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout, covering connect and body transfer.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// An error raised by the transport while probing or fetching a range.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP request failed with status: {0}")]
    Status(StatusCode),

    #[error("remote server does not support Range requests")]
    RangesUnsupported,

    #[error("remote server did not return Content-Length")]
    MissingLength,

    #[error("server returned more bytes than the requested range")]
    OverlongBody,

    #[error("server returned {got} bytes for a {want}-byte range")]
    ShortBody { want: usize, got: usize },

    #[error("failed reading response body: {0}")]
    Body(#[from] std::io::Error),

    /// Free-form failure, used by test transports.
    #[error("{0}")]
    Other(String),
}

/// Blocking transport contract for range-backed reads.
///
/// `read_range` must fill `buf` completely with the bytes of the inclusive
/// interval `[start, end]` and must fail if the server delivers more than
/// `buf.len()` bytes; it never writes past the buffer.
pub trait RangeTransport {
    /// Probe the resource and return its total byte length, without
    /// transferring the body.
    fn content_length(&self, url: &str) -> Result<u64, TransportError>;

    /// Fetch the inclusive byte range `[start, end]` into `buf` and return
    /// the number of bytes written, which on success equals `buf.len()`.
    fn read_range(
        &self,
        url: &str,
        start: u64,
        end: u64,
        buf: &mut [u8],
    ) -> Result<usize, TransportError>;
}

/// [`RangeTransport`] backed by a blocking `reqwest` client.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client })
    }
}

impl RangeTransport for HttpTransport {
    fn content_length(&self, url: &str) -> Result<u64, TransportError> {
        let resp = self.client.head(url).send()?;

        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status()));
        }

        // A server that cannot serve byte ranges cannot back random access.
        let accept_ranges = resp
            .headers()
            .get(header::ACCEPT_RANGES)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        if !accept_ranges.contains("bytes") {
            return Err(TransportError::RangesUnsupported);
        }

        let length = resp
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or(TransportError::MissingLength)?;

        debug!(url, length, "probed remote resource");
        Ok(length)
    }

    fn read_range(
        &self,
        url: &str,
        start: u64,
        end: u64,
        buf: &mut [u8],
    ) -> Result<usize, TransportError> {
        let range = format!("bytes={}-{}", start, end);
        debug!(url, %range, "fetching range");

        let mut resp = self
            .client
            .get(url)
            .header(header::RANGE, &range)
            .send()?;

        if resp.status() != StatusCode::PARTIAL_CONTENT {
            return Err(TransportError::Status(resp.status()));
        }

        let mut filled = 0;
        while filled < buf.len() {
            let n = resp.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        // The interval was inclusive and sized to the buffer; anything left
        // in the body means the server ignored or overshot the range.
        let mut probe = [0u8; 1];
        if resp.read(&mut probe)? > 0 {
            return Err(TransportError::OverlongBody);
        }

        if filled < buf.len() {
            return Err(TransportError::ShortBody {
                want: buf.len(),
                got: filled,
            });
        }

        Ok(filled)
    }
}
