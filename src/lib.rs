//! # urlzip
//!
//! Random-access file emulation over HTTP Range requests, for ZIP archive
//! readers.
//!
//! ZIP archives are designed to be read from the end: the central directory
//! sits at the tail and points at each entry's data. An archive reader that
//! can seek therefore only needs a handful of small windows of the file,
//! which makes remote archives practical if the "file" can be backed by
//! ranged HTTP GETs instead of a local descriptor. This crate provides that
//! backing: a virtual file table (open, read, write, tell, seek, close,
//! error query) implemented over HTTP Range requests, so an archive reader
//! can open a remote ZIP's central directory and individual entries without
//! downloading the whole archive first.
//!
//! ## Design
//!
//! - [`VirtualFile`] is the file table the archive reader drives.
//! - [`HttpRangeFile`] implements it remotely: one metadata probe at open
//!   time learns the resource length, then each read becomes exactly one
//!   ranged GET. No caching, no read-ahead, no automatic retry: the handle
//!   is nothing but an offset, a length, and the last error.
//! - [`LocalFile`] implements the same table over the local filesystem.
//! - [`VfsReader`] adapts any backend to `std::io::Read + Seek` for Rust
//!   archive crates.
//!
//! Everything is synchronous and blocking; one handle serves one logical
//! reader at a time. Independent handles share nothing.
//!
//! ## Example
//!
//! ```no_run
//! use urlzip::{HttpRangeFile, SeekOrigin, VirtualFile};
//!
//! fn main() -> Result<(), urlzip::VfsError> {
//!     let mut file = HttpRangeFile::open("https://example.com/archive.zip")?;
//!
//!     // Fetch the last 22 bytes, where an empty-comment ZIP keeps its
//!     // end-of-central-directory record.
//!     file.seek(22, SeekOrigin::End)?;
//!     let mut eocd = [0u8; 22];
//!     file.read(&mut eocd)?;
//!     assert_eq!(&eocd[..4], b"PK\x05\x06");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod transport;
pub mod vfs;

pub use error::{LastError, VfsError, NO_ERROR};
pub use transport::{HttpTransport, RangeTransport, TransportConfig, TransportError};
pub use vfs::{HttpRangeFile, LocalFile, SeekOrigin, VfsReader, VirtualFile};
