//! Local-filesystem implementation of the virtual file table.
//!
//! Exists so the same archive-reading code can run against a local path or
//! a URL; it applies the same bounds discipline as the remote handle rather
//! than POSIX's looser rules (no seeking past EOF, no short reads).

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::{SeekOrigin, VirtualFile};
use crate::error::{LastError, VfsError};

/// A read-only random-access view of a local file.
#[derive(Debug)]
pub struct LocalFile {
    // None once the handle is closed.
    file: Option<File>,
    size: u64,
    offset: u64,
    last_error: Option<LastError>,
}

impl LocalFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VfsError> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            file: Some(file),
            size,
            offset: 0,
            last_error: None,
        })
    }

    fn fail(&mut self, err: VfsError) -> VfsError {
        self.last_error = Some(LastError::from(&err));
        err
    }
}

impl VirtualFile for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, VfsError> {
        let n = buf.len() as u64;
        if n == 0 {
            self.last_error = None;
            return Ok(0);
        }

        if self.offset + n > self.size {
            return Err(self.fail(VfsError::ReadOutOfBounds {
                offset: self.offset,
                len: n,
                size: self.size,
            }));
        }

        let offset = self.offset;
        let result = match self.file.as_mut() {
            Some(file) => file
                .seek(SeekFrom::Start(offset))
                .and_then(|_| file.read_exact(buf))
                .map_err(VfsError::from),
            None => Err(VfsError::Closed),
        };

        match result {
            Ok(()) => {
                self.offset += n;
                self.last_error = None;
                Ok(buf.len())
            }
            Err(e) => Err(self.fail(e)),
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
        self.file = None;
        Ok(())
    }

    fn len(&self) -> u64 {
        self.size
    }

    fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }
}
