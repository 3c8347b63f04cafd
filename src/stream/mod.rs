//! stream
//!
//! Ownership-tagged wrappers over byte resources.
//!
//! # Architecture
//!
//! [`OwnershipStream`] decorates an externally supplied resource (a file, an
//! in-memory cursor, a socket) and forwards every read, write, seek, and flush
//! to it, in both the std blocking form and the tokio async form. The wrapper
//! carries an [`Ownership`] flag that decides what release means:
//!
//! - `Owned` - releasing the wrapper closes the wrapped resource, then drops it
//! - `NotOwned` - releasing the wrapper only drops its handle
//!
//! To keep using a resource after the wrapper is released, wrap `&mut R`
//! with `NotOwned`, or reclaim it with [`OwnershipStream::into_inner`].
//!
//! [`ReadOnlyStream`] additionally rejects every mutating operation with
//! [`StreamError::NotSupported`], whatever its state or ownership.
//!
//! # States
//!
//! - `Active` - operations are forwarded unchanged
//! - `Released` - every operation except release fails with
//!   [`StreamError::ObjectDisposed`]; capability queries return `false`
//!
//! Release is explicit and idempotent, and `Drop` performs it best-effort.
//!
//! # Cancellation
//!
//! Async operations are futures. Dropping a pending future cancels it in the
//! wrapped resource; the wrapper adds no state of its own to a pending call.

mod ownership;
mod read_only;

pub use ownership::OwnershipStream;
pub use read_only::ReadOnlyStream;

use std::fs::File;
use std::io::{self, Cursor, Write};

use thiserror::Error;

/// Errors from stream wrappers.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The wrapper was already released.
    #[error("cannot access a released {0}")]
    ObjectDisposed(&'static str),

    /// The operation is not allowed on this wrapper.
    #[error("{0} is not supported by a read-only stream")]
    NotSupported(&'static str),

    /// The wrapped resource failed.
    #[error("stream i/o error: {0}")]
    Io(#[from] io::Error),
}

impl StreamError {
    /// Recover a wrapper error carried inside an `io::Error`.
    ///
    /// The std and tokio I/O traits can only return `io::Error`, so wrapper
    /// failures raised through them are boxed. Errors from the wrapped
    /// resource itself are passed through unboxed and yield `None`.
    pub fn from_io(err: &io::Error) -> Option<&StreamError> {
        err.get_ref()?.downcast_ref::<StreamError>()
    }

    /// True for [`StreamError::ObjectDisposed`].
    pub fn is_disposed(&self) -> bool {
        matches!(self, StreamError::ObjectDisposed(_))
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Io(err) => err,
            StreamError::NotSupported(_) => io::Error::new(io::ErrorKind::Unsupported, err),
            StreamError::ObjectDisposed(_) => io::Error::other(err),
        }
    }
}

/// Whether releasing a wrapper also releases what it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The wrapper closes the resource on release.
    Owned,
    /// The wrapper leaves the resource alone on release.
    NotOwned,
}

/// Lifecycle state of a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Operations are forwarded to the resource.
    Active,
    /// Operations fail with [`StreamError::ObjectDisposed`].
    Released,
}

/// A byte resource that can be wrapped by [`OwnershipStream`].
///
/// Reading, writing, and seeking come from the std `Read`/`Write`/`Seek` and
/// tokio `AsyncRead`/`AsyncWrite`/`AsyncSeek` traits. This trait adds the
/// operations those traits lack.
pub trait ByteResource {
    /// Release the resource. Called once, by an owning wrapper.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Total length in bytes.
    fn length(&mut self) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "resource has no known length",
        ))
    }

    /// Truncate or extend the resource.
    fn set_length(&mut self, _len: u64) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "resource cannot be resized",
        ))
    }

    /// Whether reads are supported.
    fn can_read(&self) -> bool {
        true
    }

    /// Whether writes are supported.
    fn can_write(&self) -> bool {
        true
    }

    /// Whether seeks are supported.
    fn can_seek(&self) -> bool {
        true
    }
}

impl ByteResource for File {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }

    fn length(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn set_length(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

impl ByteResource for Cursor<Vec<u8>> {
    fn length(&mut self) -> io::Result<u64> {
        Ok(self.get_ref().len() as u64)
    }

    fn set_length(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "length exceeds addressable memory")
        })?;
        self.get_mut().resize(len, 0);
        Ok(())
    }
}

impl ByteResource for Cursor<&[u8]> {
    fn length(&mut self) -> io::Result<u64> {
        Ok(self.get_ref().len() as u64)
    }

    fn can_write(&self) -> bool {
        false
    }
}

impl<R: ByteResource + ?Sized> ByteResource for &mut R {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn length(&mut self) -> io::Result<u64> {
        (**self).length()
    }

    fn set_length(&mut self, len: u64) -> io::Result<()> {
        (**self).set_length(len)
    }

    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn can_write(&self) -> bool {
        (**self).can_write()
    }

    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }
}

impl<R: ByteResource + ?Sized> ByteResource for Box<R> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn length(&mut self) -> io::Result<u64> {
        (**self).length()
    }

    fn set_length(&mut self, len: u64) -> io::Result<()> {
        (**self).set_length(len)
    }

    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn can_write(&self) -> bool {
        (**self).can_write()
    }

    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_errors_survive_io_boxing() {
        let io_err: io::Error = StreamError::ObjectDisposed("OwnershipStream").into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
        assert!(StreamError::from_io(&io_err).is_some_and(StreamError::is_disposed));

        let io_err: io::Error = StreamError::NotSupported("write").into();
        assert_eq!(io_err.kind(), io::ErrorKind::Unsupported);
        assert!(matches!(
            StreamError::from_io(&io_err),
            Some(StreamError::NotSupported("write"))
        ));
    }

    #[test]
    fn resource_errors_pass_through_unboxed() {
        let original = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        let io_err: io::Error = StreamError::Io(original).into();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert!(StreamError::from_io(&io_err).is_none());
    }

    #[test]
    fn error_display_formatting() {
        assert_eq!(
            StreamError::ObjectDisposed("OwnershipStream").to_string(),
            "cannot access a released OwnershipStream"
        );
        assert_eq!(
            StreamError::NotSupported("set_length").to_string(),
            "set_length is not supported by a read-only stream"
        );
    }

    #[test]
    fn cursor_length_and_resize() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        assert_eq!(cursor.length().unwrap(), 3);
        cursor.set_length(5).unwrap();
        assert_eq!(cursor.get_ref(), &vec![1, 2, 3, 0, 0]);
        cursor.set_length(1).unwrap();
        assert_eq!(cursor.get_ref(), &vec![1]);
    }

    #[test]
    fn borrowed_cursor_is_not_writable() {
        let bytes = [1u8, 2];
        let mut cursor = Cursor::new(&bytes[..]);
        assert!(!cursor.can_write());
        assert_eq!(cursor.length().unwrap(), 2);
        assert_eq!(
            cursor.set_length(0).unwrap_err().kind(),
            io::ErrorKind::Unsupported
        );
    }
}
