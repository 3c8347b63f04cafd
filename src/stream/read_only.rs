//! stream::read_only
//!
//! A wrapper that refuses every mutating operation.

use std::io::{self, IoSlice, IoSliceMut, Read, Seek, SeekFrom, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite, ReadBuf};

use super::{ByteResource, Ownership, OwnershipStream, ResourceState, StreamError};

/// Read-only view of a byte resource.
///
/// Reads, seeks, and flushes are forwarded like [`OwnershipStream`]. Writes,
/// resizes, and async shutdown fail with [`StreamError::NotSupported`] in
/// every state, even after release, and regardless of ownership. Shutting
/// down the write half of a resource this wrapper may not write to would
/// change the resource for its other users.
#[derive(Debug)]
pub struct ReadOnlyStream<R: ByteResource> {
    inner: OwnershipStream<R>,
}

impl<R: ByteResource> ReadOnlyStream<R> {
    /// Wrap `inner` without taking ownership of it.
    pub fn new(inner: R) -> Self {
        Self::with_ownership(inner, Ownership::NotOwned)
    }

    /// Wrap `inner`; an `Owned` wrapper closes it on release.
    pub fn with_ownership(inner: R, ownership: Ownership) -> Self {
        Self {
            inner: OwnershipStream::new(inner, ownership).named("ReadOnlyStream"),
        }
    }

    /// Whether release closes the wrapped resource.
    pub fn ownership(&self) -> Ownership {
        self.inner.ownership()
    }

    /// `Active` until [`release`](Self::release), then `Released`.
    pub fn state(&self) -> ResourceState {
        self.inner.state()
    }

    /// Shorthand for `state() == ResourceState::Released`.
    pub fn is_released(&self) -> bool {
        self.inner.is_released()
    }

    /// Borrow the wrapped resource. There is no mutable counterpart.
    ///
    /// # Errors
    ///
    /// [`StreamError::ObjectDisposed`] once released.
    pub fn get_ref(&self) -> Result<&R, StreamError> {
        self.inner.get_ref()
    }

    /// The resource's read capability, or `false` once released.
    pub fn can_read(&self) -> bool {
        self.inner.can_read()
    }

    /// Always `false`.
    pub fn can_write(&self) -> bool {
        false
    }

    /// The resource's seek capability, or `false` once released.
    pub fn can_seek(&self) -> bool {
        self.inner.can_seek()
    }

    /// Length of the wrapped resource in bytes.
    pub fn length(&mut self) -> Result<u64, StreamError> {
        self.inner.length()
    }

    /// Always fails with [`StreamError::NotSupported`].
    pub fn set_length(&mut self, _len: u64) -> Result<(), StreamError> {
        Err(StreamError::NotSupported("set_length"))
    }

    /// Release the wrapper, closing the resource if owned.
    ///
    /// See [`OwnershipStream::release`].
    pub fn release(&mut self) -> Result<(), StreamError> {
        self.inner.release()
    }
}

impl<R: ByteResource + Seek> ReadOnlyStream<R> {
    /// Current position in the wrapped resource.
    pub fn position(&mut self) -> Result<u64, StreamError> {
        self.inner.position()
    }

    /// Move to an absolute position in the wrapped resource.
    pub fn set_position(&mut self, position: u64) -> Result<(), StreamError> {
        self.inner.set_position(position)
    }
}

impl<R: ByteResource + Read> ReadOnlyStream<R> {
    /// Copy the rest of the wrapped resource into `dest`.
    pub fn copy_to<W: Write + ?Sized>(&mut self, dest: &mut W) -> Result<u64, StreamError> {
        self.inner.copy_to(dest)
    }
}

impl<R: ByteResource + AsyncRead + Unpin> ReadOnlyStream<R> {
    /// Asynchronously copy the rest of the wrapped resource into `dest`.
    pub async fn copy_to_async<W>(&mut self, dest: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.inner.copy_to_async(dest).await
    }
}

impl<R: ByteResource + Read> Read for ReadOnlyStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        self.inner.read_vectored(bufs)
    }
}

impl<R: ByteResource + Write> Write for ReadOnlyStream<R> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(StreamError::NotSupported("write").into())
    }

    fn write_vectored(&mut self, _bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        Err(StreamError::NotSupported("write").into())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<R: ByteResource + Seek> Seek for ReadOnlyStream<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<R: ByteResource + AsyncRead + Unpin> AsyncRead for ReadOnlyStream<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_read(cx, buf)
    }
}

impl<R: ByteResource + AsyncWrite + Unpin> AsyncWrite for ReadOnlyStream<R> {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(StreamError::NotSupported("write").into()))
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _bufs: &[IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(StreamError::NotSupported("write").into()))
    }

    fn is_write_vectored(&self) -> bool {
        false
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Err(StreamError::NotSupported("shutdown").into()))
    }
}

impl<R: ByteResource + AsyncSeek + Unpin> AsyncSeek for ReadOnlyStream<R> {
    fn start_seek(self: Pin<&mut Self>, position: SeekFrom) -> io::Result<()> {
        Pin::new(&mut self.get_mut().inner).start_seek(position)
    }

    fn poll_complete(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        Pin::new(&mut self.get_mut().inner).poll_complete(cx)
    }
}
