//! stream::ownership
//!
//! The forwarding wrapper and its release logic.

use std::io::{self, IoSlice, IoSliceMut, Read, Seek, SeekFrom, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite, BufReader, ReadBuf};

use super::{ByteResource, Ownership, ResourceState, StreamError};
use crate::config::StreamSettings;

/// A byte resource paired with an ownership flag.
///
/// While active, every operation is forwarded unchanged to the wrapped
/// resource. After [`release`](Self::release) every operation fails with
/// [`StreamError::ObjectDisposed`].
///
/// # Example
///
/// ```
/// use std::io::{Cursor, Read};
/// use seqscope::stream::{Ownership, OwnershipStream};
///
/// let mut cursor = Cursor::new(b"abc".to_vec());
/// let mut stream = OwnershipStream::new(&mut cursor, Ownership::NotOwned);
///
/// let mut text = String::new();
/// stream.read_to_string(&mut text)?;
/// stream.release()?;
/// assert!(stream.read(&mut [0u8; 1]).is_err());
/// drop(stream);
///
/// // Not owned: the cursor is still usable.
/// assert_eq!(cursor.position(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct OwnershipStream<R: ByteResource> {
    /// The wrapped resource. `None` once released.
    inner: Option<R>,
    ownership: Ownership,
    settings: StreamSettings,
    /// Type name reported in disposal errors.
    name: &'static str,
}

impl<R: ByteResource> OwnershipStream<R> {
    /// Wrap `inner` with default settings.
    pub fn new(inner: R, ownership: Ownership) -> Self {
        Self::with_settings(inner, ownership, StreamSettings::default())
    }

    /// Wrap `inner` with explicit settings.
    pub fn with_settings(inner: R, ownership: Ownership, settings: StreamSettings) -> Self {
        Self {
            inner: Some(inner),
            ownership,
            settings,
            name: "OwnershipStream",
        }
    }

    pub(crate) fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Whether release closes the wrapped resource.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Settings used by the copy operations.
    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    /// `Active` until [`release`](Self::release), then `Released`.
    pub fn state(&self) -> ResourceState {
        if self.inner.is_some() {
            ResourceState::Active
        } else {
            ResourceState::Released
        }
    }

    /// Shorthand for `state() == ResourceState::Released`.
    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrow the wrapped resource.
    ///
    /// # Errors
    ///
    /// [`StreamError::ObjectDisposed`] once released.
    pub fn get_ref(&self) -> Result<&R, StreamError> {
        self.inner.as_ref().ok_or(StreamError::ObjectDisposed(self.name))
    }

    /// Mutably borrow the wrapped resource.
    ///
    /// # Errors
    ///
    /// [`StreamError::ObjectDisposed`] once released.
    pub fn get_mut(&mut self) -> Result<&mut R, StreamError> {
        self.inner
            .as_mut()
            .ok_or(StreamError::ObjectDisposed(self.name))
    }

    /// Take the resource back without closing it, whatever the ownership.
    ///
    /// # Errors
    ///
    /// [`StreamError::ObjectDisposed`] if already released.
    pub fn into_inner(mut self) -> Result<R, StreamError> {
        self.inner.take().ok_or(StreamError::ObjectDisposed(self.name))
    }

    /// The resource's read capability, or `false` once released.
    pub fn can_read(&self) -> bool {
        self.inner.as_ref().is_some_and(R::can_read)
    }

    /// The resource's write capability, or `false` once released.
    pub fn can_write(&self) -> bool {
        self.inner.as_ref().is_some_and(R::can_write)
    }

    /// The resource's seek capability, or `false` once released.
    pub fn can_seek(&self) -> bool {
        self.inner.as_ref().is_some_and(R::can_seek)
    }

    /// Length of the wrapped resource in bytes.
    pub fn length(&mut self) -> Result<u64, StreamError> {
        Ok(self.get_mut()?.length()?)
    }

    /// Resize the wrapped resource.
    pub fn set_length(&mut self, len: u64) -> Result<(), StreamError> {
        Ok(self.get_mut()?.set_length(len)?)
    }

    /// Release the wrapper.
    ///
    /// If the wrapper owns the resource, the resource is closed and dropped;
    /// otherwise only the wrapper's handle is dropped. Later calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns the resource's close error. The wrapper is released even then.
    pub fn release(&mut self) -> Result<(), StreamError> {
        let Some(mut inner) = self.inner.take() else {
            return Ok(());
        };

        let owned = self.ownership == Ownership::Owned;
        tracing::debug!(stream = self.name, owned, "releasing stream");
        if owned {
            inner.close()?;
        }
        Ok(())
    }
}

impl<R: ByteResource + Seek> OwnershipStream<R> {
    /// Current position in the wrapped resource.
    pub fn position(&mut self) -> Result<u64, StreamError> {
        Ok(self.get_mut()?.stream_position()?)
    }

    /// Move to an absolute position in the wrapped resource.
    pub fn set_position(&mut self, position: u64) -> Result<(), StreamError> {
        self.get_mut()?.seek(SeekFrom::Start(position))?;
        Ok(())
    }
}

impl<R: ByteResource + Read> OwnershipStream<R> {
    /// Copy the rest of the wrapped resource into `dest`, in chunks of
    /// `copy_buffer_size` bytes. Returns the number of bytes copied.
    pub fn copy_to<W: Write + ?Sized>(&mut self, dest: &mut W) -> Result<u64, StreamError> {
        let mut buf = vec![0u8; self.settings.copy_buffer_size.max(1)];
        let inner = self.get_mut()?;
        let mut copied = 0u64;
        loop {
            let read = match inner.read(&mut buf) {
                Ok(0) => return Ok(copied),
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            dest.write_all(&buf[..read])?;
            copied += read as u64;
        }
    }
}

impl<R: ByteResource + AsyncRead + Unpin> OwnershipStream<R> {
    /// Asynchronously copy the rest of the wrapped resource into `dest`.
    ///
    /// Dropping the returned future cancels the copy; bytes already written
    /// to `dest` stay written.
    pub async fn copy_to_async<W>(&mut self, dest: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        use tokio::io::AsyncWriteExt;

        let capacity = self.settings.copy_buffer_size.max(1);
        let inner = self.get_mut()?;
        let mut reader = BufReader::with_capacity(capacity, inner);
        let copied = tokio::io::copy_buf(&mut reader, dest).await?;
        dest.flush().await?;
        Ok(copied)
    }
}

impl<R: ByteResource> Drop for OwnershipStream<R> {
    fn drop(&mut self) {
        // Best-effort: errors on drop are logged, not propagated.
        if let Err(err) = self.release() {
            tracing::debug!(stream = self.name, error = %err, "release on drop failed");
        }
    }
}

impl<R: ByteResource + Read> Read for OwnershipStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.get_mut()?.read(buf)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        self.get_mut()?.read_vectored(bufs)
    }
}

impl<R: ByteResource + Write> Write for OwnershipStream<R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.get_mut()?.write(buf)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        self.get_mut()?.write_vectored(bufs)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.get_mut()?.flush()
    }
}

impl<R: ByteResource + Seek> Seek for OwnershipStream<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.get_mut()?.seek(pos)
    }
}

impl<R: ByteResource + AsyncRead + Unpin> AsyncRead for OwnershipStream<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match Pin::into_inner(self).get_mut() {
            Ok(inner) => Pin::new(inner).poll_read(cx, buf),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }
}

impl<R: ByteResource + AsyncWrite + Unpin> AsyncWrite for OwnershipStream<R> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match Pin::into_inner(self).get_mut() {
            Ok(inner) => Pin::new(inner).poll_write(cx, buf),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        match Pin::into_inner(self).get_mut() {
            Ok(inner) => Pin::new(inner).poll_write_vectored(cx, bufs),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }

    fn is_write_vectored(&self) -> bool {
        self.inner.as_ref().is_some_and(R::is_write_vectored)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match Pin::into_inner(self).get_mut() {
            Ok(inner) => Pin::new(inner).poll_flush(cx),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match Pin::into_inner(self).get_mut() {
            Ok(inner) => Pin::new(inner).poll_shutdown(cx),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }
}

impl<R: ByteResource + AsyncSeek + Unpin> AsyncSeek for OwnershipStream<R> {
    fn start_seek(self: Pin<&mut Self>, position: SeekFrom) -> io::Result<()> {
        Pin::new(Pin::into_inner(self).get_mut()?).start_seek(position)
    }

    fn poll_complete(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        match Pin::into_inner(self).get_mut() {
            Ok(inner) => Pin::new(inner).poll_complete(cx),
            Err(err) => Poll::Ready(Err(err.into())),
        }
    }
}
