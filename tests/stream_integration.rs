//! Integration tests for the stream wrappers over real files and async pipes.

use std::fs;
use std::io;

use tempfile::TempDir;

use seqscope::config::Config;
use seqscope::scope::Scope;
use seqscope::stream::{Ownership, OwnershipStream, ReadOnlyStream, ResourceState, StreamError};

fn disposed(err: &io::Error) -> bool {
    StreamError::from_io(err).is_some_and(StreamError::is_disposed)
}

mod files {
    use super::*;
    use std::fs::{File, OpenOptions};
    use std::io::{Read, Seek, SeekFrom, Write};

    fn open_rw(path: &std::path::Path) -> File {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .unwrap()
    }

    #[test]
    fn owned_file_is_written_and_released() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("owned.bin");

        let mut stream = OwnershipStream::new(open_rw(&path), Ownership::Owned);
        stream.write_all(b"hello world").unwrap();
        assert_eq!(stream.length().unwrap(), 11);

        stream.set_length(5).unwrap();
        assert_eq!(stream.length().unwrap(), 5);

        stream.release().unwrap();
        assert_eq!(stream.state(), ResourceState::Released);
        assert!(disposed(&stream.write(b"!").unwrap_err()));

        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn not_owned_file_survives_release() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shared.txt");
        let mut file = open_rw(&path);

        {
            let mut stream = OwnershipStream::new(&mut file, Ownership::NotOwned);
            stream.write_all(b"first").unwrap();
            stream.release().unwrap();
            assert!(disposed(&stream.flush().unwrap_err()));
        }

        file.write_all(b" second").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "first second");
    }

    #[test]
    fn read_only_file_rejects_writes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.txt");
        fs::write(&path, "0123456789").unwrap();

        let mut stream = ReadOnlyStream::new(File::open(&path).unwrap());
        assert!(!stream.can_write());
        assert_eq!(stream.length().unwrap(), 10);

        stream.set_position(4).unwrap();
        let mut buf = [0u8; 3];
        stream.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"456");

        let err = stream.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert!(matches!(
            stream.set_length(0),
            Err(StreamError::NotSupported(_))
        ));

        stream.release().unwrap();
        assert_eq!(stream.write(b"x").unwrap_err().kind(), io::ErrorKind::Unsupported);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0123456789");
    }

    #[test]
    fn copy_to_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.bin");
        let dest = temp.path().join("dest.bin");
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        fs::write(&source, &payload).unwrap();

        let config = Config::from_toml_str("[stream]\ncopy_buffer_size = 1000\n").unwrap();
        let mut stream = OwnershipStream::with_settings(
            File::open(&source).unwrap(),
            Ownership::Owned,
            config.stream,
        );
        let mut out = File::create(&dest).unwrap();
        assert_eq!(stream.copy_to(&mut out).unwrap(), 10_000);
        drop(out);

        assert_eq!(fs::read(&dest).unwrap(), payload);
    }

    #[test]
    fn scope_releases_stream_on_early_exit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scoped.txt");

        let write_then_fail = |path: &std::path::Path| -> Result<(), io::Error> {
            let mut stream = OwnershipStream::new(open_rw(path), Ownership::Owned);
            stream.write_all(b"partial")?;
            let _guard = Scope::dropping(stream);
            Err(io::Error::other("aborted"))
        };

        assert!(write_then_fail(&path).is_err());
        assert_eq!(fs::read(&path).unwrap(), b"partial");
    }
}

mod async_forwarding {
    use super::*;
    use std::io::Cursor;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use seqscope::stream::ByteResource;
    use tokio::io::{
        AsyncRead, AsyncReadExt, AsyncSeekExt, AsyncWrite, AsyncWriteExt, DuplexStream, ReadBuf,
    };

    /// One end of an in-memory pipe; reads stay pending until the other end writes.
    struct Pipe(DuplexStream);

    impl ByteResource for Pipe {
        fn can_seek(&self) -> bool {
            false
        }
    }

    impl AsyncRead for Pipe {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Pin::new(&mut self.0).poll_read(cx, buf)
        }
    }

    impl AsyncWrite for Pipe {
        fn poll_write(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Pin::new(&mut self.0).poll_write(cx, buf)
        }

        fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Pin::new(&mut self.0).poll_flush(cx)
        }

        fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Pin::new(&mut self.0).poll_shutdown(cx)
        }
    }

    #[tokio::test]
    async fn async_operations_are_forwarded() {
        let mut stream = OwnershipStream::new(Cursor::new(Vec::new()), Ownership::Owned);
        stream.write_all(b"async bytes").await.unwrap();
        stream.flush().await.unwrap();

        stream.seek(io::SeekFrom::Start(6)).await.unwrap();
        let mut tail = String::new();
        stream.read_to_string(&mut tail).await.unwrap();
        assert_eq!(tail, "bytes");
    }

    #[tokio::test]
    async fn async_use_after_release_fails() {
        let mut stream = OwnershipStream::new(Cursor::new(b"abc".to_vec()), Ownership::Owned);
        stream.release().unwrap();

        let mut buf = [0u8; 3];
        assert!(disposed(&stream.read(&mut buf).await.unwrap_err()));
        assert!(disposed(&stream.write_all(b"x").await.unwrap_err()));
        assert!(disposed(&stream.flush().await.unwrap_err()));
        assert!(disposed(&stream.seek(io::SeekFrom::Start(0)).await.unwrap_err()));
        assert!(stream
            .copy_to_async(&mut Vec::new())
            .await
            .unwrap_err()
            .is_disposed());
    }

    #[tokio::test]
    async fn read_only_rejects_async_writes() {
        let mut stream = ReadOnlyStream::new(Cursor::new(b"abc".to_vec()));
        let err = stream.write_all(b"x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);

        let mut text = String::new();
        stream.read_to_string(&mut text).await.unwrap();
        assert_eq!(text, "abc");
        stream.flush().await.unwrap();
    }

    #[tokio::test]
    async fn read_only_rejects_shutdown() {
        let (client, mut server) = tokio::io::duplex(64);
        let mut stream = ReadOnlyStream::new(Pipe(client));

        let err = stream.shutdown().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert_eq!(stream.state(), ResourceState::Active);

        server.write_all(b"ping").await.unwrap();
        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        stream.release().unwrap();
        let err = stream.shutdown().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn async_vectored_writes() {
        let slices = [io::IoSlice::new(b"ab"), io::IoSlice::new(b"cd")];

        let mut stream = OwnershipStream::new(Cursor::new(Vec::new()), Ownership::Owned);
        assert!(stream.is_write_vectored());
        assert_eq!(stream.write_vectored(&slices).await.unwrap(), 4);
        assert_eq!(stream.get_ref().unwrap().get_ref(), &b"abcd".to_vec());

        stream.release().unwrap();
        assert!(!stream.is_write_vectored());
        assert!(disposed(&stream.write_vectored(&slices).await.unwrap_err()));

        let mut read_only = ReadOnlyStream::new(Cursor::new(Vec::new()));
        assert!(!read_only.is_write_vectored());
        let err = read_only.write_vectored(&slices).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn copy_to_async_with_small_buffer() {
        let config = Config::from_toml_str("[stream]\ncopy_buffer_size = 3\n").unwrap();
        let payload = b"the quick brown fox".to_vec();
        let mut stream = OwnershipStream::with_settings(
            Cursor::new(payload.clone()),
            Ownership::NotOwned,
            config.stream,
        );

        let mut out: Vec<u8> = Vec::new();
        let copied = stream.copy_to_async(&mut out).await.unwrap();
        assert_eq!(copied, payload.len() as u64);
        assert_eq!(out, payload);
    }

    #[tokio::test]
    async fn cancelled_read_leaves_stream_usable() {
        let (client, mut server) = tokio::io::duplex(64);
        let mut stream = OwnershipStream::new(Pipe(client), Ownership::Owned);
        assert!(!stream.can_seek());

        let mut buf = [0u8; 4];
        tokio::select! {
            biased;
            _ = stream.read(&mut buf) => panic!("read should be pending with no data"),
            _ = std::future::ready(()) => {}
        }
        assert_eq!(stream.state(), ResourceState::Active);

        server.write_all(b"ping").await.unwrap();
        stream.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        stream.write_all(b"pong").await.unwrap();
        let mut reply = [0u8; 4];
        server.read_exact(&mut reply).await.unwrap();
        assert_eq!(&reply, b"pong");
    }

    #[tokio::test]
    async fn owned_release_closes_pipe() {
        let (client, mut server) = tokio::io::duplex(64);
        let mut stream = OwnershipStream::new(Pipe(client), Ownership::Owned);
        stream.release().unwrap();

        // The client end was dropped, so the server sees end of stream.
        let mut rest = Vec::new();
        assert_eq!(server.read_to_end(&mut rest).await.unwrap(), 0);
    }
}
