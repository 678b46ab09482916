//! Local IPC transports.
//!
//! One transport handle is opened per process and held for the process
//! lifetime. There is no reconnect on mid-session failure; sends on a
//! broken transport simply fail their deadline. The concrete endpoint is
//! selected by target family: a Unix domain stream socket on POSIX, a
//! named pipe on Windows.

use std::io;

use crate::config::ClientOptions;
use crate::error::ClientResult;

/// An abstract non-blocking byte sink.
///
/// `try_write` must never block: it writes whatever the kernel will take
/// right now and reports `WouldBlock` otherwise. The deadline policy on
/// top of it lives in the frame sink.
pub trait Transport: Send {
    /// Attempt one write of `buf`, returning the number of bytes accepted.
    fn try_write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

/// Open the platform-default transport for the configured endpoint.
pub fn open_default(options: &ClientOptions) -> ClientResult<Box<dyn Transport>> {
    #[cfg(unix)]
    {
        Ok(Box::new(unix::UnixTransport::connect(&options.socket_path)?))
    }
    #[cfg(windows)]
    {
        Ok(Box::new(windows::PipeTransport::open(
            &options.named_pipe_path,
        )?))
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = options;
        Err(crate::error::ClientError::UnsupportedPlatform)
    }
}

#[cfg(unix)]
pub mod unix {
    use std::io::{self, Write};
    use std::os::unix::net::UnixStream;
    use std::path::{Path, PathBuf};

    use super::Transport;

    /// A Unix domain stream socket in non-blocking mode.
    pub struct UnixTransport {
        stream: UnixStream,
        path: PathBuf,
    }

    impl UnixTransport {
        /// Connect to the daemon socket and switch to non-blocking mode.
        pub fn connect(path: &Path) -> io::Result<Self> {
            let stream = UnixStream::connect(path)?;
            stream.set_nonblocking(true)?;
            tracing::info!(path = %path.display(), "connected to daemon socket");
            Ok(Self {
                stream,
                path: path.to_owned(),
            })
        }
    }

    impl Transport for UnixTransport {
        fn try_write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.stream.write(buf)
        }
    }

    impl std::fmt::Debug for UnixTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("UnixTransport")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(windows)]
pub mod windows {
    use std::fs::{File, OpenOptions};
    use std::io::{self, Write};

    use super::Transport;

    /// A named pipe opened for writing.
    pub struct PipeTransport {
        pipe: File,
        path: String,
    }

    impl PipeTransport {
        pub fn open(path: &str) -> io::Result<Self> {
            let pipe = OpenOptions::new().write(true).open(path)?;
            tracing::info!(path, "opened daemon named pipe");
            Ok(Self {
                pipe,
                path: path.to_string(),
            })
        }
    }

    impl Transport for PipeTransport {
        fn try_write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.pipe.write(buf)
        }
    }

    impl std::fmt::Debug for PipeTransport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("PipeTransport")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::io::Read;
    use std::os::unix::net::UnixListener;

    use super::unix::UnixTransport;
    use super::Transport;

    #[test]
    fn test_connect_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocd.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let mut transport = UnixTransport::connect(&path).unwrap();
        let n = transport.try_write(b"hello daemon").unwrap();
        assert!(n > 0);

        let (mut conn, _) = listener.accept().unwrap();
        let mut received = vec![0u8; n];
        conn.read_exact(&mut received).unwrap();
        assert_eq!(&received, &b"hello daemon"[..n]);
    }

    #[test]
    fn test_connect_missing_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sock");
        assert!(UnixTransport::connect(&path).is_err());
    }
}
