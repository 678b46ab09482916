//! Session lifecycle.
//!
//! One session exists per process, created lazily by the first `init` call
//! and torn down by an explicit, best-effort `shutdown`. The handle is
//! cheap to clone and is meant to be passed to collaborators; `global()`
//! exists as a compatibility shim for code that cannot thread a handle
//! through.
//!
//! A session moves Opening -> Ready -> Closed (the Uninitialized state of
//! the protocol is the empty singleton slot before the first init). Any
//! send may fail in Ready without changing state; Closed is terminal and
//! every operation invoked there is a no-op returning failure.

use std::sync::Arc;

use bytes::Bytes;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use ocdaemon_types::{MessageType, PROT_VERSION};
use ocdaemon_wire::{string, FloatWidth};

use crate::config::ClientOptions;
use crate::error::{ClientError, ClientResult};
use crate::sink::{DelegateSink, DirectSink, ExtensionDelegate, FrameSink};
use crate::transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Opening,
    Ready,
    Closed,
}

/// State shared by all clones of the handle.
///
/// Frame assembly, the sequence counter, and the transport write all sit
/// behind this one mutex so concurrent callers cannot interleave bytes of
/// adjacent frames.
struct SessionInner {
    state: SessionState,
    float_width: FloatWidth,
    sink: Box<dyn FrameSink>,
}

/// Handle to the process-wide daemon session.
#[derive(Clone)]
pub struct DaemonClient {
    inner: Arc<Mutex<SessionInner>>,
}

static CLIENT: OnceCell<DaemonClient> = OnceCell::new();

/// The process-wide session handle, if `init` has succeeded.
pub fn global() -> Option<DaemonClient> {
    CLIENT.get().cloned()
}

impl DaemonClient {
    /// Initialize the process-wide session.
    ///
    /// Idempotent: the first call opens the transport, probes float width,
    /// and performs the REQ_INIT handshake; subsequent calls return the
    /// existing handle and ignore their options.
    pub fn init(options: ClientOptions) -> ClientResult<DaemonClient> {
        CLIENT.get_or_try_init(|| Self::connect(&options)).cloned()
    }

    /// Initialize with frame delivery bypassed to a co-resident native
    /// extension. No transport is opened.
    pub fn init_with_delegate(
        options: ClientOptions,
        delegate: Box<dyn ExtensionDelegate>,
    ) -> ClientResult<DaemonClient> {
        CLIENT
            .get_or_try_init(|| {
                Self::open(
                    &options,
                    FloatWidth::probe(),
                    Box::new(DelegateSink::new(delegate)),
                )
            })
            .cloned()
    }

    fn connect(options: &ClientOptions) -> ClientResult<DaemonClient> {
        let transport = transport::open_default(options)?;
        let sink = DirectSink::new(transport, options.send_budget());
        let float_width = sink.float_width();
        Self::open(options, float_width, Box::new(sink))
    }

    fn open(
        options: &ClientOptions,
        float_width: FloatWidth,
        sink: Box<dyn FrameSink>,
    ) -> ClientResult<DaemonClient> {
        let client = DaemonClient {
            inner: Arc::new(Mutex::new(SessionInner {
                state: SessionState::Opening,
                float_width,
                sink,
            })),
        };

        let mut inner = client.inner.lock();
        let mut payload = vec![PROT_VERSION];
        string::put_str(&mut payload, &options.runtime_version);
        string::put_str(&mut payload, env!("CARGO_PKG_VERSION"));
        if !inner.sink.submit(MessageType::ReqInit, Bytes::from(payload)) {
            return Err(ClientError::Handshake);
        }
        inner.state = SessionState::Ready;
        drop(inner);

        tracing::info!("daemon session ready");
        Ok(client)
    }

    /// Build a payload under the session lock and deliver it.
    ///
    /// Returns false without calling `build` when the session is not
    /// Ready.
    pub(crate) fn send_with(
        &self,
        msg_type: MessageType,
        build: impl FnOnce(FloatWidth) -> Vec<u8>,
    ) -> bool {
        let mut inner = self.inner.lock();
        if inner.state != SessionState::Ready {
            return false;
        }
        let payload = build(inner.float_width);
        inner.sink.submit(msg_type, Bytes::from(payload))
    }

    /// Close the session, sending a best-effort REQ_SHUTDOWN frame.
    ///
    /// Idempotent; never blocks beyond the send budget. Returns whether
    /// the shutdown frame was delivered.
    pub fn shutdown(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == SessionState::Closed {
            return false;
        }
        let ok = inner.sink.submit(MessageType::ReqShutdown, Bytes::new());
        inner.state = SessionState::Closed;
        tracing::info!(delivered = ok, "daemon session closed");
        ok
    }

    /// RAII wiring for hosts that want shutdown on scope or process exit.
    pub fn shutdown_guard(&self) -> ShutdownGuard {
        ShutdownGuard {
            client: self.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn open_for_test(
        options: &ClientOptions,
        float_width: FloatWidth,
        sink: Box<dyn FrameSink>,
    ) -> ClientResult<DaemonClient> {
        Self::open(options, float_width, sink)
    }
}

impl std::fmt::Debug for DaemonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("DaemonClient")
            .field("state", &inner.state)
            .field("float_width", &inner.float_width)
            .finish()
    }
}

/// Sends REQ_SHUTDOWN when dropped. Teardown is best-effort and bounded
/// by the send budget; it never blocks process exit.
pub struct ShutdownGuard {
    client: DaemonClient,
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        let _ = self.client.shutdown();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{ready_client, MockSink};
    use super::*;

    #[test]
    fn test_init_handshake_payload() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = MockSink {
            sent: Arc::clone(&sent),
            accept: true,
        };
        let options = ClientOptions::default().with_runtime_version("1.82.0");
        DaemonClient::open_for_test(&options, FloatWidth::F64, Box::new(sink)).unwrap();

        let sent = sent.lock();
        assert_eq!(sent.len(), 1);
        let (msg_type, payload) = &sent[0];
        assert_eq!(*msg_type, MessageType::ReqInit);

        let mut expected = vec![PROT_VERSION];
        string::put_str(&mut expected, "1.82.0");
        string::put_str(&mut expected, env!("CARGO_PKG_VERSION"));
        assert_eq!(payload, &expected);
    }

    #[test]
    fn test_failed_handshake_fails_init() {
        let sink = MockSink {
            sent: Arc::new(Mutex::new(Vec::new())),
            accept: false,
        };
        let result =
            DaemonClient::open_for_test(&ClientOptions::default(), FloatWidth::F64, Box::new(sink));
        assert!(matches!(result, Err(ClientError::Handshake)));
    }

    #[test]
    fn test_shutdown_sends_empty_req_shutdown() {
        let (client, sent) = ready_client(FloatWidth::F64);
        assert!(client.shutdown());

        let sent = sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, MessageType::ReqShutdown);
        assert!(sent[0].1.is_empty());
    }

    #[test]
    fn test_shutdown_idempotent() {
        let (client, sent) = ready_client(FloatWidth::F64);
        assert!(client.shutdown());
        assert!(!client.shutdown());
        assert_eq!(sent.lock().len(), 1);
    }

    #[test]
    fn test_closed_session_rejects_sends() {
        let (client, sent) = ready_client(FloatWidth::F64);
        client.shutdown();
        sent.lock().clear();

        let ok = client.send_with(MessageType::StatsRecord, |_| vec![0x00]);
        assert!(!ok);
        assert!(sent.lock().is_empty());
    }

    #[test]
    fn test_shutdown_guard_closes_on_drop() {
        let (client, sent) = ready_client(FloatWidth::F64);
        {
            let _guard = client.shutdown_guard();
        }
        let sent = sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, MessageType::ReqShutdown);
    }

    #[test]
    fn test_clones_share_state() {
        let (client, sent) = ready_client(FloatWidth::F64);
        let clone = client.clone();
        clone.shutdown();
        assert!(!client.send_with(MessageType::StatsRecord, |_| Vec::new()));
        assert_eq!(sent.lock().len(), 1);
    }

    /// The one test exercising the process-wide singleton slot; everything
    /// else constructs sessions directly to stay independent of global
    /// state.
    #[cfg(unix)]
    #[test]
    fn test_singleton_over_unix_socket() {
        use std::io::Read;
        use std::os::unix::net::UnixListener;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocd.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let options = ClientOptions::default().with_socket_path(&path);
        let first = DaemonClient::init(options.clone()).unwrap();
        let second = DaemonClient::init(options).unwrap();
        assert!(Arc::ptr_eq(&first.inner, &second.inner));
        assert!(global().is_some());

        // The daemon side sees exactly one REQ_INIT frame.
        let (mut conn, _) = listener.accept().unwrap();
        conn.set_read_timeout(Some(Duration::from_secs(1))).unwrap();
        let mut head = [0u8; 5];
        conn.read_exact(&mut head).unwrap();
        assert_eq!(&head[..4], &[0, 0, 0, 0]);
        assert_eq!(head[4], u8::from(MessageType::ReqInit));
    }
}
