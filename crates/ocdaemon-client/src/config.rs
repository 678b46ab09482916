//! Client configuration.
//!
//! Options deserialize from a configuration mapping whose recognized keys
//! are exactly `socketPath`, `namedPipePath`, and `maxSendTime`; all other
//! keys are ignored. Everything else is set programmatically: the handshake
//! runtime version through `with_runtime_version`, the extension bypass
//! delegate through the `DaemonClient` constructors.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Unix domain socket path of the daemon.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/oc-daemon.sock";

/// Default named pipe path of the daemon on Windows.
pub const DEFAULT_PIPE_PATH: &str = r"\\.\pipe\oc-daemon";

/// Hard floor for the per-frame send budget, seconds.
pub const MIN_SEND_TIME: f64 = 0.001;

/// Default per-frame send budget, seconds.
pub const DEFAULT_SEND_TIME: f64 = 0.005;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    /// Unix domain socket path (POSIX targets).
    pub socket_path: PathBuf,

    /// Named pipe path (Windows targets).
    pub named_pipe_path: String,

    /// Per-frame send deadline in seconds. Values below the floor of
    /// 0.001 are clamped to it.
    pub max_send_time: f64,

    /// Host runtime version string reported in the REQ_INIT handshake.
    /// Not part of the configuration mapping; set it with
    /// `with_runtime_version`.
    #[serde(skip_deserializing, default = "default_runtime_version")]
    pub runtime_version: String,
}

fn default_runtime_version() -> String {
    "unknown".to_string()
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            named_pipe_path: DEFAULT_PIPE_PATH.to_string(),
            max_send_time: DEFAULT_SEND_TIME,
            runtime_version: default_runtime_version(),
        }
    }
}

impl ClientOptions {
    /// The send budget as a duration, with the floor applied.
    pub fn send_budget(&self) -> Duration {
        Duration::from_secs_f64(self.max_send_time.max(MIN_SEND_TIME))
    }

    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = path.into();
        self
    }

    pub fn with_max_send_time(mut self, seconds: f64) -> Self {
        self.max_send_time = seconds;
        self
    }

    pub fn with_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.runtime_version = version.into();
        self
    }
}
