//! Operator-facing failure taxonomy.
//!
//! Every variant ends the invocation with exit status 1; the distinction
//! only changes the diagnostic printed on stderr.

use std::io;
use std::path::PathBuf;

/// Errors that end a speak-enqueue invocation.
#[derive(Debug)]
pub enum EnqueueError {
    /// Malformed flags, or no text could be obtained.
    Usage(String),
    /// Nothing is listening on the socket (missing path or refused).
    DaemonUnavailable {
        /// Path that was tried.
        socket_path: PathBuf,
    },
    /// Any other failure talking to the socket.
    Transport {
        /// Stage that failed (`connect`, `send`, ...).
        stage: &'static str,
        /// Underlying OS error.
        source: io::Error,
    },
    /// A request could not be serialized.
    Encode(serde_json::Error),
    /// The daemon replied, but not with success. Holds the reply text.
    Protocol(String),
}

impl EnqueueError {
    /// Classify a failed `connect()`.
    ///
    /// A missing endpoint or a refused connection means the daemon is not
    /// running; everything else is reported with the OS description.
    pub(crate) fn from_connect(socket_path: PathBuf, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => {
                Self::DaemonUnavailable { socket_path }
            }
            _ => Self::Transport {
                stage: "connect",
                source: err,
            },
        }
    }

    /// Returns `true` when the daemon is simply not running.
    #[must_use]
    pub fn is_daemon_unavailable(&self) -> bool {
        matches!(self, Self::DaemonUnavailable { .. })
    }
}

impl std::fmt::Display for EnqueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}"),
            Self::DaemonUnavailable { .. } => {
                write!(f, "daemon not running (start with: speak --daemon)")
            }
            Self::Transport { stage, source } => write!(f, "{stage}: {source}"),
            Self::Encode(e) => write!(f, "encode request: {e}"),
            Self::Protocol(reply) => write!(f, "{reply}"),
        }
    }
}

impl std::error::Error for EnqueueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}
