//! Client-side connection to the speak daemon.
//!
//! One blocking `UnixStream` per invocation:
//!
//! ```text
//! connect(path) ──► send(payload) ──► receive() ──► drop (close)
//!                   [u32 BE][json]    [u32 BE][json] + terminator
//! ```
//!
//! The stream is owned by [`SpeakConnection`] and closed when it drops, so
//! every exit path releases the socket.

use std::os::unix::net::UnixStream;
use std::path::Path;

use crate::config::ClientConfig;
use crate::error::EnqueueError;

use super::framing::{read_length_prefix, read_reply, write_frame, Reply};

/// Blocking connection to the daemon socket.
#[derive(Debug)]
pub struct SpeakConnection {
    stream: UnixStream,
    max_response_len: u32,
}

impl SpeakConnection {
    /// Connect to the socket named in `config`.
    ///
    /// Applies `config.timeout` to both reads and writes when set.
    ///
    /// # Errors
    ///
    /// [`EnqueueError::DaemonUnavailable`] if the socket is missing or
    /// refuses the connection, [`EnqueueError::Transport`] otherwise.
    pub fn connect(config: &ClientConfig) -> Result<Self, EnqueueError> {
        let stream = Self::open(&config.socket_path)?;

        if let Some(timeout) = config.timeout {
            stream
                .set_read_timeout(Some(timeout))
                .and_then(|()| stream.set_write_timeout(Some(timeout)))
                .map_err(|source| EnqueueError::Transport {
                    stage: "set timeout",
                    source,
                })?;
        }

        Ok(Self {
            stream,
            max_response_len: config.max_response_len,
        })
    }

    fn open(path: &Path) -> Result<UnixStream, EnqueueError> {
        log::debug!("connecting to {}", path.display());
        UnixStream::connect(path).map_err(|e| EnqueueError::from_connect(path.to_path_buf(), e))
    }

    /// Wrap an already-connected stream.
    pub fn from_stream(stream: UnixStream, max_response_len: u32) -> Self {
        Self {
            stream,
            max_response_len,
        }
    }

    /// Send `payload` as one length-prefixed frame.
    ///
    /// # Errors
    ///
    /// Any write failure is fatal to the request.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), EnqueueError> {
        log::debug!("sending {} byte request", payload.len());
        write_frame(&mut self.stream, payload).map_err(|source| EnqueueError::Transport {
            stage: "send",
            source,
        })
    }

    /// Read the daemon's reply.
    ///
    /// When a length prefix was read, one trailing terminator header is
    /// also consumed; failing to read it is not an error.
    pub fn receive(&mut self) -> Reply {
        let reply = read_reply(&mut self.stream, self.max_response_len);
        if reply != Reply::Missing && read_length_prefix(&mut self.stream).is_none() {
            log::debug!("no terminator after reply");
        }
        reply
    }
}
