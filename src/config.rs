//! Client configuration.
//!
//! Built once at startup from defaults plus environment overrides; nothing
//! is read from disk.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{MAX_PAYLOAD_LEN, MAX_RESPONSE_LEN};

/// Settings for one speak-enqueue invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Daemon socket.
    pub socket_path: PathBuf,
    /// Read/write timeout on the connection. `None` blocks indefinitely.
    pub timeout: Option<Duration>,
    /// Replies declaring more bytes than this are not read.
    pub max_response_len: u32,
    /// Ceiling on the encoded request payload.
    pub max_payload_len: usize,
}

impl ClientConfig {
    /// Config for `socket_path` with default limits and no timeout.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout: None,
            max_response_len: MAX_RESPONSE_LEN,
            max_payload_len: MAX_PAYLOAD_LEN,
        }
    }

    /// Resolve the configuration from the process environment.
    ///
    /// Reads `SPEAK_SOCK`, `USER` and `SPEAK_TIMEOUT`. An unparsable
    /// timeout is ignored.
    pub fn load() -> Self {
        let mut config = Self::new(crate::env::socket_path());
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Some(timeout) = crate::env::timeout() {
            self.timeout = Some(timeout);
        }
    }

    /// Set the I/O timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the reply ceiling.
    pub fn with_max_response_len(mut self, max: u32) -> Self {
        self.max_response_len = max;
        self
    }

    /// Set the request payload ceiling.
    pub fn with_max_payload_len(mut self, max: usize) -> Self {
        self.max_payload_len = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_daemon_limits() {
        let config = ClientConfig::new("/tmp/speak-test.sock");
        assert_eq!(config.max_response_len, 4096);
        assert_eq!(config.max_payload_len, 65536 + 512);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("/tmp/speak-test.sock")
            .with_timeout(Some(Duration::from_secs(3)))
            .with_max_response_len(128)
            .with_max_payload_len(1024);
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.max_response_len, 128);
        assert_eq!(config.max_payload_len, 1024);
    }
}
