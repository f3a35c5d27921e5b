//! One request/reply exchange with the speak daemon.
//!
//! ```text
//! Idle ──► Connecting ──► Sending ──► Receiving ──► Done
//!              │              │
//!              └──────────────┴──► Done(failure)
//! ```
//!
//! There are no retries: the first failure ends the invocation. The
//! connection lives only inside each call and is closed when it returns.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::EnqueueError;
use crate::protocol::{
    interpret, interpret_control, ControlCommand, EnqueueRequest, Outcome, PayloadEncoder,
};
use crate::socket::SpeakConnection;

/// Client for the speak daemon socket.
#[derive(Debug, Clone)]
pub struct SpeakClient {
    config: ClientConfig,
    encoder: PayloadEncoder,
}

impl SpeakClient {
    /// Client using `config`.
    pub fn new(config: ClientConfig) -> Self {
        let encoder = PayloadEncoder::new(config.max_payload_len);
        Self { config, encoder }
    }

    /// Enqueue `request` and report how the daemon took it.
    ///
    /// # Errors
    ///
    /// Connection and send failures. A rejection by the daemon is an
    /// [`Outcome::Rejected`], not an error, so the caller can still show
    /// the queue position.
    pub fn enqueue(&self, request: &EnqueueRequest) -> Result<Outcome, EnqueueError> {
        let mut conn = SpeakConnection::connect(&self.config)?;
        let payload = self.encoder.encode(request);
        conn.send(&payload)?;
        let reply = conn.receive();
        log::debug!("enqueue reply: {reply:?}");
        Ok(interpret(&reply))
    }

    /// Send a queue control command and return the daemon's reply.
    ///
    /// # Errors
    ///
    /// Encoding, connection and send failures, and replies carrying
    /// `"ok": false`.
    pub fn control(&self, command: ControlCommand) -> Result<Option<Value>, EnqueueError> {
        let payload = command.encode().map_err(EnqueueError::Encode)?;
        let mut conn = SpeakConnection::connect(&self.config)?;
        conn.send(&payload)?;
        let reply = conn.receive();
        log::debug!("{} reply: {reply:?}", command.wire_name());
        interpret_control(&reply)
    }
}
