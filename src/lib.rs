//! speak-enqueue - fire-and-forget client for the speak daemon.
//!
//! Hands a short text message to the background speech daemon over its
//! Unix socket and reports the queue position it was given.
//!
//! # Architecture
//!
//! ```text
//! env (endpoint) ──► socket (connect) ──► protocol (encode)
//!                        │
//!                        ├──► socket (send, receive)
//!                        ▼
//!                    protocol (interpret) ──► exit status
//! ```
//!
//! # Modules
//!
//! - [`env`] - socket path and timeout from the environment
//! - [`socket`] - length-prefixed framing and the blocking connection
//! - [`protocol`] - request encoding and reply interpretation
//! - [`client`] - one round trip, start to finish
//! - [`input`] - text from arguments or stdin

pub mod client;
pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod input;
pub mod protocol;
pub mod socket;

// Re-export commonly used types
pub use client::SpeakClient;
pub use config::ClientConfig;
pub use error::EnqueueError;
pub use protocol::{ControlCommand, EnqueueRequest, Outcome};
