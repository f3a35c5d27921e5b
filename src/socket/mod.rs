//! Unix domain socket transport to the speak daemon.
//!
//! # Architecture
//!
//! ```text
//! speak-enqueue                         speak daemon
//! ┌──────────────────┐                ┌──────────────────┐
//! │ SpeakConnection  │  one request   │  Unix listener   │
//! │  UnixStream      │───────────────►│  playback queue  │
//! │  (blocking)      │◄───────────────│                  │
//! └──────────────────┘  one reply     └──────────────────┘
//! ```
//!
//! # Wire Protocol
//!
//! Length-prefixed frames: `[u32 BE length][payload]`
//!
//! See [`framing`] for the codec.

pub mod connection;
pub mod framing;

pub use connection::SpeakConnection;
pub use framing::Reply;
