//! Speak daemon request and reply formats.
//!
//! - [`request`] - enqueue and control payloads
//! - [`response`] - reply parsing and outcome rules

pub mod request;
pub mod response;

pub use request::{ControlCommand, EnqueueRequest, PayloadEncoder};
pub use response::{interpret, interpret_control, Outcome, Response};
