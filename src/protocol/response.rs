//! Interpreting daemon replies.
//!
//! An enqueue reply succeeds when it carries an `ok` member and no `false`
//! literal anywhere in the document. A reply that never arrived counts as
//! success: the request frame was already written, so the daemon has it.

use serde_json::Value;

use crate::error::EnqueueError;
use crate::socket::Reply;

/// Fields of a daemon reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Overall success marker.
    pub ok: bool,
    /// Queue position the daemon assigned, when present and non-negative.
    pub position: Option<u64>,
    /// Reply exactly as received, lossily decoded.
    pub raw: String,
}

impl Response {
    /// Parse a reply payload.
    ///
    /// A payload that is not JSON, or not an object, is a failure.
    pub fn parse(bytes: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(bytes).into_owned();
        let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
            log::debug!("reply is not JSON");
            return Self {
                ok: false,
                position: None,
                raw,
            };
        };

        let has_ok = value.get("ok").is_some();
        Self {
            ok: has_ok && !contains_false(&value),
            position: value.get("position").and_then(Value::as_u64),
            raw,
        }
    }

    /// Position worth reporting to the operator (positive only).
    pub fn queue_position(&self) -> Option<u64> {
        self.position.filter(|p| *p > 0)
    }
}

/// Whether any value in the document is the literal `false`.
fn contains_false(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Array(items) => items.iter().any(contains_false),
        Value::Object(map) => map.values().any(contains_false),
        _ => false,
    }
}

/// How an enqueue round trip ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The daemon accepted the request.
    Accepted {
        /// Queue position, if one was reported.
        position: Option<u64>,
    },
    /// The daemon closed without a usable reply.
    NoResponse,
    /// The daemon replied without success.
    Rejected {
        /// Queue position, if one was reported anyway.
        position: Option<u64>,
        /// Reply text.
        reply: String,
    },
}

impl Outcome {
    /// Queue position to show the operator, whatever the verdict.
    pub fn position(&self) -> Option<u64> {
        match self {
            Self::Accepted { position } | Self::Rejected { position, .. } => *position,
            Self::NoResponse => None,
        }
    }

    /// `Ok` with the position on success, [`EnqueueError::Protocol`] on
    /// rejection.
    pub fn into_result(self) -> Result<Option<u64>, EnqueueError> {
        match self {
            Self::Accepted { position } => Ok(position),
            Self::NoResponse => Ok(None),
            Self::Rejected { reply, .. } => Err(EnqueueError::Protocol(reply)),
        }
    }
}

/// Decide the outcome of an enqueue request from its reply.
pub fn interpret(reply: &Reply) -> Outcome {
    match reply {
        Reply::Missing | Reply::Discarded { .. } => Outcome::NoResponse,
        Reply::Frame(bytes) => {
            let response = Response::parse(bytes);
            let position = response.queue_position();
            if response.ok {
                Outcome::Accepted { position }
            } else {
                Outcome::Rejected {
                    position,
                    reply: response.raw,
                }
            }
        }
    }
}

/// Decide the outcome of a control command from its reply.
///
/// Returns the reply document, or `None` if there was none. Fails only on
/// a reply that is not JSON or that carries `"ok": false`.
pub fn interpret_control(reply: &Reply) -> Result<Option<Value>, EnqueueError> {
    let Reply::Frame(bytes) = reply else {
        return Ok(None);
    };

    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        log::debug!("control reply is not JSON: {e}");
        EnqueueError::Protocol(String::from_utf8_lossy(bytes).into_owned())
    })?;

    if value.get("ok") == Some(&Value::Bool(false)) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), str::to_string);
        return Err(EnqueueError::Protocol(message));
    }

    Ok(Some(value))
}
