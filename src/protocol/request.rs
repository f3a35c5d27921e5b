//! Request payloads sent to the daemon.
//!
//! Enqueue requests are written by hand rather than through serde so the
//! `speed` literal goes out exactly as the operator typed it and so text
//! that would overflow the payload ceiling can be cut cleanly.

use serde::Serialize;

use crate::constants::{DEFAULT_SPEED, DEFAULT_VOICE, MAX_PAYLOAD_LEN};

/// A message to speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueRequest {
    /// Text to speak. Non-empty after trimming.
    pub text: String,
    /// Voice name.
    pub voice: String,
    /// Speed literal, sent unquoted and unvalidated.
    pub speed: String,
    /// Who is speaking; omitted from the payload when `None` or empty.
    pub caller: Option<String>,
    /// Language code; omitted from the payload when `None` or empty.
    pub lang: Option<String>,
}

impl EnqueueRequest {
    /// Request for `text` with the default voice and speed.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: DEFAULT_VOICE.to_string(),
            speed: DEFAULT_SPEED.to_string(),
            caller: None,
            lang: None,
        }
    }

    /// Set the voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the speed literal.
    pub fn with_speed(mut self, speed: impl Into<String>) -> Self {
        self.speed = speed.into();
        self
    }

    /// Set the caller.
    pub fn with_caller(mut self, caller: Option<String>) -> Self {
        self.caller = caller;
        self
    }

    /// Set the language.
    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        self.lang = lang;
        self
    }
}

/// Queue control commands understood by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ControlCommand {
    /// Stop the item that is playing.
    Skip,
    /// Drop everything still pending.
    Clear,
    /// Enqueue the last completed item again.
    Replay,
    /// List pending items and what is playing.
    QueueStatus,
    /// Daemon, queue and cache counters.
    Stats,
}

#[derive(Serialize)]
struct ControlRequest {
    command: &'static str,
}

impl ControlCommand {
    /// Name used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Clear => "clear",
            Self::Replay => "replay",
            Self::QueueStatus => "queue_status",
            Self::Stats => "stats",
        }
    }

    /// JSON payload for this command.
    pub fn encode(self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&ControlRequest {
            command: self.wire_name(),
        })
    }
}

/// Encodes [`EnqueueRequest`]s as JSON, bounded by a payload ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadEncoder {
    max_len: usize,
}

impl Default for PayloadEncoder {
    fn default() -> Self {
        Self::new(MAX_PAYLOAD_LEN)
    }
}

impl PayloadEncoder {
    /// Encoder whose text is cut so the payload stays within `max_len`.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Encode `request`.
    ///
    /// Keys are written in the order `enqueue`, `text`, `voice`, `speed`,
    /// `caller`, `lang`. If the escaped text does not fit, it is cut before
    /// the first character that would overflow and the object is closed
    /// normally. Only the text is cut, so a payload can exceed the ceiling
    /// when the other fields alone do.
    pub fn encode(&self, request: &EnqueueRequest) -> Vec<u8> {
        let head = br#"{"enqueue":true,"text":""#;

        let mut tail = Vec::with_capacity(64);
        tail.extend_from_slice(br#"","voice":""#);
        escape_into(&request.voice, &mut tail, usize::MAX);
        tail.extend_from_slice(br#"","speed":"#);
        tail.extend_from_slice(request.speed.as_bytes());
        push_optional(&mut tail, "caller", request.caller.as_deref());
        push_optional(&mut tail, "lang", request.lang.as_deref());
        tail.push(b'}');

        let budget = self.max_len.saturating_sub(head.len() + tail.len());
        let mut out = Vec::with_capacity(head.len() + tail.len() + budget.min(request.text.len() * 2));
        out.extend_from_slice(head);
        let complete = escape_into(&request.text, &mut out, budget);
        if !complete {
            log::debug!(
                "text truncated to fit {} byte payload ceiling",
                self.max_len
            );
        }
        out.extend_from_slice(&tail);
        out
    }
}

fn push_optional(out: &mut Vec<u8>, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        out.extend_from_slice(b",\"");
        out.extend_from_slice(key.as_bytes());
        out.extend_from_slice(b"\":\"");
        escape_into(value, out, usize::MAX);
        out.push(b'"');
    }
}

/// Append `src` to `dst` with JSON string escaping, writing at most
/// `budget` bytes.
///
/// `"`, `\`, newline, carriage return and tab are escaped; everything else
/// is copied as is. Escape sequences and UTF-8 characters are never split.
/// Returns `false` if the budget ran out before the end of `src`.
pub fn escape_into(src: &str, dst: &mut Vec<u8>, budget: usize) -> bool {
    let mut written = 0usize;
    let mut utf8 = [0u8; 4];
    for ch in src.chars() {
        let bytes: &[u8] = match ch {
            '"' => b"\\\"",
            '\\' => b"\\\\",
            '\n' => b"\\n",
            '\r' => b"\\r",
            '\t' => b"\\t",
            _ => ch.encode_utf8(&mut utf8).as_bytes(),
        };
        if written + bytes.len() > budget {
            return false;
        }
        dst.extend_from_slice(bytes);
        written += bytes.len();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_TEXT_LEN;

    fn parse(payload: &[u8]) -> serde_json::Value {
        serde_json::from_slice(payload).unwrap()
    }

    #[test]
    fn test_default_payload_shape() {
        let payload = PayloadEncoder::default().encode(&EnqueueRequest::new("hello"));
        assert_eq!(
            payload,
            br#"{"enqueue":true,"text":"hello","voice":"af_heart","speed":1.26}"#
        );
    }

    #[test]
    fn test_optional_fields_in_order() {
        let request = EnqueueRequest::new("hi")
            .with_voice("bm_george")
            .with_speed("1.0")
            .with_caller(Some("build".to_string()))
            .with_lang(Some("en-gb".to_string()));
        let payload = PayloadEncoder::default().encode(&request);
        assert_eq!(
            payload,
            br#"{"enqueue":true,"text":"hi","voice":"bm_george","speed":1.0,"caller":"build","lang":"en-gb"}"#
        );
    }

    #[test]
    fn test_empty_caller_is_omitted() {
        let request = EnqueueRequest::new("hi").with_caller(Some(String::new()));
        let value = parse(&PayloadEncoder::default().encode(&request));
        assert!(value.get("caller").is_none());
        assert!(value.get("lang").is_none());
    }

    #[test]
    fn test_special_characters_survive_json_parse() {
        let text = "say \"hi\"\\\n\tthen\r\nstop — ünïcödé";
        let request = EnqueueRequest::new(text).with_caller(Some("a\"b".to_string()));
        let value = parse(&PayloadEncoder::default().encode(&request));
        assert_eq!(value["text"], text);
        assert_eq!(value["caller"], "a\"b");
        assert_eq!(value["enqueue"], true);
        assert_eq!(value["speed"], 1.26);
    }

    #[test]
    fn test_other_bytes_are_copied() {
        let mut out = Vec::new();
        assert!(escape_into("a/b<c>'d'", &mut out, usize::MAX));
        assert_eq!(out, b"a/b<c>'d'");

        out.clear();
        assert!(escape_into("\"\\\n\r\t", &mut out, usize::MAX));
        assert_eq!(out, br#"\"\\\n\r\t"#);
    }

    #[test]
    fn test_speed_is_not_validated() {
        let request = EnqueueRequest::new("x").with_speed("fast");
        let payload = PayloadEncoder::default().encode(&request);
        assert!(payload.ends_with(br#""speed":fast}"#));
    }

    #[test]
    fn test_max_length_text_truncates_within_ceiling() {
        let text = "\"".repeat(MAX_TEXT_LEN - 1);
        let encoder = PayloadEncoder::default();
        let payload = encoder.encode(&EnqueueRequest::new(text.clone()));
        assert!(payload.len() <= MAX_PAYLOAD_LEN);

        let value = parse(&payload);
        let sent = value["text"].as_str().unwrap();
        assert!(!sent.is_empty());
        assert!(sent.len() < text.len());
        assert!(text.starts_with(sent));
        assert_eq!(value["voice"], "af_heart");
    }

    #[test]
    fn test_max_length_plain_text_fits() {
        let text = "a".repeat(MAX_TEXT_LEN - 1);
        let payload = PayloadEncoder::default().encode(&EnqueueRequest::new(text.clone()));
        assert_eq!(parse(&payload)["text"], text.as_str());
    }

    #[test]
    fn test_truncation_never_splits_characters() {
        let encoder = PayloadEncoder::new(70);
        let payload = encoder.encode(&EnqueueRequest::new("ééééééééééééééééééééé\n\n\n"));
        assert!(payload.len() <= 70);
        let value = parse(&payload);
        assert!(value["text"].as_str().unwrap().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_escape_into_budget() {
        let mut out = Vec::new();
        assert!(!escape_into("ab\"c", &mut out, 3));
        assert_eq!(out, b"ab");
        out.clear();
        assert!(escape_into("ab\"c", &mut out, 5));
        assert_eq!(out, br#"ab\"c"#);
    }

    #[test]
    fn test_control_payloads() {
        assert_eq!(ControlCommand::Skip.encode().unwrap(), br#"{"command":"skip"}"#);
        assert_eq!(
            ControlCommand::QueueStatus.encode().unwrap(),
            br#"{"command":"queue_status"}"#
        );
        for command in [ControlCommand::Clear, ControlCommand::Replay, ControlCommand::Stats] {
            let value: serde_json::Value =
                serde_json::from_slice(&command.encode().unwrap()).unwrap();
            assert_eq!(value["command"], command.wire_name());
        }
    }
}
