//! Protocol and CLI constants for speak-enqueue.
//!
//! The numeric limits here match what the speak daemon already expects on
//! the wire; change them only together with the daemon.
//!
//! # Categories
//!
//! - **Request defaults**: voice and speed sent when no flag is given
//! - **Limits**: text, payload and reply ceilings
//! - **Environment**: variable names read at startup

use std::time::Duration;

// ============================================================================
// Request defaults
// ============================================================================

/// Voice used when `-v` is not given.
pub const DEFAULT_VOICE: &str = "af_heart";

/// Speed literal used when `-s` is not given.
///
/// Sent unquoted and unvalidated, so it is kept as text.
pub const DEFAULT_SPEED: &str = "1.26";

// ============================================================================
// Limits
// ============================================================================

/// Size of the text buffer, in bytes. Acquired text holds at most
/// `MAX_TEXT_LEN - 1` bytes.
pub const MAX_TEXT_LEN: usize = 65536;

/// Room reserved for the JSON envelope around the text.
pub const PAYLOAD_ENVELOPE_RESERVE: usize = 512;

/// Ceiling on an encoded request payload.
///
/// Text whose escaped form would push the payload past this ceiling is
/// truncated by the encoder.
pub const MAX_PAYLOAD_LEN: usize = MAX_TEXT_LEN + PAYLOAD_ENVELOPE_RESERVE;

/// Ceiling on a reply payload, in bytes.
///
/// Replies declaring a larger length are not read.
pub const MAX_RESPONSE_LEN: u32 = 4096;

/// Size of the length prefix on every frame.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Bound on a default socket path, in bytes.
pub const MAX_SOCKET_PATH_LEN: usize = 255;

// ============================================================================
// Environment
// ============================================================================

/// Socket path override.
pub const ENV_SOCKET_PATH: &str = "SPEAK_SOCK";

/// Identity used to build the default socket path.
pub const ENV_USER: &str = "USER";

/// I/O timeout in seconds. Fractions are allowed.
pub const ENV_TIMEOUT: &str = "SPEAK_TIMEOUT";

/// Redirects log output to a file.
pub const ENV_LOG_FILE: &str = "SPEAK_LOG_FILE";

/// Substituted for the user name when it cannot be determined.
pub const UNKNOWN_USER: &str = "unknown";

/// Upper bound accepted for `SPEAK_TIMEOUT` / `--timeout`.
///
/// Larger values are clamped; a client that should block forever simply
/// leaves the timeout unset.
pub const MAX_IO_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);
