//! Runtime environment lookups.
//!
//! Single source of truth for everything speak-enqueue reads from the
//! process environment: the daemon socket path and the optional I/O
//! timeout.
//!
//! # Environment Variables
//!
//! - `SPEAK_SOCK` - socket path override, used verbatim when non-empty
//! - `USER` - identity for the default `/tmp/speak-<user>.sock` path
//! - `SPEAK_TIMEOUT` - I/O timeout in seconds (unset means block forever)

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    ENV_SOCKET_PATH, ENV_TIMEOUT, ENV_USER, MAX_IO_TIMEOUT, MAX_SOCKET_PATH_LEN, UNKNOWN_USER,
};

/// Resolve the daemon socket path from the environment.
///
/// Never fails: without `SPEAK_SOCK` or `USER` it falls back to
/// `/tmp/speak-unknown.sock`.
#[must_use]
pub fn socket_path() -> PathBuf {
    socket_path_from(
        std::env::var_os(ENV_SOCKET_PATH),
        std::env::var_os(ENV_USER),
    )
}

/// Resolve the socket path from explicit override and user values.
///
/// A non-empty override is returned verbatim. Otherwise the per-user
/// default is built from the raw bytes of `user`, bounded to
/// [`MAX_SOCKET_PATH_LEN`] bytes.
#[must_use]
pub fn socket_path_from(override_path: Option<OsString>, user: Option<OsString>) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let user = user
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| OsString::from(UNKNOWN_USER));
    let mut path = OsString::from("/tmp/speak-");
    path.push(user);
    path.push(".sock");

    let mut bytes = path.into_vec();
    bytes.truncate(MAX_SOCKET_PATH_LEN);
    PathBuf::from(OsString::from_vec(bytes))
}

/// I/O timeout from `SPEAK_TIMEOUT`, if set to a usable value.
#[must_use]
pub fn timeout() -> Option<Duration> {
    std::env::var(ENV_TIMEOUT)
        .ok()
        .and_then(|raw| parse_timeout(&raw))
}

/// Parse a timeout given in (possibly fractional) seconds.
///
/// Returns `None` for unparsable, non-finite, zero or negative input.
/// Values above [`MAX_IO_TIMEOUT`] are clamped.
#[must_use]
pub fn parse_timeout(raw: &str) -> Option<Duration> {
    let secs: f64 = raw.trim().parse().ok()?;
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    if secs >= MAX_IO_TIMEOUT.as_secs_f64() {
        return Some(MAX_IO_TIMEOUT);
    }
    Some(Duration::from_secs_f64(secs))
}

/// Shorten `s` to at most `max` bytes without splitting a character.
pub(crate) fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
