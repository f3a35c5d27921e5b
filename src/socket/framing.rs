//! Wire codec for the speak daemon socket.
//!
//! Every message in either direction is a length-prefixed frame:
//!
//! ```text
//! [u32 BE length] [payload: length bytes]
//! ```
//!
//! The payload is UTF-8 JSON. After its reply the daemon writes one more
//! 4-byte frame header as a stream terminator, which the client reads and
//! discards.

use std::io::{self, Read, Write};

use crate::constants::LENGTH_PREFIX_LEN;

/// What came back from the daemon after a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Fewer than 4 bytes arrived; the daemon closed without replying.
    Missing,
    /// The declared length was zero or above the ceiling, so the payload
    /// was not read.
    Discarded {
        /// Length the daemon declared.
        declared_len: u32,
    },
    /// A reply payload. Shorter than declared if the stream ended early.
    Frame(Vec<u8>),
}

/// Encode `payload` as a frame.
///
/// Returns `[u32 BE length][payload]` in one buffer so it can be written in
/// a single call.
///
/// # Errors
///
/// Returns `InvalidInput` if the payload does not fit a `u32` length.
pub fn encode_frame(payload: &[u8]) -> io::Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload too large for frame: {} bytes ({e})", payload.len()),
        )
    })?;
    let mut buf = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    buf.extend_from_slice(&length.to_be_bytes());
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Write `payload` as one frame, draining partial writes.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> io::Result<()> {
    let frame = encode_frame(payload)?;
    writer.write_all(&frame)?;
    writer.flush()
}

/// Read a 4-byte length prefix.
///
/// Returns `None` if the stream ends or fails before 4 bytes arrive.
pub fn read_length_prefix<R: Read>(reader: &mut R) -> Option<u32> {
    let mut header = [0u8; LENGTH_PREFIX_LEN];
    let n = read_up_to(reader, &mut header);
    if n < LENGTH_PREFIX_LEN {
        log::debug!("length prefix incomplete: {n} of {LENGTH_PREFIX_LEN} bytes");
        return None;
    }
    Some(u32::from_be_bytes(header))
}

/// Read one reply frame, honoring the `max_len` ceiling.
pub fn read_reply<R: Read>(reader: &mut R, max_len: u32) -> Reply {
    let Some(declared_len) = read_length_prefix(reader) else {
        return Reply::Missing;
    };

    if declared_len == 0 || declared_len > max_len {
        log::warn!("ignoring reply of {declared_len} bytes (ceiling {max_len})");
        return Reply::Discarded { declared_len };
    }

    let mut payload = vec![0u8; declared_len as usize];
    let n = read_up_to(reader, &mut payload);
    if n < payload.len() {
        log::debug!("reply truncated: {n} of {declared_len} bytes");
        payload.truncate(n);
    }
    Reply::Frame(payload)
}

/// Fill as much of `buf` as the reader allows.
///
/// Loops over short reads and stops at EOF or the first error other than
/// `Interrupted`. An expired read timeout is logged at warn. Returns the
/// number of bytes read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> usize {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                log::warn!("socket read timed out after {total} bytes");
                break;
            }
            Err(e) => {
                log::debug!("read stopped after {total} bytes: {e}");
                break;
            }
        }
    }
    total
}
