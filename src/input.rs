//! Text acquisition from arguments or piped stdin.

use std::io::Read;

use crate::constants::MAX_TEXT_LEN;
use crate::env::truncate_at_char_boundary;
use crate::error::EnqueueError;

/// Get the text to speak.
///
/// Joins `args` when there are any. Otherwise reads stdin, unless stdin is
/// a terminal, in which case there is no text.
///
/// # Errors
///
/// [`EnqueueError::Usage`] when no text can be obtained or it is blank.
pub fn acquire_text(args: &[String]) -> Result<String, EnqueueError> {
    let text = if !args.is_empty() {
        text_from_args(args)
    } else if atty::isnt(atty::Stream::Stdin) {
        text_from_reader(std::io::stdin().lock())
            .map_err(|e| EnqueueError::Usage(format!("read stdin: {e}")))?
    } else {
        return Err(EnqueueError::Usage("no text".to_string()));
    };
    require_text(text)
}

/// Join arguments with single spaces, bounded to the text buffer.
pub fn text_from_args(args: &[String]) -> String {
    let mut text = args.join(" ");
    truncate_at_char_boundary(&mut text, MAX_TEXT_LEN - 1);
    text
}

/// Read piped text, bounded to the text buffer.
///
/// Invalid UTF-8 is replaced, and trailing newlines, carriage returns and
/// spaces are trimmed.
pub fn text_from_reader<R: Read>(reader: R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    reader.take((MAX_TEXT_LEN - 1) as u64).read_to_end(&mut buf)?;
    let text = String::from_utf8_lossy(&buf);
    Ok(text.trim_end_matches(['\n', '\r', ' ']).to_string())
}

/// Reject text that is empty after trimming.
pub fn require_text(text: String) -> Result<String, EnqueueError> {
    if text.trim().is_empty() {
        return Err(EnqueueError::Usage("empty text".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_joined() {
        let args = vec!["hello".to_string(), "there".to_string(), "world".to_string()];
        assert_eq!(text_from_args(&args), "hello there world");
    }

    #[test]
    fn test_args_are_bounded() {
        let args = vec!["x".repeat(MAX_TEXT_LEN), "y".to_string()];
        assert_eq!(text_from_args(&args).len(), MAX_TEXT_LEN - 1);
    }

    #[test]
    fn test_reader_trims_trailing_whitespace_only() {
        let text = text_from_reader("  line one\nline two \r\n\n".as_bytes()).unwrap();
        assert_eq!(text, "  line one\nline two");
    }

    #[test]
    fn test_reader_is_bounded() {
        let input = "z".repeat(MAX_TEXT_LEN * 2);
        let text = text_from_reader(input.as_bytes()).unwrap();
        assert_eq!(text.len(), MAX_TEXT_LEN - 1);
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let err = require_text(" \t ".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "empty text");
        assert_eq!(require_text(" hi ".to_string()).unwrap(), " hi ");
    }
}
