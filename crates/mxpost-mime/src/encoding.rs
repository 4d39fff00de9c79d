//! Body and header encoding utilities.
//!
//! Supports Base64 (with MIME line wrapping), CRLF normalization and
//! RFC 2047 header encoding.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum encoded line length for Base64 bodies (RFC 2045).
pub const MAX_LINE_LENGTH: usize = 76;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes data as Base64, breaking the output into CRLF-separated lines of
/// at most [`MAX_LINE_LENGTH`] characters.
///
/// The output carries no trailing line break.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = encode_base64(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2);

    // Base64 output is pure ASCII, so byte chunks are valid str slices.
    for (i, chunk) in encoded.as_bytes().chunks(MAX_LINE_LENGTH).enumerate() {
        if i > 0 {
            wrapped.push_str("\r\n");
        }
        wrapped.push_str(&String::from_utf8_lossy(chunk));
    }

    wrapped
}

/// Decodes Base64 data, ignoring any whitespace and line breaks.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(cleaned).map_err(Into::into)
}

/// Normalizes every line ending (`\r\n` or bare `\n`) to `\r\n`.
///
/// Bare `\r` characters that are not followed by `\n` are left untouched.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Encodes a header value using RFC 2047 if it is not plain ASCII.
///
/// Format: `=?charset?B?encoded-text?=`
#[must_use]
pub fn encode_rfc2047(text: &str, charset: &str) -> String {
    if text.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) && !text.contains("=?") {
        return text.to_string();
    }

    let encoded = encode_base64(text.as_bytes());
    format!("=?{charset}?B?{encoded}?=")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode_decode() {
        let encoded = encode_base64(b"Hello, World!");
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(decode_base64(&encoded).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_wrapped_short_input_is_single_line() {
        assert_eq!(encode_base64_wrapped(b"Hello"), "SGVsbG8=");
    }

    #[test]
    fn test_wrapped_lines_respect_limit() {
        let data = vec![b'a'; 200];
        let wrapped = encode_base64_wrapped(&data);
        let lines: Vec<&str> = wrapped.split("\r\n").collect();

        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() <= MAX_LINE_LENGTH));
        assert_eq!(lines[0].len(), MAX_LINE_LENGTH);
        assert!(!wrapped.ends_with("\r\n"));
        assert_eq!(decode_base64(&wrapped).unwrap(), data);
    }

    #[test]
    fn test_wrapped_empty_input() {
        assert_eq!(encode_base64_wrapped(b""), "");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(decode_base64("not base64!").is_err());
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\nb\r\nc"), "a\r\nb\r\nc");
        assert_eq!(normalize_line_endings("a\r\n\r\n"), "a\r\n\r\n");
        assert_eq!(normalize_line_endings("plain"), "plain");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_line_endings("x\ny\r\nz\n");
        assert_eq!(normalize_line_endings(&once), once);
    }

    #[test]
    fn test_rfc2047_ascii_passthrough() {
        assert_eq!(encode_rfc2047("Weekly report", "utf-8"), "Weekly report");
    }

    #[test]
    fn test_rfc2047_non_ascii() {
        assert_eq!(encode_rfc2047("Héllo", "utf-8"), "=?utf-8?B?SMOpbGxv?=");
    }
}
