//! SMTP reply line parser.

use crate::types::ReplyCode;

/// One parsed reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyLine {
    /// Leading reply code.
    pub code: ReplyCode,
    /// False for continuation lines of a multi-line reply (`250-...`).
    pub is_last: bool,
}

/// Parses the leading three-digit reply code of a line.
///
/// Replies can be single-line or multi-line:
/// - Single: `250 OK`
/// - Multi: `250-First line`, `250-Second line`, `250 Last line`
///
/// Returns `None` if the line does not start with a three-digit code
/// followed by a space, a hyphen, or the end of the line.
#[must_use]
pub fn parse_line(line: &str) -> Option<ReplyLine> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }

    let is_last = match bytes.get(3) {
        None | Some(b' ') => true,
        Some(b'-') => false,
        Some(_) => return None,
    };

    let code = line[..3].parse::<u16>().ok()?;
    Some(ReplyLine {
        code: ReplyCode::new(code),
        is_last,
    })
}
