//! SMTP reply types.

/// A complete SMTP reply, possibly assembled from several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code (e.g., 250).
    pub code: ReplyCode,
    /// Reply lines exactly as received, without CRLF.
    pub lines: Vec<String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec is not const-compatible
    pub fn new(code: ReplyCode, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    /// Returns the raw reply text, lines joined by `\n`.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns true if any line carries the extended-service marker (`ESMTP`
    /// as a standalone word, any case).
    #[must_use]
    pub fn advertises_esmtp(&self) -> bool {
        self.lines.iter().any(|line| {
            line.split(|c: char| !c.is_ascii_alphanumeric())
                .any(|word| word.eq_ignore_ascii_case("esmtp"))
        })
    }
}

/// SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this code ends the session with a failure (400 and up).
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0 >= 400
    }

    /// Returns true if a pending command may be issued after this reply.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(
            self,
            Self::CLOSING | Self::AUTH_SUCCESS | Self::OK | Self::FORWARD
        )
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Common reply codes
impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel
    pub const CLOSING: Self = Self(221);
    /// 235 Authentication succeeded
    pub const AUTH_SUCCESS: Self = Self(235);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 251 User not local; will forward
    pub const FORWARD: Self = Self(251);
    /// 334 Continue with authentication
    pub const AUTH_CONTINUE: Self = Self(334);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    mod reply_code_tests {
        use super::*;

        #[test]
        fn accepted_codes() {
            assert!(ReplyCode::CLOSING.is_accepted());
            assert!(ReplyCode::AUTH_SUCCESS.is_accepted());
            assert!(ReplyCode::OK.is_accepted());
            assert!(ReplyCode::FORWARD.is_accepted());
        }

        #[test]
        fn greeting_is_not_accepted() {
            assert!(!ReplyCode::SERVICE_READY.is_accepted());
            assert!(!ReplyCode::new(252).is_accepted());
        }

        #[test]
        fn intermediate_codes_are_neither() {
            assert!(!ReplyCode::AUTH_CONTINUE.is_accepted());
            assert!(!ReplyCode::AUTH_CONTINUE.is_error());
            assert!(!ReplyCode::START_DATA.is_accepted());
            assert!(!ReplyCode::START_DATA.is_error());
        }

        #[test]
        fn error_codes() {
            assert!(ReplyCode::new(421).is_error());
            assert!(ReplyCode::new(535).is_error());
            assert!(ReplyCode::new(550).is_error());
            assert!(ReplyCode::new(400).is_error());
            assert!(!ReplyCode::new(399).is_error());
        }

        #[test]
        fn display() {
            assert_eq!(format!("{}", ReplyCode::OK), "250");
        }
    }

    mod reply_tests {
        use super::*;

        #[test]
        fn raw_text_joins_lines() {
            let reply = Reply::new(
                ReplyCode::OK,
                vec!["250-mx.example.com".to_string(), "250 SIZE 1000".to_string()],
            );
            assert_eq!(reply.raw_text(), "250-mx.example.com\n250 SIZE 1000");
        }

        #[test]
        fn esmtp_marker_detected() {
            let reply = Reply::new(
                ReplyCode::SERVICE_READY,
                vec!["220 mail.example.com ESMTP ready".to_string()],
            );
            assert!(reply.advertises_esmtp());
        }

        #[test]
        fn esmtp_marker_case_insensitive() {
            let reply = Reply::new(
                ReplyCode::SERVICE_READY,
                vec!["220 mail.example.com esmtp Postfix".to_string()],
            );
            assert!(reply.advertises_esmtp());
        }

        #[test]
        fn esmtp_marker_must_be_a_word() {
            let reply = Reply::new(
                ReplyCode::SERVICE_READY,
                vec!["220 mail.example.com ready (noESMTPx)".to_string()],
            );
            assert!(!reply.advertises_esmtp());
        }

        #[test]
        fn no_marker() {
            let reply = Reply::new(
                ReplyCode::SERVICE_READY,
                vec!["220 mail.example.com ready".to_string()],
            );
            assert!(!reply.advertises_esmtp());
        }
    }
}
