//! Authentication credentials.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Username and password for `AUTH PLAIN`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates credentials only when both parts are non-empty.
    #[must_use]
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Self::new(user, pass))
            }
            _ => None,
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the base64 PLAIN token (RFC 4616).
    ///
    /// Format: `<username>\0<username>\0<password>`, the username serving as
    /// both authorization and authentication identity.
    #[must_use]
    pub fn plain_token(&self) -> String {
        let user = &self.username;
        let pass = &self.password;
        STANDARD.encode(format!("{user}\0{user}\0{pass}").as_bytes())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
