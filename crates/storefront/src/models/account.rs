//! Prototype account type.
//!
//! Passwords are stored and compared as plain text. This is a prototype and
//! must not be used for anything real.

use serde::{Deserialize, Serialize};

/// A stored sign-up record, keyed by `email`.
///
/// Serialized as `{"email": ..., "password": ...}`, the same shape the
/// browser build keeps under `gameverse_users`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
}

impl UserAccount {
    /// Create an account record.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive match on both fields.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
