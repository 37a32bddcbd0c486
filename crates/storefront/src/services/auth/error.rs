//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during sign-up, login and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password was blank after trimming.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Storage write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// The message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredentials => "Please enter both email and password.".to_string(),
            Self::InvalidCredentials => "Login failed. Check your email and password.".to_string(),
            Self::UserAlreadyExists => "User with this email already exists.".to_string(),
            Self::Storage(_) => "Something went wrong saving your account.".to_string(),
        }
    }
}
