//! Authentication service.
//!
//! Prototype email/password accounts kept in the key-value store. Passwords
//! are stored and compared verbatim; nothing here is fit for real use.

mod error;

pub use error::AuthError;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::models::{Destination, UserAccount};
use crate::storage::{AccountRepository, KeyValueStore};

/// A successful sign-up or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    /// Message for the success toast.
    pub message: String,
    /// Page to go to next.
    pub destination: Destination,
}

/// Authentication service.
///
/// Handles account registration, login and logout against the stored account
/// list and session slot.
pub struct AuthService<'a, S: ?Sized> {
    accounts: AccountRepository<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a mut S) -> Self {
        Self {
            accounts: AccountRepository::new(store),
        }
    }

    /// Register a new account.
    ///
    /// Both inputs are trimmed. Any non-blank email is accepted as the
    /// account key. On success the account is appended to the stored list and
    /// the caller is sent to the login page; no session is started.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either input is blank.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    /// Returns `AuthError::Storage` if the account list cannot be written.
    #[instrument(skip(self, password))]
    pub fn signup(&mut self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let (email, password) = require_credentials(email, password)?;

        if self.accounts.exists(email) {
            warn!("Sign-up rejected, email already registered");
            return Err(AuthError::UserAlreadyExists);
        }

        self.accounts.append(UserAccount::new(email, password))?;
        info!("Account created");

        Ok(AuthOutcome {
            message: "Sign up successful! Please log in.".to_string(),
            destination: Destination::Login,
        })
    }

    /// Sign in with email and password.
    ///
    /// Both inputs are trimmed and must match a stored account exactly. The
    /// session slot is overwritten with the email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either input is blank.
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    /// Returns `AuthError::Storage` if the session cannot be written.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let (email, password) = require_credentials(email, password)?;

        let account = self
            .accounts
            .find_matching(email, password)
            .ok_or(AuthError::InvalidCredentials)?;

        self.accounts.set_current_user(&account.email)?;
        info!("Signed in");

        Ok(AuthOutcome {
            message: "Login successful! Welcome back.".to_string(),
            destination: Destination::Home,
        })
    }

    /// Clear the session and return to the home page.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<Destination, AuthError> {
        self.accounts.clear_current_user()?;
        info!("Signed out");
        Ok(Destination::Home)
    }

    /// The signed-in email, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.accounts.current_user()
    }
}

/// Trim both inputs and reject blanks.
fn require_credentials<'s>(
    email: &'s str,
    password: &'s str,
) -> Result<(&'s str, &'s str), AuthError> {
    let email = email.trim();
    let password = password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((email, password))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, keys};

    #[test]
    fn test_signup_then_login() {
        let mut store = MemoryStore::new();
        let mut auth = AuthService::new(&mut store);

        let signup = auth.signup(" player@gameverse.gg ", " hunter22 ").unwrap();
        assert_eq!(signup.destination, Destination::Login);
        assert_eq!(signup.message, "Sign up successful! Please log in.");
        assert_eq!(auth.current_user(), None);

        let login = auth.login("player@gameverse.gg", "hunter22").unwrap();
        assert_eq!(login.destination, Destination::Home);
        assert_eq!(login.message, "Login successful! Welcome back.");
        assert_eq!(auth.current_user().as_deref(), Some("player@gameverse.gg"));
    }

    #[test]
    fn test_signup_stores_plain_record() {
        let mut store = MemoryStore::new();
        AuthService::new(&mut store)
            .signup("player@gameverse.gg", "hunter22")
            .unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&store.get(keys::USERS).unwrap()).unwrap();
        assert_eq!(
            stored,
            serde_json::json!([{"email": "player@gameverse.gg", "password": "hunter22"}])
        );
    }

    #[test]
    fn test_duplicate_signup_is_rejected() {
        let mut store = MemoryStore::new();
        let mut auth = AuthService::new(&mut store);

        auth.signup("player@gameverse.gg", "first").unwrap();
        let err = auth.signup("player@gameverse.gg", "second").unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(err.user_message(), "User with this email already exists.");
        assert!(auth.login("player@gameverse.gg", "second").is_err());
    }

    #[test]
    fn test_blank_inputs_are_rejected() {
        let mut store = MemoryStore::new();
        let mut auth = AuthService::new(&mut store);

        assert!(matches!(
            auth.signup("   ", "pw"),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.login("player@gameverse.gg", "  "),
            Err(AuthError::MissingCredentials)
        ));
        assert_eq!(
            AuthError::MissingCredentials.user_message(),
            "Please enter both email and password."
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_signup_accepts_any_non_blank_email() {
        let mut store = MemoryStore::new();
        let mut auth = AuthService::new(&mut store);

        let outcome = auth.signup("bob", "pw").unwrap();
        assert_eq!(outcome.destination, Destination::Login);
        auth.login("bob", "pw").unwrap();
        assert_eq!(auth.current_user().as_deref(), Some("bob"));
    }

    #[test]
    fn test_wrong_password_keeps_previous_session() {
        let mut store = MemoryStore::new();
        let mut auth = AuthService::new(&mut store);
        auth.signup("a@gameverse.gg", "pw-a").unwrap();
        auth.login("a@gameverse.gg", "pw-a").unwrap();

        let err = auth.login("a@gameverse.gg", "PW-A").unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(
            err.user_message(),
            "Login failed. Check your email and password."
        );
        assert_eq!(auth.current_user().as_deref(), Some("a@gameverse.gg"));
    }

    #[test]
    fn test_logout_clears_session() {
        let mut store = MemoryStore::new();
        let mut auth = AuthService::new(&mut store);
        auth.signup("a@gameverse.gg", "pw").unwrap();
        auth.login("a@gameverse.gg", "pw").unwrap();

        assert_eq!(auth.logout().unwrap(), Destination::Home);
        assert_eq!(auth.current_user(), None);
        // Logging out twice is harmless.
        assert_eq!(auth.logout().unwrap(), Destination::Home);
    }
}
