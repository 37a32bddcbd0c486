//! Account list and session persistence.
//!
//! The account list is a JSON array under `gameverse_users`. The session is a
//! single plain-string email under `gameverse_currentUser`.

use tracing::debug;

use super::{KeyValueStore, StorageError, keys, read_json, write_json};
use crate::models::UserAccount;

/// Repository for stored accounts and the current session.
pub struct AccountRepository<'a, S: ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> AccountRepository<'a, S> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// All stored accounts. Absent or malformed data gives an empty list.
    #[must_use]
    pub fn list(&self) -> Vec<UserAccount> {
        read_json(&*self.store, keys::USERS)
    }

    /// Returns true if an account with this exact email exists.
    #[must_use]
    pub fn exists(&self, email: &str) -> bool {
        self.list().iter().any(|account| account.email == email)
    }

    /// Find the account matching both email and password.
    #[must_use]
    pub fn find_matching(&self, email: &str, password: &str) -> Option<UserAccount> {
        self.list()
            .into_iter()
            .find(|account| account.matches(email, password))
    }

    /// Append an account and overwrite the stored list.
    ///
    /// Uniqueness is the caller's check; see [`Self::exists`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn append(&mut self, account: UserAccount) -> Result<(), StorageError> {
        let mut accounts = self.list();
        accounts.push(account);
        write_json(&mut *self.store, keys::USERS, &accounts)?;
        debug!(accounts = accounts.len(), "Saved account list");
        Ok(())
    }

    /// The signed-in email, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        current_user(&*self.store)
    }

    /// Set the signed-in email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn set_current_user(&mut self, email: &str) -> Result<(), StorageError> {
        self.store.set(keys::CURRENT_USER, email)
    }

    /// Clear the session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn clear_current_user(&mut self) -> Result<(), StorageError> {
        self.store.remove(keys::CURRENT_USER)
    }
}

/// The signed-in email stored in `store`, if any.
///
/// An empty stored value counts as signed out.
#[must_use]
pub fn current_user<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store
        .get(keys::CURRENT_USER)
        .filter(|email| !email.is_empty())
}
