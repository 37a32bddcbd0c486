//! Key-value persistence for the storefront.
//!
//! # Keys
//!
//! Everything the storefront remembers lives under three fixed keys:
//!
//! - `gameverse_cart` - JSON array of cart lines
//! - `gameverse_users` - JSON array of prototype accounts
//! - `gameverse_currentUser` - the signed-in email as a plain string
//!
//! # Semantics
//!
//! Reads never fail: an absent or malformed value is treated as empty and
//! logged at `warn`. Writes overwrite the whole value and happen synchronously
//! with the mutation that caused them. Last writer wins.

pub mod accounts;
pub mod cart;
mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub use accounts::AccountRepository;
pub use cart::CartRepository;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed storage keys.
pub mod keys {
    /// Key for the serialized cart.
    pub const CART: &str = "gameverse_cart";

    /// Key for the stored account list.
    pub const USERS: &str = "gameverse_users";

    /// Key for the signed-in account email.
    pub const CURRENT_USER: &str = "gameverse_currentUser";
}

/// Errors that can occur while writing to a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string key-value store (the browser's local storage, or a stand-in).
pub trait KeyValueStore {
    /// Read a value. `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read a JSON value, falling back to `T::default()` when absent or malformed.
pub fn read_json<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Ignoring malformed stored value");
            T::default()
        }
    }
}

/// Serialize and overwrite a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the write fails.
pub fn write_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
