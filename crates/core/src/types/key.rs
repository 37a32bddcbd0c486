//! Product key type.
//!
//! Cart lines have no stable product ID: the product's display name is its
//! de facto primary key. `ProductKey` keeps that name from being mixed up with
//! other free text such as categories or image references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The display name that identifies a product within a cart.
///
/// Keys compare by exact text, so `"Elden Ring"` and `"elden ring"` are
/// different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    /// Create a new key from a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductKey {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for ProductKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ProductKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
