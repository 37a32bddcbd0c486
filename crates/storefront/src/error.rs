//! Unified error handling.
//!
//! Provides a unified `StorefrontError` type for every operation on the
//! [`Storefront`](crate::state::Storefront) context, and the mapping from an
//! error to the toast the user sees.

use thiserror::Error;

use crate::catalog::ListingError;
use crate::models::Notice;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Persisting state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Sign-up, login or logout failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The checkout wizard refused to move.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A catalog listing could not be loaded.
    #[error("Catalog error: {0}")]
    Listing(#[from] ListingError),

    /// A product name that is not in the catalog.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorefrontError {
    /// The toast for this error.
    ///
    /// Storage and catalog failures are logged here and shown generically.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Storage(_) | Self::Listing(_) | Self::Auth(AuthError::Storage(_)) => {
                tracing::error!(error = %self, "Storefront error");
                Notice::error("Something went wrong. Please try again.")
            }
            Self::Auth(err) => Notice::error(err.user_message()),
            Self::Checkout(err @ (CheckoutError::EmptyCart | CheckoutError::NotSignedIn)) => {
                Notice::info(err.user_message())
            }
            Self::Checkout(err) => Notice::error(err.user_message()),
            Self::NotFound(name) => Notice::error(format!("{name} is not in the catalog.")),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
