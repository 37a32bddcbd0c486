//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;

use thiserror::Error;
use tracing::{info, warn};

use gameverse_core::DeliveryTier;
use gameverse_storefront::catalog::{Catalog, ListingError};
use gameverse_storefront::config::StorefrontConfig;
use gameverse_storefront::models::{Notice, NoticeLevel};
use gameverse_storefront::storage::FileStore;
use gameverse_storefront::{Storefront, StorefrontError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid YAML.
    #[error("Invalid catalog file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A catalog listing is unusable.
    #[error("Invalid catalog listing: {0}")]
    Listing(#[from] ListingError),

    /// A price argument could not be parsed.
    #[error("Invalid price: {0}")]
    Price(#[from] gameverse_core::PriceError),

    /// The storefront refused the operation.
    #[error("{0}")]
    Storefront(#[from] StorefrontError),
}

/// The CLI's storefront session type.
pub type Shop = Storefront<FileStore>;

/// Open a session on the configured store file.
pub fn open(config: &StorefrontConfig, catalog: Catalog) -> Shop {
    Storefront::new(FileStore::open(&config.store_path), catalog)
}

/// Report a notice at a matching log level.
pub fn report(notice: &Notice) {
    match notice.level {
        NoticeLevel::Error => warn!("{notice}"),
        NoticeLevel::Success | NoticeLevel::Info => info!("{notice}"),
    }
}

/// Report a storefront error as its notice, then pass it on.
pub fn refuse(err: StorefrontError) -> CliError {
    report(&err.notice());
    CliError::Storefront(err)
}

/// Map a `--delivery` value to a tier. Unknown values fall back to standard
/// with a warning.
#[must_use]
pub fn delivery_tier(value: &str) -> DeliveryTier {
    let tier = DeliveryTier::from_value(value);
    if !DeliveryTier::ALL.iter().any(|t| t.as_str() == value.trim()) {
        let known: Vec<&str> = DeliveryTier::ALL.iter().map(|t| t.as_str()).collect();
        warn!(
            "Unknown delivery tier `{value}`, using {tier} (expected one of: {})",
            known.join(", ")
        );
    }
    tier
}
