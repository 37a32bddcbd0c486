//! Product listings and the products built from them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gameverse_core::{Price, PriceError};

use crate::cart::CartLine;

/// A listing could not be turned into a [`Product`].
#[derive(Debug, Error)]
pub enum ListingError {
    /// The price text is not a usable price.
    #[error("listing {position} ({title}): {source}")]
    Price {
        position: usize,
        title: String,
        #[source]
        source: PriceError,
    },
}

/// A product card as it appears in the catalog markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    pub title: String,
    pub category: String,
    /// Price as displayed, e.g. `"$59.99"`.
    pub price: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductListing {
    /// Create a listing without an image.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            price: price.into(),
            image: None,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A catalog entry prepared for filtering.
///
/// `title` and `category` are lower-cased for matching; `name` and
/// `display_category` keep the text as shown. `position` is the product's
/// index in the source listing and is its only identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub position: usize,
    pub name: String,
    pub title: String,
    pub display_category: String,
    pub category: String,
    pub price: Price,
    pub image: String,
}

impl Product {
    /// Build a product from the listing at `position`.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::Price` if the price text is empty, not a number,
    /// or negative.
    pub fn from_listing(position: usize, listing: ProductListing) -> Result<Self, ListingError> {
        let price = Price::parse(&listing.price).map_err(|source| ListingError::Price {
            position,
            title: listing.title.clone(),
            source,
        })?;

        Ok(Self {
            position,
            title: listing.title.to_lowercase(),
            category: listing.category.to_lowercase(),
            name: listing.title,
            display_category: listing.category,
            price,
            image: listing.image.unwrap_or_default(),
        })
    }

    /// The cart line an "add to cart" click on this product produces.
    #[must_use]
    pub fn to_cart_line(&self) -> CartLine {
        CartLine::new(
            self.name.as_str(),
            self.price,
            self.image.as_str(),
            self.display_category.as_str(),
        )
    }
}
