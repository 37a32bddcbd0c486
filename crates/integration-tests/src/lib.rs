//! Integration tests for the GameVerse storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gameverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Browse, fill the cart, sign in, check out
//! - `persistence` - Stored blobs and sessions across reopen
//! - `catalog_properties` - Filter engine invariants over the sample catalog
//!
//! This crate holds the shared fixtures.

use gameverse_core::Price;
use gameverse_storefront::Storefront;
use gameverse_storefront::cart::{Cart, CartLine};
use gameverse_storefront::catalog::{Catalog, ListingError, ProductListing};
use gameverse_storefront::services::checkout::{DeliveryForm, PaymentForm};
use gameverse_storefront::storage::MemoryStore;

/// Listings for a small mixed catalog, in featured order.
#[must_use]
pub fn sample_listings() -> Vec<ProductListing> {
    vec![
        ProductListing::new("Starfall Odyssey", "Adventure", "$59.99"),
        ProductListing::new("Neon Drift Rally", "Racing", "$39.99"),
        ProductListing::new("Pro Wireless Controller", "Controller", "$69.99"),
        ProductListing::new("Mechanical Keyboard RGB", "Keyboard", "$129.99"),
        ProductListing::new("Pixel Dungeon Deluxe", "Indie", "$19.99"),
        ProductListing::new("Surround Sound Headset", "Headset", "$89.99"),
        ProductListing::new("Budget Bundle", "Bundle", "$50.00"),
        ProductListing::new("Shadow Protocol", "Action", "$100.00"),
        ProductListing::new("Galactic Siege", "Strategy", "$119.99"),
    ]
}

/// The sample catalog.
///
/// # Errors
///
/// Returns `ListingError` if a sample price fails to parse.
pub fn sample_catalog() -> Result<Catalog, ListingError> {
    Catalog::from_listings(sample_listings())
}

/// A fresh in-memory session over the sample catalog.
///
/// # Errors
///
/// Returns `ListingError` if a sample price fails to parse.
pub fn memory_storefront() -> Result<Storefront<MemoryStore>, ListingError> {
    Ok(Storefront::new(MemoryStore::new(), sample_catalog()?))
}

/// A cart line for an arbitrary product.
#[must_use]
pub fn line(product: &str, cents: i64, category: &str) -> CartLine {
    CartLine::new(product, Price::from_cents(cents), "", category)
}

/// A cart built by adding each product `quantity` times.
#[must_use]
pub fn cart_of(items: &[(&str, i64, u32)]) -> Cart {
    let mut cart = Cart::new();
    for &(product, cents, quantity) in items {
        for _ in 0..quantity {
            cart.add(line(product, cents, "game"));
        }
    }
    cart
}

/// A delivery form that passes validation.
#[must_use]
pub fn valid_delivery() -> DeliveryForm {
    DeliveryForm {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@gameverse.gg".into(),
        phone: "555-0100".into(),
        street: "1 Analytical Way".into(),
        city: "London".into(),
        state: "LDN".into(),
        zip: "00001".into(),
        country: "UK".into(),
    }
}

/// A payment form that passes the length checks.
#[must_use]
pub fn valid_payment() -> PaymentForm {
    PaymentForm {
        card_number: "4242 4242 4242 4242".into(),
        expiry: "12/30".into(),
        cvv: "123".into(),
    }
}

/// Parse a stored JSON value.
///
/// # Errors
///
/// Returns the parse error for malformed input.
pub fn stored_json(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(raw)
}
