//! Core types for GameVerse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod filter;
pub mod key;
pub mod price;
pub mod status;

pub use filter::{FilterSelection, PriceRange, ProductType, SortOrder};
pub use key::ProductKey;
pub use price::{Price, PriceError};
pub use status::{CheckoutStep, DeliveryTier};
