//! Catalog filter selection.
//!
//! The three dropdowns on the games page plus the search box. Each enum parses
//! the dropdown label it is shown with, and a short kebab-case alias for
//! command-line use. Unrecognised labels fall back to the pass-through variant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// Category tokens that mark a product as an accessory.
pub const ACCESSORY_TOKENS: [&str; 3] = ["controller", "keyboard", "headset"];

/// Product type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    All,
    Games,
    Accessories,
}

impl ProductType {
    /// Parse a dropdown label or alias.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Games" | "games" => Self::Games,
            "Accessories" | "accessories" => Self::Accessories,
            _ => Self::All,
        }
    }

    /// The dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Products",
            Self::Games => "Games",
            Self::Accessories => "Accessories",
        }
    }

    /// Returns true if a lower-cased category belongs to this type.
    #[must_use]
    pub fn matches(self, category: &str) -> bool {
        let is_accessory = ACCESSORY_TOKENS
            .iter()
            .any(|token| category.contains(token));
        match self {
            Self::All => true,
            Self::Games => !is_accessory,
            Self::Accessories => is_accessory,
        }
    }
}

/// Price range dropdown.
///
/// `Under50` is strict (`< 50`) while `From50To100` is inclusive at both ends,
/// so a price of exactly 50 lands only in `From50To100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    #[default]
    Any,
    Under50,
    From50To100,
    Over100,
}

impl PriceRange {
    /// Parse a dropdown label or alias.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Under $50" | "under-50" => Self::Under50,
            "$50 - $100" | "$50-$100" | "50-100" => Self::From50To100,
            "Over $100" | "over-100" => Self::Over100,
            _ => Self::Any,
        }
    }

    /// The dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "Price Range",
            Self::Under50 => "Under $50",
            Self::From50To100 => "$50 - $100",
            Self::Over100 => "Over $100",
        }
    }

    /// Returns true if `price` falls inside this range.
    #[must_use]
    pub fn contains(self, price: Price) -> bool {
        let fifty = Decimal::from(50);
        let hundred = Decimal::from(100);
        let amount = price.amount();
        match self {
            Self::Any => true,
            Self::Under50 => amount < fifty,
            Self::From50To100 => amount >= fifty && amount <= hundred,
            Self::Over100 => amount > hundred,
        }
    }
}

/// Sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Catalog order, no reordering.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    /// Parse a dropdown label or alias.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Price: Low to High" | "price-asc" => Self::PriceLowToHigh,
            "Price: High to Low" | "price-desc" => Self::PriceHighToLow,
            _ => Self::Featured,
        }
    }

    /// The dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Sort By: Featured",
            Self::PriceLowToHigh => "Price: Low to High",
            Self::PriceHighToLow => "Price: High to Low",
        }
    }
}

/// The current dropdown and search selections.
///
/// Transient: never persisted, and `Default` is the page-load state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub product_type: ProductType,
    pub price_range: PriceRange,
    pub sort_by: SortOrder,
    search_term: String,
}

impl FilterSelection {
    /// Create a selection from the three dropdowns and a raw search input.
    #[must_use]
    pub fn new(
        product_type: ProductType,
        price_range: PriceRange,
        sort_by: SortOrder,
        search: &str,
    ) -> Self {
        let mut selection = Self {
            product_type,
            price_range,
            sort_by,
            search_term: String::new(),
        };
        selection.set_search(search);
        selection
    }

    /// Replace the search term. The input is trimmed and lower-cased.
    pub fn set_search(&mut self, raw: &str) {
        self.search_term = raw.trim().to_lowercase();
    }

    /// Clear the search term, as when the search bar is closed.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    /// The normalized search term; empty means no search.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}
