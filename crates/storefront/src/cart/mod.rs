//! Cart line items and their mutations.
//!
//! A cart is an insertion-ordered list of [`CartLine`]s with at most one line
//! per product key. These are plain in-memory operations; persisting the
//! result is the caller's job (see [`crate::storage::CartRepository`]).

mod totals;

use serde::{Deserialize, Deserializer, Serialize};

use gameverse_core::{DeliveryTier, Price, ProductKey};

pub use totals::{OrderSummary, OrderTotals, TAX_RATE_PERCENT, badge_label};

/// One product/quantity pairing in a cart.
///
/// Everything except `quantity` is captured when the product is first added
/// and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Display name, used as the line's key.
    pub product: ProductKey,
    /// Unit price at add time.
    pub price: Price,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Category text as displayed.
    #[serde(default)]
    pub category: String,
    /// Always at least 1.
    #[serde(
        default = "default_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Stored quantities below 1 are read as 1.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let quantity = Option::<u32>::deserialize(deserializer)?;
    Ok(quantity.unwrap_or(1).max(1))
}

impl CartLine {
    /// Create a line with quantity 1.
    #[must_use]
    pub fn new(
        product: impl Into<ProductKey>,
        price: Price,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            price,
            image: image.into(),
            category: category.into(),
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An insertion-ordered shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a product.
    ///
    /// If a line with the same key exists its quantity goes up by one and the
    /// incoming line is otherwise ignored. Otherwise the line is appended with
    /// quantity 1. Returns the line's quantity afterwards.
    pub fn add(&mut self, line: CartLine) -> u32 {
        if let Some(existing) = self.line_mut(line.product.as_str()) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.lines.push(CartLine {
            quantity: 1,
            ..line
        });
        1
    }

    /// Remove every line with this key. Returns true if anything was removed.
    pub fn remove(&mut self, product: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product != product);
        self.lines.len() != before
    }

    /// Add `delta` to a line's quantity, flooring at 1.
    ///
    /// Returns the new quantity, or `None` if no line has this key.
    pub fn change_quantity(&mut self, product: &str, delta: i32) -> Option<u32> {
        let line = self.line_mut(product)?;
        let next = (i64::from(line.quantity) + i64::from(delta)).max(1);
        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Some(line.quantity)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Subtotal, tax, shipping and total for a delivery tier.
    #[must_use]
    pub fn totals(&self, tier: DeliveryTier) -> OrderTotals {
        OrderTotals::compute(&self.lines, tier)
    }

    /// Find a line by key.
    #[must_use]
    pub fn get(&self, product: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product == product)
    }

    fn line_mut(&mut self, product: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product == product)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
