//! Order totals.
//!
//! Totals keep full decimal precision. Rounding to cents happens only when an
//! [`OrderSummary`] is produced for display, so repeated recalculation never
//! compounds rounding error.

use rust_decimal::Decimal;
use serde::Serialize;

use gameverse_core::{DeliveryTier, Price};

use super::CartLine;

/// Flat sales tax, in percent.
pub const TAX_RATE_PERCENT: i64 = 9;

fn tax_rate() -> Decimal {
    Decimal::new(TAX_RATE_PERCENT, 2)
}

/// Subtotal, tax, shipping and total for a cart at one delivery tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub tier: DeliveryTier,
    pub subtotal: Price,
    pub tax: Price,
    pub shipping: Price,
    pub total: Price,
}

impl OrderTotals {
    /// Compute totals for a set of lines.
    #[must_use]
    pub fn compute(lines: &[CartLine], tier: DeliveryTier) -> Self {
        let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal.scaled(tax_rate());
        let shipping = tier.shipping();

        Self {
            tier,
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// Display strings for the order summary panel.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            subtotal: self.subtotal.display(),
            tax: self.tax.display(),
            shipping: if self.shipping.is_zero() {
                "FREE".to_string()
            } else {
                self.shipping.display()
            },
            free_shipping: self.shipping.is_zero(),
            total: self.total.display(),
        }
    }
}

/// Rounded, formatted totals ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: String,
    pub tax: String,
    /// `FREE` when shipping costs nothing.
    pub shipping: String,
    pub free_shipping: bool,
    pub total: String,
}

/// Text for the cart badge. `None` hides the badge.
#[must_use]
pub fn badge_label(item_count: u32) -> Option<String> {
    (item_count > 0).then(|| item_count.to_string())
}
