//! Delivery and checkout status enums.

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Shipping speed selected on the delivery step.
///
/// The radio values are `standard`, `express` and `overnight`; anything else
/// is treated as [`DeliveryTier::Standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTier {
    /// Free shipping.
    #[default]
    Standard,
    /// $4.99 shipping.
    Express,
    /// $9.99 shipping.
    Overnight,
}

impl DeliveryTier {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Overnight];

    /// Map a radio value to a tier, falling back to standard.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "express" => Self::Express,
            "overnight" => Self::Overnight,
            _ => Self::Standard,
        }
    }

    /// The radio value for this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }

    /// Flat shipping charge for this tier.
    #[must_use]
    pub fn shipping(self) -> Price {
        match self {
            Self::Standard => Price::ZERO,
            Self::Express => Price::from_cents(499),
            Self::Overnight => Price::from_cents(999),
        }
    }
}

impl std::fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position in the three-step checkout wizard.
///
/// `Complete` is the terminal state reached after a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Reviewing cart lines.
    #[default]
    Cart,
    /// Entering the delivery address and tier.
    Delivery,
    /// Entering payment details.
    Payment,
    /// Purchase completed.
    Complete,
}

impl CheckoutStep {
    /// The step indicator number shown in the wizard header.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Cart => 1,
            Self::Delivery => 2,
            Self::Payment | Self::Complete => 3,
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cart => write!(f, "cart"),
            Self::Delivery => write!(f, "delivery"),
            Self::Payment => write!(f, "payment"),
            Self::Complete => write!(f, "complete"),
        }
    }
}
