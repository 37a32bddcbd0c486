//! Checkout error types.

use thiserror::Error;

use gameverse_core::CheckoutStep;

use super::DeliveryField;

/// Reasons the checkout wizard refuses to move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Leaving the cart step with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Leaving the cart step without a session.
    #[error("not signed in")]
    NotSignedIn,

    /// Delivery fields that are blank or malformed.
    #[error("invalid delivery fields: {0:?}")]
    InvalidDelivery(Vec<DeliveryField>),

    /// Payment fields that fail the length checks.
    #[error("invalid payment details")]
    InvalidPayment,

    /// The operation does not apply at the current step.
    #[error("expected {expected} step, checkout is at {actual}")]
    WrongStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },
}

impl CheckoutError {
    /// The message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty! Add some items first.".to_string(),
            Self::NotSignedIn => {
                "You need to log in or sign up to continue checkout.".to_string()
            }
            Self::InvalidDelivery(_) => "Please fill in all required fields correctly".to_string(),
            Self::InvalidPayment => "Please enter valid payment details.".to_string(),
            Self::WrongStep { actual, .. } => {
                format!("That isn't available on the {actual} step.")
            }
        }
    }
}
