//! Checkout wizard.
//!
//! Three linear steps, Cart → Delivery → Payment, gated by validation:
//!
//! - leaving Cart needs a non-empty cart and a signed-in session
//! - leaving Delivery needs every address field filled and a `text@text.text` email
//! - completing Payment needs superficially plausible card fields
//!
//! The payment checks are a mock. Nothing is charged and nothing here should
//! be mistaken for real card validation.

mod error;

pub use error::CheckoutError;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use gameverse_core::CheckoutStep;

use crate::cart::{CartLine, OrderTotals};

/// Minimum card number length, counting the spaces of `1234 5678 9012 3456`.
const MIN_CARD_NUMBER_LENGTH: usize = 19;
/// Minimum expiry length (`MM/YY`).
const MIN_EXPIRY_LENGTH: usize = 5;
/// Minimum CVV length.
const MIN_CVV_LENGTH: usize = 3;

/// Loose contact email shape. Unanchored, so surrounding text is tolerated.
static CONTACT_EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid regex"));

/// Returns true if `s` contains a `text@text.text` shaped run.
#[must_use]
pub fn is_contact_email(s: &str) -> bool {
    CONTACT_EMAIL_RE.is_match(s)
}

/// Input length as a browser counts it (UTF-16 code units).
fn input_length(s: &str) -> usize {
    s.encode_utf16().count()
}

/// A required field on the delivery form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryField {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    City,
    State,
    Zip,
    Country,
}

impl DeliveryField {
    /// Every required field, in form order.
    pub const ALL: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Street,
        Self::City,
        Self::State,
        Self::Zip,
        Self::Country,
    ];

    /// The form element id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
            Self::Country => "country",
        }
    }
}

/// The delivery address form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl DeliveryForm {
    /// The raw value of one field.
    #[must_use]
    pub fn value(&self, field: DeliveryField) -> &str {
        match field {
            DeliveryField::FirstName => &self.first_name,
            DeliveryField::LastName => &self.last_name,
            DeliveryField::Email => &self.email,
            DeliveryField::Phone => &self.phone,
            DeliveryField::Street => &self.street,
            DeliveryField::City => &self.city,
            DeliveryField::State => &self.state,
            DeliveryField::Zip => &self.zip,
            DeliveryField::Country => &self.country,
        }
    }

    /// Fields that are blank after trimming, or an email without the
    /// `text@text.text` shape. Empty when the form is acceptable.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<DeliveryField> {
        DeliveryField::ALL
            .into_iter()
            .filter(|&field| {
                let value = self.value(field).trim();
                match field {
                    DeliveryField::Email => !is_contact_email(value),
                    _ => value.is_empty(),
                }
            })
            .collect()
    }
}

/// The mock payment form.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentForm {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentForm {
    /// Length-only checks, in UTF-16 code units. Inputs are not trimmed.
    #[must_use]
    pub fn looks_complete(&self) -> bool {
        input_length(&self.card_number) >= MIN_CARD_NUMBER_LENGTH
            && input_length(&self.expiry) >= MIN_EXPIRY_LENGTH
            && input_length(&self.cvv) >= MIN_CVV_LENGTH
    }
}

impl std::fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentForm")
            .field("card_number", &"[REDACTED]")
            .field("expiry", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

/// Returned when a purchase completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub totals: OrderTotals,
}

impl OrderConfirmation {
    /// Stamp a new confirmation for the purchased lines.
    #[must_use]
    pub fn new(lines: Vec<CartLine>, totals: OrderTotals) -> Self {
        let item_count = lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.quantity));
        Self {
            order_number: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines,
            item_count,
            totals,
        }
    }
}

/// The wizard's position. Starts at [`CheckoutStep::Cart`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutStepper {
    step: CheckoutStep,
}

impl CheckoutStepper {
    /// A wizard at the cart step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: CheckoutStep::Cart,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    fn require_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// Cart → Delivery.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when `item_count` is zero,
    /// `CheckoutError::NotSignedIn` without a session, and
    /// `CheckoutError::WrongStep` outside the cart step.
    pub fn continue_to_delivery(
        &mut self,
        item_count: u32,
        signed_in: bool,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::Cart)?;
        if item_count == 0 {
            return Err(CheckoutError::EmptyCart);
        }
        if !signed_in {
            return Err(CheckoutError::NotSignedIn);
        }

        self.step = CheckoutStep::Delivery;
        debug!(step = %self.step, "Checkout advanced");
        Ok(self.step)
    }

    /// Delivery → Payment.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidDelivery` listing every bad field, and
    /// `CheckoutError::WrongStep` outside the delivery step.
    pub fn continue_to_payment(
        &mut self,
        form: &DeliveryForm,
    ) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::Delivery)?;

        let invalid = form.invalid_fields();
        if !invalid.is_empty() {
            debug!(fields = ?invalid, "Delivery form rejected");
            return Err(CheckoutError::InvalidDelivery(invalid));
        }

        self.step = CheckoutStep::Payment;
        debug!(step = %self.step, "Checkout advanced");
        Ok(self.step)
    }

    /// Payment → Delivery.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` outside the payment step.
    pub fn back_to_delivery(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::Payment)?;
        self.step = CheckoutStep::Delivery;
        debug!(step = %self.step, "Checkout went back");
        Ok(self.step)
    }

    /// Check the payment form without moving.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidPayment` if the fields are too short, and
    /// `CheckoutError::WrongStep` outside the payment step.
    pub fn validate_payment(&self, form: &PaymentForm) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Payment)?;
        if form.looks_complete() {
            Ok(())
        } else {
            Err(CheckoutError::InvalidPayment)
        }
    }

    /// Payment → Complete. Call once the payment form has been validated and
    /// the emptied cart persisted.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::WrongStep` outside the payment step.
    pub fn finish(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.require_step(CheckoutStep::Payment)?;
        self.step = CheckoutStep::Complete;
        info!("Checkout complete");
        Ok(self.step)
    }

    /// Start over at the cart step.
    pub fn reset(&mut self) {
        self.step = CheckoutStep::Cart;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_form() -> DeliveryForm {
        DeliveryForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@gameverse.gg".to_string(),
            phone: "555-0100".to_string(),
            street: "1 Engine Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip: "12345".to_string(),
            country: "UK".to_string(),
        }
    }

    fn valid_payment() -> PaymentForm {
        PaymentForm {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_contact_email_accepts() {
        assert!(is_contact_email("a@b.c"));
        assert!(is_contact_email("player@gameverse.gg"));
        assert!(is_contact_email("first.last@mail.co.uk"));
        assert!(is_contact_email("@@b.c"));
        // Unanchored: surrounding text is tolerated.
        assert!(is_contact_email("mail me at player@gameverse.gg please"));
    }

    #[test]
    fn test_contact_email_rejects() {
        assert!(!is_contact_email(""));
        assert!(!is_contact_email("player"));
        assert!(!is_contact_email("player@gameverse"));
        assert!(!is_contact_email("@gameverse.gg"));
        assert!(!is_contact_email("player@.gg"));
        assert!(!is_contact_email("player@gameverse."));
        assert!(!is_contact_email("player @gameverse.gg"));
        assert!(!is_contact_email("player@game verse.gg"));
    }

    #[test]
    fn test_payment_lengths_count_utf16_units() {
        // One astral character is two code units, like a browser's `length`.
        let cvv = PaymentForm {
            cvv: "1\u{1F3AE}".to_string(),
            ..valid_payment()
        };
        assert!(cvv.looks_complete());

        let short = PaymentForm {
            cvv: "1\u{e9}".to_string(),
            ..valid_payment()
        };
        assert!(!short.looks_complete());
    }

    #[test]
    fn test_cart_step_gates() {
        let mut stepper = CheckoutStepper::new();

        assert_eq!(
            stepper.continue_to_delivery(0, true),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(
            stepper.continue_to_delivery(2, false),
            Err(CheckoutError::NotSignedIn)
        );
        assert_eq!(stepper.step(), CheckoutStep::Cart);

        assert_eq!(
            stepper.continue_to_delivery(2, true),
            Ok(CheckoutStep::Delivery)
        );
    }

    #[test]
    fn test_empty_cart_is_reported_before_session() {
        let mut stepper = CheckoutStepper::new();
        assert_eq!(
            stepper.continue_to_delivery(0, false),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_delivery_form_reports_every_bad_field() {
        let form = DeliveryForm {
            first_name: "  ".to_string(),
            email: "ada@gameverse".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.invalid_fields(),
            [DeliveryField::FirstName, DeliveryField::Email]
        );
        assert!(filled_form().invalid_fields().is_empty());
        assert_eq!(DeliveryForm::default().invalid_fields().len(), 9);
    }

    #[test]
    fn test_delivery_step_gate() {
        let mut stepper = CheckoutStepper::new();
        stepper.continue_to_delivery(1, true).unwrap();

        let err = stepper
            .continue_to_payment(&DeliveryForm::default())
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please fill in all required fields correctly"
        );
        assert_eq!(stepper.step(), CheckoutStep::Delivery);

        assert_eq!(
            stepper.continue_to_payment(&filled_form()),
            Ok(CheckoutStep::Payment)
        );
    }

    #[test]
    fn test_back_and_forward() {
        let mut stepper = CheckoutStepper::new();
        stepper.continue_to_delivery(1, true).unwrap();
        stepper.continue_to_payment(&filled_form()).unwrap();

        assert_eq!(stepper.back_to_delivery(), Ok(CheckoutStep::Delivery));
        assert!(matches!(
            stepper.back_to_delivery(),
            Err(CheckoutError::WrongStep { .. })
        ));
        assert_eq!(
            stepper.continue_to_payment(&filled_form()),
            Ok(CheckoutStep::Payment)
        );
    }

    #[test]
    fn test_payment_length_checks() {
        assert!(valid_payment().looks_complete());
        assert!(
            !PaymentForm {
                card_number: "4242 4242 4242 424".to_string(),
                ..valid_payment()
            }
            .looks_complete()
        );
        assert!(
            !PaymentForm {
                expiry: "1/30".to_string(),
                ..valid_payment()
            }
            .looks_complete()
        );
        assert!(
            !PaymentForm {
                cvv: "12".to_string(),
                ..valid_payment()
            }
            .looks_complete()
        );
    }

    #[test]
    fn test_payment_debug_is_redacted() {
        let debug_output = format!("{:?}", valid_payment());
        assert!(!debug_output.contains("4242"));
        assert!(!debug_output.contains("123"));
    }

    #[test]
    fn test_finish_requires_payment_step() {
        let mut stepper = CheckoutStepper::new();
        assert!(matches!(
            stepper.validate_payment(&valid_payment()),
            Err(CheckoutError::WrongStep {
                expected: CheckoutStep::Payment,
                actual: CheckoutStep::Cart
            })
        ));
        assert!(stepper.finish().is_err());

        stepper.continue_to_delivery(1, true).unwrap();
        stepper.continue_to_payment(&filled_form()).unwrap();
        assert_eq!(
            stepper.validate_payment(&PaymentForm::default()),
            Err(CheckoutError::InvalidPayment)
        );
        stepper.validate_payment(&valid_payment()).unwrap();
        assert_eq!(stepper.finish(), Ok(CheckoutStep::Complete));

        stepper.reset();
        assert_eq!(stepper.step(), CheckoutStep::Cart);
    }
}
