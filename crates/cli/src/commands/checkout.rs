//! Checkout wizard, driven end to end.

use tracing::info;

use gameverse_core::CheckoutStep;
use gameverse_storefront::StorefrontError;
use gameverse_storefront::services::checkout::{CheckoutError, DeliveryForm, PaymentForm};

use super::{CliError, Shop, delivery_tier, refuse};

/// Everything the wizard asks for.
#[derive(Debug)]
pub struct CheckoutInput {
    pub delivery: String,
    pub address: DeliveryForm,
    pub payment: PaymentForm,
}

/// Run cart → delivery → payment → complete.
///
/// # Errors
///
/// Returns the first step that refuses to move.
pub fn run(shop: &mut Shop, input: CheckoutInput) -> Result<(), CliError> {
    shop.reset_checkout();
    let totals = shop.select_delivery(delivery_tier(&input.delivery));
    info!(
        "Checking out {} item(s), total {}",
        shop.item_count(),
        totals.total.display()
    );

    step_reached(shop.continue_to_delivery().map_err(refuse)?);

    match shop.continue_to_payment(&input.address) {
        Ok(step) => step_reached(step),
        Err(err) => {
            if let StorefrontError::Checkout(CheckoutError::InvalidDelivery(fields)) = &err {
                for field in fields {
                    info!("Missing or invalid: {}", field.id());
                }
            }
            return Err(refuse(err));
        }
    }

    let confirmation = shop.complete_purchase(&input.payment).map_err(refuse)?;
    info!("Order {} placed.", confirmation.order_number);
    info!(
        "{} item(s), {} via {} delivery",
        confirmation.item_count,
        confirmation.totals.summary().total,
        confirmation.totals.tier
    );
    Ok(())
}

fn step_reached(step: CheckoutStep) {
    info!("Step {} of 3: {step}", step.number());
}
