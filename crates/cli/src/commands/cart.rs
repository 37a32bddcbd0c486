//! Cart commands.

use tracing::info;

use gameverse_core::Price;
use gameverse_storefront::cart::CartLine;

use super::{CliError, Shop, delivery_tier, refuse, report};

/// Print the cart and its totals.
pub fn show(shop: &mut Shop, delivery: &str) {
    shop.select_delivery(delivery_tier(delivery));

    if shop.cart().is_empty() {
        info!("Your cart is empty.");
        return;
    }
    for line in shop.cart().lines() {
        info!(
            "{:>3} x {}  {}  = {}",
            line.quantity,
            line.product,
            line.price.display(),
            line.line_total().display()
        );
    }

    let summary = shop.summary();
    info!("Subtotal: {}", summary.subtotal);
    info!("Tax:      {}", summary.tax);
    info!("Shipping: {} ({})", summary.shipping, shop.delivery());
    info!("Total:    {}", summary.total);
}

/// Add a catalog product, or a custom line when a price is given.
///
/// # Errors
///
/// Returns an error if the price is invalid, the product is unknown, or the
/// cart cannot be saved.
pub fn add(
    shop: &mut Shop,
    product: &str,
    price: Option<&str>,
    category: &str,
    image: &str,
) -> Result<(), CliError> {
    let result = match price {
        Some(price) => {
            let line = CartLine::new(product, Price::parse(price)?, image, category);
            shop.add_to_cart(line)
        }
        None => shop.add_product(product),
    };
    report(&result.map_err(refuse)?);
    info!("Cart: {} item(s)", shop.item_count());
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(shop: &mut Shop, product: &str) -> Result<(), CliError> {
    report(&shop.remove_from_cart(product).map_err(refuse)?);
    Ok(())
}

/// Change a product's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn quantity(shop: &mut Shop, product: &str, delta: i32) -> Result<(), CliError> {
    match shop.update_quantity(product, delta).map_err(refuse)? {
        Some(quantity) => info!("{product}: quantity {quantity}"),
        None => info!("{product} is not in the cart."),
    }
    Ok(())
}
