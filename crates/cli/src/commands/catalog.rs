//! Catalog browsing.

use std::path::Path;

use tracing::{debug, info};

use gameverse_core::{PriceRange, ProductType, SortOrder};
use gameverse_storefront::catalog::{Catalog, ProductListing};

use super::{CliError, Shop};

/// The built-in catalog.
const DEFAULT_CATALOG: &str = include_str!("../../catalog.yaml");

/// Load the catalog from a YAML file, or the built-in one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a listing has an
/// unusable price.
pub fn load(path: Option<&Path>) -> Result<Catalog, CliError> {
    let listings: Vec<ProductListing> = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading catalog file");
            serde_yaml::from_str(&std::fs::read_to_string(path)?)?
        }
        None => serde_yaml::from_str(DEFAULT_CATALOG)?,
    };
    Ok(Catalog::from_listings(listings)?)
}

/// List the products for a selection.
pub fn list(shop: &mut Shop, product_type: &str, price: &str, sort: &str, search: &str) {
    shop.set_product_type(ProductType::from_label(product_type));
    shop.set_price_range(PriceRange::from_label(price));
    shop.set_sort(SortOrder::from_label(sort));
    shop.set_search(search);

    let selection = shop.selection();
    info!(
        "{} | {} | {}",
        selection.product_type.label(),
        selection.price_range.label(),
        selection.sort_by.label()
    );

    let products = shop.visible_products();
    if products.is_empty() {
        info!("No products match.");
        return;
    }
    for product in &products {
        info!(
            "{:>10}  {}  ({})",
            product.price.display(),
            product.name,
            product.display_category
        );
    }
    info!("{} of {} products", products.len(), shop.catalog().len());
}
