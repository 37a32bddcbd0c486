//! Catalog filter engine.
//!
//! The catalog is captured once from the product listings and never mutated.
//! [`select`] narrows and orders it for the current [`FilterSelection`]:
//!
//! 1. search (title or category contains the term)
//! 2. product type (accessory tokens in the category)
//! 3. price range
//! 4. sort by price, or keep catalog order for "Featured"
//!
//! Rendering goes through [`CatalogView`]: every item is hidden, then the
//! selected items are shown in result order. That re-append is the only way a
//! sort becomes visible.

mod listing;

use tracing::debug;

use gameverse_core::{FilterSelection, SortOrder};

pub use listing::{ListingError, Product, ProductListing};

/// The full, unfiltered product set.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from listings, in listing order.
    ///
    /// # Errors
    ///
    /// Returns `ListingError` for the first listing whose price cannot be
    /// parsed.
    pub fn from_listings<I>(listings: I) -> Result<Self, ListingError>
    where
        I: IntoIterator<Item = ProductListing>,
    {
        let products = listings
            .into_iter()
            .enumerate()
            .map(|(position, listing)| Product::from_listing(position, listing))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(products = products.len(), "Captured catalog");
        Ok(Self { products })
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by its display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true for an empty catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Select products for display. See [`select`].
    #[must_use]
    pub fn select(&self, selection: &FilterSelection) -> Vec<&Product> {
        select(&self.products, selection)
    }
}

/// Filter and order `catalog` for `selection`.
///
/// Pure: the same inputs always give the same ordered output, and applying a
/// selection to its own output changes nothing.
#[must_use]
pub fn select<'a>(catalog: &'a [Product], selection: &FilterSelection) -> Vec<&'a Product> {
    let term = selection.search_term();

    let mut selected: Vec<&Product> = catalog
        .iter()
        .filter(|p| term.is_empty() || p.title.contains(term) || p.category.contains(term))
        .filter(|p| selection.product_type.matches(&p.category))
        .filter(|p| selection.price_range.contains(p.price))
        .collect();

    // `sort_by` is stable, so equal prices keep catalog order.
    match selection.sort_by {
        SortOrder::Featured => {}
        SortOrder::PriceLowToHigh => selected.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::PriceHighToLow => selected.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    debug!(
        catalog = catalog.len(),
        selected = selected.len(),
        search = term,
        product_type = selection.product_type.label(),
        price_range = selection.price_range.label(),
        sort_by = selection.sort_by.label(),
        "Selected products"
    );

    selected
}

/// The rendering side of the catalog page.
pub trait CatalogView {
    /// Hide every catalog item.
    fn hide_all(&mut self, catalog: &[Product]);

    /// Show one item and move it to the end of the grid.
    fn show(&mut self, product: &Product);
}

/// Run a selection and push it into a view: hide all, then show in order.
///
/// Returns how many products are visible. Zero is a valid "no items" state.
pub fn display<V>(view: &mut V, catalog: &Catalog, selection: &FilterSelection) -> usize
where
    V: CatalogView + ?Sized,
{
    let selected = catalog.select(selection);

    view.hide_all(catalog.products());
    for product in &selected {
        view.show(product);
    }

    selected.len()
}
