//! The storefront context.
//!
//! [`Storefront`] owns everything a page session touches: the key-value
//! store, the captured catalog, the filter selection, the in-memory cart, the
//! chosen delivery tier and the checkout wizard. All mutation goes through
//! `&mut self`.
//!
//! Cart mutations are applied to a copy, persisted, and only then swapped in,
//! so the in-memory cart never runs ahead of what was stored.

use tracing::{debug, info, instrument};

use gameverse_core::{
    CheckoutStep, DeliveryTier, FilterSelection, PriceRange, ProductType, SortOrder,
};

use crate::cart::{Cart, CartLine, OrderSummary, OrderTotals, badge_label};
use crate::catalog::{self, Catalog, CatalogView, Product};
use crate::error::{Result, StorefrontError};
use crate::models::{Destination, Notice, ProfileAction};
use crate::services::auth::{AuthOutcome, AuthService};
use crate::services::checkout::{CheckoutStepper, DeliveryForm, OrderConfirmation, PaymentForm};
use crate::storage::{CartRepository, KeyValueStore, accounts};

/// Storefront session state over a key-value store.
#[derive(Debug)]
pub struct Storefront<S> {
    store: S,
    catalog: Catalog,
    selection: FilterSelection,
    cart: Cart,
    delivery: DeliveryTier,
    checkout: CheckoutStepper,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open a session. The cart is loaded from the store.
    #[must_use]
    pub fn new(mut store: S, catalog: Catalog) -> Self {
        let cart = CartRepository::new(&mut store).load();
        Self {
            store,
            catalog,
            selection: FilterSelection::default(),
            cart,
            delivery: DeliveryTier::default(),
            checkout: CheckoutStepper::new(),
        }
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Close the session and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Re-read the cart from the store, as a page load does.
    pub fn reload_cart(&mut self) {
        self.cart = CartRepository::new(&mut self.store).load();
    }

    // Catalog

    /// The full catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current filter selection.
    pub const fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Choose the product type dropdown value.
    pub const fn set_product_type(&mut self, product_type: ProductType) {
        self.selection.product_type = product_type;
    }

    /// Choose the price range dropdown value.
    pub const fn set_price_range(&mut self, price_range: PriceRange) {
        self.selection.price_range = price_range;
    }

    /// Choose the sort dropdown value.
    pub const fn set_sort(&mut self, sort_by: SortOrder) {
        self.selection.sort_by = sort_by;
    }

    /// Update the search term from raw input.
    pub fn set_search(&mut self, raw: &str) {
        self.selection.set_search(raw);
    }

    /// Closing the search bar drops the term.
    pub fn clear_search(&mut self) {
        self.selection.clear_search();
    }

    /// Products matching the current selection, in display order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.select(&self.selection)
    }

    /// Push the current selection into a view. Returns the visible count.
    pub fn render_catalog<V: CatalogView + ?Sized>(&self, view: &mut V) -> usize {
        catalog::display(view, &self.catalog, &self.selection)
    }

    // Cart

    /// The in-memory cart.
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a line and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Storage` if the cart cannot be saved. The
    /// in-memory cart is left unchanged in that case.
    #[instrument(skip(self, line), fields(product = %line.product))]
    pub fn add_to_cart(&mut self, line: CartLine) -> Result<Notice> {
        let product = line.product.to_string();

        let mut cart = self.cart.clone();
        let quantity = cart.add(line);
        self.persist(cart)?;

        info!(quantity, items = self.item_count(), "Added to cart");
        Ok(Notice::success(format!("{product} added to cart!")))
    }

    /// Add the catalog product with this display name.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotFound` if no product has this name, or
    /// `StorefrontError::Storage` if the cart cannot be saved.
    pub fn add_product(&mut self, name: &str) -> Result<Notice> {
        let line = self
            .catalog
            .find(name)
            .map(Product::to_cart_line)
            .ok_or_else(|| StorefrontError::NotFound(name.to_owned()))?;
        self.add_to_cart(line)
    }

    /// Remove every line for `product` and persist the cart.
    ///
    /// Removing an absent product still rewrites the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Storage` if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product: &str) -> Result<Notice> {
        let mut cart = self.cart.clone();
        let removed = cart.remove(product);
        self.persist(cart)?;

        info!(removed, items = self.item_count(), "Removed from cart");
        Ok(Notice::info(format!("{product} removed from cart.")))
    }

    /// Change a line's quantity by `delta`, never below 1.
    ///
    /// Returns the new quantity, or `None` (and writes nothing) when the
    /// product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Storage` if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product: &str, delta: i32) -> Result<Option<u32>> {
        let mut cart = self.cart.clone();
        let Some(quantity) = cart.change_quantity(product, delta) else {
            debug!("Quantity change for a product not in the cart");
            return Ok(None);
        };
        self.persist(cart)?;

        info!(quantity, "Quantity updated");
        Ok(Some(quantity))
    }

    /// Total units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Cart badge text, `None` when the cart is empty.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        badge_label(self.item_count())
    }

    fn persist(&mut self, cart: Cart) -> Result<()> {
        CartRepository::new(&mut self.store).save(&cart)?;
        self.cart = cart;
        Ok(())
    }

    // Totals

    /// Choose a delivery tier and return the recomputed totals.
    pub fn select_delivery(&mut self, tier: DeliveryTier) -> OrderTotals {
        self.delivery = tier;
        let totals = self.totals();
        debug!(tier = %tier, total = %totals.total, "Totals recomputed");
        totals
    }

    /// The selected delivery tier.
    pub const fn delivery(&self) -> DeliveryTier {
        self.delivery
    }

    /// Totals for the cart at the selected tier.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        self.cart.totals(self.delivery)
    }

    /// Display strings for the order summary.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        self.totals().summary()
    }

    // Accounts

    /// Register an account.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` when registration is refused.
    pub fn signup(&mut self, email: &str, password: &str) -> Result<AuthOutcome> {
        Ok(AuthService::new(&mut self.store).signup(email, password)?)
    }

    /// Sign in.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` when the credentials do not match.
    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthOutcome> {
        Ok(AuthService::new(&mut self.store).login(email, password)?)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the session cannot be cleared.
    pub fn logout(&mut self) -> Result<Destination> {
        Ok(AuthService::new(&mut self.store).logout()?)
    }

    /// The signed-in email, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        accounts::current_user(&self.store)
    }

    /// What the profile button does right now.
    #[must_use]
    pub fn profile_action(&self) -> ProfileAction {
        ProfileAction::for_session(self.current_user().as_deref())
    }

    // Checkout

    /// The wizard's current step.
    pub const fn checkout_step(&self) -> CheckoutStep {
        self.checkout.step()
    }

    /// Leave the cart step.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` for an empty cart, a missing
    /// session, or the wrong step.
    pub fn continue_to_delivery(&mut self) -> Result<CheckoutStep> {
        let signed_in = self.current_user().is_some();
        Ok(self
            .checkout
            .continue_to_delivery(self.cart.item_count(), signed_in)?)
    }

    /// Submit the delivery form.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` listing the invalid fields, or for
    /// the wrong step.
    pub fn continue_to_payment(&mut self, form: &DeliveryForm) -> Result<CheckoutStep> {
        Ok(self.checkout.continue_to_payment(form)?)
    }

    /// Return from payment to delivery.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` outside the payment step.
    pub fn back_to_delivery(&mut self) -> Result<CheckoutStep> {
        Ok(self.checkout.back_to_delivery()?)
    }

    /// Place the order.
    ///
    /// On success the cart is emptied and persisted and the wizard moves to
    /// [`CheckoutStep::Complete`].
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Checkout` for invalid payment details or the
    /// wrong step, and `StorefrontError::Storage` if the emptied cart cannot
    /// be saved. Nothing changes on error.
    #[instrument(skip(self, payment))]
    pub fn complete_purchase(&mut self, payment: &PaymentForm) -> Result<OrderConfirmation> {
        self.checkout.validate_payment(payment)?;

        let confirmation = OrderConfirmation::new(self.cart.lines().to_vec(), self.totals());
        self.persist(Cart::new())?;
        self.checkout.finish()?;

        info!(
            order = %confirmation.order_number,
            items = confirmation.item_count,
            total = %confirmation.totals.total,
            "Order placed"
        );
        Ok(confirmation)
    }

    /// Start checkout over at the cart step.
    pub fn reset_checkout(&mut self) {
        self.checkout.reset();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gameverse_core::Price;

    use super::*;
    use crate::catalog::ProductListing;
    use crate::models::NoticeLevel;
    use crate::services::auth::AuthError;
    use crate::services::checkout::CheckoutError;
    use crate::storage::{MemoryStore, StorageError, keys};

    fn sample_catalog() -> Catalog {
        Catalog::from_listings([
            ProductListing::new("Starfall Odyssey", "Adventure", "$59.99"),
            ProductListing::new("Pro Controller", "Controller", "$69.99"),
            ProductListing::new("Pixel Racer", "Racing", "$19.99"),
        ])
        .unwrap()
    }

    fn storefront() -> Storefront<MemoryStore> {
        Storefront::new(MemoryStore::new(), sample_catalog())
    }

    fn delivery_form() -> DeliveryForm {
        DeliveryForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@gameverse.gg".into(),
            phone: "555-0100".into(),
            street: "1 Analytical Way".into(),
            city: "London".into(),
            state: "LDN".into(),
            zip: "00001".into(),
            country: "UK".into(),
        }
    }

    fn payment_form() -> PaymentForm {
        PaymentForm {
            card_number: "4242 4242 4242 4242".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
        }
    }

    /// Reads like a memory store, refuses every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove(&mut self, _key: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    /// A memory store that counts writes.
    #[derive(Debug, Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            self.writes += 1;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError> {
            self.writes += 1;
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_add_product_persists_and_notifies() {
        let mut shop = storefront();

        let notice = shop.add_product("Pro Controller").unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Pro Controller added to cart!");

        shop.add_product("Pro Controller").unwrap();
        assert_eq!(shop.cart().len(), 1);
        assert_eq!(shop.item_count(), 2);
        assert_eq!(shop.badge().as_deref(), Some("2"));

        let stored: serde_json::Value =
            serde_json::from_str(&shop.store().get(keys::CART).unwrap()).unwrap();
        assert_eq!(stored[0]["quantity"], 2);
        assert_eq!(stored[0]["product"], "Pro Controller");
    }

    #[test]
    fn test_add_unknown_product() {
        let mut shop = storefront();
        let err = shop.add_product("Missing Game").unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(_)));
        assert!(shop.store().get(keys::CART).is_none());
    }

    #[test]
    fn test_cart_survives_new_session() {
        let mut shop = storefront();
        shop.add_product("Pixel Racer").unwrap();
        shop.update_quantity("Pixel Racer", 4).unwrap();

        let reopened = Storefront::new(shop.into_store(), sample_catalog());
        assert_eq!(reopened.item_count(), 5);
    }

    #[test]
    fn test_remove_and_quantity() {
        let mut shop = storefront();
        shop.add_product("Pixel Racer").unwrap();

        assert_eq!(shop.update_quantity("Pixel Racer", -10).unwrap(), Some(1));
        assert_eq!(shop.update_quantity("Nope", 1).unwrap(), None);

        let notice = shop.remove_from_cart("Pixel Racer").unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Pixel Racer removed from cart.");
        assert!(shop.cart().is_empty());
        assert_eq!(shop.badge(), None);
        assert_eq!(shop.store().get(keys::CART).as_deref(), Some("[]"));
    }

    #[test]
    fn test_quantity_change_for_absent_product_writes_nothing() {
        let mut shop = Storefront::new(CountingStore::default(), sample_catalog());
        shop.add_product("Pixel Racer").unwrap();
        let before = shop.store().get(keys::CART);
        let writes = shop.store().writes;

        assert_eq!(shop.update_quantity("Nope", 1).unwrap(), None);
        assert_eq!(shop.store().writes, writes);
        assert_eq!(shop.store().get(keys::CART), before);
    }

    #[test]
    fn test_remove_absent_product_still_persists() {
        let mut shop = Storefront::new(CountingStore::default(), sample_catalog());
        shop.add_product("Pixel Racer").unwrap();
        let writes = shop.store().writes;

        let notice = shop.remove_from_cart("Nope").unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Nope removed from cart.");
        assert_eq!(shop.store().writes, writes + 1);
        assert_eq!(shop.item_count(), 1);
    }

    #[test]
    fn test_huge_prices_do_not_overflow_totals() {
        let mut shop = storefront();
        let whale = Price::parse("79228162514264337593543950335").unwrap();
        shop.add_to_cart(CartLine::new("Whale", whale, "", "collectible"))
            .unwrap();
        shop.add_to_cart(CartLine::new("Whale", whale, "", "collectible"))
            .unwrap();

        let totals = shop.select_delivery(DeliveryTier::Overnight);
        assert_eq!(totals.subtotal, Price::MAX);
        assert_eq!(totals.total, Price::MAX);
        assert!(shop.summary().total.starts_with('$'));
    }

    #[test]
    fn test_signup_takes_any_non_blank_email() {
        let mut shop = storefront();
        shop.signup("bob", "pw").unwrap();
        shop.login("bob", "pw").unwrap();
        assert_eq!(shop.current_user().as_deref(), Some("bob"));
    }

    #[test]
    fn test_failed_write_leaves_cart_unchanged() {
        let mut shop = Storefront::new(ReadOnlyStore::default(), sample_catalog());

        let err = shop.add_product("Pixel Racer").unwrap_err();
        assert!(matches!(err, StorefrontError::Storage(_)));
        assert!(shop.cart().is_empty());
        assert_eq!(err.notice().level, NoticeLevel::Error);
    }

    #[test]
    fn test_selection_drives_visible_products() {
        let mut shop = storefront();

        shop.set_product_type(ProductType::Games);
        shop.set_sort(SortOrder::PriceLowToHigh);
        let names: Vec<_> = shop.visible_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Pixel Racer", "Starfall Odyssey"]);

        shop.set_search("  STAR ");
        assert_eq!(shop.visible_products().len(), 1);

        shop.clear_search();
        shop.set_price_range(PriceRange::From50To100);
        let names: Vec<_> = shop.visible_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Starfall Odyssey"]);
    }

    #[test]
    fn test_select_delivery_recomputes_totals() {
        let mut shop = storefront();
        shop.add_to_cart(CartLine::new("Game X", Price::from_cents(2000), "", "game"))
            .unwrap();
        shop.update_quantity("Game X", 1).unwrap();

        assert_eq!(shop.summary().total, "$43.60");
        assert_eq!(shop.summary().shipping, "FREE");

        let totals = shop.select_delivery(DeliveryTier::Express);
        assert_eq!(shop.delivery(), DeliveryTier::Express);
        assert_eq!(totals.total, Price::from_cents(4859));
    }

    #[test]
    fn test_account_flow_and_profile_action() {
        let mut shop = storefront();
        assert_eq!(
            shop.profile_action(),
            ProfileAction::Navigate {
                destination: Destination::Signup
            }
        );

        shop.signup("ada@gameverse.gg", "engine").unwrap();
        let err = shop.login("ada@gameverse.gg", "wrong").unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Auth(AuthError::InvalidCredentials)
        ));

        let outcome = shop.login("ada@gameverse.gg", "engine").unwrap();
        assert_eq!(outcome.destination, Destination::Home);
        assert!(matches!(
            shop.profile_action(),
            ProfileAction::ConfirmLogout { ref email, .. } if email == "ada@gameverse.gg"
        ));

        assert_eq!(shop.logout().unwrap(), Destination::Home);
        assert_eq!(shop.current_user(), None);
    }

    #[test]
    fn test_checkout_gates() {
        let mut shop = storefront();

        let err = shop.continue_to_delivery().unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Checkout(CheckoutError::EmptyCart)
        ));
        assert_eq!(err.notice().level, NoticeLevel::Info);

        shop.add_product("Pixel Racer").unwrap();
        let err = shop.continue_to_delivery().unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Checkout(CheckoutError::NotSignedIn)
        ));
        assert_eq!(shop.checkout_step(), CheckoutStep::Cart);
    }

    #[test]
    fn test_complete_purchase_empties_cart() {
        let mut shop = storefront();
        shop.signup("ada@gameverse.gg", "engine").unwrap();
        shop.login("ada@gameverse.gg", "engine").unwrap();
        shop.add_product("Starfall Odyssey").unwrap();
        shop.add_product("Pixel Racer").unwrap();
        shop.select_delivery(DeliveryTier::Overnight);

        shop.continue_to_delivery().unwrap();
        shop.continue_to_payment(&delivery_form()).unwrap();
        assert_eq!(shop.back_to_delivery().unwrap(), CheckoutStep::Delivery);
        shop.continue_to_payment(&delivery_form()).unwrap();

        let mut short = payment_form();
        short.cvv = "12".into();
        assert!(shop.complete_purchase(&short).is_err());
        assert_eq!(shop.item_count(), 2);

        let confirmation = shop.complete_purchase(&payment_form()).unwrap();
        assert_eq!(confirmation.item_count, 2);
        assert_eq!(confirmation.lines.len(), 2);
        assert_eq!(confirmation.totals.tier, DeliveryTier::Overnight);
        assert_eq!(confirmation.totals.subtotal, Price::from_cents(7998));

        assert_eq!(shop.checkout_step(), CheckoutStep::Complete);
        assert!(shop.cart().is_empty());
        assert_eq!(shop.store().get(keys::CART).as_deref(), Some("[]"));

        shop.reset_checkout();
        assert_eq!(shop.checkout_step(), CheckoutStep::Cart);
    }

    #[test]
    fn test_reload_cart_picks_up_external_writes() {
        let mut shop = storefront();
        shop.add_product("Pixel Racer").unwrap();

        let mut other = Storefront::new(shop.store().clone(), sample_catalog());
        other.add_product("Pixel Racer").unwrap();

        // Last writer wins: copy the other session's store back.
        shop.store = other.into_store();
        assert_eq!(shop.item_count(), 1);
        shop.reload_cart();
        assert_eq!(shop.item_count(), 2);
    }
}
