//! Cart persistence.

use tracing::debug;

use super::{KeyValueStore, StorageError, keys, read_json, write_json};
use crate::cart::Cart;

/// Repository for the stored cart.
pub struct CartRepository<'a, S: ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Load the stored cart. Absent or malformed data gives an empty cart.
    #[must_use]
    pub fn load(&self) -> Cart {
        let cart: Cart = read_json(&*self.store, keys::CART);
        debug!(lines = cart.len(), items = cart.item_count(), "Loaded cart");
        cart
    }

    /// Overwrite the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        write_json(&mut *self.store, keys::CART, cart)?;
        debug!(lines = cart.len(), items = cart.item_count(), "Saved cart");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gameverse_core::Price;

    use super::*;
    use crate::cart::CartLine;
    use crate::storage::MemoryStore;

    #[test]
    fn test_load_missing_cart_is_empty() {
        let mut store = MemoryStore::new();
        assert!(CartRepository::new(&mut store).load().is_empty());
    }

    #[test]
    fn test_load_unparseable_cart_is_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::CART, "[{\"product\": 12}]").unwrap();
        assert!(CartRepository::new(&mut store).load().is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(CartLine::new("A", Price::from_cents(100), "", ""));

        let mut repo = CartRepository::new(&mut store);
        repo.save(&cart).unwrap();
        assert_eq!(repo.load(), cart);

        repo.save(&Cart::new()).unwrap();
        assert!(repo.load().is_empty());
        assert_eq!(store.get(keys::CART).as_deref(), Some("[]"));
    }
}
