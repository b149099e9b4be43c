//! Cart store: per-cart reservation sequences.
//!
//! Carts are created empty and retained for the process lifetime, including
//! after finalization (the `finalized` flag backs the fail-fast check on a
//! second `place_order`).

use std::collections::HashMap;

use bazaar_core::{CartId, ExchangeError, ExchangeResult, Good, Reservation};

#[derive(Debug, Default)]
struct Cart {
    items: Vec<Reservation>,
    finalized: bool,
}

#[derive(Debug, Default)]
pub(crate) struct CartStore {
    carts: HashMap<CartId, Cart>,
}

impl CartStore {
    pub(crate) fn open(&mut self, id: CartId) {
        self.carts.insert(id, Cart::default());
    }

    pub(crate) fn contains(&self, id: CartId) -> bool {
        self.carts.contains_key(&id)
    }

    pub(crate) fn push_item(&mut self, id: CartId, item: Reservation) -> ExchangeResult<()> {
        let cart = self.carts.get_mut(&id).ok_or(ExchangeError::UnknownCart(id))?;
        cart.items.push(item);
        Ok(())
    }

    /// Remove and return the first item of `good` in insertion order.
    ///
    /// `Ok(None)` when the cart holds no such good; that is not an error.
    pub(crate) fn remove_first(
        &mut self,
        id: CartId,
        good: &Good,
    ) -> ExchangeResult<Option<Reservation>> {
        let cart = self.carts.get_mut(&id).ok_or(ExchangeError::UnknownCart(id))?;
        match cart.items.iter().position(|item| &item.good == good) {
            Some(index) => Ok(Some(cart.items.remove(index))),
            None => Ok(None),
        }
    }

    /// Mark the cart finalized and hand back its reservation sequence.
    ///
    /// An empty cart is returned as-is without being marked: finalizing it
    /// has no effect and the cart stays usable.
    pub(crate) fn finalize(&mut self, id: CartId) -> ExchangeResult<Vec<Reservation>> {
        let cart = self.carts.get_mut(&id).ok_or(ExchangeError::UnknownCart(id))?;
        if cart.finalized {
            return Err(ExchangeError::CartFinalized(id));
        }
        if cart.items.is_empty() {
            return Ok(Vec::new());
        }
        cart.finalized = true;
        Ok(cart.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::ProducerId;

    fn item(good: &str, producer: u64) -> Reservation {
        Reservation::new(Good::from(good), ProducerId::new(producer))
    }

    #[test]
    fn remove_first_takes_earliest_matching_item() {
        let mut store = CartStore::default();
        let id = CartId::new(0);
        store.open(id);
        store.push_item(id, item("tea", 0)).unwrap();
        store.push_item(id, item("milk", 1)).unwrap();
        store.push_item(id, item("tea", 2)).unwrap();

        let removed = store.remove_first(id, &Good::from("tea")).unwrap();
        assert_eq!(removed, Some(item("tea", 0)));

        let remaining = store.finalize(id).unwrap();
        assert_eq!(remaining, vec![item("milk", 1), item("tea", 2)]);
    }

    #[test]
    fn remove_first_of_absent_good_is_noop() {
        let mut store = CartStore::default();
        let id = CartId::new(0);
        store.open(id);
        assert_eq!(store.remove_first(id, &Good::from("tea")), Ok(None));
    }

    #[test]
    fn finalize_empty_cart_leaves_it_usable() {
        let mut store = CartStore::default();
        let id = CartId::new(0);
        store.open(id);

        assert_eq!(store.finalize(id), Ok(Vec::new()));

        store.push_item(id, item("tea", 0)).unwrap();
        assert_eq!(store.finalize(id), Ok(vec![item("tea", 0)]));
    }

    #[test]
    fn second_finalize_is_rejected() {
        let mut store = CartStore::default();
        let id = CartId::new(3);
        store.open(id);
        store.push_item(id, item("tea", 0)).unwrap();

        store.finalize(id).unwrap();
        assert_eq!(store.finalize(id), Err(ExchangeError::CartFinalized(id)));
    }

    #[test]
    fn unknown_cart_is_rejected() {
        let mut store = CartStore::default();
        let id = CartId::new(7);
        assert_eq!(
            store.push_item(id, item("tea", 0)),
            Err(ExchangeError::UnknownCart(id))
        );
        assert_eq!(
            store.remove_first(id, &Good::from("tea")),
            Err(ExchangeError::UnknownCart(id))
        );
        assert_eq!(store.finalize(id), Err(ExchangeError::UnknownCart(id)));
    }
}
