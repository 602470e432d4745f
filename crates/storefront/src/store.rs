//! The storefront store: cart and search state behind one dispatch surface.
//!
//! A [`Store`] owns the authoritative [`CartState`] and [`SearchState`] and
//! is passed to whatever needs them; there is no global instance. Every
//! cart action is applied, mirrored to storage, and then announced to
//! subscribers:
//!
//! ```text
//! dispatch(action) -> CartState::apply -> CartStorage::save -> listeners
//! ```
//!
//! Storage failures are logged and otherwise ignored; the in-memory cart is
//! always updated.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::cart::{self, CartAction, CartLineItem, CartState, CartStorage};
use crate::catalog::{self, Product};
use crate::checkout::{
    CheckoutError, CheckoutForm, OrderConfirmation, OrderSummary, PricingRules,
};
use crate::search::{SearchAction, SearchState};
use crate::storage::KeyValueStore;

/// Which part of the store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Cart,
    Search,
}

/// What subscribers see after a change.
#[derive(Debug, Clone, Copy)]
pub struct StoreEvent<'a> {
    pub change: Change,
    pub cart: &'a CartState,
    pub search: &'a SearchState,
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent<'_>)>;

/// Cart and search state with persistence and change notification.
pub struct Store<S> {
    cart: CartState,
    search: SearchState,
    storage: CartStorage<S>,
    pricing: PricingRules,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("cart", &self.cart)
            .field("search", &self.search)
            .field("pricing", &self.pricing)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Store<S> {
    /// Open a store over `backend`, restoring any saved cart.
    pub fn new(backend: S) -> Self {
        Self::with_storage(CartStorage::new(backend), PricingRules::default())
    }

    /// Open a store with explicit storage and pricing rules.
    pub fn with_storage(storage: CartStorage<S>, pricing: PricingRules) -> Self {
        let cart = storage.load();
        Self {
            cart,
            search: SearchState::new(),
            storage,
            pricing,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Apply a cart action, persist the result, and notify subscribers.
    #[instrument(skip(self, action), fields(action = action.name()))]
    pub fn dispatch(&mut self, action: CartAction) {
        self.cart.apply(action);
        self.storage.save(&self.cart);
        self.notify(Change::Cart);
    }

    /// Apply a search action and notify subscribers.
    pub fn dispatch_search(&mut self, action: SearchAction) {
        self.search.apply(action);
        self.notify(Change::Search);
    }

    /// Replace the search query.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.dispatch_search(SearchAction::SetQuery(value.into()));
    }

    /// Reset the search query.
    pub fn clear_query(&mut self) {
        self.dispatch_search(SearchAction::ClearQuery);
    }

    /// Validate the checkout form, then empty the cart.
    ///
    /// The cart is only cleared when the order is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to order, or
    /// [`CheckoutError::Invalid`] with every failing field.
    #[instrument(skip(self, form))]
    pub fn place_order(
        &mut self,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let customer = form.validate().map_err(CheckoutError::Invalid)?;

        let confirmation = OrderConfirmation {
            reference: uuid::Uuid::new_v4(),
            placed_at: chrono::Utc::now(),
            item_count: self.count(),
            summary: self.order_summary(),
            customer,
        };

        self.dispatch(CartAction::Clear);
        info!(
            reference = %confirmation.reference,
            items = confirmation.item_count,
            total = %confirmation.summary.total,
            "Order placed"
        );
        Ok(confirmation)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a listener called after every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreEvent<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: Change) {
        let event = StoreEvent {
            change,
            cart: &self.cart,
            search: &self.search,
        };
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        cart::items(&self.cart)
    }

    /// Total units in the cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        cart::count(&self.cart)
    }

    /// Sum of price times quantity over the cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        cart::subtotal(&self.cart)
    }

    /// Subtotal with tax and shipping applied.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_subtotal(self.subtotal(), &self.pricing)
    }

    /// The current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        self.search.current_query()
    }

    /// Catalog products matching the current query.
    #[must_use]
    pub fn visible_products<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        catalog::filter_products(products, self.query())
    }

    /// The persistence adapter.
    #[must_use]
    pub const fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tote_core::{Price, ProductId};

    use super::*;
    use crate::cart::ItemRef;
    use crate::storage::MemoryStore;

    fn priced(n: u64, cents: i64) -> ItemRef {
        ItemRef::id(ProductId::new(n)).with_price(Price::from_cents(cents).unwrap())
    }

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: "5550001111".to_string(),
            address: "1 Navy Yard".to_string(),
            city: "Arlington".to_string(),
            state: "VA".to_string(),
            zip_code: "22201".to_string(),
            payment_method: "card".to_string(),
        }
    }

    #[test]
    fn test_dispatch_persists_every_change() {
        let backend = MemoryStore::new();
        let mut store = Store::new(&backend);

        store.dispatch(CartAction::add_many(priced(1, 999), 2));
        let reopened = Store::new(&backend);
        assert_eq!(reopened.cart(), store.cart());

        store.dispatch(CartAction::Remove(ProductId::new(1)));
        assert!(Store::new(&backend).cart().is_empty());
    }

    #[test]
    fn test_storage_failure_does_not_block_update() {
        let mut store = Store::new(MemoryStore::disabled());
        store.dispatch(CartAction::add_many(priced(1, 500), 3));
        assert_eq!(store.count(), 3);
        assert_eq!(store.subtotal(), Decimal::from(15));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(MemoryStore::new());

        let log = Rc::clone(&seen);
        let id = store.subscribe(move |event| {
            let query = event.search.current_query().to_string();
            log.borrow_mut()
                .push((event.change, cart::count(event.cart), query));
        });

        store.dispatch(CartAction::add(priced(1, 100)));
        store.set_query("lamp");
        store.clear_query();

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(CartAction::Clear);

        assert_eq!(
            *seen.borrow(),
            vec![
                (Change::Cart, 1, String::new()),
                (Change::Search, 1, "lamp".to_string()),
                (Change::Search, 1, String::new()),
            ]
        );
    }

    #[test]
    fn test_query_selector() {
        let mut store = Store::new(MemoryStore::new());
        assert_eq!(store.query(), "");
        store.set_query("Desk");
        assert_eq!(store.query(), "Desk");
    }

    #[test]
    fn test_visible_products_follow_query() {
        let mut lamp = Product::new(ProductId::new(1), "Desk Lamp", None);
        lamp.category = "lighting".to_string();
        let chair = Product::new(ProductId::new(2), "Office Chair", None);
        let products = vec![lamp, chair];

        let mut store = Store::new(MemoryStore::new());
        assert_eq!(store.visible_products(&products).len(), 2);

        store.set_query("LIGHT");
        let visible = store.visible_products(&products);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().map(|p| p.id), Some(ProductId::new(1)));
    }

    #[test]
    fn test_place_order_clears_and_persists() {
        let backend = MemoryStore::new();
        let mut store = Store::new(&backend);
        store.dispatch(CartAction::add_many(priced(1, 2000), 3));

        let confirmation = store.place_order(&checkout_form()).unwrap();
        assert_eq!(confirmation.item_count, 3);
        assert_eq!(confirmation.summary.subtotal, Decimal::from(60));
        assert_eq!(confirmation.summary.shipping, Decimal::ZERO);
        assert_eq!(confirmation.summary.total, Decimal::from(66));
        assert_eq!(confirmation.customer.payment_method, tote_core::PaymentMethod::Card);

        assert!(store.cart().is_empty());
        assert!(Store::new(&backend).cart().is_empty());
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut store = Store::new(MemoryStore::new());
        assert_eq!(
            store.place_order(&checkout_form()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_invalid_order_keeps_cart() {
        let mut store = Store::new(MemoryStore::new());
        store.dispatch(CartAction::add(priced(1, 100)));

        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            ..checkout_form()
        };
        let err = store.place_order(&form).unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(ref errors) if errors.len() == 1));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_custom_pricing() {
        let rules = PricingRules {
            tax_rate: Decimal::ZERO,
            free_shipping_threshold: Decimal::from(1000),
            shipping_fee: Decimal::from(7),
        };
        let mut store = Store::with_storage(CartStorage::new(MemoryStore::new()), rules);
        store.dispatch(CartAction::add_many(priced(1, 1000), 2));
        assert_eq!(store.order_summary().total, Decimal::from(27));
    }
}
