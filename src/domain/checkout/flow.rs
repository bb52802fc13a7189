//! Checkout state machine
//!
//! ```text
//! Loading ──resolve ok──▶ Editing ──submit ok──▶ Submitted
//!    │                      │  ▲
//!    └──resolve err──▶ Empty   └──submit err (validation)
//! ```
//!
//! `Loading` only exists for single-product checkout while the catalog fetch
//! is outstanding. Leaving `Submitted` is only possible by discarding the
//! whole flow.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use validator::Validate;

use super::{invalid_fields, CheckoutError, CheckoutForm};
use crate::catalog::{CatalogError, CatalogQuery};
use crate::domain::aggregates::{CartItem, CheckoutMode, OrderConfirmation, OrderLine, Product};
use crate::domain::events::{CheckoutEvent, DomainEvent};
use crate::domain::value_objects::{Money, ProductId, Quantity};
use crate::store::CartStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyReason { CartEmpty, ProductNotFound }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutState { Loading, Empty(EmptyReason), Editing, Submitted }

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Empty(EmptyReason::CartEmpty) => write!(f, "empty (cart is empty)"),
            Self::Empty(EmptyReason::ProductNotFound) => write!(f, "empty (product not found)"),
            Self::Editing => write!(f, "editing"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// Where a checkout was entered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutEntry {
    Cart,
    Single(Option<ProductId>),
}

impl CheckoutEntry {
    /// Interprets the `mode` and `productId` navigation parameters.
    /// Anything other than `mode=cart` is a single-product checkout; an
    /// unparsable id is treated as absent.
    pub fn from_params(mode: Option<&str>, product_id: Option<&str>) -> Self {
        if mode == Some("cart") {
            return Self::Cart;
        }
        Self::Single(product_id.and_then(|id| id.trim().parse::<u64>().ok()).map(ProductId::new))
    }
}

/// What is being bought.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutIntent {
    Single { product: Product, quantity: u32 },
    Cart { items: Vec<CartItem> },
}

impl CheckoutIntent {
    pub fn mode(&self) -> CheckoutMode {
        match self {
            Self::Single { .. } => CheckoutMode::Single,
            Self::Cart { .. } => CheckoutMode::Cart,
        }
    }

    pub fn total(&self) -> Money {
        match self {
            Self::Single { product, quantity } => product.sale_price.multiply(*quantity),
            Self::Cart { items } => items.iter().map(CartItem::subtotal).sum(),
        }
    }

    pub fn lines(&self) -> Vec<OrderLine> {
        match self {
            Self::Single { product, quantity } => vec![OrderLine::new(product, *quantity)],
            Self::Cart { items } => items.iter().map(OrderLine::from).collect(),
        }
    }
}

/// Destination after the flow is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation { CatalogRoot }

enum Phase {
    Loading { product_id: ProductId, fetch: Option<JoinHandle<Result<Product, CatalogError>>> },
    NotFound,
    Single { product: Product, quantity: Quantity },
    Cart,
    Submitted(OrderConfirmation),
}

/// Ephemeral checkout session. Never persisted; dropping it discards every
/// entered value and cancels an outstanding product fetch.
pub struct CheckoutFlow {
    cart: Arc<CartStore>,
    phase: Phase,
    form: CheckoutForm,
    show_validation_error: bool,
    events: Vec<DomainEvent>,
}

impl CheckoutFlow {
    pub fn start(entry: CheckoutEntry, catalog: Arc<dyn CatalogQuery>, cart: Arc<CartStore>) -> Self {
        match entry {
            CheckoutEntry::Cart => Self::for_cart(cart),
            CheckoutEntry::Single(product_id) => Self::for_product(product_id, catalog, cart),
        }
    }

    pub fn for_cart(cart: Arc<CartStore>) -> Self { Self::with_phase(cart, Phase::Cart) }

    /// Starts a single-product checkout. The product is fetched on a spawned
    /// Tokio task; outside a runtime the flow waits in `Loading` for
    /// [`CheckoutFlow::resolve_product`] instead.
    pub fn for_product(product_id: Option<ProductId>, catalog: Arc<dyn CatalogQuery>, cart: Arc<CartStore>) -> Self {
        let Some(product_id) = product_id else {
            warn!("single-product checkout entered without a product id");
            let mut flow = Self::with_phase(cart, Phase::NotFound);
            flow.raise_event(CheckoutEvent::ProductNotFound { product_id: None });
            return flow;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(%product_id, "no Tokio runtime; product must be supplied through resolve_product");
            return Self::awaiting_product(product_id, cart);
        };
        let fetch = runtime.spawn(async move { catalog.get_product(product_id).await });
        Self::with_phase(cart, Phase::Loading { product_id, fetch: Some(fetch) })
    }

    /// `Loading` without an attached fetch; the result is supplied through
    /// [`CheckoutFlow::resolve_product`].
    pub fn awaiting_product(product_id: ProductId, cart: Arc<CartStore>) -> Self {
        Self::with_phase(cart, Phase::Loading { product_id, fetch: None })
    }

    fn with_phase(cart: Arc<CartStore>, phase: Phase) -> Self {
        Self { cart, phase, form: CheckoutForm::default(), show_validation_error: false, events: vec![] }
    }

    /// Derived on every call so the cart guard always reflects the live cart.
    pub fn state(&self) -> CheckoutState {
        match &self.phase {
            Phase::Loading { .. } => CheckoutState::Loading,
            Phase::NotFound => CheckoutState::Empty(EmptyReason::ProductNotFound),
            Phase::Single { .. } => CheckoutState::Editing,
            Phase::Cart if self.cart.is_empty() => CheckoutState::Empty(EmptyReason::CartEmpty),
            Phase::Cart => CheckoutState::Editing,
            Phase::Submitted(_) => CheckoutState::Submitted,
        }
    }

    pub fn mode(&self) -> CheckoutMode {
        match &self.phase {
            Phase::Cart => CheckoutMode::Cart,
            Phase::Submitted(order) => order.mode(),
            _ => CheckoutMode::Single,
        }
    }

    /// `None` until there is something to buy, and again once submitted.
    pub fn intent(&self) -> Option<CheckoutIntent> {
        match &self.phase {
            Phase::Single { product, quantity } => Some(CheckoutIntent::Single { product: product.clone(), quantity: quantity.value() }),
            Phase::Cart => Some(CheckoutIntent::Cart { items: self.cart.items() }),
            _ => None,
        }
    }

    pub fn total(&self) -> Money {
        match &self.phase {
            Phase::Single { product, quantity } => product.sale_price.multiply(quantity.value()),
            Phase::Cart => self.cart.get_total(),
            Phase::Submitted(order) => order.total(),
            Phase::Loading { .. } | Phase::NotFound => Money::ZERO,
        }
    }

    pub fn quantity(&self) -> Option<u32> {
        match &self.phase {
            Phase::Single { quantity, .. } => Some(quantity.value()),
            _ => None,
        }
    }

    pub fn form(&self) -> &CheckoutForm { &self.form }
    pub fn show_validation_error(&self) -> bool { self.show_validation_error }
    pub fn is_form_valid(&self) -> bool { self.form.validate().is_ok() }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        match &self.phase {
            Phase::Submitted(order) => Some(order),
            _ => None,
        }
    }

    /// Awaits the spawned fetch, if any, and applies its result.
    pub async fn wait_for_product(&mut self) -> CheckoutState {
        let pending = match &mut self.phase {
            Phase::Loading { fetch, .. } => fetch.take(),
            _ => None,
        };
        if let Some(handle) = pending {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(CatalogError::Unavailable(e.to_string())),
            };
            self.resolve_product(result);
        }
        self.state()
    }

    /// Leaves `Loading`. A failed fetch is terminal: the flow shows the
    /// not-found state and never retries.
    pub fn resolve_product(&mut self, result: Result<Product, CatalogError>) {
        let Phase::Loading { product_id, fetch } = &mut self.phase else {
            debug!("late product fetch result ignored");
            return;
        };
        let product_id = *product_id;
        if let Some(handle) = fetch.take() {
            handle.abort();
        }

        match result {
            Ok(product) => {
                debug!(%product_id, "checkout product resolved");
                self.phase = Phase::Single { product, quantity: Quantity::ONE };
                self.raise_event(CheckoutEvent::ProductResolved { product_id });
            }
            Err(e) => {
                warn!(%product_id, error = %e, "checkout product unavailable");
                self.phase = Phase::NotFound;
                self.raise_event(CheckoutEvent::ProductNotFound { product_id: Some(product_id) });
            }
        }
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut CheckoutForm)) -> Result<(), CheckoutError> {
        self.ensure_editing("edit the form")?;
        f(&mut self.form);
        Ok(())
    }

    pub fn increment_quantity(&mut self) -> Result<u32, CheckoutError> { self.change_quantity(|q| q.increment()) }
    pub fn decrement_quantity(&mut self) -> Result<u32, CheckoutError> { self.change_quantity(|q| q.decrement()) }
    pub fn set_quantity(&mut self, value: i64) -> Result<u32, CheckoutError> { self.change_quantity(|_| Quantity::clamped(value)) }

    /// Raw text from the quantity field. Only the leading integer counts
    /// (`"3.7"` is 3, `"12abc"` is 12); text without one becomes 1.
    pub fn set_quantity_input(&mut self, raw: &str) -> Result<u32, CheckoutError> {
        self.set_quantity(leading_integer(raw).unwrap_or(1))
    }

    fn change_quantity(&mut self, f: impl FnOnce(Quantity) -> Quantity) -> Result<u32, CheckoutError> {
        self.ensure_editing("change quantity")?;
        match &mut self.phase {
            Phase::Single { quantity, .. } => {
                *quantity = f(*quantity);
                Ok(quantity.value())
            }
            _ => Err(CheckoutError::QuantityNotApplicable),
        }
    }

    fn ensure_editing(&self, action: &'static str) -> Result<(), CheckoutError> {
        let state = self.state();
        if state == CheckoutState::Editing {
            return Ok(());
        }
        warn!(action, %state, "checkout input rejected");
        Err(CheckoutError::NotEditable { action, state })
    }

    /// Validates and places the order.
    ///
    /// On a validation failure nothing is cleared and the flow stays in
    /// `Editing`. A cart checkout empties the cart; a single-product checkout
    /// never touches it.
    pub fn submit(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        self.ensure_editing("submit")?;
        if let Err(errors) = self.form.validate() {
            self.show_validation_error = true;
            warn!(fields = ?invalid_fields(&errors), "checkout validation failed");
            self.raise_event(CheckoutEvent::ValidationFailed);
            return Err(errors.into());
        }

        let Some(intent) = self.intent() else {
            return Err(CheckoutError::NotEditable { action: "submit", state: self.state() });
        };
        let payment_method = self.form.payment_method.unwrap_or_default();
        let order = OrderConfirmation::place(intent.mode(), intent.lines(), &self.form, payment_method);

        if intent.mode() == CheckoutMode::Cart {
            self.cart.clear_cart()?;
        }

        self.show_validation_error = false;
        info!(order_id = %order.order_id(), total = %order.total(), mode = ?order.mode(), "order placed");
        self.raise_event(CheckoutEvent::OrderPlaced { order_id: order.order_id(), total: order.total() });
        self.phase = Phase::Submitted(order.clone());
        Ok(order)
    }

    /// "Place another order": discards the whole session.
    pub fn place_another_order(self) -> Navigation {
        debug!(state = %self.state(), "checkout session discarded for a new order");
        Navigation::CatalogRoot
    }

    /// Leaves checkout without submitting. The cart is unaffected.
    pub fn navigate_away(self) -> Navigation {
        debug!(state = %self.state(), "checkout abandoned");
        Navigation::CatalogRoot
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: CheckoutEvent) { self.events.push(DomainEvent::Checkout(e)); }
}

/// Optional sign followed by digits at the start of `raw`, saturating at the
/// `i64` bounds.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits: Vec<i64> = digits.chars().map_while(|c| c.to_digit(10)).map(i64::from).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.iter().fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(*d));
    Some(if negative { -magnitude } else { magnitude })
}

impl Drop for CheckoutFlow {
    fn drop(&mut self) {
        if let Phase::Loading { fetch: Some(handle), .. } = &self.phase {
            handle.abort();
        }
    }
}

impl fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state())
            .field("mode", &self.mode())
            .field("form", &self.form)
            .field("show_validation_error", &self.show_validation_error)
            .finish()
    }
}
