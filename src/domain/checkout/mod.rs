//! Checkout
//!
//! One state machine serves both purchase intents: buying a single product
//! straight from its detail page, or buying everything in the cart.

mod flow;
mod form;

pub use flow::{CheckoutEntry, CheckoutFlow, CheckoutIntent, CheckoutState, EmptyReason, Navigation};
pub use form::{invalid_fields, CheckoutForm, DeliveryAddress, PaymentMethod, UnknownPaymentMethod};

use thiserror::Error;
use validator::ValidationErrors;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("required checkout fields missing: {}", invalid_fields(.0).join(", "))]
    Validation(#[from] ValidationErrors),

    #[error("cannot {action} while checkout is {state}")]
    NotEditable { action: &'static str, state: CheckoutState },

    #[error("quantity only applies to single-product checkout")]
    QuantityNotApplicable,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
