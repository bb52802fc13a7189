//! Commerce domain: value objects, aggregates, events and the checkout flow.
pub mod aggregates;
pub mod checkout;
pub mod events;
pub mod value_objects;
