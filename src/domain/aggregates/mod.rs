//! Aggregates module
pub mod product;
pub mod cart;
pub mod wishlist;
pub mod order;

pub use product::Product;
pub use cart::{Cart, CartItem};
pub use wishlist::{Wishlist, WishlistToggle};
pub use order::{CheckoutMode, OrderConfirmation, OrderLine};
