//! Order confirmation
//!
//! The frozen result of a successful checkout. Nothing is settled or stored
//! server-side; the confirmation only exists for display.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::aggregates::{CartItem, Product};
use crate::domain::checkout::{CheckoutForm, DeliveryAddress, PaymentMethod};
use crate::domain::value_objects::{Money, ProductId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode { Single, Cart }

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine { pub product_id: ProductId, pub brand: String, pub name: String, pub quantity: u32, pub unit_price: Money, pub total: Money }

impl OrderLine {
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id, brand: product.brand.clone(), name: product.name.clone(), quantity,
            unit_price: product.sale_price, total: product.sale_price.multiply(quantity),
        }
    }
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self { Self::new(&item.product, item.quantity) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    order_id: Uuid,
    placed_at: DateTime<Utc>,
    mode: CheckoutMode,
    lines: Vec<OrderLine>,
    total: Money,
    customer_name: String,
    email: String,
    address: DeliveryAddress,
    payment_method: PaymentMethod,
}

impl OrderConfirmation {
    /// Freezes the buyer input and lines. Values are trimmed the way they
    /// were validated.
    pub fn place(mode: CheckoutMode, lines: Vec<OrderLine>, form: &CheckoutForm, payment_method: PaymentMethod) -> Self {
        let total = lines.iter().map(|l| l.total).sum();
        let address = &form.address;
        Self {
            order_id: Uuid::now_v7(), placed_at: Utc::now(), mode, lines, total,
            customer_name: form.full_name.trim().to_string(), email: form.email.trim().to_string(),
            address: DeliveryAddress {
                line1: address.line1.trim().to_string(),
                line2: address.line2.trim().to_string(),
                city: address.city.trim().to_string(),
                state_province: address.state_province.trim().to_string(),
                postal_code: address.postal_code.trim().to_string(),
                country: address.country.trim().to_string(),
                phone: address.phone.trim().to_string(),
            },
            payment_method,
        }
    }

    pub fn order_id(&self) -> Uuid { self.order_id }
    pub fn placed_at(&self) -> DateTime<Utc> { self.placed_at }
    pub fn mode(&self) -> CheckoutMode { self.mode }
    pub fn lines(&self) -> &[OrderLine] { &self.lines }
    pub fn total(&self) -> Money { self.total }
    pub fn customer_name(&self) -> &str { &self.customer_name }
    pub fn email(&self) -> &str { &self.email }
    pub fn address(&self) -> &DeliveryAddress { &self.address }
    pub fn payment_method(&self) -> PaymentMethod { self.payment_method }
}

impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order Placed Successfully!")?;
        writeln!(f, "Order: {}", self.order_id)?;
        writeln!(f, "Customer Name: {}", self.customer_name)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Delivery Address:")?;
        writeln!(f, "  {}", self.address.line1)?;
        if let Some(line2) = self.address.line2() {
            writeln!(f, "  {line2}")?;
        }
        writeln!(f, "  {}, {} {}", self.address.city, self.address.state_province, self.address.postal_code)?;
        writeln!(f, "  {}", self.address.country)?;
        if let Some(phone) = self.address.phone() {
            writeln!(f, "  Phone: {phone}")?;
        }
        writeln!(f, "Payment Method: {}", self.payment_method.label())?;
        for line in &self.lines {
            writeln!(f, "  {}x {} {} {}", line.quantity, line.brand, line.name, line.total)?;
        }
        write!(f, "Total Amount: {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CheckoutForm {
        let mut form = CheckoutForm::default();
        form.full_name = "  Ravi Kumar ".into();
        form.email = "ravi@example.com".into();
        form.address.line1 = "4 Park Street".into();
        form.address.city = "Kolkata".into();
        form.address.state_province = "West Bengal".into();
        form.address.postal_code = "700016".into();
        form.address.country = "India".into();
        form.address.phone = "98300 00000".into();
        form
    }

    #[test]
    fn test_confirmation_freezes_lines_and_total() {
        let a = Product::new(1, "Meguiar's", "Wax", 600, 500);
        let b = Product::new(2, "3M", "Polish", 300, 300);
        let lines = vec![OrderLine::new(&a, 2), OrderLine::new(&b, 1)];
        let order = OrderConfirmation::place(CheckoutMode::Cart, lines, &form(), PaymentMethod::CashOnDelivery);

        assert_eq!(order.total(), Money::new(1300));
        assert_eq!(order.lines()[0].total, Money::new(1000));
        assert_eq!(order.customer_name(), "Ravi Kumar");
        assert_eq!(order.mode(), CheckoutMode::Cart);
    }

    #[test]
    fn test_receipt_rendering() {
        let p = Product::new(1, "Sonax", "Shampoo", 150_000, 123_456);
        let order = OrderConfirmation::place(CheckoutMode::Single, vec![OrderLine::new(&p, 1)], &form(), PaymentMethod::Upi);
        let receipt = order.to_string();
        assert!(receipt.contains("Customer Name: Ravi Kumar"));
        assert!(receipt.contains("Kolkata, West Bengal 700016"));
        assert!(receipt.contains("Phone: 98300 00000"));
        assert!(receipt.contains("Payment Method: UPI"));
        assert!(receipt.ends_with("Total Amount: ₹1,23,456"));
    }
}
