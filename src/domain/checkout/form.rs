//! Buyer, delivery-address and payment input collected during checkout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    #[serde(alias = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Upi, PaymentMethod::Card, PaymentMethod::CashOnDelivery];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "Credit/Debit Card",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method '{0}'")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "cashOnDelivery" | "cod" => Ok(Self::CashOnDelivery),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Delivery address. `line2` and `phone` may be left blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    #[validate(custom = "not_blank")]
    pub line1: String,
    pub line2: String,
    #[validate(custom = "not_blank")]
    pub city: String,
    #[validate(custom = "not_blank")]
    pub state_province: String,
    #[validate(custom = "not_blank")]
    pub postal_code: String,
    #[validate(custom = "not_blank")]
    pub country: String,
    pub phone: String,
}

impl DeliveryAddress {
    pub fn line2(&self) -> Option<&str> { non_blank(&self.line2) }
    pub fn phone(&self) -> Option<&str> { non_blank(&self.phone) }
}

#[derive(Clone, Debug, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[validate(custom = "not_blank")]
    pub full_name: String,
    #[validate(custom = "not_blank")]
    pub email: String,
    #[validate]
    pub address: DeliveryAddress,
    #[validate(required)]
    pub payment_method: Option<PaymentMethod>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            address: DeliveryAddress::default(),
            payment_method: Some(PaymentMethod::default()),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Dotted paths of every failing field (`address.city`), sorted.
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    fn walk(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() { field.to_string() } else { format!("{prefix}.{field}") };
            match kind {
                ValidationErrorsKind::Field(_) => out.push(path),
                ValidationErrorsKind::Struct(inner) => walk(&path, inner, out),
                ValidationErrorsKind::List(items) => {
                    for (idx, inner) in items {
                        walk(&format!("{path}[{idx}]"), inner, out);
                    }
                }
            }
        }
    }

    let mut out = Vec::new();
    walk("", errors, &mut out);
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            address: DeliveryAddress {
                line1: "12 MG Road".into(),
                line2: String::new(),
                city: "Bengaluru".into(),
                state_province: "Karnataka".into(),
                postal_code: "560001".into(),
                country: "India".into(),
                phone: String::new(),
            },
            payment_method: Some(PaymentMethod::Card),
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_whitespace_only_counts_as_blank() {
        let mut form = filled();
        form.address.city = "   ".into();
        form.email = "\t".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["address.city".to_string(), "email".to_string()]);
    }

    #[test]
    fn test_optional_fields_and_payment() {
        let mut form = filled();
        form.address.line2 = " ".into();
        assert!(form.validate().is_ok());
        assert_eq!(form.address.line2(), None);

        form.payment_method = None;
        let errors = form.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["payment_method".to_string()]);
    }

    #[test]
    fn test_default_form_prefers_upi() {
        let form = CheckoutForm::default();
        assert_eq!(form.payment_method, Some(PaymentMethod::Upi));
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_payment_method_parsing_and_labels() {
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
        assert_eq!("cashOnDelivery".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::Card.label(), "Credit/Debit Card");
        assert_eq!(serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(), "\"cashOnDelivery\"");
    }
}
