//! Product snapshot
//!
//! Products are owned by the catalog. The cart and wishlist keep the copy
//! they were handed at the time of the add and never re-fetch it.

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Money, ProductId};
use crate::pricing;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub brand: String,
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    pub list_price: Money,
    pub sale_price: Money,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Product {
    pub fn new(id: u64, brand: impl Into<String>, name: impl Into<String>, list_price: u64, sale_price: u64) -> Self {
        Self {
            id: ProductId::new(id), brand: brand.into(), name: name.into(), short_description: String::new(),
            list_price: Money::new(list_price), sale_price: Money::new(sale_price),
            image_ref: String::new(), tags: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self { self.short_description = description.into(); self }
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self { self.image_ref = image_ref.into(); self }
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags(&self) -> &[String] { self.tags.as_deref().unwrap_or(&[]) }
    pub fn has_image(&self) -> bool { !self.image_ref.trim().is_empty() }

    pub fn discount_percentage(&self) -> i64 {
        pricing::calculate_discount_percentage(self.list_price, self.sale_price)
    }

    pub fn display_sale_price(&self) -> String { pricing::format_display_price(self.sale_price) }
    pub fn display_list_price(&self) -> String { pricing::format_display_price(self.list_price) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_pricing_helpers() {
        let p = Product::new(1, "Meguiar's", "Gold Class Wax", 1000, 750);
        assert_eq!(p.discount_percentage(), 25);
        assert_eq!(p.display_sale_price(), "₹750");
        assert_eq!(p.display_list_price(), "₹1,000");
    }

    #[test]
    fn test_product_json_shape() {
        let p = Product::new(7, "Chemical Guys", "Foam Soap", 1200, 999).with_tags(["wash"]);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["salePrice"], 999);
        assert_eq!(json["listPrice"], 1200);
        assert_eq!(json["tags"][0], "wash");

        let untagged = Product::new(8, "b", "n", 1, 1);
        let json = serde_json::to_value(&untagged).unwrap();
        assert!(json.get("tags").is_none());
        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, untagged);
        assert!(back.tags().is_empty());
    }
}
