//! Pricing helpers for product display.
//!
//! Both functions are pure. Amounts stay integral the whole way through;
//! the discount is computed with exact integer arithmetic rather than floats.

use crate::domain::value_objects::Money;

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Renders an amount with the rupee symbol and Indian digit grouping
/// (`₹1,23,45,678`).
pub fn format_display_price(amount: impl Into<Money>) -> String {
    let digits = amount.into().amount().to_string();
    format!("{CURRENCY_SYMBOL}{}", group_en_in(&digits))
}

/// en-IN grouping: the last three digits form one group, everything before
/// them is grouped in pairs.
fn group_en_in(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Percentage saved relative to the list price, rounded half-up.
///
/// Returns 0 for a zero list price. A sale price above the list price yields
/// a negative percentage, which is returned as-is.
pub fn calculate_discount_percentage(list_price: impl Into<Money>, sale_price: impl Into<Money>) -> i64 {
    let list = i128::from(list_price.into().amount());
    let sale = i128::from(sale_price.into().amount());
    if list == 0 {
        return 0;
    }
    // floor(diff * 100 / list + 1/2), kept in integers
    let numerator = 200 * (list - sale) + list;
    numerator.div_euclid(2 * list) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_display_price(0u64), "₹0");
        assert_eq!(format_display_price(999u64), "₹999");
        assert_eq!(format_display_price(1000u64), "₹1,000");
    }

    #[test]
    fn test_format_indian_grouping() {
        assert_eq!(format_display_price(12_345u64), "₹12,345");
        assert_eq!(format_display_price(123_456u64), "₹1,23,456");
        assert_eq!(format_display_price(12_345_678u64), "₹1,23,45,678");
        assert_eq!(format_display_price(Money::new(100_000)), "₹1,00,000");
    }

    #[test]
    fn test_discount_zero_list_price() {
        assert_eq!(calculate_discount_percentage(0u64, 0u64), 0);
        assert_eq!(calculate_discount_percentage(0u64, 500u64), 0);
    }

    #[test]
    fn test_discount_basic() {
        assert_eq!(calculate_discount_percentage(1000u64, 750u64), 25);
        assert_eq!(calculate_discount_percentage(1000u64, 1000u64), 0);
        assert_eq!(calculate_discount_percentage(1000u64, 0u64), 100);
        assert_eq!(calculate_discount_percentage(3u64, 2u64), 33);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 12.5% -> 13
        assert_eq!(calculate_discount_percentage(8u64, 7u64), 13);
        // -12.5% -> -12, ties go toward positive infinity
        assert_eq!(calculate_discount_percentage(8u64, 9u64), -12);
    }

    #[test]
    fn test_discount_negative_is_literal() {
        assert_eq!(calculate_discount_percentage(1000u64, 1250u64), -25);
    }
}
