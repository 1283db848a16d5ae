// Number and price formatters
//
// Shared formatting utilities for the item grid, header and `loga list`.

use crate::catalog::{Product, CURRENCY};

/// Format a number with commas for readability
///
/// # Examples
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }

    result
}

/// Format a price given in minor units
///
/// # Examples
/// ```ignore
/// assert_eq!(format_price(899_900), "8,999.00 ETB");
/// ```
pub fn format_price(minor: u64) -> String {
    format!("{}.{:02} {}", format_number(minor / 100), minor % 100, CURRENCY)
}

/// Price label for a product: final price, plus the discount when there is one
pub fn price_label(product: &Product) -> String {
    match product.discount_percent {
        Some(percent) if percent > 0 => {
            format!("{} (-{}%)", format_price(product.final_price()), percent)
        }
        _ => format_price(product.price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(899_900), "8,999.00 ETB");
        assert_eq!(format_price(5), "0.05 ETB");
        assert_eq!(format_price(1_199_950), "11,999.50 ETB");
    }

    #[test]
    fn test_price_label_with_discount() {
        let blazer = Product::new(5, "Tailored Blazer", 599_900, "Suits").with_discount(15);
        assert_eq!(price_label(&blazer), "5,099.15 ETB (-15%)");

        let shirt = Product::new(3, "Casual Linen Shirt", 249_900, "Shirts");
        assert_eq!(price_label(&shirt), "2,499.00 ETB");
    }
}
