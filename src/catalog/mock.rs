// Built-in demo catalog
//
// Sixteen products across nine of the menu categories. Six of them are
// Accessories; Formal Wear has no products so the "no results" view is one
// keypress away.

use super::{filter_products, CatalogError, CatalogSource, Product};
use crate::filter::FilterState;

/// In-memory catalog backed by a fixed product list
pub struct MockCatalog {
    products: Vec<Product>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::from_products(demo_products())
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[cfg(test)]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for MockCatalog {
    fn query(&self, filter: &FilterState) -> Result<Vec<Product>, CatalogError> {
        Ok(filter_products(&self.products, filter))
    }

    fn describe(&self) -> String {
        format!("built-in ({} products)", self.products.len())
    }
}

fn demo_products() -> Vec<Product> {
    vec![
        Product::new(1, "Premium Business Suit", 899_900, "Suits").with_image("suit-premium.jpg"),
        Product::new(2, "Evening Gown", 749_900, "Dresses"),
        Product::new(3, "Casual Linen Shirt", 249_900, "Shirts"),
        Product::new(4, "Leather Dress Shoes", 549_900, "Accessories"),
        Product::new(5, "Tailored Blazer", 599_900, "Suits").with_discount(15),
        Product::new(6, "Silk Scarf", 129_900, "Accessories"),
        Product::new(7, "Summer Dress", 399_900, "Dresses").with_discount(10),
        Product::new(8, "Formal Trousers", 329_900, "Pants"),
        Product::new(9, "Designer Handbag", 1_199_900, "Accessories"),
        Product::new(10, "Winter Coat", 899_900, "Outerwear").with_image("coat-winter.jpg"),
        Product::new(11, "Casual Jacket", 449_900, "Casual Wear"),
        Product::new(12, "Evening Purse", 279_900, "Accessories"),
        Product::new(13, "Leather Belt", 119_900, "Accessories").with_discount(25),
        Product::new(14, "Embroidered Habesha Kemis", 1_049_900, "Traditional"),
        Product::new(15, "Wool Knit Sweater", 349_900, "Winter Collection"),
        Product::new(16, "Gold Cufflinks", 219_900, "Accessories"),
    ]
}
