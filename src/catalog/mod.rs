//! Product catalog - the data source behind the storefront grid
//!
//! A catalog is an ordered sequence of products that can be queried with a
//! [`FilterState`]. Results always come back in catalog order; pagination is
//! the loader's job, not the catalog's.
//!
//! Two sources are available:
//! - [`MockCatalog`]: the built-in 16-product demo catalog
//! - [`FileCatalog`]: a JSON file re-read on every query, so edits show up on
//!   the next filter change

mod file;
mod mock;

pub use file::FileCatalog;
pub use mock::MockCatalog;

use crate::config::Config;
use crate::filter::FilterState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Category labels a product may carry, in menu order
pub const CATEGORIES: [&str; 10] = [
    "Suits",
    "Dresses",
    "Shirts",
    "Accessories",
    "Pants",
    "Outerwear",
    "Casual Wear",
    "Formal Wear",
    "Traditional",
    "Winter Collection",
];

/// Currency suffix used when displaying prices
pub const CURRENCY: &str = "ETB";

/// Stable product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in minor units (1/100 of the currency)
    pub price: u64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn new(id: u32, name: &str, price: u64, category: &str) -> Self {
        Self {
            id: ProductId(id),
            name: name.to_string(),
            price,
            category: category.to_string(),
            discount_percent: None,
            image: None,
        }
    }

    pub fn with_discount(mut self, percent: u8) -> Self {
        self.discount_percent = Some(percent);
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    /// Price after discount, rounded down to the minor unit
    pub fn final_price(&self) -> u64 {
        match self.discount_percent {
            Some(percent) => {
                let percent = u128::from(percent.min(100));
                (u128::from(self.price) * (100 - percent) / 100) as u64
            }
            None => self.price,
        }
    }
}

/// Errors raised while reading a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog file could not be read
    Io { path: PathBuf, message: String },
    /// Catalog file is not a valid product list
    Parse { path: PathBuf, message: String },
    /// A product carries a label outside [`CATEGORIES`]
    UnknownCategory { id: ProductId, category: String },
    /// Two products share an identifier
    DuplicateId(ProductId),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, message } => {
                write!(f, "cannot read {}: {}", path.display(), message)
            }
            CatalogError::Parse { path, message } => {
                write!(f, "invalid catalog {}: {}", path.display(), message)
            }
            CatalogError::UnknownCategory { id, category } => {
                write!(f, "product {} has unknown category {:?}", id, category)
            }
            CatalogError::DuplicateId(id) => write!(f, "duplicate product id {}", id),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Query capability consumed by the list loader
///
/// Implementations must be side-effect free and return matches in catalog
/// order. The same snapshot queried with the same filter yields the same
/// result.
pub trait CatalogSource: Send + Sync {
    /// All products matching `filter`, in catalog order
    fn query(&self, filter: &FilterState) -> Result<Vec<Product>, CatalogError>;

    /// Short human-readable description for the startup banner
    fn describe(&self) -> String;
}

/// Apply `filter` to an ordered product slice
pub fn filter_products(products: &[Product], filter: &FilterState) -> Vec<Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect()
}

/// Check that every product uses a known category and a unique id
pub fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !CATEGORIES.contains(&product.category.as_str()) {
            return Err(CatalogError::UnknownCategory {
                id: product.id,
                category: product.category.clone(),
            });
        }
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
    }
    Ok(())
}

/// Build the catalog selected by configuration
pub fn open(config: &Config) -> Arc<dyn CatalogSource> {
    match &config.catalog_path {
        Some(path) => Arc::new(FileCatalog::new(path.clone())),
        None => Arc::new(MockCatalog::new()),
    }
}
