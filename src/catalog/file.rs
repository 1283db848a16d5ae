// JSON file catalog
//
// The file is a JSON array of products. It is read on every query so that a
// catalog edited while the storefront runs is picked up on the next filter
// change, and so that a broken file surfaces as a failed fetch rather than a
// startup crash.

use super::{filter_products, validate, CatalogError, CatalogSource, Product};
use crate::filter::FilterState;
use std::path::PathBuf;

pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read and validate the full product list
    pub fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let products: Vec<Product> =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        validate(&products)?;
        Ok(products)
    }
}

impl CatalogSource for FileCatalog {
    fn query(&self, filter: &FilterState) -> Result<Vec<Product>, CatalogError> {
        let products = self.load()?;
        Ok(filter_products(&products, filter))
    }

    fn describe(&self) -> String {
        match self.load() {
            Ok(products) => format!("{} ({} products)", self.path.display(), products.len()),
            Err(e) => format!("{} (unreadable: {})", self.path.display(), e),
        }
    }
}
