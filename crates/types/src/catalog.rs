//! The read-only catalog registry.
//!
//! A `Catalog` is built once at startup and handed out as shared `Arc<Item>`s,
//! so consumers can compare snapshots by pointer identity.

use crate::item::Item;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateId(String),

    #[error("Item '{id}' has an invalid price: {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("Item '{id}' references unknown category '{category}'")]
    UnknownCategory { id: String, category: String },
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<String>,
    items: Vec<Arc<Item>>,
}

/// On-disk shape of a catalog definition file.
#[derive(Debug, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default)]
    pub categories: Vec<String>,
    pub items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, checking ids are unique and prices are non-negative.
    ///
    /// When `categories` is empty the category order is taken from the first
    /// appearance of each category among the items.
    pub fn new(categories: Vec<String>, items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if !(item.price.is_finite() && item.price >= 0.0) {
                return Err(CatalogError::InvalidPrice {
                    id: item.id.clone(),
                    price: item.price,
                });
            }
        }

        let categories = if categories.is_empty() {
            let mut ordered: Vec<String> = Vec::new();
            for item in &items {
                if !ordered.contains(&item.category) {
                    ordered.push(item.category.clone());
                }
            }
            ordered
        } else {
            if let Some(item) = items.iter().find(|i| !categories.contains(&i.category)) {
                return Err(CatalogError::UnknownCategory {
                    id: item.id.clone(),
                    category: item.category.clone(),
                });
            }
            categories
        };

        Ok(Self {
            categories,
            items: items.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn from_definition(def: CatalogDefinition) -> Result<Self, CatalogError> {
        Self::new(def.categories, def.items)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Item>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items of one category, in catalog order.
    pub fn items_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Arc<Item>> + 'a {
        self.items.iter().filter(move |i| i.category == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
