use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A rentable catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(alias = "imageAsset")]
    pub image_ref: String,
    pub price: f64,
    pub category: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image_ref: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_ref: image_ref.into(),
            price,
            category: category.into(),
        }
    }
}

/// One selected item with a positive quantity, derived from the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: Arc<Item>,
    pub qty: u32,
    pub line_total: f64,
}

impl CartLine {
    pub fn new(item: Arc<Item>, qty: u32) -> Self {
        let line_total = item.price * qty as f64;
        Self {
            item,
            qty,
            line_total,
        }
    }
}

/// Derived cart summary. A pure function of the quantity map and the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Totals {
    pub total_items: u64,
    pub total_amount: f64,
    pub lines: Vec<CartLine>,
}

impl Totals {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let total_items = lines.iter().map(|l| l.qty as u64).sum();
        let total_amount = lines.iter().map(|l| l.line_total).sum();
        Self {
            total_items,
            total_amount,
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
