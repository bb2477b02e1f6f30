//! The built-in rental catalog and catalog files.

use crate::error::HirerError;
use hirer_types::{Catalog, CatalogDefinition, Item};
use std::path::Path;

pub const CHAIRS_AND_SOFAS: &str = "Chairs & Sofas";
pub const POOJA_ITEMS: &str = "Pooja Items";
pub const TENTS_AND_SIDE_WALLS: &str = "Tents & Side Walls";
pub const COOKING_ITEMS: &str = "Cooking Items";

/// The shop's standard catalog: eight items in four categories.
pub fn builtin_catalog() -> Catalog {
    let categories = [CHAIRS_AND_SOFAS, POOJA_ITEMS, TENTS_AND_SIDE_WALLS, COOKING_ITEMS]
        .into_iter()
        .map(String::from)
        .collect();
    let items = vec![
        Item::new("cs1", "Single Sofa", "/images/chairs_sofa_1.png", 1200.0, CHAIRS_AND_SOFAS),
        Item::new("cs2", "Plastic Chair", "/images/placeholder.png", 80.0, CHAIRS_AND_SOFAS),
        Item::new("pj1", "Pooja Thali", "/images/pooja_1.png", 250.0, POOJA_ITEMS),
        Item::new("pj2", "Brass Diya", "/images/pooja2.png", 150.0, POOJA_ITEMS),
        Item::new("tn1", "Basic Tent", "/images/tent_1.png", 3000.0, TENTS_AND_SIDE_WALLS),
        Item::new("tn2", "Side Wall (per panel)", "/images/side_wall.png", 400.0, TENTS_AND_SIDE_WALLS),
        Item::new("ck1", "Large Vessel", "/images/cooking_1.png", 900.0, COOKING_ITEMS),
        Item::new("ck2", "Gas Stove (2 burner)", "/images/gas_stove.png", 700.0, COOKING_ITEMS),
    ];
    match Catalog::new(categories, items) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Built-in catalog is invalid: {}", e);
            Catalog::default()
        }
    }
}

/// Reads a catalog file of the form `{ "categories": [...], "items": [...] }`.
pub fn load_catalog(path: &Path) -> Result<Catalog, HirerError> {
    let raw = std::fs::read_to_string(path)?;
    let definition: CatalogDefinition = serde_json::from_str(&raw)?;
    let catalog = Catalog::from_definition(definition)?;
    log::debug!("Loaded {} items from {}", catalog.len(), path.display());
    Ok(catalog)
}
