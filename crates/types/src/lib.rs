pub mod catalog;
pub mod color;
pub mod currency;
pub mod geometry;
pub mod item;
pub mod social;

pub use catalog::{Catalog, CatalogDefinition, CatalogError};
pub use color::Color;
pub use currency::{CurrencyStyle, format_amount, group_indian};
pub use geometry::{Rect, Size};
pub use item::{CartLine, Item, Totals};
pub use social::SocialLink;
