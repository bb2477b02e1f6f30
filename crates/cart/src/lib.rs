//! The cart: a persisted quantity per item id, with lines and totals derived
//! from the current catalog snapshot.
//!
//! ```ignore
//! let mut cart = CartStore::open(FileKeyValueStore::new(state_dir));
//! cart.sync_catalog(catalog.items());
//! cart.increment(&item);
//! let totals = cart.totals();
//! ```

mod stepper;
mod store;

pub use stepper::parse_quantity_input;
pub use store::{CartStore, QUANTITY_RECORD_KEY, QuantityMap};
