use hirer_traits::KeyValueStore;
use hirer_types::{CartLine, Item, Totals};
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use std::sync::Arc;

/// Name of the durable record holding the JSON quantity map.
pub const QUANTITY_RECORD_KEY: &str = "cart-q";

/// Item id to selected quantity, in insertion order.
pub type QuantityMap = IndexMap<String, u32>;

/// Holds the quantity map and derives lines and totals from a catalog snapshot.
///
/// Every mutation applies fully before returning and writes the whole map back
/// to the record store. Storage is best-effort: read and write failures leave
/// the cart usable and are only logged.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    store: S,
    quantities: QuantityMap,
    catalog: IndexMap<String, Arc<Item>>,
    totals: OnceCell<Arc<Totals>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Opens the cart, loading any previously persisted quantities.
    ///
    /// A missing, unreadable or malformed record yields an empty cart.
    pub fn open(store: S) -> Self {
        let quantities = load_quantities(&store);
        Self {
            store,
            quantities,
            catalog: IndexMap::new(),
            totals: OnceCell::new(),
        }
    }

    /// Replaces the catalog snapshot used to derive lines and totals.
    ///
    /// Returns `false` and leaves the memoized totals untouched when the new
    /// snapshot maps the same ids to the same (pointer-equal) items.
    pub fn sync_catalog(&mut self, catalog: &[Arc<Item>]) -> bool {
        let next: IndexMap<String, Arc<Item>> = catalog
            .iter()
            .map(|item| (item.id.clone(), Arc::clone(item)))
            .collect();

        let unchanged = next.len() == self.catalog.len()
            && next.iter().all(|(id, item)| {
                self.catalog
                    .get(id)
                    .is_some_and(|prev| Arc::ptr_eq(prev, item))
            });
        if unchanged {
            return false;
        }

        log::debug!("Catalog snapshot replaced ({} items)", next.len());
        self.catalog = next;
        self.totals = OnceCell::new();
        true
    }

    /// Current quantity, 0 when the item was never selected.
    pub fn quantity_of(&self, item: &Item) -> u32 {
        self.quantities.get(&item.id).copied().unwrap_or(0)
    }

    /// The value a quantity stepper should display for `item`.
    pub fn visible_quantity_of(&self, item: &Item) -> u32 {
        self.quantity_of(item)
    }

    /// Sets the quantity, clamping negative input to 0.
    pub fn set_quantity(&mut self, item: &Item, n: i64) {
        let qty = n.clamp(0, u32::MAX as i64) as u32;
        self.write(&item.id, qty);
    }

    /// 1 when nothing is selected yet, otherwise one more.
    pub fn increment(&mut self, item: &Item) {
        let current = self.quantity_of(item);
        let next = if current == 0 { 1 } else { current.saturating_add(1) };
        self.write(&item.id, next);
    }

    /// One less; does nothing at 0.
    pub fn decrement(&mut self, item: &Item) {
        let current = self.quantity_of(item);
        if current == 0 {
            return;
        }
        self.write(&item.id, current - 1);
    }

    /// Sets the quantity to 0. The entry itself is kept.
    pub fn clear_item(&mut self, item: &Item) {
        self.write(&item.id, 0);
    }

    /// Empties the whole quantity map.
    pub fn clear_all(&mut self) {
        self.quantities.clear();
        self.changed();
    }

    /// Lines and totals for the current quantities and catalog snapshot.
    ///
    /// The same `Arc` is returned until either input changes.
    pub fn totals(&self) -> Arc<Totals> {
        Arc::clone(self.totals.get_or_init(|| Arc::new(self.compute_totals())))
    }

    pub fn quantities(&self) -> &QuantityMap {
        &self.quantities
    }

    /// Ids with a stored quantity that the current catalog snapshot no longer has.
    pub fn stale_ids(&self) -> Vec<&str> {
        self.quantities
            .keys()
            .filter(|id| !self.catalog.contains_key(*id))
            .map(String::as_str)
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn write(&mut self, id: &str, qty: u32) {
        self.quantities.insert(id.to_string(), qty);
        self.changed();
    }

    fn changed(&mut self) {
        self.totals = OnceCell::new();
        self.persist();
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.quantities) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize cart quantities: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(QUANTITY_RECORD_KEY, &json) {
            log::warn!("Cart not persisted to {}: {}", self.store.name(), e);
        }
    }

    fn compute_totals(&self) -> Totals {
        let lines = self
            .quantities
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .filter_map(|(id, qty)| {
                self.catalog
                    .get(id)
                    .map(|item| CartLine::new(Arc::clone(item), *qty))
            })
            .collect();
        Totals::from_lines(lines)
    }
}

fn load_quantities<S: KeyValueStore>(store: &S) -> QuantityMap {
    match store.get(QUANTITY_RECORD_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::debug!("Ignoring malformed cart record: {}", e);
            QuantityMap::new()
        }),
        Ok(None) => QuantityMap::new(),
        Err(e) => {
            log::debug!("Cart record unavailable from {}: {}", store.name(), e);
            QuantityMap::new()
        }
    }
}
