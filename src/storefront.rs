//! The storefront session: one catalog, one cart and the order sheet actions
//! the front end exposes (download, share, preview, clear all).

use crate::delivery::{Delivery, DeliveryHost, DownloadOutcome, ObjectHandle, PreviewSlot, ShareOutcome};
use crate::error::HirerError;
use chrono::{DateTime, Utc};
use hirer_assets::AssetLoader;
use hirer_cart::CartStore;
use hirer_render_lopdf::{OrderDocument, OrderRenderer};
use hirer_traits::KeyValueStore;
use hirer_types::{Catalog, CurrencyStyle, Item, Totals, format_amount};
use std::sync::Arc;

pub const NO_ITEMS_TO_DOWNLOAD: &str = "No items to download";
pub const NO_ITEMS_SELECTED: &str = "No items selected";

/// What happened to a preview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Opened(ObjectHandle),
    /// Fonts are still loading or failed to load; the sheet would show `Rs` amounts.
    FontsNotReady,
    Empty,
}

pub struct Storefront<'l, S: KeyValueStore, H: DeliveryHost> {
    catalog: Catalog,
    cart: CartStore<S>,
    loader: &'l AssetLoader,
    renderer: OrderRenderer,
    title: String,
    delivery: Delivery<H>,
    preview: PreviewSlot<H>,
}

impl<'l, S: KeyValueStore, H: DeliveryHost> Storefront<'l, S, H> {
    /// Opens the persisted cart and mounts `catalog` as its snapshot.
    pub fn new(
        catalog: Catalog,
        store: S,
        loader: &'l AssetLoader,
        renderer: OrderRenderer,
        title: impl Into<String>,
        host: Arc<H>,
    ) -> Self {
        let mut cart = CartStore::open(store);
        cart.sync_catalog(catalog.items());
        Self {
            catalog,
            cart,
            loader,
            renderer,
            title: title.into(),
            delivery: Delivery::new(host.clone()),
            preview: PreviewSlot::new(host),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    pub fn delivery(&self) -> &Delivery<H> {
        &self.delivery
    }

    pub fn preview(&self) -> Option<&ObjectHandle> {
        self.preview.current()
    }

    pub fn item(&self, id: &str) -> Result<Arc<Item>, HirerError> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| HirerError::UnknownItem(id.to_string()))
    }

    pub fn totals(&self) -> Arc<Totals> {
        self.cart.totals()
    }

    /// Header badge, e.g. `My Items • 4 | ₹550`.
    pub fn badge(&self) -> String {
        let totals = self.cart.totals();
        format!(
            "My Items \u{2022} {} | {}",
            totals.total_items,
            format_amount(totals.total_amount, CurrencyStyle::Symbol)
        )
    }

    /// Text sent along with a shared order sheet.
    pub fn share_text(&self) -> String {
        let totals = self.cart.totals();
        format!(
            "Order from {}\nItems: {}\nTotal: \u{20B9}{}\nAttached: PDF summary.",
            self.title,
            totals.total_items,
            totals.total_amount.round() as i64
        )
    }

    pub fn order_filename(now: DateTime<Utc>) -> String {
        format!("order_{}.pdf", now.timestamp_millis())
    }

    pub fn order_document(&self, now: DateTime<Utc>) -> OrderDocument {
        OrderDocument::new(self.title.clone(), &self.cart.totals(), now)
    }

    /// Renders the current cart, waiting for assets to settle first.
    pub async fn generate_pdf(&self, now: DateTime<Utc>) -> Result<Vec<u8>, HirerError> {
        let document = self.order_document(now);
        Ok(self.renderer.generate(self.loader, &document).await?)
    }

    /// Renders the order sheet for writing to a caller-chosen path. `None` when the cart has no lines.
    pub async fn export_pdf(&self, now: DateTime<Utc>) -> Result<Option<Vec<u8>>, HirerError> {
        if self.cart.totals().is_empty() {
            self.delivery.host().notify(NO_ITEMS_TO_DOWNLOAD);
            return Ok(None);
        }
        Ok(Some(self.generate_pdf(now).await?))
    }

    /// Generates and downloads the order sheet. `None` when the cart has no lines.
    pub async fn download_pdf(&self, now: DateTime<Utc>) -> Result<Option<DownloadOutcome>, HirerError> {
        if self.cart.totals().is_empty() {
            self.delivery.host().notify(NO_ITEMS_TO_DOWNLOAD);
            return Ok(None);
        }
        let bytes = self.generate_pdf(now).await?;
        Ok(Some(self.delivery.download(&bytes, &Self::order_filename(now))))
    }

    /// Generates the order sheet and shares it, downloading when sharing is unavailable.
    pub async fn share_pdf(&self, now: DateTime<Utc>) -> Result<Option<ShareOutcome>, HirerError> {
        if self.cart.totals().is_empty() {
            self.delivery.host().notify(NO_ITEMS_SELECTED);
            return Ok(None);
        }
        let bytes = self.generate_pdf(now).await?;
        let title = format!("{} Order", self.title);
        let outcome = self
            .delivery
            .share(&bytes, &Self::order_filename(now), &title, &self.share_text())
            .await;
        Ok(Some(outcome))
    }

    /// Replaces the inline preview with a freshly rendered sheet.
    ///
    /// Refused while fonts are not loaded; an empty cart drops any current preview.
    pub async fn preview_pdf(&mut self, now: DateTime<Utc>) -> Result<PreviewOutcome, HirerError> {
        if self.cart.totals().is_empty() {
            self.preview.clear();
            return Ok(PreviewOutcome::Empty);
        }
        if !self.loader.did_succeed() {
            log::debug!("Preview skipped: fonts not ready");
            return Ok(PreviewOutcome::FontsNotReady);
        }
        let bytes = self.generate_pdf(now).await?;
        let handle = self.delivery.open_preview(&bytes)?;
        self.preview.set(handle.clone());
        Ok(PreviewOutcome::Opened(handle))
    }

    /// Empties the cart after confirmation. Returns whether anything was cleared.
    pub fn clear_all(&mut self, confirmed: bool) -> bool {
        if self.cart.totals().is_empty() || !confirmed {
            return false;
        }
        self.cart.clear_all();
        self.preview.clear();
        log::info!("Cart cleared");
        true
    }
}
