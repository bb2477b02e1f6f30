//! A rental catalog storefront core: a persisted quantity cart over a fixed
//! catalog, and PDF order sheets that can be downloaded, previewed or shared.
//!
//! The heavy lifting lives in the member crates, re-exported here:
//! [`hirer_cart`] for the cart, [`hirer_assets`] for fonts and icons and
//! [`hirer_render_lopdf`] for the document. This crate adds configuration, the
//! catalog, delivery and the [`Storefront`] that ties them together.

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod error;
pub mod storefront;

pub use catalog::{builtin_catalog, load_catalog};
pub use config::HirerConfig;
pub use error::HirerError;
pub use storefront::{PreviewOutcome, Storefront};

pub use hirer_assets as assets;
pub use hirer_cart as cart;
pub use hirer_render_lopdf as render;
pub use hirer_resource as resource;
pub use hirer_traits as traits;
pub use hirer_types as types;
