use crate::delivery::DeliveryError;
use hirer_render_lopdf::RenderError;
use hirer_traits::{ResourceError, StorageError};
use hirer_types::CatalogError;
use thiserror::Error;

/// Top-level error for the storefront library.
#[derive(Error, Debug)]
pub enum HirerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown item '{0}'")]
    UnknownItem(String),
}
