//! Font and icon assets for the order document.
//!
//! Assets are addressed relative to a deployment base path, fetched through an
//! [`AssetSource`](hirer_traits::AssetSource), decoded into a form the PDF
//! renderer can embed, and cached for the life of the process. A failed load is
//! final: callers branch on [`AssetLoader::did_succeed`] and use their fallbacks.

mod base_path;
mod error;
mod loader;
mod manifest;
mod types;

pub use base_path::{BasePath, base_href};
pub use error::AssetError;
pub use loader::{AssetLoader, AssetSnapshot};
pub use manifest::AssetManifest;
pub use types::{DecodedImage, FontAssets, FontProgram, IconAssets};
