//! Asset sources and record stores for the hirer storefront.
//!
//! This crate provides platform-specific implementations of the
//! `AssetSource` and `KeyValueStore` traits from hirer-traits.
//!
//! ## Available Implementations
//!
//! - [`FilesystemAssetSource`]: Serves asset URL paths from a local directory
//! - [`FileKeyValueStore`]: Keeps each record as a JSON file in a directory
//! - [`HttpAssetSource`]: Fetches assets from a remote origin (`http` feature)
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory variants from hirer-traits:
//! - [`InMemoryAssetSource`]
//! - [`InMemoryKeyValueStore`]

mod file_store;
mod filesystem;
#[cfg(feature = "http")]
mod http;

pub use file_store::FileKeyValueStore;
pub use filesystem::FilesystemAssetSource;
#[cfg(feature = "http")]
pub use http::HttpAssetSource;

pub use hirer_traits::{InMemoryAssetSource, InMemoryKeyValueStore};
