//! AssetSource trait for abstracting asset fetching.
//!
//! The asset loader asks a source for font and icon bytes by URL path,
//! without knowing whether they come from disk, memory or the network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for asset fetching operations.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of binary assets addressed by URL path.
///
/// # Implementations
///
/// - `FilesystemAssetSource`: serves paths from a local asset root (hirer-resource)
/// - `HttpAssetSource`: fetches from an origin over HTTP (hirer-resource, `http` feature)
/// - `InMemoryAssetSource`: serves pre-populated bytes (always available)
///
/// # Example
///
/// ```ignore
/// let source = InMemoryAssetSource::new();
/// source.add("/fonts/DejaVuSans.ttf", font_bytes)?;
/// let data = source.fetch("/fonts/DejaVuSans.ttf").await?;
/// ```
#[async_trait]
pub trait AssetSource: Send + Sync + Debug {
    /// Fetch an asset by its resolved URL path (for example `/shop/fonts/DejaVuSans.ttf`).
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory asset source.
///
/// Assets must be added before use. Every `fetch` call is counted, which lets
/// callers verify how often a source was actually hit.
#[derive(Debug, Default)]
pub struct InMemoryAssetSource {
    assets: RwLock<HashMap<String, SharedResourceData>>,
    fetches: AtomicUsize,
}

impl InMemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset under the given URL path.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, url: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        let url = url.into();
        let mut assets = self.assets.write().map_err(|_| ResourceError::LoadFailed {
            path: url.clone(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets.insert(url, Arc::new(data));
        Ok(())
    }

    /// Number of `fetch` calls served or refused so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.assets.read().map(|a| a.is_empty()).unwrap_or(true)
    }
}

#[async_trait]
impl AssetSource for InMemoryAssetSource {
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let assets = self.assets.read().map_err(|_| ResourceError::LoadFailed {
            path: url.to_string(),
            message: "asset store lock poisoned".to_string(),
        })?;
        assets
            .get(url)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(url.to_string()))
    }

    fn name(&self) -> &'static str {
        "InMemoryAssetSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_source_add_and_fetch() {
        let source = InMemoryAssetSource::new();
        source.add("/icons/youtube.png", b"png".to_vec()).unwrap();

        let data = source.fetch("/icons/youtube.png").await.unwrap();
        assert_eq!(&*data, b"png");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_source_not_found_is_counted() {
        let source = InMemoryAssetSource::new();
        let result = source.fetch("/fonts/missing.ttf").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
        assert_eq!(source.fetch_count(), 1);
        assert!(source.is_empty());
    }

    #[test]
    fn test_in_memory_source_overwrite() {
        let source = InMemoryAssetSource::new();
        source.add("/a", b"one".to_vec()).unwrap();
        source.add("/a", b"two".to_vec()).unwrap();
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::NotFound("icons/x.png".to_string());
        assert!(err.to_string().contains("icons/x.png"));

        let err = ResourceError::LoadFailed {
            path: "fonts/a.ttf".to_string(),
            message: "HTTP 404".to_string(),
        };
        assert!(err.to_string().contains("fonts/a.ttf"));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_resource_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ResourceError = io_err.into();
        assert!(matches!(err, ResourceError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
