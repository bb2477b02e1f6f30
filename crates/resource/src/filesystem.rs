//! Filesystem-based asset source for native platforms.
//!
//! Serves asset URL paths from a local asset root, the directory a static
//! export was written to.
//!
//! # Security
//!
//! The source validates that all resolved paths remain within the asset root
//! to prevent directory traversal attacks (e.g., `../../../etc/passwd`).

use async_trait::async_trait;
use hirer_traits::{AssetSource, ResourceError, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// An asset source that reads URL paths from the local filesystem.
///
/// A URL such as `/shop/fonts/DejaVuSans.ttf` is mapped to
/// `<root>/fonts/DejaVuSans.ttf` when the source is mounted at `/shop`.
/// Without a mount the leading `/` is simply dropped.
#[derive(Debug)]
pub struct FilesystemAssetSource {
    root: PathBuf,
    /// Canonicalized root for security checks
    canonical_root: Option<PathBuf>,
    mount: String,
}

impl FilesystemAssetSource {
    /// Creates a new filesystem asset source serving files below `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
            mount: String::new(),
        }
    }

    /// Strips `mount` (a deployment base path such as `/shop`) from incoming URLs.
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into().trim_end_matches('/').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_path<'a>(&self, url: &'a str) -> &'a str {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let path = if !self.mount.is_empty() {
            path.strip_prefix(self.mount.as_str()).unwrap_or(path)
        } else {
            path
        };
        path.trim_start_matches('/')
    }

    /// Resolves a URL to a file below the root.
    ///
    /// Returns `None` if the path would escape the root directory.
    fn resolve_path_safe(&self, url: &str) -> Option<PathBuf> {
        let relative = self.relative_path(url);
        if relative.is_empty() || Path::new(relative).is_absolute() {
            return None;
        }

        if Path::new(relative)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        let full_path = self.root.join(relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref root) = self.canonical_root
        {
            return canonical.starts_with(root).then_some(canonical);
        }

        Some(full_path)
    }
}

#[async_trait]
impl AssetSource for FilesystemAssetSource {
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(url)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (path traversal blocked)", url)))?;

        log::debug!("Reading asset {} from {}", url, full_path.display());
        tokio::fs::read(&full_path)
            .await
            .map(Arc::new)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ResourceError::NotFound(url.to_string())
                } else {
                    ResourceError::LoadFailed {
                        path: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn name(&self) -> &'static str {
        "FilesystemAssetSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_existing_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/youtube.png"), b"png-bytes").unwrap();

        let source = FilesystemAssetSource::new(dir.path());
        let data = source.fetch("/icons/youtube.png").await.unwrap();
        assert_eq!(&*data, b"png-bytes");
    }

    #[tokio::test]
    async fn test_fetch_strips_mount() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("fonts/DejaVuSans.ttf"), b"ttf").unwrap();

        let source = FilesystemAssetSource::new(dir.path()).with_mount("/shop/");
        let data = source.fetch("/shop/fonts/DejaVuSans.ttf").await.unwrap();
        assert_eq!(&*data, b"ttf");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let dir = tempdir().unwrap();
        let source = FilesystemAssetSource::new(dir.path());

        let result = source.fetch("/fonts/missing.ttf").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    // Security tests for path traversal prevention

    #[tokio::test]
    async fn test_blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let source = FilesystemAssetSource::new(dir.path());

        assert!(source.fetch("/../../../etc/passwd").await.is_err());
        assert!(source.fetch("/icons/../../secret").await.is_err());
        assert!(source.resolve_path_safe("..").is_none());
    }

    #[test]
    fn test_ignores_query_and_fragment() {
        let dir = tempdir().unwrap();
        let source = FilesystemAssetSource::new(dir.path());
        assert_eq!(source.relative_path("/icons/a.png?v=2"), "icons/a.png");
        assert_eq!(source.relative_path("/icons/a.png#x"), "icons/a.png");
    }
}
