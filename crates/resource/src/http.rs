//! HTTP asset source for sites whose assets live on a remote origin.

use async_trait::async_trait;
use hirer_traits::{AssetSource, ResourceError, SharedResourceData};
use std::sync::Arc;

/// Fetches asset URL paths relative to an origin such as `https://example.github.io`.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    origin: String,
    client: reqwest::Client,
}

impl HttpAssetSource {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.origin, url.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch(&self, url: &str) -> Result<SharedResourceData, ResourceError> {
        let absolute = self.absolute_url(url);
        let load_failed = |message: String| ResourceError::LoadFailed {
            path: absolute.clone(),
            message,
        };

        let response = self
            .client
            .get(&absolute)
            .send()
            .await
            .map_err(|e| load_failed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResourceError::NotFound(absolute));
        }
        if !status.is_success() {
            return Err(load_failed(format!("Fetch failed: {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| load_failed(e.to_string()))?;
        Ok(Arc::new(body.to_vec()))
    }

    fn name(&self) -> &'static str {
        "HttpAssetSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_joins_origin() {
        let source = HttpAssetSource::new("https://example.org/");
        assert_eq!(
            source.absolute_url("/shop/fonts/DejaVuSans.ttf"),
            "https://example.org/shop/fonts/DejaVuSans.ttf"
        );
        assert_eq!(
            source.absolute_url("https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }
}
