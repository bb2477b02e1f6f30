use regex::Regex;
use std::sync::LazyLock;

static BASE_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<base\b[^>]*?\bhref\s*=\s*["']([^"']*)["']"#)
        .expect("BUG: invalid BASE_HREF_RE regex literal")
});

/// The URL prefix a build is served under, such as `/shop` or `https://cdn.example.org/shop`.
///
/// Stored without a trailing slash; empty means "served from the root".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self(prefix.as_ref().trim_end_matches('/').to_string())
    }

    /// Picks the first available prefix: an explicit runtime value, then the
    /// build-time default, then the `<base href>` of the hosting document
    /// (ignored when it is just `/`), else no prefix. Empty strings count as absent.
    pub fn resolve(
        runtime: Option<&str>,
        build_default: Option<&str>,
        host_document: Option<&str>,
    ) -> Self {
        if let Some(prefix) = runtime.filter(|p| !p.is_empty()) {
            return Self::new(prefix);
        }
        if let Some(prefix) = build_default.filter(|p| !p.is_empty()) {
            return Self::new(prefix);
        }
        if let Some(href) = host_document.and_then(base_href)
            && href != "/"
        {
            return Self::new(href);
        }
        Self::none()
    }

    /// [`BasePath::resolve`] with the build-time default taken from
    /// `HIRER_BASE_PATH` as it was set when this crate was compiled.
    pub fn resolve_with_build_default(runtime: Option<&str>, host_document: Option<&str>) -> Self {
        Self::resolve(runtime, option_env!("HIRER_BASE_PATH"), host_document)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins an asset path onto the prefix: `prefix/clean` or `/clean`.
    pub fn join(&self, path: &str) -> String {
        let clean = path.strip_prefix('/').unwrap_or(path);
        if self.0.is_empty() {
            format!("/{}", clean)
        } else {
            format!("{}/{}", self.0, clean)
        }
    }
}

/// The `href` of the first `<base>` element in an HTML document, if any.
pub fn base_href(html: &str) -> Option<String> {
    BASE_HREF_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|href| !href.is_empty())
}
