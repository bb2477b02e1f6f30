use hirer_types::SocialLink;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the environment variable that points at an explicit config file.
pub const CONFIG_PATH_VAR: &str = "HIRER_CONFIG";
/// Prefix of environment overrides, e.g. `HIRER__STORAGE_DIR=/var/lib/hirer`.
pub const ENV_PREFIX: &str = "HIRER";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HirerConfig {
    /// Directory holding the persisted cart record.
    pub storage_dir: PathBuf,
    /// Local directory the site's static assets are served from.
    pub asset_root: PathBuf,
    /// Remote origin to fetch assets from instead of `asset_root` (needs the `http` feature).
    pub asset_origin: Option<String>,
    /// Deployment base path prefixed to every asset URL.
    pub base_path: Option<String>,
    /// HTML document whose `<base href>` is consulted when no base path is set.
    pub host_document: Option<PathBuf>,
    pub title: String,
    pub watermark: String,
    pub socials: Vec<SocialLink>,
    pub catalog_file: Option<PathBuf>,
    pub downloads_dir: PathBuf,
    /// Program used to open PDFs for preview, e.g. `xdg-open`.
    pub viewer_command: Option<String>,
    /// Program invoked as `<command> <text> <file>` to share a PDF.
    pub share_command: Option<String>,
}

impl Default for HirerConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".hirer"),
            asset_root: PathBuf::from("public"),
            asset_origin: None,
            base_path: None,
            host_document: None,
            title: "Chandini Hirers".to_string(),
            watermark: "chandini hirers".to_string(),
            socials: SocialLink::defaults(),
            catalog_file: None,
            downloads_dir: PathBuf::from("downloads"),
            viewer_command: None,
            share_command: None,
        }
    }
}

impl HirerConfig {
    /// Loads `hirer.toml` from the working directory (or the file named by
    /// `HIRER_CONFIG`) and layers `HIRER__*` environment variables on top.
    /// Every source is optional; missing values keep their defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::load_from(explicit.as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path.to_path_buf())),
            None => builder.add_source(config::File::with_name("hirer").required(false)),
        };

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: HirerConfig = builder.build()?.try_deserialize()?;
        log::debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }
}
