use crate::base_path::BasePath;
use crate::error::AssetError;
use crate::manifest::AssetManifest;
use crate::types::{DecodedImage, FontAssets, FontProgram, IconAssets};
use futures::future::try_join_all;
use hirer_traits::AssetSource;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

static GLOBAL_LOADER: once_cell::sync::OnceCell<AssetLoader> = once_cell::sync::OnceCell::new();

/// Whatever assets finished loading, as handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct AssetSnapshot {
    pub fonts: Option<Arc<FontAssets>>,
    pub icons: Option<Arc<IconAssets>>,
}

impl AssetSnapshot {
    /// No fonts and no icons: built-in metrics and text labels.
    pub fn fallback() -> Self {
        Self::default()
    }
}

/// Loads the document's fonts and icons at most once per process.
///
/// Each asset class sits behind its own async once-cell, so concurrent callers
/// await the same in-flight load instead of starting another. The cell stores
/// the outcome, `None` on failure, and is never reset.
#[derive(Debug)]
pub struct AssetLoader {
    source: Arc<dyn AssetSource>,
    base: BasePath,
    manifest: AssetManifest,
    fonts: OnceCell<Option<Arc<FontAssets>>>,
    icons: OnceCell<Option<Arc<IconAssets>>>,
}

impl AssetLoader {
    pub fn new(source: Arc<dyn AssetSource>, base: BasePath) -> Self {
        Self::with_manifest(source, base, AssetManifest::default())
    }

    pub fn with_manifest(source: Arc<dyn AssetSource>, base: BasePath, manifest: AssetManifest) -> Self {
        Self {
            source,
            base,
            manifest,
            fonts: OnceCell::new(),
            icons: OnceCell::new(),
        }
    }

    /// Installs `loader` as the process-wide instance. If one is already
    /// installed, `loader` is dropped and the existing instance is returned.
    pub fn install_global(loader: AssetLoader) -> &'static AssetLoader {
        let mut installed = false;
        let global = GLOBAL_LOADER.get_or_init(|| {
            installed = true;
            loader
        });
        if !installed {
            log::debug!("Asset loader already installed; keeping the existing instance");
        }
        global
    }

    pub fn global() -> Option<&'static AssetLoader> {
        GLOBAL_LOADER.get()
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Starts (or joins) both loads and waits for them. Returns whether the fonts loaded.
    pub async fn preload(&self) -> bool {
        let (fonts, _icons) = tokio::join!(self.ensure_fonts(), self.ensure_icons());
        fonts.is_some()
    }

    pub async fn ensure_fonts(&self) -> Option<Arc<FontAssets>> {
        self.fonts
            .get_or_init(|| async {
                match self.load_fonts().await {
                    Ok(fonts) => {
                        log::info!("Loaded document fonts from {}", self.source.name());
                        Some(Arc::new(fonts))
                    }
                    Err(e) => {
                        log::warn!("Font load failed, falling back to built-in metrics: {}", e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    pub async fn ensure_icons(&self) -> Option<Arc<IconAssets>> {
        self.icons
            .get_or_init(|| async {
                match self.load_icons().await {
                    Ok(icons) => {
                        log::info!("Loaded {} footer icons", icons.len());
                        Some(Arc::new(icons))
                    }
                    Err(e) => {
                        log::warn!("Icon load failed, footer will use text links: {}", e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Waits for both classes and returns whatever succeeded.
    pub async fn snapshot(&self) -> AssetSnapshot {
        let (fonts, icons) = tokio::join!(self.ensure_fonts(), self.ensure_icons());
        AssetSnapshot { fonts, icons }
    }

    /// True once the font load has completed, successfully or not.
    pub fn is_ready(&self) -> bool {
        self.fonts.initialized()
    }

    /// True only if the font load completed and produced usable fonts.
    pub fn did_succeed(&self) -> bool {
        matches!(self.fonts.get(), Some(Some(_)))
    }

    pub fn icons_ready(&self) -> bool {
        self.icons.initialized()
    }

    async fn load_fonts(&self) -> Result<FontAssets, AssetError> {
        let regular_url = self.base.join(&self.manifest.regular_font);
        let bold_url = self.base.join(&self.manifest.bold_font);
        let (regular, bold) = tokio::try_join!(
            self.source.fetch(&regular_url),
            self.source.fetch(&bold_url)
        )?;
        Ok(FontAssets {
            regular: FontProgram::parse(&regular_url, regular)?,
            bold: FontProgram::parse(&bold_url, bold)?,
        })
    }

    async fn load_icons(&self) -> Result<IconAssets, AssetError> {
        let fetches = self.manifest.icons.iter().map(|(key, path)| async move {
            let url = self.base.join(path);
            let bytes = self.source.fetch(&url).await?;
            let icon = DecodedImage::decode(&url, &bytes)?;
            Ok::<_, AssetError>((key.clone(), icon))
        });
        let icons: HashMap<_, _> = try_join_all(fetches).await?.into_iter().collect();
        Ok(IconAssets::new(icons))
    }
}
