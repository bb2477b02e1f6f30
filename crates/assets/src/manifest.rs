/// Paths of the assets the order document uses, relative to the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    pub regular_font: String,
    pub bold_font: String,
    /// `(icon key, path)` pairs; the key is what a social link names in its `icon` field.
    pub icons: Vec<(String, String)>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            regular_font: "fonts/DejaVuSans.ttf".into(),
            bold_font: "fonts/DejaVuSans-Bold.ttf".into(),
            icons: ["instagram", "youtube", "map-pin"]
                .into_iter()
                .map(|key| (key.to_string(), format!("icons/{}.png", key)))
                .collect(),
        }
    }
}

impl AssetManifest {
    /// Number of files a full preload fetches.
    pub fn file_count(&self) -> usize {
        2 + self.icons.len()
    }
}
