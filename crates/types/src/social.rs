use serde::{Deserialize, Serialize};

/// A profile link shown in the document footer.
///
/// `icon` names an entry of the icon asset set; when that icon is not
/// available the footer falls back to `label` as link text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
    pub icon: String,
}

impl SocialLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            icon: icon.into(),
        }
    }

    /// The storefront's Instagram, YouTube and Maps links.
    pub fn defaults() -> Vec<SocialLink> {
        vec![
            SocialLink::new(
                "Instagram",
                "https://www.instagram.com/chandhinihirers_nellore/#",
                "instagram",
            ),
            SocialLink::new(
                "YouTube",
                "https://www.youtube.com/@chandhinihirers_nellore",
                "youtube",
            ),
            SocialLink::new("Maps", "https://maps.app.goo.gl/o3orgsRNWrdUJZh76", "map-pin"),
        ]
    }
}
