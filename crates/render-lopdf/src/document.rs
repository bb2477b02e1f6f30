use chrono::{DateTime, Utc};
use hirer_types::{CartLine, SocialLink, Size, Totals};

/// Everything that varies between two order sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDocument {
    pub title: String,
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_amount: f64,
    pub generated_at: DateTime<Utc>,
}

impl OrderDocument {
    pub fn new(title: impl Into<String>, totals: &Totals, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            lines: totals.lines.clone(),
            total_items: totals.total_items,
            total_amount: totals.total_amount,
            generated_at,
        }
    }
}

/// Shop-level settings shared by every document a renderer produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    pub watermark: String,
    pub socials: Vec<SocialLink>,
    pub page_size: Size,
    pub producer: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            watermark: "chandini hirers".to_string(),
            socials: SocialLink::defaults(),
            page_size: Size::a4(),
            producer: concat!("hirer ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
