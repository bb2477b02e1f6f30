use chrono::{DateTime, TimeZone, Utc};
use hirer::traits::InMemoryAssetSource;
use hirer::types::{Catalog, Item};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

/// The two-item catalog used by the cart scenarios: A at 100, B at 250.
pub fn two_item_catalog() -> Catalog {
    Catalog::new(
        vec!["Test".to_string()],
        vec![
            Item::new("a", "Alpha", "/images/a.png", 100.0, "Test"),
            Item::new("b", "Beta", "/images/b.png", 250.0, "Test"),
        ],
    )
    .expect("valid catalog")
}

/// `count` distinct chairs named `Chair 01`, `Chair 02`, ... priced at 100.
pub fn chair_catalog(count: usize) -> Catalog {
    let items = (1..=count)
        .map(|n| Item::new(format!("c{:02}", n), format!("Chair {:02}", n), "", 100.0, "Chairs"))
        .collect();
    Catalog::new(vec!["Chairs".to_string()], items).expect("valid catalog")
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 0).unwrap()
}

/// A small opaque-with-transparent-corner PNG.
pub fn png_icon(size: u32) -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(size, size, Rgba([200, 40, 90, 255]));
    img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// A source that serves the three footer icons but no fonts.
pub fn icons_only_source() -> Arc<InMemoryAssetSource> {
    let source = Arc::new(InMemoryAssetSource::new());
    for key in ["instagram", "youtube", "map-pin"] {
        source
            .add(format!("/icons/{}.png", key), png_icon(16))
            .expect("add icon");
    }
    source
}

/// Bytes of a font under `tests/fixtures/fonts`.
pub fn fixture_font(name: &str) -> Vec<u8> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/fonts")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}

/// A source serving both document fonts and the three footer icons.
pub fn full_asset_source() -> Arc<InMemoryAssetSource> {
    let source = icons_only_source();
    for name in ["DejaVuSans.ttf", "DejaVuSans-Bold.ttf"] {
        source
            .add(format!("/fonts/{}", name), fixture_font(name))
            .expect("add font");
    }
    source
}
