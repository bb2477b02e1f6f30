mod common;

use common::fixtures::*;
use common::pdf_assertions::{complete_type0_fonts, font_names, font_subtypes, image_count, link_uris};
use common::{GeneratedPdf, TestResult};
use hirer::assets::{AssetLoader, BasePath};
use hirer::cart::CartStore;
use hirer::render::{OrderDocument, OrderRenderer, generate};
use hirer::traits::{InMemoryAssetSource, InMemoryKeyValueStore};
use hirer::types::{CartLine, SocialLink, Totals};
use std::sync::Arc;

fn failing_loader() -> AssetLoader {
    AssetLoader::new(Arc::new(InMemoryAssetSource::new()), BasePath::none())
}

fn social_urls() -> Vec<String> {
    SocialLink::defaults().into_iter().map(|s| s.url).collect()
}

#[tokio::test]
async fn test_scenario_document() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let catalog = two_item_catalog();
    let mut cart = CartStore::open(InMemoryKeyValueStore::new());
    cart.sync_catalog(catalog.items());
    cart.set_quantity(catalog.get("a").unwrap(), 3);
    cart.increment(catalog.get("b").unwrap());

    let document = OrderDocument::new("Chandini Hirers", &cart.totals(), fixed_time());
    let pdf = GeneratedPdf::from_bytes(generate(&failing_loader(), &document).await?)?;

    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Chandini Hirers");
    assert_pdf_contains_text!(pdf, "Generated: 2026-03-14 09:26");
    assert_pdf_contains_text!(pdf, "Alpha (Rs 100)");
    assert_pdf_contains_text!(pdf, "Rs 300");
    assert_pdf_contains_text!(pdf, "Beta (Rs 250)");
    assert_pdf_contains_text!(pdf, "Total Items:");
    assert_pdf_contains_text!(pdf, "Rs 550");
    Ok(())
}

#[tokio::test]
async fn test_empty_cart_document_is_valid() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let document = OrderDocument::new("Chandini Hirers", &Totals::default(), fixed_time());
    let pdf = GeneratedPdf::from_bytes(generate(&failing_loader(), &document).await?)?;

    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Item");
    assert_pdf_contains_text!(pdf, "Total Amount:");
    assert_pdf_contains_text!(pdf, "Rs 0");
    let text = pdf.page_text(1);
    assert!(text.lines().any(|line| line.trim() == "0"), "missing item count in:\n{}", text);
    Ok(())
}

#[tokio::test]
async fn test_asset_failure_uses_fallbacks() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let loader = failing_loader();
    let catalog = two_item_catalog();
    let totals = Totals::from_lines(vec![CartLine::new(catalog.get("b").unwrap().clone(), 4)]);
    let document = OrderDocument::new("Chandini Hirers", &totals, fixed_time());
    let pdf = GeneratedPdf::from_bytes(generate(&loader, &document).await?)?;

    assert!(loader.is_ready());
    assert!(!loader.did_succeed());
    assert!(loader.icons_ready());

    assert_pdf_contains_text!(pdf, "Rs 1,000");
    assert_pdf_not_contains_text!(pdf, "\u{20B9}");
    assert_pdf_contains_text!(pdf, "Connect:");
    assert_pdf_contains_text!(pdf, "Instagram");
    assert_pdf_contains_text!(pdf, "YouTube");
    assert_pdf_contains_text!(pdf, "Maps");

    let mut fonts = font_names(&pdf.doc, 1);
    fonts.sort();
    assert_eq!(fonts, vec!["Helvetica", "Helvetica-Bold"]);
    assert_eq!(image_count(&pdf.doc, 1), 0);
    assert_eq!(link_uris(&pdf.doc, 1), social_urls());
    Ok(())
}

#[tokio::test]
async fn test_icons_replace_text_links() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let loader = AssetLoader::new(icons_only_source(), BasePath::none());
    let document = OrderDocument::new("Chandini Hirers", &Totals::default(), fixed_time());
    let pdf = GeneratedPdf::from_bytes(generate(&loader, &document).await?)?;

    assert!(!loader.did_succeed());
    assert_eq!(image_count(&pdf.doc, 1), 3);
    assert_eq!(link_uris(&pdf.doc, 1), social_urls());
    assert_pdf_contains_text!(pdf, "Connect:");
    assert_pdf_not_contains_text!(pdf, "Instagram");
    Ok(())
}

#[tokio::test]
async fn test_overflow_starts_second_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let catalog = chair_catalog(40);
    let mut cart = CartStore::open(InMemoryKeyValueStore::new());
    cart.sync_catalog(catalog.items());
    for item in catalog.items() {
        cart.increment(item);
    }
    let document = OrderDocument::new("Chandini Hirers", &cart.totals(), fixed_time());
    let pdf = GeneratedPdf::from_bytes(OrderRenderer::default().generate(&failing_loader(), &document).await?)?;

    assert_pdf_page_count!(pdf, 2);
    let first = pdf.page_text(1);
    let second = pdf.page_text(2);
    assert!(first.contains("Chair 32 ("));
    assert!(!first.contains("Chair 33 ("));
    assert!(second.contains("Chair 33 ("));

    for page in [&first, &second] {
        assert!(page.contains("Qty"));
        assert!(page.contains("Amount"));
        assert!(page.contains("chandini hirers"));
        assert!(page.contains("Connect:"));
    }
    assert!(second.contains("Rs 4,000"));

    for n in 1..=40 {
        let label = format!("Chair {:02} (", n);
        let seen = first.matches(&label).count() + second.matches(&label).count();
        assert_eq!(seen, 1, "{} rendered {} times", label, seen);
    }
    for page in 1..=2 {
        assert_eq!(link_uris(&pdf.doc, page), social_urls());
    }
    Ok(())
}

#[tokio::test]
async fn test_embedded_fonts_render_rupee_symbol() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let loader = AssetLoader::new(full_asset_source(), BasePath::none());
    assert!(loader.preload().await);
    assert!(loader.did_succeed());

    let catalog = two_item_catalog();
    let totals = Totals::from_lines(vec![
        CartLine::new(catalog.get("a").unwrap().clone(), 3),
        CartLine::new(catalog.get("b").unwrap().clone(), 400),
    ]);
    let document = OrderDocument::new("Chandini Hirers", &totals, fixed_time());
    let pdf = GeneratedPdf::from_bytes(generate(&loader, &document).await?)?;

    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Beta (\u{20B9}250)");
    assert_pdf_contains_text!(pdf, "\u{20B9}1,00,000");
    assert_pdf_contains_text!(pdf, "\u{20B9}1,00,300");
    assert_pdf_not_contains_text!(pdf, "Rs ");

    assert_eq!(font_subtypes(&pdf.doc, 1), vec!["Type0", "Type0"]);
    assert_eq!(complete_type0_fonts(&pdf.doc, 1), 2);
    assert!(font_names(&pdf.doc, 1).iter().all(|name| name.starts_with("DejaVuSans")));
    assert_eq!(image_count(&pdf.doc, 1), 3);
    Ok(())
}

#[tokio::test]
async fn test_embedded_fonts_on_every_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let loader = AssetLoader::new(full_asset_source(), BasePath::none());
    let catalog = chair_catalog(40);
    let lines = catalog.items().iter().map(|item| CartLine::new(item.clone(), 1)).collect();
    let document = OrderDocument::new("Chandini Hirers", &Totals::from_lines(lines), fixed_time());
    let pdf = GeneratedPdf::from_bytes(generate(&loader, &document).await?)?;

    assert!(loader.did_succeed());
    assert_pdf_page_count!(pdf, 2);
    assert!(pdf.page_text(2).contains("\u{20B9}4,000"));
    for page in 1..=2 {
        assert_eq!(complete_type0_fonts(&pdf.doc, page), 2);
    }
    assert_pdf_not_contains_text!(pdf, "Rs ");
    Ok(())
}
