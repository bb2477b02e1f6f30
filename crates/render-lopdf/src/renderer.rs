use crate::canvas::PageCanvas;
use crate::document::{DocumentOptions, OrderDocument};
use crate::error::RenderError;
use crate::fonts::{DocumentFonts, Weight};
use hirer_assets::{AssetLoader, AssetSnapshot, DecodedImage, IconAssets};
use hirer_types::{Color, CurrencyStyle, Rect, format_amount};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::sync::Arc;

const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 18.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 10.0;
/// Rows stop this far above the bottom margin; the footer lives below.
const FOOTER_RESERVE: f32 = 100.0;

const WATERMARK_ANGLE: f32 = 45.0;
const WATERMARK_STEP_X: f32 = 120.0;
const WATERMARK_STEP_Y: f32 = 80.0;
const WATERMARK_SIZE: f32 = 9.0;

const ICON_SIZE: f32 = 18.0;
const ICON_GAP: f32 = 18.0;

const WATERMARK_GRAY: Color = Color::gray(200);
const HEADER_FILL: Color = Color::gray(240);
const RULE_GRAY: Color = Color::gray(200);
const LINK_BLUE: Color = Color::rgb(30, 90, 180);

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Renders order documents with a fixed set of shop options.
#[derive(Debug, Clone, Default)]
pub struct OrderRenderer {
    options: DocumentOptions,
}

impl OrderRenderer {
    pub fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Waits for the loader's assets, whatever their outcome, then renders.
    pub async fn generate(&self, loader: &AssetLoader, document: &OrderDocument) -> Result<Vec<u8>, RenderError> {
        let assets = loader.snapshot().await;
        self.render(document, &assets)
    }

    /// Renders with whatever assets are given; missing assets select the fallbacks.
    pub fn render(&self, document: &OrderDocument, assets: &AssetSnapshot) -> Result<Vec<u8>, RenderError> {
        let mut session = RenderSession::new(&self.options, document, assets);
        session.layout()?;
        let bytes = session.assemble()?;
        log::info!(
            "Rendered order sheet: {} lines, {} pages, {} bytes",
            document.lines.len(),
            session.pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Renders `document` with the default shop options.
pub async fn generate(loader: &AssetLoader, document: &OrderDocument) -> Result<Vec<u8>, RenderError> {
    OrderRenderer::default().generate(loader, document).await
}

struct RenderSession<'a> {
    options: &'a DocumentOptions,
    document: &'a OrderDocument,
    icons: Option<Arc<IconAssets>>,
    fonts: DocumentFonts,
    currency: CurrencyStyle,
    pages: Vec<PageCanvas>,
    /// Icon key to XObject resource name, in first-use order.
    image_names: HashMap<String, String>,
    images: Vec<(String, DecodedImage)>,
}

impl<'a> RenderSession<'a> {
    fn new(options: &'a DocumentOptions, document: &'a OrderDocument, assets: &AssetSnapshot) -> Self {
        let fonts = DocumentFonts::from_assets(assets.fonts.as_deref());
        let currency = fonts.currency_style();
        Self {
            options,
            document,
            icons: assets.icons.clone(),
            fonts,
            currency,
            pages: Vec::new(),
            image_names: HashMap::new(),
            images: Vec::new(),
        }
    }

    fn width(&self) -> f32 {
        self.options.page_size.width
    }

    fn height(&self) -> f32 {
        self.options.page_size.height
    }

    fn page(&mut self) -> Result<&mut PageCanvas, RenderError> {
        self.pages
            .last_mut()
            .ok_or_else(|| RenderError::Other("No page has been started".into()))
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        weight: Weight,
        size: f32,
        color: Color,
        x: f32,
        y: f32,
        text: &str,
        align: Align,
    ) -> Result<(), RenderError> {
        let x = match align {
            Align::Left => x,
            Align::Right => x - self.fonts.text_width(weight, text, size)?,
        };
        let encoded = self.fonts.encode(weight, text)?;
        self.page()?
            .text(weight.resource_name(), size, color, x, y, encoded);
        Ok(())
    }

    fn layout(&mut self) -> Result<(), RenderError> {
        let width = self.width();
        let item_x = MARGIN + 10.0;
        let qty_x = width - 180.0;
        let amount_right = width - MARGIN;
        let break_at = self.height() - MARGIN - FOOTER_RESERVE;

        let mut y = self.start_page()?;
        let document = self.document;
        for line in &document.lines {
            if y > break_at {
                self.draw_footer()?;
                y = self.start_page()?;
            }
            let label = format!(
                "{} ({})",
                line.item.name,
                format_amount(line.item.price, self.currency)
            );
            let amount = format_amount(line.line_total, self.currency);
            self.text(Weight::Regular, BODY_SIZE, Color::BLACK, item_x, y, &label, Align::Left)?;
            self.text(Weight::Regular, BODY_SIZE, Color::BLACK, qty_x, y, &line.qty.to_string(), Align::Left)?;
            self.text(Weight::Regular, BODY_SIZE, Color::BLACK, amount_right, y, &amount, Align::Right)?;
            y += ROW_HEIGHT;
        }

        y += 10.0;
        self.page()?.stroke_line(MARGIN, width - MARGIN, y, RULE_GRAY, 1.0);
        y += 24.0;
        let label_x = width - 250.0;
        let total_items = document.total_items.to_string();
        let total_amount = format_amount(document.total_amount, self.currency);
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, label_x, y, "Total Items:", Align::Left)?;
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, amount_right, y, &total_items, Align::Right)?;
        y += ROW_HEIGHT;
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, label_x, y, "Total Amount:", Align::Left)?;
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, amount_right, y, &total_amount, Align::Right)?;

        self.draw_footer()
    }

    /// Opens a page, paints the watermark and header block, and returns the
    /// baseline of the first row.
    fn start_page(&mut self) -> Result<f32, RenderError> {
        self.pages.push(PageCanvas::new(self.height()));
        self.draw_watermark()?;

        let width = self.width();
        let title = self.document.title.clone();
        let generated = format!(
            "Generated: {}",
            self.document.generated_at.format("%Y-%m-%d %H:%M")
        );
        self.text(Weight::Bold, TITLE_SIZE, Color::BLACK, MARGIN, MARGIN + 10.0, &title, Align::Left)?;
        self.text(Weight::Regular, BODY_SIZE, Color::BLACK, MARGIN, MARGIN + 30.0, &generated, Align::Left)?;

        let header_y = MARGIN + 70.0;
        self.page()?.fill_rect(
            Rect::new(MARGIN, header_y - 16.0, width - MARGIN * 2.0, 24.0),
            HEADER_FILL,
        );
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, MARGIN + 10.0, header_y, "Item", Align::Left)?;
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, width - 180.0, header_y, "Qty", Align::Left)?;
        self.text(Weight::Bold, BODY_SIZE, Color::BLACK, width - MARGIN, header_y, "Amount", Align::Right)?;

        Ok(header_y + ROW_HEIGHT)
    }

    /// Two staggered grids of rotated text covering the whole page.
    fn draw_watermark(&mut self) -> Result<(), RenderError> {
        let (width, height) = (self.width(), self.height());
        let text = self.options.watermark.clone();
        if text.is_empty() {
            return Ok(());
        }
        let font = Weight::Regular.resource_name();

        self.page()?.save_state();
        for (offset_x, offset_y) in [(0.0, 0.0), (WATERMARK_STEP_X / 2.0, WATERMARK_STEP_Y / 2.0)] {
            let mut y = -WATERMARK_STEP_Y + offset_y;
            while y < height + WATERMARK_STEP_Y {
                let mut x = -WATERMARK_STEP_X + offset_x;
                while x < width + WATERMARK_STEP_X {
                    let encoded = self.fonts.encode(Weight::Regular, &text)?;
                    self.page()?.rotated_text(
                        font,
                        WATERMARK_SIZE,
                        WATERMARK_GRAY,
                        x,
                        y,
                        WATERMARK_ANGLE,
                        encoded,
                    );
                    x += WATERMARK_STEP_X;
                }
                y += WATERMARK_STEP_Y;
            }
        }
        self.page()?.restore_state();
        Ok(())
    }

    fn draw_footer(&mut self) -> Result<(), RenderError> {
        let baseline = self.height() - MARGIN;
        let label = "Connect:";
        self.text(Weight::Bold, FOOTER_SIZE, Color::BLACK, MARGIN, baseline, label, Align::Left)?;
        let mut x = MARGIN + self.fonts.text_width(Weight::Bold, label, FOOTER_SIZE)? + 16.0;

        let socials = self.options.socials.clone();
        for social in &socials {
            if let Some(name) = self.image_name(&social.icon) {
                let rect = Rect::new(x, baseline - ICON_SIZE + 2.0, ICON_SIZE, ICON_SIZE);
                let page = self.page()?;
                page.image(&name, rect);
                page.link(rect, &social.url);
                x += ICON_SIZE + ICON_GAP;
            } else {
                let w = self.fonts.text_width(Weight::Bold, &social.label, FOOTER_SIZE)?;
                self.text(Weight::Bold, FOOTER_SIZE, LINK_BLUE, x, baseline, &social.label, Align::Left)?;
                self.page()?
                    .link(Rect::new(x, baseline - 8.0, w, 12.0), &social.url);
                x += w + ICON_GAP;
            }
        }
        Ok(())
    }

    /// XObject name for an icon, registering it on first use. `None` if the icon is unavailable.
    fn image_name(&mut self, key: &str) -> Option<String> {
        if let Some(name) = self.image_names.get(key) {
            return Some(name.clone());
        }
        let image = self.icons.as_ref()?.get(key)?.clone();
        let name = format!("Im{}", self.images.len() + 1);
        self.image_names.insert(key.to_string(), name.clone());
        self.images.push((name.clone(), image));
        Some(name)
    }

    fn assemble(&self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let fonts = self.fonts.write(&mut doc)?;
        let mut xobjects = Dictionary::new();
        for (name, image) in &self.images {
            let id = write_image(&mut doc, image);
            xobjects.set(name.as_str(), id);
        }
        let mut resources = dictionary! { "Font" => fonts };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        let resources_id = doc.add_object(resources);

        let (width, height) = (self.width(), self.height());
        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), page.encode_content()?));
            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            let annots: Vec<Object> = page
                .annotations()
                .into_iter()
                .map(|annot| Object::Reference(doc.add_object(annot)))
                .collect();
            if !annots.is_empty() {
                page_dict.set("Annots", annots);
            }
            kids.push(Object::Reference(doc.add_object(page_dict)));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => page_count }.into(),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(&self.document.title),
            "Producer" => text_string(&self.options.producer),
            "CreationDate" => Object::string_literal(
                self.document.generated_at.format("D:%Y%m%d%H%M%SZ").to_string()
            ),
        });
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// 8-bit RGB image XObject, with the alpha plane as a DeviceGray soft mask.
fn write_image(doc: &mut Document, image: &DecodedImage) -> ObjectId {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if let Some(alpha) = &image.alpha {
        let smask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        ));
        dict.set("SMask", smask_id);
    }
    doc.add_object(Stream::new(dict, image.rgb.clone()))
}

/// A PDF text string: literal for ASCII, UTF-16BE with a byte order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::string_literal(text)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hirer_types::{CartLine, Item, SocialLink, Totals};
    use std::error::Error;

    type TestResult = Result<(), Box<dyn Error>>;

    fn document(lines: usize) -> OrderDocument {
        let item = Arc::new(Item::new("cs2", "Plastic Chair", "/images/placeholder.png", 80.0, "Chairs & Sofas"));
        let totals = Totals::from_lines((0..lines).map(|_| CartLine::new(item.clone(), 2)).collect());
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        OrderDocument::new("Chandini Hirers", &totals, at)
    }

    fn session_pages(doc: &OrderDocument) -> Result<Vec<PageCanvas>, RenderError> {
        let options = DocumentOptions::default();
        let assets = AssetSnapshot::fallback();
        let mut session = RenderSession::new(&options, doc, &assets);
        session.layout()?;
        Ok(session.pages)
    }

    #[test]
    fn test_first_page_holds_32_rows() -> TestResult {
        assert_eq!(session_pages(&document(32))?.len(), 1);
        assert_eq!(session_pages(&document(33))?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_footer_links_on_every_page() -> TestResult {
        let pages = session_pages(&document(40))?;
        assert_eq!(pages.len(), 2);
        for page in &pages {
            let urls: Vec<&str> = page.links().iter().map(|l| l.url.as_str()).collect();
            let expected: Vec<String> = SocialLink::defaults().into_iter().map(|s| s.url).collect();
            assert_eq!(urls, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
        Ok(())
    }

    #[test]
    fn test_watermark_tiles_two_grids() -> TestResult {
        let pages = session_pages(&document(0))?;
        let rotated = pages[0].operators().iter().filter(|op| **op == "Tm").count();
        // 13 rows x 7 columns per grid on A4
        assert_eq!(rotated, 182);
        Ok(())
    }

    #[test]
    fn test_render_sets_info_dictionary() -> TestResult {
        let bytes = OrderRenderer::default().render(&document(1), &AssetSnapshot::fallback())?;
        let pdf = Document::load_mem(&bytes)?;
        let info_id = pdf.trailer.get(b"Info")?.as_reference()?;
        let info = pdf.get_dictionary(info_id)?;
        assert_eq!(info.get(b"Title")?.as_str()?, b"Chandini Hirers");
        assert_eq!(info.get(b"CreationDate")?.as_str()?, b"D:20260314092653Z");
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_settles_loader_and_falls_back() -> TestResult {
        let source = Arc::new(hirer_traits::InMemoryAssetSource::new());
        let loader = AssetLoader::new(source, hirer_assets::BasePath::none());
        assert!(!loader.is_ready());

        let bytes = generate(&loader, &document(3)).await?;
        assert!(loader.is_ready() && !loader.did_succeed());
        assert!(bytes.starts_with(b"%PDF-1.7"));
        Ok(())
    }

    #[test]
    fn test_text_string_uses_utf16_for_non_ascii() {
        match text_string("\u{20B9}1") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(bytes, vec![0xFE, 0xFF, 0x20, 0xB9, 0x00, 0x31]);
            }
            other => panic!("unexpected object {:?}", other),
        }
    }
}
