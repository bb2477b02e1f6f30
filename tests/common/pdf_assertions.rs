use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

fn resolve<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        other => other.as_dict().ok(),
    }
}

fn page_dict(doc: &LopdfDocument, page: u32) -> Option<&Dictionary> {
    let id = doc.get_pages().get(&page).copied()?;
    doc.get_dictionary(id).ok()
}

fn page_resources(doc: &LopdfDocument, page: u32) -> Option<&Dictionary> {
    resolve(doc, page_dict(doc, page)?.get(b"Resources").ok()?)
}

/// URIs of the link annotations on a page, in annotation order
pub fn link_uris(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let Some(annots) = page_dict(doc, page)
        .and_then(|p| p.get(b"Annots").ok())
        .and_then(|a| a.as_array().ok())
    else {
        return Vec::new();
    };
    annots
        .iter()
        .filter_map(|annot| resolve(doc, annot))
        .filter_map(|annot| annot.get(b"A").ok().and_then(|a| resolve(doc, a)))
        .filter_map(|action| action.get(b"URI").ok()?.as_str().ok())
        .map(|uri| String::from_utf8_lossy(uri).to_string())
        .collect()
}

fn page_fonts(doc: &LopdfDocument, page: u32) -> Vec<&Dictionary> {
    let Some(fonts) = page_resources(doc, page)
        .and_then(|r| r.get(b"Font").ok())
        .and_then(|f| resolve(doc, f))
    else {
        return Vec::new();
    };
    fonts.iter().filter_map(|(_, font)| resolve(doc, font)).collect()
}

/// Base font names referenced by a page's font resources
pub fn font_names(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_fonts(doc, page)
        .into_iter()
        .filter_map(|font| font.get(b"BaseFont").ok()?.as_name().ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// Subtypes of a page's font resources (`Type1`, `Type0`, ...)
pub fn font_subtypes(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_fonts(doc, page)
        .into_iter()
        .filter_map(|font| font.get(b"Subtype").ok()?.as_name().ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// Type0 fonts on a page with a ToUnicode map and a descendant carrying a non-empty W array
pub fn complete_type0_fonts(doc: &LopdfDocument, page: u32) -> usize {
    page_fonts(doc, page)
        .into_iter()
        .filter(|font| font.get(b"Subtype").and_then(Object::as_name).is_ok_and(|n| n == b"Type0"))
        .filter(|font| font.get(b"ToUnicode").is_ok())
        .filter_map(|font| {
            let descendants = font.get(b"DescendantFonts").ok()?.as_array().ok()?;
            resolve(doc, descendants.first()?)
        })
        .filter(|cid| cid.get(b"W").and_then(Object::as_array).is_ok_and(|w| !w.is_empty()))
        .count()
}

/// Number of image XObjects available to a page
pub fn image_count(doc: &LopdfDocument, page: u32) -> usize {
    page_resources(doc, page)
        .and_then(|r| r.get(b"XObject").ok())
        .and_then(|x| resolve(doc, x))
        .map(|x| x.len())
        .unwrap_or(0)
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}
