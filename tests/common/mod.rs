pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a single page, one line per shown string
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}
