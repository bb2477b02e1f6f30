use crate::error::RenderError;
use crate::metrics;
use hirer_assets::{FontAssets, FontProgram};
use hirer_types::CurrencyStyle;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Weight {
    Regular,
    Bold,
}

impl Weight {
    /// Resource name of the face inside each page's font dictionary.
    pub(crate) fn resource_name(self) -> &'static str {
        match self {
            Weight::Regular => "F1",
            Weight::Bold => "F2",
        }
    }
}

/// A TrueType program embedded as a Type0 font with Identity-H encoding.
///
/// Text is written as big-endian glyph ids; the used glyphs are remembered so
/// the `W` widths array and the ToUnicode map cover exactly what was drawn.
#[derive(Debug)]
struct EmbeddedFont {
    program: FontProgram,
    units_per_em: f32,
    used: BTreeMap<u16, String>,
}

impl EmbeddedFont {
    fn new(program: FontProgram) -> Result<Self, RenderError> {
        let units_per_em = program
            .face()
            .map_err(|_| RenderError::Font(program.path.clone()))?
            .units_per_em() as f32;
        Ok(Self {
            program,
            units_per_em,
            used: BTreeMap::new(),
        })
    }

    fn face(&self) -> Result<ttf_parser::Face<'_>, RenderError> {
        self.program
            .face()
            .map_err(|_| RenderError::Font(self.program.path.clone()))
    }

    fn encode(&mut self, text: &str) -> Result<Vec<u8>, RenderError> {
        let face = self.face()?;
        let mut out = Vec::with_capacity(text.len() * 2);
        let mut used = Vec::new();
        for c in text.chars() {
            let gid = face.glyph_index(c).map(|g| g.0).unwrap_or(0);
            used.push((gid, c));
            out.extend_from_slice(&gid.to_be_bytes());
        }
        for (gid, c) in used {
            self.used.entry(gid).or_insert_with(|| c.to_string());
        }
        Ok(out)
    }

    fn text_width(&self, text: &str, size: f32) -> Result<f32, RenderError> {
        let face = self.face()?;
        let units: u32 = text
            .chars()
            .map(|c| {
                let gid = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                face.glyph_hor_advance(gid).unwrap_or(0) as u32
            })
            .sum();
        Ok(units as f32 * size / self.units_per_em)
    }

    fn scaled(&self, value: i16) -> i64 {
        (value as f32 * 1000.0 / self.units_per_em).round() as i64
    }

    fn base_font(&self, fallback: &str) -> String {
        self.program
            .postscript_name
            .as_deref()
            .unwrap_or(fallback)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }

    /// Writes FontFile2, FontDescriptor, CIDFontType2, ToUnicode and Type0
    /// objects and returns the id of the Type0 font.
    fn write(&self, doc: &mut Document, fallback_name: &str) -> Result<ObjectId, RenderError> {
        let face = self.face()?;
        let base_font = self.base_font(fallback_name);

        let data = self.program.data.to_vec();
        let font_file = Stream::new(dictionary! { "Length1" => data.len() as i64 }, data);
        let font_file_id = doc.add_object(font_file);

        let bbox = face.global_bounding_box();
        let ascent = self.scaled(face.ascender());
        let descent = self.scaled(face.descender());
        let cap_height = face
            .capital_height()
            .map(|h| self.scaled(h))
            .unwrap_or(ascent);
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(base_font.clone().into_bytes()),
            "Flags" => 32,
            "FontBBox" => vec![
                self.scaled(bbox.x_min).into(),
                self.scaled(bbox.y_min).into(),
                self.scaled(bbox.x_max).into(),
                self.scaled(bbox.y_max).into(),
            ],
            "ItalicAngle" => 0,
            "Ascent" => ascent,
            "Descent" => descent,
            "CapHeight" => cap_height,
            "StemV" => 80,
            "FontFile2" => font_file_id,
        });

        let mut widths = Vec::with_capacity(self.used.len() * 2);
        for gid in self.used.keys() {
            let advance = face
                .glyph_hor_advance(ttf_parser::GlyphId(*gid))
                .unwrap_or(0);
            widths.push(Object::Integer(*gid as i64));
            widths.push(Object::Array(vec![Object::Integer(
                (advance as f32 * 1000.0 / self.units_per_em).round() as i64,
            )]));
        }

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            Dictionary::new(),
            to_unicode_cmap(&self.used).into_bytes(),
        ));

        Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(base_font.into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        }))
    }
}

#[derive(Debug)]
enum Face {
    Standard,
    Embedded(Box<EmbeddedFont>),
}

/// The regular and bold faces of one document.
#[derive(Debug)]
pub(crate) struct DocumentFonts {
    regular: Face,
    bold: Face,
}

impl DocumentFonts {
    pub(crate) fn standard() -> Self {
        Self {
            regular: Face::Standard,
            bold: Face::Standard,
        }
    }

    /// Embeds both programs or neither.
    pub(crate) fn from_assets(assets: Option<&FontAssets>) -> Self {
        let Some(assets) = assets else {
            return Self::standard();
        };
        match (
            EmbeddedFont::new(assets.regular.clone()),
            EmbeddedFont::new(assets.bold.clone()),
        ) {
            (Ok(regular), Ok(bold)) => Self {
                regular: Face::Embedded(Box::new(regular)),
                bold: Face::Embedded(Box::new(bold)),
            },
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("{}; using the standard fonts", e);
                Self::standard()
            }
        }
    }

    pub(crate) fn is_embedded(&self) -> bool {
        matches!(self.regular, Face::Embedded(_))
    }

    pub(crate) fn currency_style(&self) -> CurrencyStyle {
        if self.is_embedded() {
            CurrencyStyle::Symbol
        } else {
            CurrencyStyle::Code
        }
    }

    fn face_mut(&mut self, weight: Weight) -> &mut Face {
        match weight {
            Weight::Regular => &mut self.regular,
            Weight::Bold => &mut self.bold,
        }
    }

    fn face(&self, weight: Weight) -> &Face {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }

    /// Encodes `text` as a `Tj` operand for the given face.
    pub(crate) fn encode(&mut self, weight: Weight, text: &str) -> Result<Object, RenderError> {
        match self.face_mut(weight) {
            Face::Standard => Ok(Object::String(
                metrics::to_win_ansi(text),
                StringFormat::Literal,
            )),
            Face::Embedded(font) => Ok(Object::String(
                font.encode(text)?,
                StringFormat::Hexadecimal,
            )),
        }
    }

    pub(crate) fn text_width(&self, weight: Weight, text: &str, size: f32) -> Result<f32, RenderError> {
        match self.face(weight) {
            Face::Standard => Ok(metrics::standard_text_width(
                &metrics::to_win_ansi(text),
                weight == Weight::Bold,
                size,
            )),
            Face::Embedded(font) => font.text_width(text, size),
        }
    }

    /// Writes the font objects and returns the `/Font` resource dictionary.
    pub(crate) fn write(&self, doc: &mut Document) -> Result<Dictionary, RenderError> {
        let mut fonts = Dictionary::new();
        for (weight, standard_name, fallback_name) in [
            (Weight::Regular, "Helvetica", "DejaVuSans"),
            (Weight::Bold, "Helvetica-Bold", "DejaVuSans-Bold"),
        ] {
            let id = match self.face(weight) {
                Face::Standard => doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => standard_name,
                    "Encoding" => "WinAnsiEncoding",
                }),
                Face::Embedded(font) => font.write(doc, fallback_name)?,
            };
            fonts.set(weight.resource_name(), id);
        }
        Ok(fonts)
    }
}

/// Builds a ToUnicode CMap mapping glyph ids back to their characters.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, String>) -> String {
    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n");
    out.push_str("12 dict begin\n");
    out.push_str("begincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n");
    out.push_str("/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    let entries: Vec<(&u16, &String)> = glyphs.iter().collect();
    // bfchar blocks are limited to 100 entries each
    for chunk in entries.chunks(100) {
        out.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, text) in chunk {
            let mut utf16 = String::new();
            for unit in text.encode_utf16() {
                utf16.push_str(&format!("{:04X}", unit));
            }
            out.push_str(&format!("<{:04X}> <{}>\n", gid, utf16));
        }
        out.push_str("endbfchar\n");
    }

    out.push_str("endcmap\n");
    out.push_str("CMapName currentdict /CMap defineresource pop\n");
    out.push_str("end\nend\n");
    out
}
