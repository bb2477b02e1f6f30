use crate::error::AssetError;
use hirer_traits::SharedResourceData;
use std::collections::HashMap;

/// A validated TrueType program, kept as raw bytes for embedding.
#[derive(Debug, Clone)]
pub struct FontProgram {
    pub path: String,
    pub postscript_name: Option<String>,
    pub data: SharedResourceData,
}

impl FontProgram {
    pub(crate) fn parse(path: &str, data: SharedResourceData) -> Result<Self, AssetError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| AssetError::Font {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let postscript_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME && n.is_unicode())
            .and_then(|n| n.to_string());
        Ok(Self {
            path: path.to_string(),
            postscript_name,
            data,
        })
    }

    /// Re-parses the face; cheap, as ttf-parser borrows the bytes.
    pub fn face(&self) -> Result<ttf_parser::Face<'_>, ttf_parser::FaceParsingError> {
        ttf_parser::Face::parse(&self.data, 0)
    }
}

#[derive(Debug, Clone)]
pub struct FontAssets {
    pub regular: FontProgram,
    pub bold: FontProgram,
}

/// A raster image split into 8-bit RGB samples and an optional alpha plane.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    pub(crate) fn decode(path: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| AssetError::Image {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let (width, height) = (img.width(), img.height());

        if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            let mut rgb = Vec::with_capacity((width * height * 3) as usize);
            let mut alpha = Vec::with_capacity((width * height) as usize);
            for px in rgba.pixels() {
                rgb.extend_from_slice(&px.0[..3]);
                alpha.push(px.0[3]);
            }
            Ok(Self {
                width,
                height,
                rgb,
                alpha: Some(alpha),
            })
        } else {
            Ok(Self {
                width,
                height,
                rgb: img.to_rgb8().into_raw(),
                alpha: None,
            })
        }
    }
}

/// Decoded icons keyed by icon name (`instagram`, `youtube`, `map-pin`).
#[derive(Debug, Clone, Default)]
pub struct IconAssets {
    icons: HashMap<String, DecodedImage>,
}

impl IconAssets {
    pub fn new(icons: HashMap<String, DecodedImage>) -> Self {
        Self { icons }
    }

    pub fn get(&self, key: &str) -> Option<&DecodedImage> {
        self.icons.get(key)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: image::DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_rgba_splits_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, Rgba([40, 50, 60, 0]));
        let decoded = DecodedImage::decode("icons/a.png", &encode(img.into())).unwrap();

        assert_eq!((decoded.width, decoded.height), (2, 1));
        assert_eq!(decoded.rgb, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(decoded.alpha, Some(vec![255, 0]));
    }

    #[test]
    fn test_decode_rgb_has_no_alpha() {
        let img = RgbImage::from_pixel(1, 1, Rgb([1, 2, 3]));
        let decoded = DecodedImage::decode("icons/b.png", &encode(img.into())).unwrap();
        assert_eq!(decoded.rgb, vec![1, 2, 3]);
        assert!(decoded.alpha.is_none());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            DecodedImage::decode("icons/c.png", b"not a png"),
            Err(AssetError::Image { .. })
        ));
        assert!(matches!(
            FontProgram::parse("fonts/x.ttf", std::sync::Arc::new(b"nope".to_vec())),
            Err(AssetError::Font { .. })
        ));
    }
}
