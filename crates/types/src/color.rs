/// An opaque RGB color as used by the PDF renderer's fill and stroke operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Components scaled to the 0.0..=1.0 range PDF color operators expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_to_unit() {
        let [r, g, b] = Color::gray(255).to_unit();
        assert_eq!((r, g, b), (1.0, 1.0, 1.0));
        assert_eq!(Color::gray(0).to_unit(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rgb_to_unit() {
        let [r, _, b] = Color::rgb(255, 90, 0).to_unit();
        assert_eq!((r, b), (1.0, 0.0));
    }
}
