/// A rectangle in top-left-origin page coordinates (points).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts to a PDF `[llx lly urx ury]` rectangle on a page of the given height.
    pub fn to_pdf_box(&self, page_height: f32) -> [f32; 4] {
        [
            self.x,
            page_height - (self.y + self.height),
            self.x + self.width,
            page_height - self.y,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// ISO A4 portrait in points.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
        }
    }
}
