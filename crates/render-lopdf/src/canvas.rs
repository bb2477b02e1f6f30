// Page drawing context. Callers work in top-left-origin points; the canvas
// flips to PDF user space as it emits operators.

use crate::error::RenderError;
use hirer_types::{Color, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, dictionary};

#[derive(Debug, Clone, PartialEq)]
struct TextState {
    font: String,
    size: f32,
}

/// A URI link annotation waiting to be written with its page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingLink {
    pub rect: Rect,
    pub url: String,
}

#[derive(Debug)]
pub(crate) struct PageCanvas {
    page_height: f32,
    operations: Vec<Operation>,
    fill_color: Option<Color>,
    text_state: Option<TextState>,
    links: Vec<PendingLink>,
}

impl PageCanvas {
    pub(crate) fn new(page_height: f32) -> Self {
        Self {
            page_height,
            operations: Vec::new(),
            fill_color: None,
            text_state: None,
            links: Vec::new(),
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.fill_color != Some(color) {
            let [r, g, b] = color.to_unit();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, font: &str, size: f32) {
        let wanted = TextState {
            font: font.to_string(),
            size,
        };
        if self.text_state.as_ref() != Some(&wanted) {
            self.push(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), size.into()],
            );
            self.text_state = Some(wanted);
        }
    }

    pub(crate) fn save_state(&mut self) {
        self.push("q", vec![]);
    }

    /// Restores the graphics state; cached color and font are forgotten.
    pub(crate) fn restore_state(&mut self) {
        self.push("Q", vec![]);
        self.fill_color = None;
        self.text_state = None;
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let [llx, lly, _, _] = rect.to_pdf_box(self.page_height);
        self.push(
            "re",
            vec![llx.into(), lly.into(), rect.width.into(), rect.height.into()],
        );
        self.push("f", vec![]);
    }

    pub(crate) fn stroke_line(&mut self, x1: f32, x2: f32, y: f32, color: Color, width: f32) {
        let [r, g, b] = color.to_unit();
        let pdf_y = self.page_height - y;
        self.push("w", vec![width.into()]);
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        self.push("m", vec![x1.into(), pdf_y.into()]);
        self.push("l", vec![x2.into(), pdf_y.into()]);
        self.push("S", vec![]);
    }

    /// Shows an already-encoded string with its baseline starting at `(x, y)`.
    pub(crate) fn text(&mut self, font: &str, size: f32, color: Color, x: f32, y: f32, encoded: Object) {
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.set_fill_color(color);
        self.push("Td", vec![x.into(), (self.page_height - y).into()]);
        self.push("Tj", vec![encoded]);
        self.push("ET", vec![]);
    }

    /// Like [`PageCanvas::text`], rotated counter-clockwise by `degrees` about the start point.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn rotated_text(
        &mut self,
        font: &str,
        size: f32,
        color: Color,
        x: f32,
        y: f32,
        degrees: f32,
        encoded: Object,
    ) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.push("BT", vec![]);
        self.set_font(font, size);
        self.set_fill_color(color);
        self.push(
            "Tm",
            vec![
                cos.into(),
                sin.into(),
                (-sin).into(),
                cos.into(),
                x.into(),
                (self.page_height - y).into(),
            ],
        );
        self.push("Tj", vec![encoded]);
        self.push("ET", vec![]);
    }

    /// Paints the image XObject `name` scaled into `rect`.
    pub(crate) fn image(&mut self, name: &str, rect: Rect) {
        let [llx, lly, _, _] = rect.to_pdf_box(self.page_height);
        self.save_state();
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                llx.into(),
                lly.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.restore_state();
    }

    pub(crate) fn link(&mut self, rect: Rect, url: &str) {
        self.links.push(PendingLink {
            rect,
            url: url.to_string(),
        });
    }

    #[cfg(test)]
    pub(crate) fn links(&self) -> &[PendingLink] {
        &self.links
    }

    pub(crate) fn encode_content(&self) -> Result<Vec<u8>, RenderError> {
        let content = Content {
            operations: self.operations.clone(),
        };
        Ok(content.encode()?)
    }

    /// Link annotation dictionaries for this page.
    pub(crate) fn annotations(&self) -> Vec<Object> {
        self.links
            .iter()
            .map(|link| {
                let rect: Vec<Object> = link
                    .rect
                    .to_pdf_box(self.page_height)
                    .iter()
                    .map(|v| (*v).into())
                    .collect();
                dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => rect,
                    "Border" => vec![0.into(), 0.into(), 0.into()],
                    "A" => dictionary! {
                        "Type" => "Action",
                        "S" => "URI",
                        "URI" => Object::string_literal(link.url.as_str()),
                    },
                }
                .into()
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn operators(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.operator.as_str()).collect()
    }
}
