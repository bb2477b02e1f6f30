//! PDF order summaries rendered with lopdf.
//!
//! The renderer lays out a fixed A4 order sheet: a diagonal watermark, the shop
//! title and generation time, a shaded table header, one row per cart line with
//! automatic page breaks, a totals block and a social-links footer on every page.
//!
//! When the document fonts are available they are embedded as Type0 fonts and
//! amounts use the `₹` sign. Otherwise the standard Helvetica faces are used and
//! amounts fall back to `Rs`.

mod canvas;
mod document;
mod error;
mod fonts;
mod metrics;
mod renderer;

pub use document::{DocumentOptions, OrderDocument};
pub use error::RenderError;
pub use renderer::{OrderRenderer, generate};
