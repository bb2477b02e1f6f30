use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF assembly error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Font '{0}' could not be parsed for embedding")]
    Font(String),

    #[error("Rendering error: {0}")]
    Other(String),
}
