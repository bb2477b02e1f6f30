use hirer_traits::ResourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Font '{path}' is not a usable TrueType font: {message}")]
    Font { path: String, message: String },

    #[error("Image '{path}' could not be decoded: {message}")]
    Image { path: String, message: String },
}
