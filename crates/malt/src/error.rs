use crate::binary::{DecodeError, EncodeError};
use crate::compression::CompressionError;

/// Any failure on the crush/load path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Compression(#[from] CompressionError),
    #[error("recipe link is not URL-safe base64: {0}")]
    InvalidText(#[from] base64::DecodeError),
    #[error("recipe JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// `true` when the failure comes from the encoded string rather than the
    /// recipe, i.e. the link is broken or from an incompatible build.
    pub fn is_malformed(&self) -> bool {
        match self {
            Error::Decode(_) | Error::InvalidText(_) => true,
            Error::Compression(err) => !matches!(err, CompressionError::Deflate(_)),
            Error::Encode(_) | Error::Json(_) => false,
        }
    }
}
