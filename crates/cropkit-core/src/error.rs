//! Errors surfaced by the crop engine.
//!
//! Every variant is recoverable: the engine keeps its state (or stays
//! uninitialized) and the caller may retry.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors returned by [`CropEngine`](crate::engine::CropEngine) operations.
#[derive(Debug, Error)]
pub enum CropError {
    /// The image handed to `load` is zero-sized or malformed.
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] DecodeError),

    /// An operation needing a loaded image ran without one.
    #[error("No image loaded")]
    NoImage,

    /// Export was requested for a region with zero width or height.
    #[error("Crop region is empty")]
    EmptyRegion,

    /// The crop could not be encoded; the session is left open.
    #[error("Failed to encode crop: {0}")]
    EncodeFailure(#[from] EncodeError),

    /// The requested shape is not available under the active aspect lock.
    #[error("Circle crop requires a 1:1 or free aspect ratio")]
    UnsupportedShape,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_converts() {
        let err: CropError = DecodeError::InvalidDimensions {
            width: 0,
            height: 10,
        }
        .into();
        assert!(matches!(err, CropError::InvalidImage(_)));
        assert!(err.to_string().starts_with("Invalid image"));
    }

    #[test]
    fn test_encode_error_converts() {
        let err: CropError = EncodeError::InvalidDimensions {
            width: 0,
            height: 0,
        }
        .into();
        assert!(matches!(err, CropError::EncodeFailure(_)));
    }
}
