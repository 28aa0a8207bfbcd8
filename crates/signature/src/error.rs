use thiserror::Error;

use crate::types::StrokeId;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Drawing surface is not available yet")]
    SurfaceUnavailable,

    #[error("Failed to encode signature image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid signature data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Stroke {got:?} recorded after stroke {last:?}")]
    StrokeOrder { last: StrokeId, got: StrokeId },
}
