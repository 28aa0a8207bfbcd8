//! Image export of the drawn signature
//!
//! The surface is encoded as PNG (straight alpha) and handed out as a
//! `data:` URL. An empty string stands for "no signature drawn".

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::error::SignatureError;
use crate::surface::CpuSurface;

/// Export value for an empty drawing
pub const EMPTY_SIGNATURE: &str = "";

/// Prefix of every exported data URL
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode the surface as PNG bytes
pub fn encode_png(surface: &CpuSurface) -> Result<Vec<u8>, SignatureError> {
    let mut bytes = Vec::new();
    surface
        .to_rgba8()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode the surface as a `data:image/png;base64,...` URL
pub fn to_data_url(surface: &CpuSurface) -> Result<String, SignatureError> {
    let png = encode_png(surface)?;
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(&png, &mut url);
    Ok(url)
}

/// Decode an exported data URL back into pixels (preview/download side)
pub fn decode_data_url(url: &str) -> Result<RgbaImage, SignatureError> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| SignatureError::InvalidDataUrl("missing PNG data URL prefix".into()))?;
    let png = STANDARD
        .decode(payload)
        .map_err(|e| SignatureError::InvalidDataUrl(e.to_string()))?;
    let image = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
    Ok(image.to_rgba8())
}
