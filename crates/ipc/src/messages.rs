//! Bridge messages exchanged between the hosting page and the pad.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::input::{ContainerSize, PointerEvent};

/// Messages from the hosting page to the pad.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostToPad {
    /// Pointer/touch input
    Pointer(PointerEvent),

    /// The container hosting the surface changed size
    Resize(ContainerSize),

    /// An animation frame fired
    AnimationFrame,

    /// Clear button pressed
    Clear,

    /// Enter or leave the enlarged drawing presentation
    SetImmersive { enabled: bool },

    /// Stroke color picker changed
    SetLineColor { color: String },

    /// Thickness slider changed
    SetLineWidth { width: f32 },
}

impl HostToPad {
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        if json.trim().is_empty() {
            return Err(IpcError::EmptyMessage);
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Messages from the pad to the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PadToHost {
    /// The drawing changed. `data` is a PNG data URL, or empty when cleared.
    SignatureChanged { data: String },
}

impl PadToHost {
    pub fn signature_changed(data: impl Into<String>) -> Self {
        Self::SignatureChanged { data: data.into() }
    }

    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
