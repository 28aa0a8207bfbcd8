//! Signature pad - freehand signature capture
//!
//! This crate provides the real-time input pipeline of the pad:
//! - [`sampler`] - Pointer/touch events to pressure-tagged samples
//! - [`smoothing`] - Path pruning and Bézier curve fitting
//! - [`render`] - Variable-width stroke rendering
//! - [`surface`] - CPU RGBA surface the strokes are drawn onto
//! - [`buffer`] - Accumulated point buffer
//! - [`frame`] - Coalesced animation-frame work
//! - [`export`] - PNG data URL export
//! - [`pad`] - The widget core tying everything together

pub mod buffer;
pub mod constants;
pub mod error;
pub mod export;
pub mod frame;
pub mod pad;
pub mod render;
pub mod sampler;
pub mod smoothing;
pub mod surface;
pub mod types;

pub use buffer::PointBuffer;
pub use constants::*;
pub use error::SignatureError;
pub use export::{decode_data_url, to_data_url, EMPTY_SIGNATURE, PNG_DATA_URL_PREFIX};
pub use frame::{FrameHandle, FrameSlot};
pub use pad::{notify_host, ChangeCallback, SignaturePad, SurfaceState};
pub use render::{Segment, StrokePath, StrokeRenderer};
pub use sampler::{InputSampler, SamplerOutput};
pub use smoothing::{smooth, LiveSmoother};
pub use surface::CpuSurface;
pub use types::{Sample, StrokeId};
