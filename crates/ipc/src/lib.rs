//! Bridge protocol for the signature pad
//!
//! Defines the pointer/container events the pad consumes and the messages
//! exchanged with a hosting page over a JSON bridge.

pub mod error;
pub mod input;
pub mod messages;

pub use error::IpcError;
pub use input::{ContainerSize, PointerDevice, PointerEvent, PointerPhase};
pub use messages::{HostToPad, PadToHost};
