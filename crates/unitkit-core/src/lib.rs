//! # unitkit-core
//!
//! Platform-independent half of unitkit: the [`AudioUnitHandle`] wrapper,
//! the [`UnitBackend`] trait it forwards to, and the framework-shaped types
//! both sides share.
//!
//! The wrapper adds no behavior of its own beyond caching the factory preset
//! list. Every other call goes straight to the backend and every failure is
//! the backend's own status, surfaced unchanged.
//!
//! ## Main Types
//!
//! - [`AudioUnitHandle`] - The wrapper
//! - [`UnitBackend`] - Capabilities a unit backend provides
//! - [`ParameterAddress`] / [`Scope`] - Parameter addressing
//! - [`StreamFormat`] - `AudioStreamBasicDescription` mirror
//! - [`Preset`] - Preset number and name, compared by number
//! - [`RenderCallback`] - Render procedure plus context pointer
//! - [`ComponentDescription`] - Identifies a component to open
//! - [`UnitError`] / [`OsStatus`] - Errors
//!
//! With the `mock` feature, [`mock::MockUnit`] provides an in-memory backend.

pub mod backend;
pub mod component;
pub mod error;
pub mod handle;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod preset;
pub mod render;
pub mod stream_format;
pub mod types;

// Re-exports for convenience
pub use backend::{OsResult, UnitBackend};
pub use component::{
    ComponentDescription, ComponentType, FourCharCode, APPLE_MANUFACTURER, DEFAULT_OUTPUT_SUBTYPE,
};
pub use error::{OsStatus, UnitError, UnitResult};
pub use handle::AudioUnitHandle;
pub use preset::Preset;
pub use render::{
    AudioBuffer, AudioBufferList, AudioTimeStamp, RenderActionFlags, RenderCallback, RenderProc,
    SmpteTime,
};
pub use stream_format::{format_flags, StreamFormat, FORMAT_LINEAR_PCM};
pub use types::{Element, ParameterAddress, ParameterId, ParameterValue, Scope, ViewSize};
