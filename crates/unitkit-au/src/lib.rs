//! # unitkit-au
//!
//! AudioToolbox backend for unitkit.
//!
//! - [`AudioUnitRef`] - Borrowed unit handle implementing
//!   [`UnitBackend`](unitkit_core::UnitBackend)
//! - [`ComponentInstance`] - Owned instance; opens, initializes and disposes
//! - [`CocoaView`] - View produced by `create_view` (macOS only)
//!
//! ```rust,ignore
//! use unitkit_au::ComponentInstance;
//! use unitkit_core::{ParameterAddress, StreamFormat};
//!
//! let mut output = ComponentInstance::default_output()?;
//! let unit = output.handle();
//! unit.set_stream_format(&StreamFormat::linear_pcm_f32(44100.0, 2, false))?;
//! drop(unit);
//! output.initialize()?;
//! ```
//!
//! ## Platform Support
//!
//! Builds on macOS and iOS. On other platforms, the crate is empty but still
//! compiles to allow cross-compilation checks.

#![cfg_attr(not(any(target_os = "macos", target_os = "ios")), allow(unused))]

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod instance;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub mod sys;
#[cfg(any(target_os = "macos", target_os = "ios"))]
mod unit_ref;
#[cfg(target_os = "macos")]
mod view;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use instance::ComponentInstance;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use unit_ref::AudioUnitRef;
#[cfg(target_os = "macos")]
pub use view::CocoaView;

/// Handle wrapper over a system unit.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type SystemAudioUnit<'a> = unitkit_core::AudioUnitHandle<AudioUnitRef<'a>>;
