//! The framework seam.
//!
//! [`UnitBackend`] lists every capability [`AudioUnitHandle`] forwards to.
//! The Apple backend in `unitkit-au` implements it with AudioToolbox calls;
//! [`MockUnit`] implements it in memory for tests.
//!
//! Implementations report failures as the framework's own [`OsStatus`].
//! They must not retry or remap codes.
//!
//! [`AudioUnitHandle`]: crate::AudioUnitHandle
//! [`MockUnit`]: crate::mock::MockUnit

use crate::error::OsStatus;
#[cfg(not(target_os = "ios"))]
use crate::error::UnitResult;
use crate::preset::Preset;
use crate::render::RenderCallback;
use crate::stream_format::StreamFormat;
use crate::types::{Element, ParameterAddress, ParameterValue, Scope};
#[cfg(not(target_os = "ios"))]
use crate::types::ViewSize;

/// Result of a single framework call.
pub type OsResult<T> = Result<T, OsStatus>;

/// Operations an audio unit instance exposes to the wrapper.
pub trait UnitBackend {
    /// The raw handle type handed back by [`UnitBackend::raw`].
    type Raw: Copy;

    /// View type produced by view construction.
    #[cfg(not(target_os = "ios"))]
    type View;

    /// The wrapped handle, unchanged.
    fn raw(&self) -> Self::Raw;

    /// Install (or with [`RenderCallback::none`], remove) the render callback
    /// for the given scope and element.
    ///
    /// # Safety
    ///
    /// The callback's context pointer must stay valid for as long as the
    /// callback is installed, and the procedure must be safe to call from
    /// the real-time render thread.
    unsafe fn set_render_callback(
        &self,
        scope: Scope,
        element: Element,
        callback: RenderCallback,
    ) -> OsResult<()>;

    fn bypass(&self) -> OsResult<bool>;

    fn set_bypass(&self, bypass: bool) -> OsResult<()>;

    fn stream_format(&self, scope: Scope, element: Element) -> OsResult<StreamFormat>;

    fn set_stream_format(
        &self,
        scope: Scope,
        element: Element,
        format: &StreamFormat,
    ) -> OsResult<()>;

    fn parameter(&self, address: ParameterAddress) -> OsResult<ParameterValue>;

    /// Write a parameter, `buffer_offset` frames into the next render buffer.
    fn set_parameter(
        &self,
        address: ParameterAddress,
        value: ParameterValue,
        buffer_offset: u32,
    ) -> OsResult<()>;

    /// Query the unit's factory presets, in the unit's order.
    fn factory_presets(&self) -> OsResult<Vec<Preset>>;

    fn present_preset(&self) -> OsResult<Preset>;

    fn set_present_preset(&self, preset: &Preset) -> OsResult<()>;

    /// Whether the unit ships its own interactive view.
    #[cfg(not(target_os = "ios"))]
    fn has_custom_view(&self) -> bool;

    /// Build the unit's own view at `size`. `Ok(None)` means the unit
    /// advertised a view but none could be built.
    #[cfg(not(target_os = "ios"))]
    fn create_custom_view(&self, size: ViewSize) -> UnitResult<Option<Self::View>>;

    /// Build the framework's generic parameter view.
    #[cfg(not(target_os = "ios"))]
    fn create_generic_view(&self) -> UnitResult<Self::View>;
}
