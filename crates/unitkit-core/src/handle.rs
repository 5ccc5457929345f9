//! The audio unit handle wrapper.
//!
//! [`AudioUnitHandle`] wraps an already-open unit and forwards every call to
//! it. The only state it keeps is the factory preset list, fetched on first
//! use and cached for the wrapper's lifetime.
//!
//! # Ownership
//!
//! The wrapper never opens, initializes or disposes the unit. Whoever created
//! the unit tears it down, and must keep it alive for as long as the wrapper
//! exists. The Apple backend encodes this as a lifetime on `AudioUnitRef`.
//!
//! # Threading
//!
//! Control calls (parameters, presets, formats) are expected on one thread,
//! off the render thread. The preset cache is a [`OnceCell`], so the wrapper
//! is not `Sync`.

use std::cell::OnceCell;

use crate::backend::UnitBackend;
use crate::error::{UnitError, UnitResult};
use crate::preset::{self, Preset};
use crate::render::RenderCallback;
use crate::stream_format::StreamFormat;
use crate::types::{Element, ParameterAddress, ParameterValue, Scope};
#[cfg(not(target_os = "ios"))]
use crate::types::ViewSize;

/// Typed façade over an audio unit instance.
///
/// # Example
///
/// ```ignore
/// use unitkit_core::mock::MockUnit;
/// use unitkit_core::{AudioUnitHandle, ParameterAddress, Preset};
///
/// let unit = AudioUnitHandle::new(MockUnit::with_presets(vec![
///     Preset::new(0, "Small Room"),
///     Preset::new(1, "Large Hall"),
/// ]));
///
/// unit.set_parameter(ParameterAddress::global(0), 0.5, 0)?;
/// assert_eq!(unit.parameter(ParameterAddress::global(0))?, 0.5);
///
/// unit.set_present_preset_index(1)?;
/// assert_eq!(unit.present_preset()?.name(), "Large Hall");
/// # Ok::<(), unitkit_core::UnitError>(())
/// ```
pub struct AudioUnitHandle<B: UnitBackend> {
    backend: B,
    factory_presets: OnceCell<Vec<Preset>>,
}

impl<B: UnitBackend> AudioUnitHandle<B> {
    /// Wrap an existing, already-initialized unit. No validation is done; an
    /// invalid unit fails on first use with the framework's status.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            factory_presets: OnceCell::new(),
        }
    }

    /// The underlying raw handle, unchanged.
    pub fn raw(&self) -> B::Raw {
        self.backend.raw()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Install a render callback on input element 0.
    ///
    /// The wrapper only registers the callback; the framework invokes it on
    /// its real-time thread.
    ///
    /// # Safety
    ///
    /// The callback's context must stay valid until the callback is replaced
    /// or the unit is disposed, and the procedure must be safe to run on the
    /// real-time thread (no blocking, no allocation).
    pub unsafe fn set_render_callback(&self, callback: RenderCallback) -> UnitResult<()> {
        // SAFETY: forwarded from this function's contract.
        unsafe { self.set_render_callback_for(Scope::INPUT, 0, callback) }
    }

    /// Install a render callback on an explicit scope and element.
    ///
    /// # Safety
    ///
    /// Same contract as [`AudioUnitHandle::set_render_callback`].
    pub unsafe fn set_render_callback_for(
        &self,
        scope: Scope,
        element: Element,
        callback: RenderCallback,
    ) -> UnitResult<()> {
        log::debug!(
            "Installing render callback on {} element {} (proc set: {})",
            scope,
            element,
            callback.input_proc.is_some()
        );
        // SAFETY: forwarded from this function's contract.
        unsafe { self.backend.set_render_callback(scope, element, callback)? };
        Ok(())
    }

    // =========================================================================
    // Bypass
    // =========================================================================

    /// Current bypass state, read from the unit (never cached).
    pub fn bypass(&self) -> UnitResult<bool> {
        Ok(self.backend.bypass()?)
    }

    pub fn set_bypass(&self, bypass: bool) -> UnitResult<()> {
        Ok(self.backend.set_bypass(bypass)?)
    }

    // =========================================================================
    // Stream format
    // =========================================================================

    /// Set the stream format of input element 0.
    pub fn set_stream_format(&self, format: &StreamFormat) -> UnitResult<()> {
        self.set_stream_format_for(Scope::INPUT, 0, format)
    }

    pub fn set_stream_format_for(
        &self,
        scope: Scope,
        element: Element,
        format: &StreamFormat,
    ) -> UnitResult<()> {
        log::debug!(
            "Setting stream format on {} element {}: {} Hz, {} ch, {} bit",
            scope,
            element,
            format.sample_rate,
            format.channels_per_frame,
            format.bits_per_channel
        );
        Ok(self.backend.set_stream_format(scope, element, format)?)
    }

    pub fn stream_format(&self, scope: Scope, element: Element) -> UnitResult<StreamFormat> {
        Ok(self.backend.stream_format(scope, element)?)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Write a parameter.
    ///
    /// `buffer_offset` schedules the change that many frames into the next
    /// render buffer; pass 0 for an immediate change. The unit decides which
    /// addresses are legal.
    pub fn set_parameter(
        &self,
        address: ParameterAddress,
        value: ParameterValue,
        buffer_offset: u32,
    ) -> UnitResult<()> {
        Ok(self.backend.set_parameter(address, value, buffer_offset)?)
    }

    pub fn parameter(&self, address: ParameterAddress) -> UnitResult<ParameterValue> {
        Ok(self.backend.parameter(address)?)
    }

    // =========================================================================
    // Presets
    // =========================================================================

    /// The unit's factory presets.
    ///
    /// Queried from the unit on the first successful call and cached for the
    /// lifetime of this wrapper. A unit whose preset list changes at runtime
    /// will not be re-queried.
    pub fn factory_presets(&self) -> UnitResult<&[Preset]> {
        if let Some(presets) = self.factory_presets.get() {
            return Ok(presets.as_slice());
        }

        let presets = self.backend.factory_presets()?;
        log::debug!("Cached {} factory presets", presets.len());
        Ok(self.factory_presets.get_or_init(|| presets).as_slice())
    }

    /// Position of `preset` in the factory preset list, matched by number.
    pub fn index_of_factory_preset(&self, preset: &Preset) -> UnitResult<Option<usize>> {
        Ok(preset::index_of(self.factory_presets()?, preset))
    }

    /// The unit's active preset.
    pub fn present_preset(&self) -> UnitResult<Preset> {
        Ok(self.backend.present_preset()?)
    }

    /// Make `preset` active. Presets the unit does not know are rejected by
    /// the unit.
    pub fn set_present_preset(&self, preset: &Preset) -> UnitResult<()> {
        log::debug!("Selecting preset {}", preset);
        Ok(self.backend.set_present_preset(preset)?)
    }

    /// Index of the active preset in the factory preset list, or `None` when
    /// the active preset is not a factory preset.
    pub fn present_preset_index(&self) -> UnitResult<Option<usize>> {
        let present = self.present_preset()?;
        self.index_of_factory_preset(&present)
    }

    /// Activate the factory preset at `index`.
    pub fn set_present_preset_index(&self, index: usize) -> UnitResult<()> {
        let presets = self.factory_presets()?;
        let preset = presets.get(index).ok_or(UnitError::PresetIndexOutOfRange {
            index,
            len: presets.len(),
        })?;
        self.set_present_preset(preset)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Whether the unit provides its own view.
    #[cfg(not(target_os = "ios"))]
    pub fn has_custom_view(&self) -> bool {
        self.backend.has_custom_view()
    }

    /// Build a view for the unit.
    ///
    /// Uses the unit's own view when it has one and it can be built;
    /// otherwise falls back to the generic parameter view.
    #[cfg(not(target_os = "ios"))]
    pub fn create_view(&self, size: ViewSize) -> UnitResult<B::View> {
        if self.has_custom_view() {
            match self.create_custom_view(size) {
                Ok(Some(view)) => return Ok(view),
                Ok(None) => log::warn!("Custom view unavailable, using generic view"),
                Err(e) => log::warn!("Custom view failed ({}), using generic view", e),
            }
        }
        self.create_generic_view()
    }

    #[cfg(not(target_os = "ios"))]
    pub fn create_custom_view(&self, size: ViewSize) -> UnitResult<Option<B::View>> {
        self.backend.create_custom_view(size)
    }

    #[cfg(not(target_os = "ios"))]
    pub fn create_generic_view(&self) -> UnitResult<B::View> {
        self.backend.create_generic_view()
    }
}

impl<B: UnitBackend + std::fmt::Debug> std::fmt::Debug for AudioUnitHandle<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioUnitHandle")
            .field("backend", &self.backend)
            .field("factory_presets", &self.factory_presets.get().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OsStatus;
    use crate::mock::MockUnit;
    #[cfg(not(target_os = "ios"))]
    use crate::mock::MockView;

    fn reverb() -> AudioUnitHandle<MockUnit> {
        AudioUnitHandle::new(MockUnit::with_presets(vec![
            Preset::new(0, "Small Room"),
            Preset::new(1, "Medium Hall"),
            Preset::new(4, "Cathedral"),
        ]))
    }

    #[test]
    fn test_raw_handle_passthrough() {
        let unit = AudioUnitHandle::new(MockUnit::new().with_id(0xbeef));
        assert_eq!(unit.raw(), 0xbeef);
    }

    #[test]
    fn test_parameter_echo() {
        let unit = reverb();
        let addresses = [
            ParameterAddress::global(0),
            ParameterAddress::new(0, Scope::INPUT, 1),
            ParameterAddress::new(12, Scope::OUTPUT, 0),
            ParameterAddress::new(3, Scope(99), 7),
        ];

        for (i, addr) in addresses.iter().enumerate() {
            unit.set_parameter(*addr, i as f32 * 0.25, 0).unwrap();
        }
        for (i, addr) in addresses.iter().enumerate() {
            assert_eq!(unit.parameter(*addr).unwrap(), i as f32 * 0.25);
        }

        // Last write wins
        unit.set_parameter(addresses[0], -6.0, 128).unwrap();
        assert_eq!(unit.parameter(addresses[0]).unwrap(), -6.0);
        assert_eq!(unit.backend().last_buffer_offset(), Some(128));
    }

    #[test]
    fn test_unset_parameter_surfaces_status() {
        let unit = reverb();
        let err = unit.parameter(ParameterAddress::global(42)).unwrap_err();
        assert_eq!(err.os_status(), Some(OsStatus::INVALID_PARAMETER));
    }

    #[test]
    fn test_factory_presets_cached() {
        let unit = reverb();
        let first: Vec<i32> = unit
            .factory_presets()
            .unwrap()
            .iter()
            .map(Preset::number)
            .collect();
        let second: Vec<i32> = unit
            .factory_presets()
            .unwrap()
            .iter()
            .map(Preset::number)
            .collect();

        assert_eq!(first, vec![0, 1, 4]);
        assert_eq!(first, second);
        assert_eq!(unit.backend().preset_query_count(), 1);
    }

    #[test]
    fn test_factory_preset_failure_not_cached() {
        let unit = reverb();
        unit.backend().fail_next(OsStatus::UNINITIALIZED);

        let err = unit.factory_presets().unwrap_err();
        assert_eq!(err.os_status(), Some(OsStatus::UNINITIALIZED));

        assert_eq!(unit.factory_presets().unwrap().len(), 3);
        assert_eq!(unit.backend().preset_query_count(), 2);
    }

    #[test]
    fn test_cache_is_not_invalidated() {
        let unit = reverb();
        assert_eq!(unit.factory_presets().unwrap().len(), 3);

        unit.backend().replace_presets(vec![Preset::new(9, "New")]);
        assert_eq!(unit.factory_presets().unwrap().len(), 3);
        assert_eq!(unit.backend().preset_query_count(), 1);
    }

    #[test]
    fn test_index_of_factory_preset() {
        let unit = reverb();
        assert_eq!(
            unit.index_of_factory_preset(&Preset::new(4, "")).unwrap(),
            Some(2)
        );
        assert_eq!(
            unit.index_of_factory_preset(&Preset::new(2, "Medium Hall"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_present_preset_index_roundtrip() {
        let unit = reverb();
        let len = unit.factory_presets().unwrap().len();
        for i in 0..len {
            unit.set_present_preset_index(i).unwrap();
            assert_eq!(unit.present_preset_index().unwrap(), Some(i));
        }
        assert_eq!(unit.present_preset().unwrap().name(), "Cathedral");
    }

    #[test]
    fn test_present_preset_index_out_of_range() {
        let unit = reverb();
        unit.set_present_preset_index(1).unwrap();

        let err = unit.set_present_preset_index(3).unwrap_err();
        assert!(matches!(
            err,
            UnitError::PresetIndexOutOfRange { index: 3, len: 3 }
        ));
        // The active preset is untouched
        assert_eq!(unit.present_preset_index().unwrap(), Some(1));
    }

    #[test]
    fn test_unknown_preset_rejected_by_unit() {
        let unit = reverb();
        let err = unit
            .set_present_preset(&Preset::new(77, "Nope"))
            .unwrap_err();
        assert_eq!(err.os_status(), Some(OsStatus::INVALID_PROPERTY_VALUE));
    }

    #[test]
    fn test_user_preset_has_no_factory_index() {
        let unit = reverb();
        unit.backend().set_user_preset(Preset::new(-1, "Mine"));
        assert_eq!(unit.present_preset_index().unwrap(), None);
    }

    #[test]
    fn test_bypass_roundtrip() {
        let unit = reverb();
        unit.set_bypass(true).unwrap();
        assert!(unit.bypass().unwrap());
        unit.set_bypass(false).unwrap();
        assert!(!unit.bypass().unwrap());
    }

    #[test]
    fn test_bypass_reads_from_unit() {
        let unit = reverb();
        unit.set_bypass(true).unwrap();
        // Changed behind the wrapper's back, e.g. by the host
        unit.backend().force_bypass(false);
        assert!(!unit.bypass().unwrap());
    }

    #[test]
    fn test_stream_format() {
        let unit = reverb();
        let format = StreamFormat::linear_pcm_f32(48000.0, 2, false);
        unit.set_stream_format(&format).unwrap();
        assert_eq!(unit.stream_format(Scope::INPUT, 0).unwrap(), format);

        let err = unit
            .set_stream_format_for(
                Scope::OUTPUT,
                0,
                &StreamFormat::linear_pcm_f32(48000.0, 8, false),
            )
            .unwrap_err();
        assert_eq!(err.os_status(), Some(OsStatus::FORMAT_NOT_SUPPORTED));
        assert_eq!(unit.backend().stream_format_calls(), 2);
    }

    #[test]
    fn test_render_callback_stored_not_called() {
        unsafe extern "C" fn never(
            _context: *mut std::ffi::c_void,
            _flags: *mut crate::RenderActionFlags,
            _stamp: *const crate::AudioTimeStamp,
            _bus: u32,
            _frames: u32,
            _data: *mut crate::AudioBufferList,
        ) -> OsStatus {
            panic!("render callback must not be invoked by the wrapper");
        }

        let unit = reverb();
        let mut context = 0u8;
        let ctx = &mut context as *mut u8 as *mut std::ffi::c_void;
        // SAFETY: the mock never invokes the callback.
        unsafe {
            unit.set_render_callback(RenderCallback::new(never, ctx))
                .unwrap()
        };

        let (scope, element, callback) = unit.backend().render_callback().unwrap();
        assert_eq!(scope, Scope::INPUT);
        assert_eq!(element, 0);
        assert_eq!(callback.context(), ctx);
    }

    #[cfg(not(target_os = "ios"))]
    #[test]
    fn test_create_view_custom() {
        let unit = AudioUnitHandle::new(MockUnit::new().with_custom_view(true));
        let view = unit.create_view(ViewSize::new(400.0, 300.0)).unwrap();
        assert_eq!(view, MockView::Custom(ViewSize::new(400.0, 300.0)));
        assert_eq!(unit.backend().custom_view_calls(), 1);
        assert_eq!(unit.backend().generic_view_calls(), 0);
    }

    #[cfg(not(target_os = "ios"))]
    #[test]
    fn test_create_view_generic_fallback() {
        let unit = AudioUnitHandle::new(MockUnit::new());
        let view = unit.create_view(ViewSize::new(400.0, 300.0)).unwrap();
        assert_eq!(view, MockView::Generic);
        assert_eq!(unit.backend().custom_view_calls(), 0);
        assert_eq!(unit.backend().generic_view_calls(), 1);
    }

    #[cfg(not(target_os = "ios"))]
    #[test]
    fn test_create_view_broken_custom_falls_back() {
        let unit = AudioUnitHandle::new(
            MockUnit::new()
                .with_custom_view(true)
                .with_broken_custom_view(),
        );
        let view = unit.create_view(ViewSize::new(200.0, 100.0)).unwrap();
        assert_eq!(view, MockView::Generic);
        assert_eq!(unit.backend().custom_view_calls(), 1);
        assert_eq!(unit.backend().generic_view_calls(), 1);
    }
}
