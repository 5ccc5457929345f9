//! In-memory unit backend for tests.
//!
//! [`MockUnit`] behaves like a cooperative unit: parameter writes are echoed
//! back by reads, presets are selected by number, and formats wider than the
//! configured channel limit are rejected. Every interesting call is counted
//! so tests can assert on what was (or was not) forwarded.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::backend::{OsResult, UnitBackend};
use crate::error::OsStatus;
#[cfg(not(target_os = "ios"))]
use crate::error::UnitResult;
use crate::preset::Preset;
use crate::render::RenderCallback;
use crate::stream_format::StreamFormat;
#[cfg(not(target_os = "ios"))]
use crate::types::ViewSize;
use crate::types::{Element, ParameterAddress, ParameterValue, Scope};

/// Which view construction path produced a view.
#[cfg(not(target_os = "ios"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockView {
    Custom(ViewSize),
    Generic,
}

/// Recording in-memory unit.
#[derive(Debug)]
pub struct MockUnit {
    id: usize,
    parameters: RefCell<HashMap<ParameterAddress, ParameterValue>>,
    last_buffer_offset: Cell<Option<u32>>,
    bypass: Cell<bool>,
    presets: RefCell<Vec<Preset>>,
    present: RefCell<Preset>,
    preset_queries: Cell<usize>,
    formats: RefCell<HashMap<(Scope, Element), StreamFormat>>,
    format_calls: Cell<usize>,
    max_channels: u32,
    render_callback: Cell<Option<(Scope, Element, RenderCallback)>>,
    custom_view: bool,
    custom_view_broken: bool,
    custom_view_calls: Cell<usize>,
    generic_view_calls: Cell<usize>,
    pending_failure: Cell<Option<OsStatus>>,
}

impl Default for MockUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUnit {
    /// A unit with no presets, no custom view and a two-channel format limit.
    pub fn new() -> Self {
        Self {
            id: 1,
            parameters: RefCell::new(HashMap::new()),
            last_buffer_offset: Cell::new(None),
            bypass: Cell::new(false),
            presets: RefCell::new(Vec::new()),
            present: RefCell::new(Preset::new(-1, "Untitled")),
            preset_queries: Cell::new(0),
            formats: RefCell::new(HashMap::new()),
            format_calls: Cell::new(0),
            max_channels: 2,
            render_callback: Cell::new(None),
            custom_view: false,
            custom_view_broken: false,
            custom_view_calls: Cell::new(0),
            generic_view_calls: Cell::new(0),
            pending_failure: Cell::new(None),
        }
    }

    /// A unit shipping `presets`, with the first one active.
    pub fn with_presets(presets: Vec<Preset>) -> Self {
        let unit = Self::new();
        if let Some(first) = presets.first() {
            *unit.present.borrow_mut() = first.clone();
        }
        *unit.presets.borrow_mut() = presets;
        unit
    }

    /// Set the value returned as the raw handle.
    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    pub fn with_custom_view(mut self, custom_view: bool) -> Self {
        self.custom_view = custom_view;
        self
    }

    /// Advertise a custom view that then fails to build.
    pub fn with_broken_custom_view(mut self) -> Self {
        self.custom_view_broken = true;
        self
    }

    /// Widest stream format (in channels) the unit accepts.
    pub fn with_max_channels(mut self, max_channels: u32) -> Self {
        self.max_channels = max_channels;
        self
    }

    /// Make the next fallible call fail with `status`.
    pub fn fail_next(&self, status: OsStatus) {
        self.pending_failure.set(Some(status));
    }

    /// Swap the unit's preset list, as a unit that reloads its bank would.
    pub fn replace_presets(&self, presets: Vec<Preset>) {
        *self.presets.borrow_mut() = presets;
    }

    /// Activate a preset that is not in the factory list.
    pub fn set_user_preset(&self, preset: Preset) {
        *self.present.borrow_mut() = preset;
    }

    /// Change the bypass state without going through the backend API.
    pub fn force_bypass(&self, bypass: bool) {
        self.bypass.set(bypass);
    }

    pub fn preset_query_count(&self) -> usize {
        self.preset_queries.get()
    }

    pub fn stream_format_calls(&self) -> usize {
        self.format_calls.get()
    }

    pub fn last_buffer_offset(&self) -> Option<u32> {
        self.last_buffer_offset.get()
    }

    pub fn render_callback(&self) -> Option<(Scope, Element, RenderCallback)> {
        self.render_callback.get()
    }

    pub fn custom_view_calls(&self) -> usize {
        self.custom_view_calls.get()
    }

    pub fn generic_view_calls(&self) -> usize {
        self.generic_view_calls.get()
    }

    fn check(&self) -> OsResult<()> {
        match self.pending_failure.take() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}

impl UnitBackend for MockUnit {
    type Raw = usize;

    #[cfg(not(target_os = "ios"))]
    type View = MockView;

    fn raw(&self) -> usize {
        self.id
    }

    unsafe fn set_render_callback(
        &self,
        scope: Scope,
        element: Element,
        callback: RenderCallback,
    ) -> OsResult<()> {
        self.check()?;
        self.render_callback.set(Some((scope, element, callback)));
        Ok(())
    }

    fn bypass(&self) -> OsResult<bool> {
        self.check()?;
        Ok(self.bypass.get())
    }

    fn set_bypass(&self, bypass: bool) -> OsResult<()> {
        self.check()?;
        self.bypass.set(bypass);
        Ok(())
    }

    fn stream_format(&self, scope: Scope, element: Element) -> OsResult<StreamFormat> {
        self.check()?;
        Ok(self
            .formats
            .borrow()
            .get(&(scope, element))
            .copied()
            .unwrap_or(StreamFormat::linear_pcm_f32(44100.0, 2, false)))
    }

    fn set_stream_format(
        &self,
        scope: Scope,
        element: Element,
        format: &StreamFormat,
    ) -> OsResult<()> {
        self.format_calls.set(self.format_calls.get() + 1);
        self.check()?;
        if format.channels_per_frame == 0 || format.channels_per_frame > self.max_channels {
            return Err(OsStatus::FORMAT_NOT_SUPPORTED);
        }
        self.formats.borrow_mut().insert((scope, element), *format);
        Ok(())
    }

    fn parameter(&self, address: ParameterAddress) -> OsResult<ParameterValue> {
        self.check()?;
        self.parameters
            .borrow()
            .get(&address)
            .copied()
            .ok_or(OsStatus::INVALID_PARAMETER)
    }

    fn set_parameter(
        &self,
        address: ParameterAddress,
        value: ParameterValue,
        buffer_offset: u32,
    ) -> OsResult<()> {
        self.check()?;
        self.parameters.borrow_mut().insert(address, value);
        self.last_buffer_offset.set(Some(buffer_offset));
        Ok(())
    }

    fn factory_presets(&self) -> OsResult<Vec<Preset>> {
        self.preset_queries.set(self.preset_queries.get() + 1);
        self.check()?;
        Ok(self.presets.borrow().clone())
    }

    fn present_preset(&self) -> OsResult<Preset> {
        self.check()?;
        Ok(self.present.borrow().clone())
    }

    fn set_present_preset(&self, preset: &Preset) -> OsResult<()> {
        self.check()?;
        let presets = self.presets.borrow();
        let found = presets
            .iter()
            .find(|p| *p == preset)
            .ok_or(OsStatus::INVALID_PROPERTY_VALUE)?;
        *self.present.borrow_mut() = found.clone();
        Ok(())
    }

    #[cfg(not(target_os = "ios"))]
    fn has_custom_view(&self) -> bool {
        self.custom_view
    }

    #[cfg(not(target_os = "ios"))]
    fn create_custom_view(&self, size: ViewSize) -> UnitResult<Option<MockView>> {
        self.custom_view_calls.set(self.custom_view_calls.get() + 1);
        self.check()?;
        if !self.custom_view || self.custom_view_broken {
            return Ok(None);
        }
        Ok(Some(MockView::Custom(size)))
    }

    #[cfg(not(target_os = "ios"))]
    fn create_generic_view(&self) -> UnitResult<MockView> {
        self.generic_view_calls.set(self.generic_view_calls.get() + 1);
        self.check()?;
        Ok(MockView::Generic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_next_is_one_shot() {
        let unit = MockUnit::new();
        unit.fail_next(OsStatus::UNINITIALIZED);
        assert_eq!(unit.set_bypass(true), Err(OsStatus::UNINITIALIZED));
        assert_eq!(unit.set_bypass(true), Ok(()));
        assert_eq!(unit.bypass(), Ok(true));
    }

    #[test]
    fn test_format_limit() {
        let unit = MockUnit::new().with_max_channels(6);
        let surround = StreamFormat::linear_pcm_f32(48000.0, 6, false);
        assert!(unit.set_stream_format(Scope::OUTPUT, 0, &surround).is_ok());
        assert_eq!(
            unit.set_stream_format(Scope::OUTPUT, 0, &StreamFormat::default()),
            Err(OsStatus::FORMAT_NOT_SUPPORTED)
        );
    }

    #[test]
    fn test_selecting_preset_uses_listed_name() {
        let unit = MockUnit::with_presets(vec![Preset::new(0, "Init"), Preset::new(1, "Warm")]);
        unit.set_present_preset(&Preset::new(1, "")).unwrap();
        assert_eq!(unit.present_preset().unwrap().name(), "Warm");
    }
}
