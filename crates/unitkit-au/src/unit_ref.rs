//! Borrowed unit handle backed by AudioToolbox.
//!
//! [`AudioUnitRef`] is a raw `AudioUnit` pointer plus a lifetime. It never
//! disposes the unit; the lifetime ties it to whoever does (typically a
//! [`ComponentInstance`](crate::ComponentInstance)).

use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem;

use objc2_foundation::NSString;
use unitkit_core::{
    Element, OsResult, ParameterAddress, ParameterValue, Preset, RenderCallback, Scope,
    StreamFormat, UnitBackend,
};
#[cfg(target_os = "macos")]
use unitkit_core::{UnitResult, ViewSize};

use crate::sys::{self, property, AUPreset};
#[cfg(target_os = "macos")]
use crate::view::{self, CocoaView};

/// Non-owning reference to an open audio unit.
#[derive(Debug, Clone, Copy)]
pub struct AudioUnitRef<'a> {
    raw: sys::AudioUnit,
    _owner: PhantomData<&'a ()>,
}

impl<'a> AudioUnitRef<'a> {
    /// Borrow a unit opened elsewhere.
    ///
    /// # Safety
    ///
    /// `raw` must be an open unit instance that stays valid for `'a`. It may
    /// be null, in which case every call fails at the framework boundary.
    pub unsafe fn from_raw(raw: sys::AudioUnit) -> Self {
        Self {
            raw,
            _owner: PhantomData,
        }
    }

    pub fn as_raw(&self) -> sys::AudioUnit {
        self.raw
    }

    /// Start an output unit's I/O cycle.
    pub fn start_output(&self) -> OsResult<()> {
        // SAFETY: `raw` is valid for `'a` per `from_raw`.
        unsafe { sys::AudioOutputUnitStart(self.raw) }.check()
    }

    /// Stop an output unit's I/O cycle.
    pub fn stop_output(&self) -> OsResult<()> {
        // SAFETY: `raw` is valid for `'a` per `from_raw`.
        unsafe { sys::AudioOutputUnitStop(self.raw) }.check()
    }

    pub fn maximum_frames_per_slice(&self) -> OsResult<u32> {
        // SAFETY: u32 is valid when zeroed.
        unsafe { self.get_property(property::MAXIMUM_FRAMES_PER_SLICE, Scope::GLOBAL, 0) }
    }

    pub fn set_maximum_frames_per_slice(&self, frames: u32) -> OsResult<()> {
        self.set_property(property::MAXIMUM_FRAMES_PER_SLICE, Scope::GLOBAL, 0, &frames)
    }

    /// Read a fixed-size property.
    ///
    /// # Safety
    ///
    /// `T` must be a `#[repr(C)]` plain-data type matching the property's
    /// layout, for which the all-zero bit pattern is valid.
    unsafe fn get_property<T: Copy>(&self, id: u32, scope: Scope, element: Element) -> OsResult<T> {
        // SAFETY: the caller guarantees zeroed `T` is valid.
        let mut value: T = unsafe { mem::zeroed() };
        let mut size = mem::size_of::<T>() as u32;
        // SAFETY: `value` provides `size` writable bytes.
        unsafe {
            sys::AudioUnitGetProperty(
                self.raw,
                id,
                scope.as_u32(),
                element,
                &mut value as *mut T as *mut c_void,
                &mut size,
            )
        }
        .check()?;
        Ok(value)
    }

    fn set_property<T>(&self, id: u32, scope: Scope, element: Element, value: &T) -> OsResult<()> {
        // SAFETY: `value` points to `size_of::<T>()` readable bytes.
        unsafe {
            sys::AudioUnitSetProperty(
                self.raw,
                id,
                scope.as_u32(),
                element,
                value as *const T as *const c_void,
                mem::size_of::<T>() as u32,
            )
        }
        .check()
    }
}

/// Copy a bridged `CFStringRef` into a Rust string. Null yields "".
///
/// # Safety
///
/// `name` must be null or a valid CFString.
unsafe fn string_from_cf(name: sys::CFStringRef) -> String {
    if name.is_null() {
        return String::new();
    }
    // SAFETY: CFString is toll-free bridged with NSString.
    let name: &NSString = unsafe { &*(name as *const NSString) };
    name.to_string()
}

impl UnitBackend for AudioUnitRef<'_> {
    type Raw = sys::AudioUnit;

    #[cfg(target_os = "macos")]
    type View = CocoaView;

    fn raw(&self) -> sys::AudioUnit {
        self.raw
    }

    unsafe fn set_render_callback(
        &self,
        scope: Scope,
        element: Element,
        callback: RenderCallback,
    ) -> OsResult<()> {
        // RenderCallback is layout-compatible with AURenderCallbackStruct.
        self.set_property(property::SET_RENDER_CALLBACK, scope, element, &callback)
    }

    fn bypass(&self) -> OsResult<bool> {
        // SAFETY: u32 is valid when zeroed.
        let value: u32 = unsafe { self.get_property(property::BYPASS_EFFECT, Scope::GLOBAL, 0)? };
        Ok(value != 0)
    }

    fn set_bypass(&self, bypass: bool) -> OsResult<()> {
        let value = u32::from(bypass);
        self.set_property(property::BYPASS_EFFECT, Scope::GLOBAL, 0, &value)
    }

    fn stream_format(&self, scope: Scope, element: Element) -> OsResult<StreamFormat> {
        // SAFETY: StreamFormat is the repr(C) AudioStreamBasicDescription.
        unsafe { self.get_property(property::STREAM_FORMAT, scope, element) }
    }

    fn set_stream_format(
        &self,
        scope: Scope,
        element: Element,
        format: &StreamFormat,
    ) -> OsResult<()> {
        self.set_property(property::STREAM_FORMAT, scope, element, format)
    }

    fn parameter(&self, address: ParameterAddress) -> OsResult<ParameterValue> {
        let mut value: ParameterValue = 0.0;
        // SAFETY: `value` is a valid out pointer.
        unsafe {
            sys::AudioUnitGetParameter(
                self.raw,
                address.id,
                address.scope.as_u32(),
                address.element,
                &mut value,
            )
        }
        .check()?;
        Ok(value)
    }

    fn set_parameter(
        &self,
        address: ParameterAddress,
        value: ParameterValue,
        buffer_offset: u32,
    ) -> OsResult<()> {
        // SAFETY: plain value arguments.
        unsafe {
            sys::AudioUnitSetParameter(
                self.raw,
                address.id,
                address.scope.as_u32(),
                address.element,
                value,
                buffer_offset,
            )
        }
        .check()
    }

    fn factory_presets(&self) -> OsResult<Vec<Preset>> {
        // SAFETY: a null pointer is a valid zeroed CFArrayRef.
        let array: sys::CFArrayRef =
            unsafe { self.get_property(property::FACTORY_PRESETS, Scope::GLOBAL, 0)? };
        if array.is_null() {
            return Ok(Vec::new());
        }

        // SAFETY: the framework returns a retained CFArray of AUPreset
        // pointers; it is read and then released exactly once.
        let presets = unsafe {
            let count = sys::CFArrayGetCount(array).max(0);
            let mut presets = Vec::with_capacity(count as usize);
            for i in 0..count {
                let entry = sys::CFArrayGetValueAtIndex(array, i) as *const AUPreset;
                if entry.is_null() {
                    continue;
                }
                let entry = *entry;
                presets.push(Preset::new(
                    entry.preset_number,
                    string_from_cf(entry.preset_name),
                ));
            }
            sys::CFRelease(array);
            presets
        };
        Ok(presets)
    }

    fn present_preset(&self) -> OsResult<Preset> {
        // SAFETY: AUPreset with a null name is valid when zeroed.
        let raw: AUPreset =
            unsafe { self.get_property(property::PRESENT_PRESET, Scope::GLOBAL, 0)? };

        // SAFETY: the returned name is retained for the caller.
        let name = unsafe {
            let name = string_from_cf(raw.preset_name);
            if !raw.preset_name.is_null() {
                sys::CFRelease(raw.preset_name);
            }
            name
        };
        Ok(Preset::new(raw.preset_number, name))
    }

    fn set_present_preset(&self, preset: &Preset) -> OsResult<()> {
        let name = NSString::from_str(preset.name());
        let raw = AUPreset {
            preset_number: preset.number(),
            preset_name: &*name as *const NSString as sys::CFStringRef,
        };
        // The unit retains the name if it keeps it
        self.set_property(property::PRESENT_PRESET, Scope::GLOBAL, 0, &raw)
    }

    #[cfg(target_os = "macos")]
    fn has_custom_view(&self) -> bool {
        view::has_cocoa_view(self.raw)
    }

    #[cfg(target_os = "macos")]
    fn create_custom_view(&self, size: ViewSize) -> UnitResult<Option<CocoaView>> {
        // SAFETY: `raw` is valid for `'a` per `from_raw`.
        unsafe { view::create_cocoa_view(self.raw, size) }
    }

    #[cfg(target_os = "macos")]
    fn create_generic_view(&self) -> UnitResult<CocoaView> {
        // SAFETY: `raw` is valid for `'a` per `from_raw`.
        unsafe { view::create_generic_view(self.raw) }
    }
}
