//! Raw AudioToolbox and CoreFoundation declarations.
//!
//! Only the handful of entry points the backend forwards to. Frameworks are
//! linked by `build.rs`.

#![allow(non_snake_case)]

use std::ffi::c_void;

use unitkit_core::{ComponentDescription, OsStatus};

/// Opaque unit instance record.
#[repr(C)]
pub struct ComponentInstanceRecord {
    _private: [u8; 0],
}

/// Opaque component record.
#[repr(C)]
pub struct OpaqueAudioComponent {
    _private: [u8; 0],
}

/// Raw unit handle (`AudioUnit` / `AudioComponentInstance`).
pub type AudioUnit = *mut ComponentInstanceRecord;

/// Raw component handle (`AudioComponent`).
pub type AudioComponent = *mut OpaqueAudioComponent;

pub type CFTypeRef = *const c_void;
pub type CFArrayRef = *const c_void;
pub type CFStringRef = *const c_void;
pub type CFURLRef = *const c_void;
pub type CFIndex = isize;

/// Preset as stored by the framework (`AUPreset`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AUPreset {
    pub preset_number: i32,
    pub preset_name: CFStringRef,
}

/// Property identifiers (`kAudioUnitProperty_*`).
pub mod property {
    pub const STREAM_FORMAT: u32 = 8;
    pub const MAXIMUM_FRAMES_PER_SLICE: u32 = 14;
    pub const BYPASS_EFFECT: u32 = 21;
    pub const SET_RENDER_CALLBACK: u32 = 23;
    pub const FACTORY_PRESETS: u32 = 24;
    pub const COCOA_UI: u32 = 31;
    pub const PRESENT_PRESET: u32 = 36;
}

extern "C" {
    pub fn AudioComponentFindNext(
        inComponent: AudioComponent,
        inDesc: *const ComponentDescription,
    ) -> AudioComponent;

    pub fn AudioComponentInstanceNew(
        inComponent: AudioComponent,
        outInstance: *mut AudioUnit,
    ) -> OsStatus;

    pub fn AudioComponentInstanceDispose(inInstance: AudioUnit) -> OsStatus;

    pub fn AudioUnitInitialize(inUnit: AudioUnit) -> OsStatus;

    pub fn AudioUnitUninitialize(inUnit: AudioUnit) -> OsStatus;

    pub fn AudioUnitGetPropertyInfo(
        inUnit: AudioUnit,
        inID: u32,
        inScope: u32,
        inElement: u32,
        outDataSize: *mut u32,
        outWritable: *mut u8,
    ) -> OsStatus;

    pub fn AudioUnitGetProperty(
        inUnit: AudioUnit,
        inID: u32,
        inScope: u32,
        inElement: u32,
        outData: *mut c_void,
        ioDataSize: *mut u32,
    ) -> OsStatus;

    pub fn AudioUnitSetProperty(
        inUnit: AudioUnit,
        inID: u32,
        inScope: u32,
        inElement: u32,
        inData: *const c_void,
        inDataSize: u32,
    ) -> OsStatus;

    pub fn AudioUnitGetParameter(
        inUnit: AudioUnit,
        inID: u32,
        inScope: u32,
        inElement: u32,
        outValue: *mut f32,
    ) -> OsStatus;

    pub fn AudioUnitSetParameter(
        inUnit: AudioUnit,
        inID: u32,
        inScope: u32,
        inElement: u32,
        inValue: f32,
        inBufferOffsetInFrames: u32,
    ) -> OsStatus;

    pub fn AudioOutputUnitStart(ci: AudioUnit) -> OsStatus;

    pub fn AudioOutputUnitStop(ci: AudioUnit) -> OsStatus;

    pub fn CFArrayGetCount(theArray: CFArrayRef) -> CFIndex;

    pub fn CFArrayGetValueAtIndex(theArray: CFArrayRef, idx: CFIndex) -> *const c_void;

    pub fn CFRelease(cf: CFTypeRef);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_au_preset_layout() {
        assert_eq!(
            std::mem::size_of::<AUPreset>(),
            2 * std::mem::size_of::<usize>()
        );
    }
}
