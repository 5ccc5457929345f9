//! # unitkit
//!
//! Typed wrapper over Audio Unit instances.
//!
//! unitkit wraps an already-open unit and forwards parameter, bypass,
//! stream format, render callback, preset and view calls to the framework,
//! surfacing the framework's status unchanged.
//!
//! ## Architecture
//!
//! ```text
//! AudioUnitHandle<B>  (preset cache, typed API)
//!        ↓
//! B: UnitBackend      (AudioUnitRef on Apple platforms, MockUnit in tests)
//!        ↓
//! AudioToolbox C API
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use unitkit::prelude::*;
//!
//! let instance = ComponentInstance::open(&ComponentDescription::new(
//!     ComponentType::Effect,
//!     fourcc!(b"mrev"),
//!     APPLE_MANUFACTURER,
//! ))?;
//! let unit = instance.handle();
//!
//! for preset in unit.factory_presets()? {
//!     println!("{}", preset);
//! }
//! unit.set_present_preset_index(0)?;
//! unit.set_parameter(ParameterAddress::global(0), 50.0, 0)?;
//! ```

// Re-export sub-crates
pub use unitkit_au as au;
pub use unitkit_core as core;

pub use unitkit_core::fourcc;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use unitkit_core::{
        // Wrapper and backend seam
        AudioUnitHandle, UnitBackend,
        // Addressing
        Element, ParameterAddress, ParameterId, ParameterValue, Scope,
        // Formats and rendering
        AudioBufferList, AudioTimeStamp, RenderActionFlags, RenderCallback, RenderProc,
        StreamFormat,
        // Presets
        Preset,
        // Component configuration
        ComponentDescription, ComponentType, FourCharCode, APPLE_MANUFACTURER,
        DEFAULT_OUTPUT_SUBTYPE,
        // Errors
        OsResult, OsStatus, UnitError, UnitResult,
        // Geometry
        ViewSize,
    };

    pub use unitkit_core::fourcc;

    #[cfg(feature = "mock")]
    pub use unitkit_core::mock::MockUnit;

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    pub use unitkit_au::{AudioUnitRef, ComponentInstance, SystemAudioUnit};
    #[cfg(target_os = "macos")]
    pub use unitkit_au::CocoaView;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use unitkit_core::mock::MockUnit;

    #[test]
    fn test_prelude_drives_a_unit() {
        let unit = AudioUnitHandle::new(MockUnit::with_presets(vec![
            Preset::new(0, "Slapback"),
            Preset::new(1, "Tape Echo"),
        ]));

        unit.set_stream_format(&StreamFormat::linear_pcm_f32(48000.0, 2, false))
            .unwrap();
        unit.set_parameter(ParameterAddress::new(2, Scope::GLOBAL, 0), 0.75, 0)
            .unwrap();
        assert_eq!(
            unit.parameter(ParameterAddress::global(2)).unwrap(),
            0.75
        );

        let tape = Preset::new(1, "");
        assert_eq!(unit.index_of_factory_preset(&tape).unwrap(), Some(1));
        unit.set_present_preset(&tape).unwrap();
        assert_eq!(unit.present_preset_index().unwrap(), Some(1));
    }

    #[test]
    fn test_fourcc_reexport() {
        let code: FourCharCode = fourcc!(b"aufx");
        assert_eq!(code, ComponentType::Effect.code());
    }
}
