//! Owned unit instances.
//!
//! [`ComponentInstance`] is the creating side of a unit: it finds a
//! component, instantiates it, and disposes it on drop. Wrappers borrow
//! from it through [`ComponentInstance::unit`] and can never outlive it.

use std::ptr;

use unitkit_core::{AudioUnitHandle, ComponentDescription, UnitError, UnitResult};

use crate::sys;
use crate::unit_ref::AudioUnitRef;

/// An open unit instance, disposed on drop.
#[derive(Debug)]
pub struct ComponentInstance {
    raw: sys::AudioUnit,
    description: ComponentDescription,
    initialized: bool,
}

impl ComponentInstance {
    /// Open the first installed component matching `description`.
    ///
    /// The instance is not initialized; configure formats and callbacks,
    /// then call [`ComponentInstance::initialize`].
    pub fn open(description: &ComponentDescription) -> UnitResult<Self> {
        // SAFETY: a null component starts the search; `description` is a
        // valid AudioComponentDescription.
        let component = unsafe { sys::AudioComponentFindNext(ptr::null_mut(), description) };
        if component.is_null() {
            return Err(UnitError::ComponentNotFound(*description));
        }

        let mut raw: sys::AudioUnit = ptr::null_mut();
        // SAFETY: `component` was returned by the framework; `raw` is a
        // valid out pointer.
        unsafe { sys::AudioComponentInstanceNew(component, &mut raw) }.check()?;

        log::debug!("Opened component {}", description);
        Ok(Self {
            raw,
            description: *description,
            initialized: false,
        })
    }

    /// Open the platform's default output unit.
    pub fn default_output() -> UnitResult<Self> {
        Self::open(&ComponentDescription::default_output())
    }

    pub fn description(&self) -> &ComponentDescription {
        &self.description
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Allocate the unit's render resources.
    pub fn initialize(&mut self) -> UnitResult<()> {
        // SAFETY: `raw` is open for the lifetime of `self`.
        unsafe { sys::AudioUnitInitialize(self.raw) }.check()?;
        self.initialized = true;
        Ok(())
    }

    /// Release the unit's render resources. No-op when not initialized.
    pub fn uninitialize(&mut self) -> UnitResult<()> {
        if !self.initialized {
            return Ok(());
        }
        // SAFETY: `raw` is open for the lifetime of `self`.
        unsafe { sys::AudioUnitUninitialize(self.raw) }.check()?;
        self.initialized = false;
        Ok(())
    }

    /// Borrow the unit.
    pub fn unit(&self) -> AudioUnitRef<'_> {
        // SAFETY: `raw` stays open until `self` is dropped, which the
        // borrow prevents while the reference lives.
        unsafe { AudioUnitRef::from_raw(self.raw) }
    }

    /// Borrow the unit behind a fresh handle wrapper.
    pub fn handle(&self) -> AudioUnitHandle<AudioUnitRef<'_>> {
        AudioUnitHandle::new(self.unit())
    }
}

impl Drop for ComponentInstance {
    fn drop(&mut self) {
        if let Err(e) = self.uninitialize() {
            log::error!("Failed to uninitialize {}: {}", self.description, e);
        }
        // SAFETY: `raw` was created by AudioComponentInstanceNew and is
        // disposed exactly once, here.
        if let Err(status) = unsafe { sys::AudioComponentInstanceDispose(self.raw) }.check() {
            log::error!("Failed to dispose {}: {}", self.description, status);
        } else {
            log::debug!("Disposed component {}", self.description);
        }
    }
}

#[cfg(all(test, target_os = "macos"))]
mod tests {
    use super::*;
    use unitkit_core::{fourcc, ComponentType, Scope, StreamFormat, APPLE_MANUFACTURER};

    #[test]
    fn test_missing_component() {
        let desc = ComponentDescription::new(
            ComponentType::Effect,
            fourcc!(b"zzzz"),
            fourcc!(b"none"),
        );
        let err = ComponentInstance::open(&desc).unwrap_err();
        assert!(matches!(err, UnitError::ComponentNotFound(d) if d == desc));
    }

    #[test]
    fn test_default_output_stream_format() {
        let instance = ComponentInstance::default_output().unwrap();
        let unit = instance.handle();

        let format = StreamFormat::linear_pcm_f32(44100.0, 2, false);
        unit.set_stream_format(&format).unwrap();
        assert_eq!(unit.stream_format(Scope::INPUT, 0).unwrap(), format);
    }

    #[test]
    fn test_factory_presets_cached() {
        let desc = ComponentDescription::new(
            ComponentType::Effect,
            fourcc!(b"mrev"),
            APPLE_MANUFACTURER,
        );
        let instance = ComponentInstance::open(&desc).unwrap();
        let unit = instance.handle();

        let first: Vec<i32> = unit
            .factory_presets()
            .unwrap()
            .iter()
            .map(|p| p.number())
            .collect();
        let second: Vec<i32> = unit
            .factory_presets()
            .unwrap()
            .iter()
            .map(|p| p.number())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_initialize_state() {
        let mut instance = ComponentInstance::default_output().unwrap();
        instance.initialize().unwrap();
        assert!(instance.is_initialized());
        instance.uninitialize().unwrap();
        assert!(!instance.is_initialized());
        instance.uninitialize().unwrap();
    }
}
