//! Component descriptions used to locate and open audio units.
//!
//! An Audio Unit is identified by three four-character codes: its type
//! (what kind of unit it is), its subtype (which unit) and its manufacturer.

use std::fmt;

/// Four-character code (FourCC) for component identifiers.
///
/// Must be exactly 4 ASCII characters.
///
/// # Example
///
/// ```
/// use unitkit_core::{fourcc, FourCharCode};
///
/// const MANUFACTURER: FourCharCode = fourcc!(b"appl");
/// assert_eq!(MANUFACTURER.as_u32(), u32::from_be_bytes(*b"appl"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCharCode(pub [u8; 4]);

impl FourCharCode {
    /// Create a new FourCharCode from a 4-byte array.
    ///
    /// # Panics
    /// Debug builds will panic if any byte is not ASCII.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        debug_assert!(bytes[0].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[1].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[2].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[3].is_ascii(), "FourCC bytes must be ASCII");
        Self(*bytes)
    }

    /// Rebuild a code from its big-endian `u32` form.
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// Get the FourCC as a 32-bit value (big-endian).
    pub const fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Get the FourCC as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Macro for creating FourCharCode at compile time with validation.
///
/// Fails to compile if the input is not exactly 4 ASCII bytes.
#[macro_export]
macro_rules! fourcc {
    ($s:literal) => {{
        const BYTES: &[u8] = $s;
        const _: () = assert!(BYTES.len() == 4, "FourCC must be exactly 4 bytes");
        const _: () = assert!(BYTES[0].is_ascii(), "FourCC byte 0 must be ASCII");
        const _: () = assert!(BYTES[1].is_ascii(), "FourCC byte 1 must be ASCII");
        const _: () = assert!(BYTES[2].is_ascii(), "FourCC byte 2 must be ASCII");
        const _: () = assert!(BYTES[3].is_ascii(), "FourCC byte 3 must be ASCII");
        $crate::FourCharCode::new(&[BYTES[0], BYTES[1], BYTES[2], BYTES[3]])
    }};
}

/// Apple's manufacturer code.
pub const APPLE_MANUFACTURER: FourCharCode = FourCharCode::new(b"appl");

/// Subtype of the system's default output unit.
///
/// Desktop systems route through the default output device; iOS has no
/// such unit and uses RemoteIO instead.
#[cfg(not(target_os = "ios"))]
pub const DEFAULT_OUTPUT_SUBTYPE: FourCharCode = FourCharCode::new(b"def ");

/// Subtype of the system's default output unit.
#[cfg(target_os = "ios")]
pub const DEFAULT_OUTPUT_SUBTYPE: FourCharCode = FourCharCode::new(b"rioc");

/// Component type (4-character code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Output unit (auou) - hardware or file output.
    Output,
    /// Music device/instrument (aumu).
    MusicDevice,
    /// Effect that also accepts MIDI (aumf).
    MusicEffect,
    /// Format converter (aufc).
    FormatConverter,
    /// Audio effect (aufx).
    Effect,
    /// Mixer (aumx).
    Mixer,
    /// Panner (aupn).
    Panner,
    /// Generator (augn).
    Generator,
    /// Offline effect (auol).
    OfflineEffect,
    /// MIDI processor (aumi).
    MidiProcessor,
}

impl ComponentType {
    /// Get the component type as a FourCC.
    pub const fn code(&self) -> FourCharCode {
        FourCharCode::new(match self {
            Self::Output => b"auou",
            Self::MusicDevice => b"aumu",
            Self::MusicEffect => b"aumf",
            Self::FormatConverter => b"aufc",
            Self::Effect => b"aufx",
            Self::Mixer => b"aumx",
            Self::Panner => b"aupn",
            Self::Generator => b"augn",
            Self::OfflineEffect => b"auol",
            Self::MidiProcessor => b"aumi",
        })
    }

    /// Get the component type as a 32-bit FourCC value (big-endian).
    pub const fn as_u32(&self) -> u32 {
        self.code().as_u32()
    }
}

/// Identifies an installed component.
///
/// Layout-compatible with `AudioComponentDescription`, so the Apple backend
/// passes it to the framework by pointer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentDescription {
    pub component_type: u32,
    pub component_sub_type: u32,
    pub component_manufacturer: u32,
    pub component_flags: u32,
    pub component_flags_mask: u32,
}

impl ComponentDescription {
    /// Create a description matching the given type, subtype and manufacturer.
    pub const fn new(
        component_type: ComponentType,
        subtype: FourCharCode,
        manufacturer: FourCharCode,
    ) -> Self {
        Self {
            component_type: component_type.as_u32(),
            component_sub_type: subtype.as_u32(),
            component_manufacturer: manufacturer.as_u32(),
            component_flags: 0,
            component_flags_mask: 0,
        }
    }

    /// The platform's default output unit.
    pub const fn default_output() -> Self {
        Self::new(
            ComponentType::Output,
            DEFAULT_OUTPUT_SUBTYPE,
            APPLE_MANUFACTURER,
        )
    }

    /// Set the component flags and the mask used when matching them.
    pub const fn with_flags(mut self, flags: u32, mask: u32) -> Self {
        self.component_flags = flags;
        self.component_flags_mask = mask;
        self
    }

    pub const fn component_type_code(&self) -> FourCharCode {
        FourCharCode::from_u32(self.component_type)
    }

    pub const fn subtype_code(&self) -> FourCharCode {
        FourCharCode::from_u32(self.component_sub_type)
    }

    pub const fn manufacturer_code(&self) -> FourCharCode {
        FourCharCode::from_u32(self.component_manufacturer)
    }
}

impl fmt::Display for ComponentDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.component_type_code(),
            self.subtype_code(),
            self.manufacturer_code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc() {
        let code = fourcc!(b"aufx");
        assert_eq!(code.as_u32(), 0x6175_6678);
        assert_eq!(code.as_str(), "aufx");
        assert_eq!(FourCharCode::from_u32(code.as_u32()), code);
    }

    #[test]
    fn test_component_type_codes() {
        assert_eq!(ComponentType::Output.code().as_str(), "auou");
        assert_eq!(ComponentType::Effect.code().as_str(), "aufx");
        assert_eq!(ComponentType::MidiProcessor.code().as_str(), "aumi");
        assert_eq!(
            ComponentType::MusicDevice.as_u32(),
            u32::from_be_bytes(*b"aumu")
        );
    }

    #[test]
    fn test_default_output() {
        let desc = ComponentDescription::default_output();
        assert_eq!(desc.component_type_code(), fourcc!(b"auou"));
        assert_eq!(desc.manufacturer_code(), APPLE_MANUFACTURER);
        assert_eq!(desc.subtype_code(), DEFAULT_OUTPUT_SUBTYPE);
        assert_eq!(desc.component_flags, 0);
    }

    #[cfg(not(target_os = "ios"))]
    #[test]
    fn test_desktop_default_output_display() {
        assert_eq!(
            ComponentDescription::default_output().to_string(),
            "auou/def /appl"
        );
    }

    #[test]
    fn test_with_flags() {
        let desc = ComponentDescription::new(
            ComponentType::Effect,
            fourcc!(b"dely"),
            APPLE_MANUFACTURER,
        )
        .with_flags(1, 1);
        assert_eq!(desc.component_flags, 1);
        assert_eq!(desc.component_flags_mask, 1);
    }

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<ComponentDescription>(), 20);
    }
}
