//! Error types for unit operations.
//!
//! Framework failures are carried as [`OsStatus`] values and surfaced
//! unchanged through [`UnitError::Status`]. The few errors the wrapper
//! raises on its own (out-of-range preset index, missing component) get
//! their own variants.

use std::fmt;

use crate::component::ComponentDescription;

/// Status code returned by the audio framework (`OSStatus`).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsStatus(pub i32);

impl OsStatus {
    /// No error.
    pub const NO_ERR: Self = Self(0);

    /// Generic parameter error (`kAudio_ParamError`).
    pub const PARAM_ERR: Self = Self(-50);

    /// The property is not supported.
    pub const INVALID_PROPERTY: Self = Self(-10879);

    /// The parameter is not supported.
    pub const INVALID_PARAMETER: Self = Self(-10878);

    /// The specified element is not valid.
    pub const INVALID_ELEMENT: Self = Self(-10877);

    /// There is no connection (generally an input bus with nothing attached).
    pub const NO_CONNECTION: Self = Self(-10876);

    /// The unit could not be initialized.
    pub const FAILED_INITIALIZATION: Self = Self(-10875);

    /// More frames requested than the unit is configured for.
    pub const TOO_MANY_FRAMES_TO_PROCESS: Self = Self(-10874);

    /// The file is not a valid preset or state file.
    pub const INVALID_FILE: Self = Self(-10871);

    /// The file type is not recognized.
    pub const UNKNOWN_FILE_TYPE: Self = Self(-10870);

    /// No file was specified.
    pub const FILE_NOT_SPECIFIED: Self = Self(-10869);

    /// The stream format is not supported.
    pub const FORMAT_NOT_SUPPORTED: Self = Self(-10868);

    /// The unit has not been initialized.
    pub const UNINITIALIZED: Self = Self(-10867);

    /// The scope is not valid.
    pub const INVALID_SCOPE: Self = Self(-10866);

    /// The property cannot be written.
    pub const PROPERTY_NOT_WRITABLE: Self = Self(-10865);

    /// The operation cannot be performed in the current context.
    pub const CANNOT_DO_IN_CURRENT_CONTEXT: Self = Self(-10863);

    /// The property value is not valid.
    pub const INVALID_PROPERTY_VALUE: Self = Self(-10851);

    /// The property is valid but has no value in the current state.
    pub const PROPERTY_NOT_IN_USE: Self = Self(-10850);

    /// The unit is already initialized.
    pub const INITIALIZED: Self = Self(-10849);

    /// Offline render setup is invalid.
    pub const INVALID_OFFLINE_RENDER: Self = Self(-10848);

    /// The unit is not authorized to run.
    pub const UNAUTHORIZED: Self = Self(-10847);

    /// Returns true for `noErr`.
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Convert the status into a result, passing the code through unchanged.
    pub fn check(self) -> Result<(), OsStatus> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Human-readable name of a known code.
    pub fn description(self) -> &'static str {
        match self {
            Self::NO_ERR => "no error",
            Self::PARAM_ERR => "parameter error",
            Self::INVALID_PROPERTY => "invalid property",
            Self::INVALID_PARAMETER => "invalid parameter",
            Self::INVALID_ELEMENT => "invalid element",
            Self::NO_CONNECTION => "no connection",
            Self::FAILED_INITIALIZATION => "failed initialization",
            Self::TOO_MANY_FRAMES_TO_PROCESS => "too many frames to process",
            Self::INVALID_FILE => "invalid file",
            Self::UNKNOWN_FILE_TYPE => "unknown file type",
            Self::FILE_NOT_SPECIFIED => "file not specified",
            Self::FORMAT_NOT_SUPPORTED => "format not supported",
            Self::UNINITIALIZED => "unit uninitialized",
            Self::INVALID_SCOPE => "invalid scope",
            Self::PROPERTY_NOT_WRITABLE => "property not writable",
            Self::CANNOT_DO_IN_CURRENT_CONTEXT => "cannot do in current context",
            Self::INVALID_PROPERTY_VALUE => "invalid property value",
            Self::PROPERTY_NOT_IN_USE => "property not in use",
            Self::INITIALIZED => "unit already initialized",
            Self::INVALID_OFFLINE_RENDER => "invalid offline render",
            Self::UNAUTHORIZED => "unauthorized",
            _ => "unknown status",
        }
    }
}

impl fmt::Display for OsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OSStatus {} ({})", self.0, self.description())
    }
}

impl std::error::Error for OsStatus {}

impl From<i32> for OsStatus {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// Error type for unit operations.
#[derive(Debug)]
pub enum UnitError {
    /// Status returned by the framework, passed through unchanged.
    Status(OsStatus),

    /// A preset index outside the cached factory preset list.
    PresetIndexOutOfRange { index: usize, len: usize },

    /// No installed component matches the description.
    ComponentNotFound(ComponentDescription),

    /// A view could not be constructed.
    ViewUnavailable(String),
}

impl UnitError {
    /// The framework status behind this error, if there is one.
    pub fn os_status(&self) -> Option<OsStatus> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "Framework error: {}", status),
            Self::PresetIndexOutOfRange { index, len } => write!(
                f,
                "Preset index {} out of range ({} factory presets)",
                index, len
            ),
            Self::ComponentNotFound(desc) => write!(f, "No component matches {}", desc),
            Self::ViewUnavailable(msg) => write!(f, "View unavailable: {}", msg),
        }
    }
}

impl std::error::Error for UnitError {}

impl From<OsStatus> for UnitError {
    fn from(status: OsStatus) -> Self {
        Self::Status(status)
    }
}

/// Result type alias for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_passes_status_through() {
        assert!(OsStatus::NO_ERR.check().is_ok());
        assert_eq!(
            OsStatus(-10868).check(),
            Err(OsStatus::FORMAT_NOT_SUPPORTED)
        );
        assert_eq!(OsStatus(1234).check(), Err(OsStatus(1234)));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(OsStatus::INVALID_SCOPE.description(), "invalid scope");
        assert_eq!(OsStatus(42).description(), "unknown status");
        assert_eq!(
            OsStatus::INVALID_PARAMETER.to_string(),
            "OSStatus -10878 (invalid parameter)"
        );
    }

    #[test]
    fn test_unit_error_status() {
        let err: UnitError = OsStatus::UNINITIALIZED.into();
        assert_eq!(err.os_status(), Some(OsStatus::UNINITIALIZED));

        let err = UnitError::PresetIndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.os_status(), None);
        assert_eq!(
            err.to_string(),
            "Preset index 5 out of range (3 factory presets)"
        );
    }
}
