//! Render callback registration types.
//!
//! The callback runs on the framework's real-time audio thread. It is a bare
//! function pointer plus an opaque context pointer. Closures are not accepted.

use std::ffi::c_void;

use crate::error::OsStatus;

/// Render action flags (`AudioUnitRenderActionFlags`).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderActionFlags(pub u32);

impl RenderActionFlags {
    pub const PRE_RENDER: Self = Self(1 << 2);
    pub const POST_RENDER: Self = Self(1 << 3);
    /// The buffers contain only silence.
    pub const OUTPUT_IS_SILENCE: Self = Self(1 << 4);
    pub const PREFLIGHT: Self = Self(1 << 5);
    pub const RENDER: Self = Self(1 << 6);
    pub const COMPLETE: Self = Self(1 << 7);
    pub const POST_RENDER_ERROR: Self = Self(1 << 8);
    pub const DO_NOT_CHECK_RENDER_ARGS: Self = Self(1 << 9);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// SMPTE time (`SMPTETime`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SmpteTime {
    pub subframes: i16,
    pub subframe_divisor: i16,
    pub counter: u32,
    pub smpte_type: u32,
    pub flags: u32,
    pub hours: i16,
    pub minutes: i16,
    pub seconds: i16,
    pub frames: i16,
}

/// Audio time stamp (`AudioTimeStamp`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioTimeStamp {
    pub sample_time: f64,
    pub host_time: u64,
    pub rate_scalar: f64,
    pub word_clock_time: u64,
    pub smpte_time: SmpteTime,
    pub flags: u32,
    pub reserved: u32,
}

/// One buffer of an [`AudioBufferList`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AudioBuffer {
    pub number_channels: u32,
    pub data_byte_size: u32,
    pub data: *mut c_void,
}

/// Variable-length buffer list (`AudioBufferList`).
///
/// The framework allocates `number_buffers` entries; only the first is
/// declared here.
#[repr(C)]
#[derive(Debug)]
pub struct AudioBufferList {
    pub number_buffers: u32,
    pub buffers: [AudioBuffer; 1],
}

impl AudioBufferList {
    /// View all buffers in the list.
    ///
    /// # Safety
    ///
    /// `self` must point to a list allocated with at least `number_buffers`
    /// entries, as the framework provides during a render call.
    pub unsafe fn buffers_mut(&mut self) -> &mut [AudioBuffer] {
        // SAFETY: caller guarantees the trailing storage holds
        // `number_buffers` entries.
        unsafe {
            std::slice::from_raw_parts_mut(self.buffers.as_mut_ptr(), self.number_buffers as usize)
        }
    }
}

/// Render procedure signature (`AURenderCallback`).
pub type RenderProc = unsafe extern "C" fn(
    context: *mut c_void,
    action_flags: *mut RenderActionFlags,
    time_stamp: *const AudioTimeStamp,
    bus_number: u32,
    number_frames: u32,
    data: *mut AudioBufferList,
) -> OsStatus;

/// A render procedure and the context pointer handed back to it.
///
/// Layout-compatible with `AURenderCallbackStruct`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RenderCallback {
    pub input_proc: Option<RenderProc>,
    pub input_proc_ref_con: *mut c_void,
}

impl RenderCallback {
    pub const fn new(proc_: RenderProc, context: *mut c_void) -> Self {
        Self {
            input_proc: Some(proc_),
            input_proc_ref_con: context,
        }
    }

    /// An empty registration, which removes a previously installed callback.
    pub const fn none() -> Self {
        Self {
            input_proc: None,
            input_proc_ref_con: std::ptr::null_mut(),
        }
    }

    pub fn context(&self) -> *mut c_void {
        self.input_proc_ref_con
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn silence(
        _context: *mut c_void,
        action_flags: *mut RenderActionFlags,
        _time_stamp: *const AudioTimeStamp,
        _bus_number: u32,
        _number_frames: u32,
        _data: *mut AudioBufferList,
    ) -> OsStatus {
        // SAFETY: the test passes a valid flags pointer.
        unsafe { (*action_flags).0 |= RenderActionFlags::OUTPUT_IS_SILENCE.0 };
        OsStatus::NO_ERR
    }

    #[test]
    fn test_ffi_layouts() {
        assert_eq!(std::mem::size_of::<SmpteTime>(), 24);
        assert_eq!(std::mem::size_of::<AudioTimeStamp>(), 64);
        assert_eq!(
            std::mem::size_of::<RenderCallback>(),
            2 * std::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_callback_invocation() {
        let mut context = 0u32;
        let callback = RenderCallback::new(silence, &mut context as *mut u32 as *mut c_void);
        let proc_ = callback.input_proc.unwrap();

        let mut flags = RenderActionFlags::default();
        let stamp = AudioTimeStamp::default();
        // SAFETY: all pointers are valid for the duration of the call.
        let status = unsafe {
            proc_(
                callback.context(),
                &mut flags,
                &stamp,
                0,
                512,
                std::ptr::null_mut(),
            )
        };
        assert!(status.is_ok());
        assert!(flags.contains(RenderActionFlags::OUTPUT_IS_SILENCE));
    }

    #[test]
    fn test_none_callback() {
        let callback = RenderCallback::none();
        assert!(callback.input_proc.is_none());
        assert!(callback.context().is_null());
    }
}
