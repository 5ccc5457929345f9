//! Stream format descriptions.
//!
//! [`StreamFormat`] mirrors `AudioStreamBasicDescription` field for field so
//! it can be handed to the framework without conversion.

use crate::component::FourCharCode;

/// Linear PCM format id (`lpcm`).
pub const FORMAT_LINEAR_PCM: u32 = FourCharCode::new(b"lpcm").as_u32();

/// Format flags for linear PCM.
pub mod format_flags {
    pub const IS_FLOAT: u32 = 1 << 0;
    pub const IS_BIG_ENDIAN: u32 = 1 << 1;
    pub const IS_SIGNED_INTEGER: u32 = 1 << 2;
    pub const IS_PACKED: u32 = 1 << 3;
    pub const IS_ALIGNED_HIGH: u32 = 1 << 4;
    pub const IS_NON_INTERLEAVED: u32 = 1 << 5;
    pub const IS_NON_MIXABLE: u32 = 1 << 6;

    /// Native-endian flag for the target.
    #[cfg(target_endian = "big")]
    pub const NATIVE_ENDIAN: u32 = IS_BIG_ENDIAN;
    /// Native-endian flag for the target.
    #[cfg(target_endian = "little")]
    pub const NATIVE_ENDIAN: u32 = 0;
}

/// Audio Stream Basic Description structure.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreamFormat {
    pub sample_rate: f64,
    pub format_id: u32,
    pub format_flags: u32,
    pub bytes_per_packet: u32,
    pub frames_per_packet: u32,
    pub bytes_per_frame: u32,
    pub channels_per_frame: u32,
    pub bits_per_channel: u32,
    pub reserved: u32,
}

impl StreamFormat {
    /// Native-endian packed 32-bit float PCM.
    ///
    /// Non-interleaved formats describe one channel per buffer, so the byte
    /// counts are per channel.
    pub const fn linear_pcm_f32(sample_rate: f64, channels: u32, interleaved: bool) -> Self {
        let sample_bytes = std::mem::size_of::<f32>() as u32;
        let mut flags =
            format_flags::IS_FLOAT | format_flags::IS_PACKED | format_flags::NATIVE_ENDIAN;
        let frame_bytes = if interleaved {
            sample_bytes * channels
        } else {
            flags |= format_flags::IS_NON_INTERLEAVED;
            sample_bytes
        };
        Self {
            sample_rate,
            format_id: FORMAT_LINEAR_PCM,
            format_flags: flags,
            bytes_per_packet: frame_bytes,
            frames_per_packet: 1,
            bytes_per_frame: frame_bytes,
            channels_per_frame: channels,
            bits_per_channel: 32,
            reserved: 0,
        }
    }

    /// Native-endian packed interleaved 16-bit signed integer PCM.
    pub const fn linear_pcm_i16(sample_rate: f64, channels: u32) -> Self {
        let frame_bytes = std::mem::size_of::<i16>() as u32 * channels;
        Self {
            sample_rate,
            format_id: FORMAT_LINEAR_PCM,
            format_flags: format_flags::IS_SIGNED_INTEGER
                | format_flags::IS_PACKED
                | format_flags::NATIVE_ENDIAN,
            bytes_per_packet: frame_bytes,
            frames_per_packet: 1,
            bytes_per_frame: frame_bytes,
            channels_per_frame: channels,
            bits_per_channel: 16,
            reserved: 0,
        }
    }

    pub const fn is_linear_pcm(&self) -> bool {
        self.format_id == FORMAT_LINEAR_PCM
    }

    pub const fn is_float(&self) -> bool {
        self.format_flags & format_flags::IS_FLOAT != 0
    }

    pub const fn is_interleaved(&self) -> bool {
        self.format_flags & format_flags::IS_NON_INTERLEAVED == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_asbd() {
        assert_eq!(std::mem::size_of::<StreamFormat>(), 40);
    }

    #[test]
    fn test_f32_interleaved() {
        let fmt = StreamFormat::linear_pcm_f32(48000.0, 2, true);
        assert!(fmt.is_linear_pcm());
        assert!(fmt.is_float());
        assert!(fmt.is_interleaved());
        assert_eq!(fmt.bytes_per_frame, 8);
        assert_eq!(fmt.bytes_per_packet, 8);
        assert_eq!(fmt.channels_per_frame, 2);
        assert_eq!(fmt.bits_per_channel, 32);
    }

    #[test]
    fn test_f32_non_interleaved() {
        let fmt = StreamFormat::linear_pcm_f32(44100.0, 2, false);
        assert!(!fmt.is_interleaved());
        assert_eq!(fmt.bytes_per_frame, 4);
        assert_eq!(fmt.channels_per_frame, 2);
    }

    #[test]
    fn test_i16() {
        let fmt = StreamFormat::linear_pcm_i16(44100.0, 2);
        assert!(!fmt.is_float());
        assert!(fmt.is_interleaved());
        assert_eq!(fmt.bytes_per_frame, 4);
        assert_eq!(fmt.bits_per_channel, 16);
        assert_ne!(fmt.format_flags & format_flags::IS_SIGNED_INTEGER, 0);
    }
}
