//! The subset of the RIFF/WAVE container the E352/E370 understands
//!
//! Only uncompressed 16-bit PCM is supported. Files are little-endian throughout: a `RIFF`
//! header, the `WAVE` form type, then a sequence of tagged, length-prefixed chunks of which
//! only `fmt ` and `data` are interpreted. Any other chunk is skipped.

mod decode;
mod encode;

pub use decode::{WaveFile, WaveReadError};
pub use encode::WaveWriter;

/// The tag every RIFF file starts with
pub const RIFF_ID: [u8; 4] = *b"RIFF";

/// The RIFF form type of a WAVE file
pub const WAVE_ID: [u8; 4] = *b"WAVE";

/// The tag of the chunk describing the sample format
pub const FMT_ID: [u8; 4] = *b"fmt ";

/// The tag of the chunk containing the sample frames
pub const DATA_ID: [u8; 4] = *b"data";

/// Audio format code for uncompressed PCM
pub const PCM_FORMAT: u16 = 1;

/// The header fields stored in a `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChunk {
    /// The codec, where 1 means uncompressed PCM
    pub audio_format: u16,

    /// The number of interleaved channels per frame
    pub channels: u16,

    /// Frames per second
    pub sample_rate: u32,

    /// Bytes per second (`sample_rate * block_align`)
    pub byte_rate: u32,

    /// Bytes per frame, all channels included
    pub block_align: u16,

    /// The width of a single sample
    pub bits_per_sample: u16,
}

impl FormatChunk {
    /// The number of bytes the fields take up in a `fmt ` chunk
    pub const LEN: usize = 16;

    /// Describe uncompressed 16-bit PCM for a given channel count and sample rate
    ///
    /// Returns `None` if the block alignment or byte rate don't fit their header fields.
    pub fn pcm16(channels: u16, sample_rate: u32) -> Option<Self> {
        let block_align = channels.checked_mul(2)?;
        let byte_rate = sample_rate.checked_mul(u32::from(block_align))?;

        Some(Self {
            audio_format: PCM_FORMAT,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: 16,
        })
    }

    fn from_bytes(bytes: &[u8; Self::LEN]) -> Self {
        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        Self {
            audio_format: u16_at(0),
            channels: u16_at(2),
            sample_rate: u32_at(4),
            byte_rate: u32_at(8),
            block_align: u16_at(12),
            bits_per_sample: u16_at(14),
        }
    }

    fn to_bytes(self) -> [u8; Self::LEN] {
        let mut bytes = [0; Self::LEN];
        bytes[0..2].copy_from_slice(&self.audio_format.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.channels.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.byte_rate.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcm16() {
        let format = FormatChunk::pcm16(1, 44100).unwrap();
        assert_eq!(format.audio_format, PCM_FORMAT);
        assert_eq!(format.byte_rate, 88200);
        assert_eq!(format.block_align, 2);
        assert_eq!(format.bits_per_sample, 16);

        let stereo = FormatChunk::pcm16(2, 48000).unwrap();
        assert_eq!(stereo.block_align, 4);
        assert_eq!(stereo.byte_rate, 192000);
    }

    #[test]
    fn pcm16_overflow() {
        // 32768 channels need a 65536 byte frame
        assert_eq!(FormatChunk::pcm16(32768, 44100), None);
        assert_eq!(FormatChunk::pcm16(u16::MAX, 1), None);

        // Byte rate no longer fits in 32 bits
        assert_eq!(FormatChunk::pcm16(2, u32::MAX / 2), None);
        assert_eq!(FormatChunk::pcm16(1, u32::MAX / 2 + 1), None);

        // Right at the edge still works
        let format = FormatChunk::pcm16(32767, 1).unwrap();
        assert_eq!(format.block_align, 65534);
        assert_eq!(FormatChunk::pcm16(1, u32::MAX / 2).unwrap().byte_rate, u32::MAX - 1);
    }

    #[test]
    fn field_layout() {
        let format = FormatChunk::pcm16(1, 44100).unwrap();
        assert_eq!(
            format.to_bytes(),
            [1, 0, 1, 0, 0x44, 0xAC, 0, 0, 0x88, 0x58, 0x01, 0, 2, 0, 16, 0]
        );
        assert_eq!(FormatChunk::from_bytes(&format.to_bytes()), format);
    }
}
