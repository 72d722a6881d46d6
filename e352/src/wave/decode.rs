use super::{DATA_ID, FMT_ID, FormatChunk, PCM_FORMAT, RIFF_ID, WAVE_ID};
use std::io::{self, Read};
use thiserror::Error;
use tracing::debug;

/// The `fmt ` header and raw `data` payload of a WAVE file
///
/// This is what's left of a file after walking its chunks; nothing has been interpreted as
/// samples yet. Use [`WaveFile::first_channel_samples()`] to get at those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFile {
    /// The parsed `fmt ` chunk
    pub format: FormatChunk,

    /// The verbatim `data` chunk payload
    pub data: Vec<u8>,
}

impl WaveFile {
    /// Walk the chunks of a RIFF/WAVE stream
    ///
    /// Reading stops at the end of the outer RIFF chunk, so trailing bytes after it are never
    /// touched. The `fmt ` and `data` chunks may appear in either order, but both have to be
    /// present. If either appears more than once, the last one wins.
    pub fn from_reader<R>(mut reader: R) -> Result<Self, WaveReadError>
    where
        R: Read,
    {
        let tag = read_array(&mut reader)?;
        if tag != RIFF_ID {
            return Err(WaveReadError::NotRiff { tag });
        }

        let riff_len = read_u32(&mut reader)?;

        let form = read_array(&mut reader)?;
        if form != WAVE_ID {
            return Err(WaveReadError::NotWave { form });
        }

        // The RIFF length counts the form type we've just read
        let mut remaining = riff_len
            .checked_sub(4)
            .ok_or(WaveReadError::RiffTooShort { len: riff_len })?;

        let mut format = None;
        let mut data = None;

        while remaining > 0 {
            if remaining < 8 {
                return Err(WaveReadError::ChunkHeaderOverrun { remaining });
            }

            let tag: [u8; 4] = read_array(&mut reader)?;
            let len = read_u32(&mut reader)?;
            remaining -= 8;

            if len > remaining {
                return Err(WaveReadError::ChunkOverrun {
                    tag,
                    len,
                    remaining,
                });
            }
            remaining -= len;

            match tag {
                FMT_ID => {
                    if (len as usize) < FormatChunk::LEN {
                        return Err(WaveReadError::FormatChunkTooShort { len });
                    }

                    let fields = FormatChunk::from_bytes(&read_array(&mut reader)?);
                    skip(&mut reader, len - FormatChunk::LEN as u32)?;

                    debug!(?fields, "Read fmt chunk");
                    format = Some(fields);
                }
                DATA_ID => {
                    let mut bytes = Vec::new();
                    reader.by_ref().take(len.into()).read_to_end(&mut bytes)?;
                    if bytes.len() != len as usize {
                        return Err(WaveReadError::Truncated);
                    }

                    debug!(len, "Read data chunk");
                    data = Some(bytes);
                }
                _ => {
                    debug!(tag = %tag.escape_ascii(), len, "Skipping chunk");
                    skip(&mut reader, len)?;
                }
            }
        }

        Ok(Self {
            format: format.ok_or(WaveReadError::MissingFormatChunk)?,
            data: data.ok_or(WaveReadError::MissingDataChunk)?,
        })
    }

    /// Decode the first channel of every frame in the `data` payload
    ///
    /// Only 16-bit PCM is supported. In multi-channel files all but the first channel are
    /// dropped. A trailing partial frame is ignored.
    pub fn first_channel_samples(&self) -> Result<Vec<i16>, WaveReadError> {
        let FormatChunk {
            audio_format,
            channels,
            block_align,
            bits_per_sample,
            ..
        } = self.format;

        if audio_format != PCM_FORMAT {
            return Err(WaveReadError::UnsupportedAudioFormat { audio_format });
        }

        if bits_per_sample != 16 {
            return Err(WaveReadError::UnsupportedBitDepth { bits_per_sample });
        }

        if u32::from(channels) * u32::from(bits_per_sample) != u32::from(block_align) * 8 {
            return Err(WaveReadError::BlockAlignMismatch {
                channels,
                bits_per_sample,
                block_align,
            });
        }

        if channels == 0 {
            return Err(WaveReadError::NoChannels);
        }

        let samples = self
            .data
            .chunks_exact(block_align as usize)
            .map(|frame| i16::from_le_bytes([frame[0], frame[1]]))
            .collect();

        Ok(samples)
    }
}

/// Errors that might be returned from reading a [`WaveFile`]
#[derive(Debug, Error)]
pub enum WaveReadError {
    /// The stream doesn't start with `RIFF`
    #[error("Not a RIFF file (found tag \"{}\")", .tag.escape_ascii())]
    NotRiff { tag: [u8; 4] },

    /// The RIFF form type isn't `WAVE`
    #[error("Not a WAVE file (found form type \"{}\")", .form.escape_ascii())]
    NotWave { form: [u8; 4] },

    /// The RIFF length is too small to even hold the form type
    #[error("RIFF length {len} is too small")]
    RiffTooShort { len: u32 },

    /// Fewer bytes are left within the RIFF chunk than a chunk header needs
    #[error("Only {remaining} bytes left in the RIFF chunk, not enough for a chunk header")]
    ChunkHeaderOverrun { remaining: u32 },

    /// A chunk claims to be longer than what's left of the RIFF chunk
    #[error(
        "Chunk \"{}\" of {len} bytes overruns the RIFF chunk ({remaining} bytes left)",
        .tag.escape_ascii()
    )]
    ChunkOverrun { tag: [u8; 4], len: u32, remaining: u32 },

    /// The stream ended before the end of the RIFF chunk
    #[error("The file ended before the RIFF chunk did")]
    Truncated,

    /// The `fmt ` chunk can't hold all of the format fields
    #[error("The fmt chunk is {len} bytes, expected at least 16")]
    FormatChunkTooShort { len: u32 },

    /// There was no `fmt ` chunk
    #[error("The file has no fmt chunk")]
    MissingFormatChunk,

    /// There was no `data` chunk
    #[error("The file has no data chunk")]
    MissingDataChunk,

    /// The declared channel count and sample width don't add up to the block alignment
    #[error(
        "{channels} channel(s) of {bits_per_sample} bits don't match a block alignment of {block_align} bytes"
    )]
    BlockAlignMismatch {
        channels: u16,
        bits_per_sample: u16,
        block_align: u16,
    },

    /// The file declares zero channels
    #[error("The file has no channels")]
    NoChannels,

    /// The samples are stored with a codec other than uncompressed PCM
    #[error("Unsupported audio format {audio_format}, only PCM (1) is supported")]
    UnsupportedAudioFormat { audio_format: u16 },

    /// The samples aren't 16 bits wide
    #[error("Unsupported sample width of {bits_per_sample} bits, only 16 is supported")]
    UnsupportedBitDepth { bits_per_sample: u16 },

    /// Any other failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[from] io::Error),
}

impl WaveReadError {
    /// Is the file well-formed, but using an encoding that isn't supported?
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAudioFormat { .. } | Self::UnsupportedBitDepth { .. }
        )
    }
}

fn read_array<R, const N: usize>(mut reader: R) -> Result<[u8; N], WaveReadError>
where
    R: Read,
{
    let mut bytes = [0; N];
    reader.read_exact(&mut bytes).map_err(truncated_on_eof)?;
    Ok(bytes)
}

fn read_u32<R>(reader: R) -> Result<u32, WaveReadError>
where
    R: Read,
{
    read_array(reader).map(u32::from_le_bytes)
}

fn skip<R>(reader: R, len: u32) -> Result<(), WaveReadError>
where
    R: Read,
{
    let skipped = io::copy(&mut reader.take(len.into()), &mut io::sink())?;
    if skipped != u64::from(len) {
        return Err(WaveReadError::Truncated);
    }

    Ok(())
}

fn truncated_on_eof(error: io::Error) -> WaveReadError {
    match error.kind() {
        io::ErrorKind::UnexpectedEof => WaveReadError::Truncated,
        _ => WaveReadError::Io(error),
    }
}
