use super::{DATA_ID, FMT_ID, FormatChunk, RIFF_ID, WAVE_ID};
use std::io::{self, Seek, SeekFrom, Write};

/// Streaming writer for 16-bit PCM WAVE files
///
/// The header is written up front with placeholder lengths. Samples are appended as they
/// come in, and [`WaveWriter::finish()`] seeks back to fill in the real chunk lengths.
/// A writer that's dropped without finishing leaves a file with zeroed lengths behind.
pub struct WaveWriter<W> {
    writer: W,
    start: u64,
    data_len: u32,
}

impl<W> WaveWriter<W>
where
    W: Write + Seek,
{
    /// Offset of the RIFF length, relative to the start of the file
    const RIFF_LEN_OFFSET: u64 = 4;

    /// Offset of the `data` chunk length, relative to the start of the file
    const DATA_LEN_OFFSET: u64 = 40;

    /// The number of bytes counted by the RIFF length, aside from the sample data
    const HEADER_LEN: u32 = 4 + 8 + FormatChunk::LEN as u32 + 8;

    /// Start a new file with the given format
    ///
    /// The format has to describe 16-bit samples.
    pub fn new(mut writer: W, format: FormatChunk) -> Result<Self, io::Error> {
        if format.bits_per_sample != 16 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "only 16-bit samples can be written",
            ));
        }

        let start = writer.stream_position()?;

        writer.write_all(&RIFF_ID)?;
        writer.write_all(&0u32.to_le_bytes())?;
        writer.write_all(&WAVE_ID)?;

        writer.write_all(&FMT_ID)?;
        writer.write_all(&(FormatChunk::LEN as u32).to_le_bytes())?;
        writer.write_all(&format.to_bytes())?;

        writer.write_all(&DATA_ID)?;
        writer.write_all(&0u32.to_le_bytes())?;

        Ok(Self {
            writer,
            start,
            data_len: 0,
        })
    }

    /// Append interleaved samples to the `data` chunk
    pub fn write_samples(&mut self, samples: &[i16]) -> Result<(), io::Error> {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        self.data_len = u32::try_from(bytes.len())
            .ok()
            .and_then(|len| self.data_len.checked_add(len))
            .filter(|len| len.checked_add(Self::HEADER_LEN).is_some())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "too much data for a RIFF file")
            })?;

        self.writer.write_all(&bytes)
    }

    /// Back-fill the chunk lengths, flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W, io::Error> {
        let end = self.writer.stream_position()?;

        self.writer
            .seek(SeekFrom::Start(self.start + Self::RIFF_LEN_OFFSET))?;
        self.writer
            .write_all(&(Self::HEADER_LEN + self.data_len).to_le_bytes())?;

        self.writer
            .seek(SeekFrom::Start(self.start + Self::DATA_LEN_OFFSET))?;
        self.writer.write_all(&self.data_len.to_le_bytes())?;

        self.writer.seek(SeekFrom::Start(end))?;
        self.writer.flush()?;

        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveFile;
    use std::io::Cursor;

    fn mono() -> FormatChunk {
        FormatChunk::pcm16(1, 44100).unwrap()
    }

    #[test]
    fn canonical_header() {
        let mut writer = WaveWriter::new(Cursor::new(Vec::new()), mono()).unwrap();
        writer.write_samples(&[1, -1]).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[4..8], &40u32.to_le_bytes());
        assert_eq!(&bytes[8..16], b"WAVEfmt ");
        assert_eq!(&bytes[16..20], &16u32.to_le_bytes());
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(&bytes[40..44], &4u32.to_le_bytes());
        assert_eq!(&bytes[44..48], &[1, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn matches_python_wave_module() {
        let expected = include_bytes!("../../test/multiplier.wav");
        let samples = WaveFile::from_reader(Cursor::new(expected))
            .unwrap()
            .first_channel_samples()
            .unwrap();

        let mut writer = WaveWriter::new(Cursor::new(Vec::new()), mono()).unwrap();
        for frame in samples.chunks(1000) {
            writer.write_samples(frame).unwrap();
        }

        assert_eq!(writer.finish().unwrap().into_inner(), expected);
    }

    #[test]
    fn written_after_offset() {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_all(b"junk").unwrap();

        let mut writer = WaveWriter::new(cursor, mono()).unwrap();
        writer.write_samples(&[7; 3]).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let wave = WaveFile::from_reader(&bytes[4..]).unwrap();
        assert_eq!(wave.first_channel_samples().unwrap(), vec![7, 7, 7]);
    }

    #[test]
    fn rejects_other_widths() {
        let mut format = mono();
        format.bits_per_sample = 24;

        assert!(WaveWriter::new(Cursor::new(Vec::new()), format).is_err());
    }
}
