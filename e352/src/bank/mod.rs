//! Wavetable banks and their on-disk representation
//!
//! A bank is what the E352/E370 loads in one go: 64 wavetables of 256 samples each. On
//! disk it's stored as a mono, 16-bit, 44.1kHz WAVE file of exactly 16384 samples.

mod options;

pub use options::{ChannelPolicy, LoadOptions, SampleBound};

use crate::{
    wave::{FormatChunk, WaveFile, WaveReadError, WaveWriter},
    wavetable::{TABLE_LEN, Wavetable, WavetableMut},
};
use std::{
    fs::{File, create_dir_all},
    io::{self, BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};
use ux::u6;

/// A full bank of 64 wavetables
///
/// ```no_run
/// # use e352::bank::Bank;
/// // Construct a bank of 64 blank (silent) tables
/// let bank = Bank::new();
///
/// // Load a bank from a path on disk
/// let bank = Bank::from_path("multiplier.wav")?;
///
/// // Write it back out again
/// bank.to_path("copy.wav")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    tables: [[i16; TABLE_LEN]; Self::TABLE_COUNT],
}

impl Bank {
    /// The number of wavetables in a bank
    pub const TABLE_COUNT: usize = 64;

    /// The number of samples in a bank, across all tables
    pub const LEN: usize = Self::TABLE_COUNT * TABLE_LEN;

    /// The sample rate banks are written with
    pub const SAMPLE_RATE: u32 = 44100;

    /// Construct a bank of blank wavetables
    pub fn new() -> Self {
        Self {
            tables: [[0; TABLE_LEN]; Self::TABLE_COUNT],
        }
    }

    /// The 64 wavetables, in order
    pub fn tables(&self) -> impl ExactSizeIterator<Item = Wavetable<'_>> + DoubleEndedIterator {
        self.tables
            .iter()
            .enumerate()
            .map(|(index, values)| Wavetable::new(slot(index), values))
    }

    /// Mutable access to the 64 wavetables, in order
    pub fn tables_mut(
        &mut self,
    ) -> impl ExactSizeIterator<Item = WavetableMut<'_>> + DoubleEndedIterator {
        self.tables
            .iter_mut()
            .enumerate()
            .map(|(index, values)| WavetableMut::new(slot(index), values))
    }

    /// Access a single wavetable
    pub fn table(&self, index: u6) -> Wavetable<'_> {
        Wavetable::new(index, &self.tables[usize::from(u8::from(index))])
    }

    /// Mutable access to a single wavetable
    pub fn table_mut(&mut self, index: u6) -> WavetableMut<'_> {
        WavetableMut::new(index, &mut self.tables[usize::from(u8::from(index))])
    }

    /// All samples in the bank, table 0 first
    pub fn values(&self) -> Vec<i16> {
        self.tables.iter().flatten().copied().collect()
    }

    /// Deserialize a bank from an arbitrary I/O reader
    pub fn from_reader<R>(reader: R) -> Result<Self, BankReadError>
    where
        R: Read,
    {
        Self::from_reader_with(reader, &LoadOptions::default())
    }

    /// Deserialize a bank from an arbitrary I/O reader, with specific options
    pub fn from_reader_with<R>(reader: R, options: &LoadOptions) -> Result<Self, BankReadError>
    where
        R: Read,
    {
        let wave = WaveFile::from_reader(reader)?;
        Self::from_wave(&wave, options)
    }

    /// Build a bank from an already parsed WAVE file
    ///
    /// This does everything [`Bank::from_reader_with()`] does after the RIFF structure has
    /// been read, which is useful when the caller needs the [`WaveFile`] as well.
    pub fn from_wave(wave: &WaveFile, options: &LoadOptions) -> Result<Self, BankReadError> {
        let channels = wave.format.channels;
        if channels > 1 {
            match options.channels {
                ChannelPolicy::FirstChannel => {
                    warn!(channels, "Only the first channel will be loaded")
                }
                ChannelPolicy::MonoOnly => {
                    return Err(BankReadError::UnsupportedChannelCount { channels });
                }
            }
        }

        let mut samples = wave.first_channel_samples()?;
        if samples.len() != Self::LEN {
            return Err(BankReadError::WrongSampleCount {
                count: samples.len(),
            });
        }

        match options.bound {
            SampleBound::Trust => {}
            SampleBound::Clamp => {
                for sample in samples.iter_mut() {
                    *sample = (*sample).max(-32767);
                }
            }
            SampleBound::Reject => {
                if let Some(position) = samples.iter().position(|sample| *sample == i16::MIN) {
                    return Err(BankReadError::SampleOutOfRange { position });
                }
            }
        }

        let mut bank = Self::new();
        for (table, chunk) in bank.tables.iter_mut().zip(samples.chunks_exact(TABLE_LEN)) {
            table.copy_from_slice(chunk);
        }

        Ok(bank)
    }

    /// Deserialize a bank from a path on disk
    pub fn from_path<P>(path: P) -> Result<Self, BankFromPathError>
    where
        P: AsRef<Path>,
    {
        Self::from_path_with(path, &LoadOptions::default())
    }

    /// Deserialize a bank from a path on disk, with specific options
    pub fn from_path_with<P>(path: P, options: &LoadOptions) -> Result<Self, BankFromPathError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)?;
        let bank = Self::from_reader_with(BufReader::new(file), options)?;

        info!(path = %path.display(), "Loaded bank");

        Ok(bank)
    }

    /// Replace the contents of this bank with a bank on disk
    ///
    /// If loading fails, the bank is left untouched.
    pub fn load_path<P>(&mut self, path: P) -> Result<(), BankFromPathError>
    where
        P: AsRef<Path>,
    {
        self.load_path_with(path, &LoadOptions::default())
    }

    /// Replace the contents of this bank with a bank on disk, with specific options
    ///
    /// If loading fails, the bank is left untouched.
    pub fn load_path_with<P>(
        &mut self,
        path: P,
        options: &LoadOptions,
    ) -> Result<(), BankFromPathError>
    where
        P: AsRef<Path>,
    {
        *self = Self::from_path_with(path, options)?;
        Ok(())
    }

    /// Serialize the bank to an arbitrary I/O writer
    pub fn to_writer<W>(&self, writer: W) -> Result<(), io::Error>
    where
        W: Write + Seek,
    {
        let format = FormatChunk::pcm16(1, Self::SAMPLE_RATE).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "unrepresentable sample format")
        })?;

        let mut writer = WaveWriter::new(writer, format)?;
        for table in &self.tables {
            writer.write_samples(table)?;
        }
        writer.finish()?;

        Ok(())
    }

    /// Serialize the bank to a path on disk
    ///
    /// The bank is written to a temporary file next to `path` first, which then replaces
    /// `path` in one go. A failed save never leaves a half-written bank behind.
    pub fn to_path<P>(&self, path: P) -> Result<(), io::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let folder = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        create_dir_all(folder)?;

        let mut file = NamedTempFile::new_in(folder)?;
        self.to_writer(BufWriter::new(file.as_file_mut()))?;
        file.as_file().sync_all()?;
        file.persist(path)?;

        info!(path = %path.display(), "Saved bank");

        Ok(())
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

/// The index of the table stored at a position in [`Bank::tables`]
fn slot(position: usize) -> u6 {
    u6::new(position as u8)
}

/// Errors that might be returned from [`Bank::from_reader()`]
#[derive(Debug, Error)]
pub enum BankReadError {
    /// The file isn't a WAVE file this crate can decode
    #[error("Reading the WAVE file failed")]
    Wave(#[from] WaveReadError),

    /// Multi-channel files were rejected by [`ChannelPolicy::MonoOnly`]
    #[error("The file has {channels} channels, only mono is accepted")]
    UnsupportedChannelCount { channels: u16 },

    /// Banks need exactly [`Bank::LEN`] samples
    #[error("The file has {count} samples, a bank needs exactly 16384")]
    WrongSampleCount { count: usize },

    /// A `-32768` sample was rejected by [`SampleBound::Reject`]
    #[error("Sample {position} is -32768, which is out of range")]
    SampleOutOfRange { position: usize },
}

/// Errors that might be returned from [`Bank::from_path()`]
#[derive(Debug, Error)]
pub enum BankFromPathError {
    /// Opening the file itself failed
    #[error("Opening the file failed")]
    FileOpen(#[from] io::Error),

    /// Deserialization failed
    #[error("Reading the bank from file failed")]
    Read(#[from] BankReadError),
}
