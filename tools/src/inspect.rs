//! The `inspect` subcommand

use crate::utils::iter_files;
use anyhow::{Context, Result};
use clap::Args;
use e352::{
    bank::{Bank, LoadOptions},
    wave::{FormatChunk, PCM_FORMAT, WaveFile},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Arguments for the `inspect` subcommand
#[derive(Args)]
#[clap(author, version, about = "Inspect WAVE files and the banks in them", long_about = None)]
pub struct InspectArgs {
    /// The path(s) to inspect
    paths: Vec<PathBuf>,

    /// Search folders recursively
    #[clap(short, long)]
    recursive: bool,

    /// Only print the file format, not the per-table summary
    #[clap(short, long)]
    brief: bool,
}

/// Inspect WAVE files, or even entire directories for their contents
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let entries: Vec<_> = iter_files(&args.paths, args.recursive, &["wav"]).collect();

    if let Some((last, rest)) = entries.split_last() {
        for entry in rest {
            print(entry.path(), args.brief)?;
            println!();
        }

        print(last.path(), args.brief)?;
    }

    Ok(())
}

fn print(path: &Path, brief: bool) -> Result<()> {
    let bytes = fs::read(path).context(format!("Could not read {}", path.display()))?;

    println!("{}", path.display());

    let wave = match WaveFile::from_reader(bytes.as_slice()) {
        Ok(wave) => wave,
        Err(error) => {
            println!("  Not a readable WAVE file: {error}");
            return Ok(());
        }
    };

    println!("  {}", describe(&wave.format, wave.data.len()));

    let bank = match Bank::from_wave(&wave, &LoadOptions::default()) {
        Ok(bank) => bank,
        Err(error) => {
            println!("  Not a bank: {error}");
            return Ok(());
        }
    };

    if !brief {
        for (index, (min, max)) in summarize(&bank).into_iter().enumerate() {
            println!("  {index:>3} | min {min:>6} | max {max:>6}");
        }
    }

    Ok(())
}

/// A one-line description of a `fmt ` chunk and the size of its data
pub fn describe(format: &FormatChunk, data_len: usize) -> String {
    let codec = match format.audio_format {
        PCM_FORMAT => "PCM".to_owned(),
        code => format!("format {code}"),
    };

    let frames = match format.block_align {
        0 => 0,
        block_align => data_len / block_align as usize,
    };

    format!(
        "{codec} | {}ch | {}Hz | {}bit | block align {} | {frames} frames",
        format.channels, format.sample_rate, format.bits_per_sample, format.block_align
    )
}

/// The lowest and highest value of every table in a bank
pub fn summarize(bank: &Bank) -> Vec<(i16, i16)> {
    bank.tables()
        .map(|table| {
            let values = table.values();
            let min = values.iter().copied().min().unwrap_or_default();
            let max = values.iter().copied().max().unwrap_or_default();
            (min, max)
        })
        .collect()
}
