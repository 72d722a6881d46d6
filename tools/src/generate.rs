//! The `generate` subcommand

use crate::utils::check_for_overwrite;
use anyhow::{Context, Result};
use clap::Args;
use e352::{bank::Bank, wavetable::TableError};
use std::path::PathBuf;
use tracing::debug;

/// Arguments for the `generate` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Generate a bank of pulse trains",
    long_about = "Generate a bank of pulse trains, where table N holds N + 1 evenly spaced pulses.\n\nSweeping through the bank on the module multiplies the pitch of the pulse train."
)]
pub struct GenerateArgs {
    /// The output path
    #[clap(short, long)]
    output: PathBuf,

    /// The value between pulses
    #[clap(long, default_value_t = -32767, allow_hyphen_values = true)]
    floor: i32,

    /// The value of the pulses themselves
    #[clap(long, default_value_t = 32767, allow_hyphen_values = true)]
    peak: i32,

    /// Overwrite the output without asking
    #[clap(short = 'y', long)]
    yes: bool,
}

/// Generate a bank of pulse trains and write it to disk
pub fn generate(args: GenerateArgs) -> Result<()> {
    let bank = pulse_trains(args.floor, args.peak).context("Invalid pulse values")?;

    if check_for_overwrite(&args.output, args.yes)? {
        bank.to_path(&args.output).context(format!(
            "Could not write bank to {}",
            args.output.to_string_lossy()
        ))?;

        println!("Wrote {}", args.output.to_string_lossy());
    }

    Ok(())
}

/// Build a bank where table `i` holds `i + 1` evenly spaced pulses
///
/// Pulses are three samples wide for up to 32 pulses per table, and two samples wide beyond
/// that so neighbouring pulses don't touch.
pub fn pulse_trains(floor: i32, peak: i32) -> Result<Bank, TableError> {
    let mut bank = Bank::new();

    for mut table in bank.tables_mut() {
        table.init_values(floor)?;

        let pulses = usize::from(u8::from(table.index())) + 1;
        let spacing = 256.0 / pulses as f64;
        let width = if pulses <= 32 { 3 } else { 2 };

        debug!(index = pulses - 1, pulses, spacing, "Generating table");

        for pulse in 0..pulses {
            let position = (pulse as f64 * spacing) as usize;
            for offset in 0..width {
                table.set_value(position + offset, peak)?;
            }
        }
    }

    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use e352::u6;
    use std::{fs, io::Cursor};
    use tempfile::tempdir;

    fn pulse_count(values: &[i16], peak: i16) -> usize {
        values
            .windows(2)
            .filter(|pair| pair[0] != peak && pair[1] == peak)
            .count()
            + usize::from(values[0] == peak)
    }

    #[test]
    fn pulses_per_table() {
        let bank = pulse_trains(-32767, 32767).unwrap();

        for (index, table) in bank.tables().enumerate() {
            assert_eq!(pulse_count(table.values(), 32767), index + 1, "table {index}");
            assert!(table.values().iter().all(|v| *v == 32767 || *v == -32767));
        }

        let widest = bank.table(u6::new(31)).values();
        assert_eq!(widest.iter().filter(|v| **v == 32767).count(), 32 * 3);

        let narrowest = bank.table(u6::new(63)).values();
        assert_eq!(narrowest.iter().filter(|v| **v == 32767).count(), 64 * 2);
    }

    #[test]
    fn matches_reference_file() {
        let reference = include_bytes!("../../e352/test/multiplier.wav");

        let mut bytes = Cursor::new(Vec::new());
        pulse_trains(-32767, 32767)
            .unwrap()
            .to_writer(&mut bytes)
            .unwrap();

        assert_eq!(bytes.into_inner(), reference);
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            pulse_trains(-40000, 0).unwrap_err(),
            TableError::ValueOutOfRange { value: -40000 }
        );
        assert_eq!(
            pulse_trains(0, 32768).unwrap_err(),
            TableError::ValueOutOfRange { value: 32768 }
        );
    }

    #[test]
    fn save_and_reload() -> Result<()> {
        let dir = tempdir()?;
        let output = dir.path().join("multiplier.wav");

        generate(GenerateArgs {
            output: output.clone(),
            floor: -32767,
            peak: 32767,
            yes: false,
        })?;

        let expected = pulse_trains(-32767, 32767)?;
        let loaded = Bank::from_path(&output)?;
        assert_eq!(loaded.values(), expected.values());
        assert_eq!(fs::metadata(&output)?.len(), 44 + 32768);

        Ok(())
    }
}
