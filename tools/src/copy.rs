//! The `copy` subcommand

use crate::utils::check_for_overwrite;
use anyhow::{Context, Error, Result};
use clap::Args;
use e352::{bank::Bank, u6, wavetable::TableError};
use std::path::PathBuf;

/// Arguments for the `copy` subcommand
#[derive(Args)]
#[clap(author, version, about = "Copy a wavetable from one bank into another", long_about = None)]
pub struct CopyArgs {
    /// The bank to copy from
    source: PathBuf,

    /// The index of the table to copy (0-63)
    source_index: u8,

    /// The bank to copy into. A blank bank is created if it doesn't exist yet
    destination: PathBuf,

    /// The index the table should end up at (0-63)
    destination_index: u8,

    /// Overwrite the destination without asking
    #[clap(short = 'y', long)]
    yes: bool,
}

/// Copy a wavetable from one bank into another
pub fn copy(args: CopyArgs) -> Result<()> {
    let source_index = table_index(args.source_index)?;
    let destination_index = table_index(args.destination_index)?;

    let source = Bank::from_path(&args.source)
        .context(format!("Could not load {}", args.source.to_string_lossy()))?;

    let mut destination = if args.destination.exists() {
        Bank::from_path(&args.destination).context(format!(
            "Could not load {}",
            args.destination.to_string_lossy()
        ))?
    } else {
        Bank::new()
    };

    copy_table(&source, source_index, &mut destination, destination_index)
        .context("Could not copy the table")?;

    if check_for_overwrite(&args.destination, args.yes)? {
        destination.to_path(&args.destination).context(format!(
            "Could not write bank to {}",
            args.destination.to_string_lossy()
        ))?;

        println!(
            "{}:{:02} => {}:{:02}",
            args.source.to_string_lossy(),
            args.source_index,
            args.destination.to_string_lossy(),
            args.destination_index
        );
    }

    Ok(())
}

/// Copy the contents of a single table between banks
pub fn copy_table(
    source: &Bank,
    source_index: u6,
    destination: &mut Bank,
    destination_index: u6,
) -> Result<(), TableError> {
    let values = source.table(source_index).values();
    destination
        .table_mut(destination_index)
        .set_values(values.as_slice())
}

fn table_index(index: u8) -> Result<u6> {
    if usize::from(index) < Bank::TABLE_COUNT {
        Ok(u6::new(index))
    } else {
        Err(Error::msg(format!(
            "Table index {index} is out of range, banks have 64 tables (0-63)"
        )))
    }
}
