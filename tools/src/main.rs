use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use e352_tools::copy::{copy, CopyArgs};
use e352_tools::generate::{generate, GenerateArgs};
use e352_tools::inspect::{inspect, InspectArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Log what's going on
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Log everything, including the chunks of every file read
    #[clap(short, long, global = true)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Inspect(InspectArgs),
    Generate(GenerateArgs),
    Copy(CopyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(wild::args());

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Inspect(args) => inspect(&args),
        Command::Generate(args) => generate(args),
        Command::Copy(args) => copy(args),
    }
}
