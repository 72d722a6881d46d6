//! # E352 Tools
//!
//! The [Synthesis Technology](https://synthtech.com) E352 and E370 are Eurorack wavetable
//! oscillators. Both load their wavetables in banks of 64 tables of 256 samples, stored as
//! plain mono WAVE files on an SD card.
//!
//! The module doesn't let you draw tables yourself, so you need tools to build banks and shuffle
//! tables around. This crate provides a command-line utility that does exactly that.
//!
//! ## Inspect
//!
//! ```console
//! e352-tools-inspect 0.1.0
//! Inspect WAVE files and the banks in them
//!
//! USAGE:
//!     e352-tools inspect [OPTIONS] [PATHS]...
//!
//! ARGS:
//!     <PATHS>...    The path(s) to inspect
//!
//! OPTIONS:
//!     -b, --brief        Only print the file format, not the per-table summary
//!     -h, --help         Print help information
//!     -r, --recursive    Search folders recursively
//!     -V, --version      Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! $ e352-tools inspect multiplier.wav
//! multiplier.wav
//!   PCM | 1ch | 44100Hz | 16bit | block align 2 | 16384 frames
//!     0 | min -32767 | max  32767
//!     1 | min -32767 | max  32767
//!   ...
//! ```
//!
//! ## Generate
//!
//! ```console
//! e352-tools-generate 0.1.0
//! Generate a bank of pulse trains
//!
//! USAGE:
//!     e352-tools generate [OPTIONS] --output <OUTPUT>
//!
//! OPTIONS:
//!         --floor <FLOOR>      The value between pulses [default: -32767]
//!     -h, --help               Print help information
//!     -o, --output <OUTPUT>    The output path
//!         --peak <PEAK>        The value of the pulses themselves [default: 32767]
//!     -V, --version            Print version information
//!     -y, --yes                Overwrite the output without asking
//! ```
//!
//! ## Copy
//!
//! ```console
//! e352-tools-copy 0.1.0
//! Copy a wavetable from one bank into another
//!
//! USAGE:
//!     e352-tools copy [OPTIONS] <SOURCE> <SOURCE_INDEX> <DESTINATION> <DESTINATION_INDEX>
//! ```
//!
//! ### Example
//!
//! ```console
//! $ e352-tools copy multiplier.wav 3 mine.wav 0
//! multiplier.wav:03 => mine.wav:00
//! ```

pub mod copy;
pub mod generate;
pub mod inspect;
pub(crate) mod utils;
