//! Reading, writing and manipulating wavetable banks for the Synthesis Technology E352 and
//! E370 oscillator modules
//!
//! A [`Bank`](bank::Bank) holds 64 wavetables of 256 signed 16-bit values each, handed out as
//! [`Wavetable`](wavetable::Wavetable) and [`WavetableMut`](wavetable::WavetableMut) views. The modules load banks from plain mono WAVE files, which this crate can both
//! decode and produce:
//!
//! ```no_run
//! # use e352::bank::Bank;
//! let mut bank = Bank::new();
//!
//! for mut table in bank.tables_mut() {
//!     table.init_values(-32767)?;
//!     table.set_value(0, 32767)?;
//! }
//!
//! bank.to_path("clicks.wav")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod bank;
pub mod wave;
pub mod wavetable;

pub use ux::u6;
