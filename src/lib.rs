//! tidbits library crate.
//!
//! Small, independent helpers: a raw-mode single-character terminal reader,
//! MIDI/frequency conversion, a real FFT wrapper, and image resample/embed
//! helpers. None of the modules share state.

#[cfg(unix)]
pub mod cli;
pub mod config;
pub mod fft;
pub mod imageutils;
pub mod pitch;
#[cfg(unix)]
pub mod terminal;
