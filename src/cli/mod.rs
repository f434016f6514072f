//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;
mod interrupt;

pub use args::{Args, Command, ConfigAction};
pub use commands::{
    embed, handle_config_action, hz_to_midi, midi_to_hz, read_char, resample,
    write_default_config, CommandError, EXIT_INTERRUPTED,
};
pub use enums::Method;
pub use interrupt::InterruptGuard;
