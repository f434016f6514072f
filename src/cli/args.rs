//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::Method;

/// Small terminal, image and pitch utilities
#[derive(Parser, Debug)]
#[command(name = "tidbits")]
#[command(version, about = "Small terminal, image and pitch utilities", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wait for a single key press and show what was read (default)
    ReadChar {
        /// Text shown before waiting
        #[arg(long)]
        prompt: Option<String>,
        /// Serialize with other readers of the same terminal in this process
        #[arg(long)]
        exclusive: bool,
    },
    /// Convert a MIDI note number to a frequency in Hz
    MidiToHz {
        #[arg(allow_negative_numbers = true)]
        note: f64,
    },
    /// Convert a frequency in Hz to a MIDI note number
    HzToMidi {
        #[arg(allow_negative_numbers = true)]
        hz: f64,
    },
    /// Resize an image file channel by channel
    Resample {
        input: PathBuf,
        output: PathBuf,
        /// Output width in pixels
        #[arg(long)]
        width: u32,
        /// Output height in pixels
        #[arg(long)]
        height: u32,
        /// Resampling filter (default from config, else bicubic)
        #[arg(long, short)]
        method: Option<Method>,
    },
    /// Print an image file as an HTML <img> tag with an inline data URI
    Embed {
        input: PathBuf,
        /// Display scale relative to pixel size
        #[arg(long)]
        scale: Option<f64>,
        /// Container format (png, jpeg, bmp, ...)
        #[arg(long, short)]
        format: Option<String>,
        /// Render scaled pixels as crisp blocks
        #[arg(long)]
        nearest: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
