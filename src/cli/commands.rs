//! Subcommand handlers.

use std::path::{Path, PathBuf};

use super::args::ConfigAction;
use super::enums::Method;
use super::interrupt::{self, InterruptGuard};
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG};
use crate::imageutils::{self, EmbeddedImage, ImageError, PixelArray, ResampleMethod};
use crate::pitch;
use crate::terminal::{self, ExclusiveReader, RawCharReader, ReadChar, ReadCharError};

/// Exit status for a run cut short by SIGINT (128 + signal number)
pub const EXIT_INTERRUPTED: i32 = 130;

/// Errors surfaced by subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Read(#[from] ReadCharError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Read(ReadCharError::Interrupted) => EXIT_INTERRUPTED,
            _ => 1,
        }
    }
}

/// Prompt, wait for one key and print what was read.
pub fn read_char(prompt: &str, exclusive: bool) -> Result<(), CommandError> {
    println!("{}", prompt);

    let _sigint = InterruptGuard::install()?;
    let result = if exclusive {
        ExclusiveReader::new(RawCharReader::stdin()).read_one_char()
    } else {
        terminal::read_one_char()
    };

    if interrupt::interrupted() {
        log::debug!("SIGINT received during read");
    }
    println!("I read: {:?}", result?);
    Ok(())
}

pub fn midi_to_hz(note: f64) {
    println!("{:.3} Hz", pitch::midi_to_hz(note));
}

pub fn hz_to_midi(hz: f64) {
    println!("{:.3}", pitch::hz_to_midi(hz));
}

/// Resize `input` to `width` x `height` and write it to `output`.
///
/// The output format follows the output file's extension.
pub fn resample(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    method: Option<Method>,
    config: &Config,
) -> Result<(), CommandError> {
    let method = match method {
        Some(m) => ResampleMethod::from(m),
        None => config.resample.method()?,
    };

    let img = image::open(input).map_err(ImageError::from)?;
    let arr = PixelArray::from_dynamic_image(&img);
    log::debug!(
        "resampling {} ({:?}) to {}x{} with {}",
        input.display(),
        arr.shape(),
        height,
        width,
        method
    );

    let resized = imageutils::resample(&arr, height, width, method)?;
    resized
        .to_dynamic_image()?
        .save(output)
        .map_err(ImageError::from)?;

    println!("Wrote {} ({}x{})", output.display(), width, height);
    Ok(())
}

/// Print `input` as an `<img>` tag. CLI values override the config.
pub fn embed(
    input: &Path,
    scale: Option<f64>,
    format: Option<&str>,
    nearest: bool,
    config: &Config,
) -> Result<(), CommandError> {
    let img = image::open(input).map_err(ImageError::from)?;
    let arr = PixelArray::from_dynamic_image(&img);

    let embedded = EmbeddedImage::new(
        &arr,
        scale.unwrap_or(config.embed.scale),
        format.unwrap_or(&config.embed.format),
        nearest || config.embed.nearest,
    )?;
    println!("{}", embedded);
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    config_path: Option<&Path>,
) -> Result<(), CommandError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Prompt: {:?}", config.reader.prompt);
            println!(
                "  Exclusive reads: {}",
                if config.reader.exclusive { "yes" } else { "no" }
            );
            println!("  Resample method: {}", config.resample.method);
            println!("  Embed scale: {}", config.embed.scale);
            println!("  Embed format: {}", config.embed.format);
            println!(
                "  Embed nearest: {}",
                if config.embed.nearest { "yes" } else { "no" }
            );
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            write_default_config(&path)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Write the commented default config to `path`, creating parent
/// directories. Refuses to overwrite an existing file.
pub fn write_default_config(path: &Path) -> Result<(), CommandError> {
    if path.exists() {
        return Err(CommandError::ConfigExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CommandError::Read(ReadCharError::Interrupted).exit_code(),
            EXIT_INTERRUPTED
        );
        assert_eq!(CommandError::Read(ReadCharError::NotATerminal).exit_code(), 1);
        assert_eq!(
            CommandError::ConfigExists(PathBuf::from("/tmp/x")).exit_code(),
            1
        );
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path).unwrap();
        let loaded = Config::load_explicit(&path).unwrap();
        assert_eq!(loaded, Config::default());

        let err = write_default_config(&path).unwrap_err();
        assert!(matches!(err, CommandError::ConfigExists(_)));
    }

    #[test]
    fn test_resample_and_embed_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]))
            .save(&input)
            .unwrap();

        let config = Config::default();
        resample(&input, &output, 2, 1, Some(Method::Nearest), &config).unwrap();
        let out = image::open(&output).unwrap();
        assert_eq!((out.width(), out.height()), (2, 1));
        assert_eq!(out.to_rgb8().get_pixel(1, 0), &image::Rgb([10, 20, 30]));

        embed(&output, Some(2.0), None, true, &config).unwrap();
    }
}
