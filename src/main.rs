#[cfg(unix)]
fn main() {
    use clap::Parser;
    use tidbits::cli::{self, Args, Command};
    use tidbits::config::Config;

    let args = Args::parse();
    init_logging(args.verbose);

    // If --config is specified, require the file to exist
    // Otherwise, fall back to defaults if default config not found
    let cfg = if let Some(ref path) = args.config {
        match Config::load_explicit(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match Config::load(None) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                eprintln!("Using default settings.\n");
                Config::default()
            }
        }
    };

    let command = args.command.unwrap_or(Command::ReadChar {
        prompt: None,
        exclusive: false,
    });

    let result = match command {
        Command::ReadChar { prompt, exclusive } => cli::read_char(
            prompt.as_deref().unwrap_or(&cfg.reader.prompt),
            exclusive || cfg.reader.exclusive,
        ),
        Command::MidiToHz { note } => {
            cli::midi_to_hz(note);
            Ok(())
        }
        Command::HzToMidi { hz } => {
            cli::hz_to_midi(hz);
            Ok(())
        }
        Command::Resample {
            input,
            output,
            width,
            height,
            method,
        } => cli::resample(&input, &output, width, height, method, &cfg),
        Command::Embed {
            input,
            scale,
            format,
            nearest,
        } => cli::embed(&input, scale, format.as_deref(), nearest, &cfg),
        Command::Config { action } => {
            cli::handle_config_action(action, &cfg, args.config.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(not(unix))]
fn main() {
    eprintln!("Error: tidbits needs a Unix terminal");
    std::process::exit(1);
}

/// Log to stderr; `RUST_LOG` overrides the default level.
#[cfg(unix)]
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
