//! Gesture media control: pinch for volume, open palm for play/pause.

use anyhow::Result;
use clap::Parser;
use gesture_media_control::{
    app::{AppOptions, GestureApp},
    config::{Config, EXAMPLE_CONFIG},
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pose source (stdin, file, command)
    #[arg(short, long, conflicts_with_all = ["input", "command"])]
    source: Option<String>,

    /// Recorded pose file (JSON lines), implies --source file
    #[arg(short, long, conflicts_with = "command")]
    input: Option<PathBuf>,

    /// Estimator command, implies --source command
    #[arg(long)]
    command: Option<String>,

    /// Arguments for the estimator command
    #[arg(last = true)]
    command_args: Vec<String>,

    /// Action sink (x11, log)
    #[arg(short = 'k', long)]
    sink: Option<String>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Disable the per-frame status line
    #[arg(long)]
    no_overlay: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Gesture Media Control");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides the file
    if let Some(source) = args.source {
        config.source.kind = source;
    }
    if let Some(path) = args.input {
        config.source.kind = "file".to_string();
        config.source.path = Some(path);
    }
    if let Some(command) = args.command {
        config.source.kind = "command".to_string();
        config.source.command = Some(command);
        config.source.args = args.command_args;
    }
    if let Some(sink) = args.sink {
        config.sink.kind = sink;
    }
    if args.max_frames.is_some() {
        config.source.max_frames = args.max_frames;
    }
    if args.no_overlay {
        config.overlay.enabled = false;
    }

    config.validate()?;

    let options = AppOptions {
        overlay: config.overlay.enabled,
        max_frames: config.source.max_frames,
    };
    let source = config.create_source()?;
    let sink = config.create_sink()?;

    let mut app = GestureApp::new(source, sink, options);
    app.run()?;

    Ok(())
}
