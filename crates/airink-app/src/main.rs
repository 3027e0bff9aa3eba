//! Main application entry point.

use airink_app::{App, AppConfig, AppError, ShortcutRegistry, load_recording};
use airink_core::config::EngineConfig;
use airink_core::style::Theme;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments for airink
#[derive(Parser, Debug)]
#[command(name = "airink")]
#[command(version, about = "Gesture-driven whiteboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines recording and export the board as PNG
    Replay {
        /// Recording file (one frame, command or key event per line)
        recording: PathBuf,

        /// Engine configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output PNG path (defaults to whiteboard-<board id>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for exports requested during the replay
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Start in dark mode
        #[arg(long)]
        dark: bool,

        /// Do not mirror the camera horizontally
        #[arg(long)]
        no_mirror: bool,

        /// Skip the export at the end of the replay
        #[arg(long)]
        no_export: bool,
    },
    /// List keyboard shortcuts
    Shortcuts,
    /// Print the default engine configuration
    DefaultConfig,
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting AirInk");

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Replay {
            recording,
            config,
            output,
            output_dir,
            dark,
            no_mirror,
            no_export,
        } => {
            let mut engine = match config {
                Some(path) => EngineConfig::load(&path)?,
                None => EngineConfig::default(),
            };
            if no_mirror {
                engine.board.mirror_x = false;
            }
            let events = load_recording(&recording)?;
            let mut app = App::new(AppConfig {
                engine,
                theme: if dark { Theme::Dark } else { Theme::Light },
                output_dir,
                export_on_finish: !no_export,
            })?;
            let summary = app.replay(&events, output.as_deref())?;
            for path in &summary.exports {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Shortcuts => {
            ShortcutRegistry::print_all();
            Ok(())
        }
        Commands::DefaultConfig => {
            let json = EngineConfig::default()
                .to_json()
                .map_err(|e| airink_core::config::ConfigError::Parse(e.to_string()))?;
            println!("{json}");
            Ok(())
        }
    }
}
