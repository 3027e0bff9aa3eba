//! Replay application: drives a session from a recording and exports the board.

use crate::recording::{RecordingError, RecordingEvent};
use crate::shortcuts::ShortcutRegistry;
use airink_core::commands::{Command, CommandOutcome};
use airink_core::config::{ConfigError, EngineConfig};
use airink_core::session::Session;
use airink_core::style::Theme;
use airink_core::surface::SurfaceError;
use airink_render::{RendererError, export_png};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Recording(#[from] RecordingError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Engine tunables and board size.
    pub engine: EngineConfig,
    /// Theme the session starts with.
    pub theme: Theme,
    /// Directory for exports without an explicit path.
    pub output_dir: PathBuf,
    /// Write a final image once the replay ends.
    pub export_on_finish: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            theme: Theme::Light,
            output_dir: PathBuf::from("."),
            export_on_finish: true,
        }
    }
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames_processed: usize,
    pub frames_skipped: usize,
    pub commands: usize,
    pub ignored: usize,
    pub exports: Vec<PathBuf>,
}

/// Owns the session and handles export requests.
pub struct App {
    config: AppConfig,
    session: Session,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        config.engine.validate()?;
        let mut session = Session::new(&config.engine)?;
        session.execute(Command::SetTheme(config.theme));
        log::info!(
            "Board {} ({}x{})",
            session.board().id,
            config.engine.board.width,
            config.engine.board.height
        );
        Ok(Self { config, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Default export location: `whiteboard-<board id>.png` in the output directory.
    pub fn default_export_path(&self) -> PathBuf {
        self.config
            .output_dir
            .join(format!("whiteboard-{}.png", self.session.board().id))
    }

    /// Write the flattened board to `path`, or to the default location.
    pub fn export(&mut self, path: Option<&Path>) -> Result<PathBuf, AppError> {
        let path = path.map_or_else(|| self.default_export_path(), Path::to_path_buf);
        let png_data = export_png(self.session.board(), self.session.theme())?;
        std::fs::write(&path, &png_data).map_err(|source| AppError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Exported PNG to: {}", path.display());
        Ok(path)
    }

    fn run_command(&mut self, command: Command, summary: &mut ReplaySummary) -> Result<(), AppError> {
        summary.commands += 1;
        if self.session.execute(command) == CommandOutcome::ExportRequested {
            let path = self.export(None)?;
            summary.exports.push(path);
        }
        Ok(())
    }

    /// Apply one recorded event.
    pub fn handle_event(&mut self, event: &RecordingEvent, summary: &mut ReplaySummary) -> Result<(), AppError> {
        match event {
            RecordingEvent::Frame(frame) => {
                if self.session.process_frame(frame).is_some() {
                    summary.frames_processed += 1;
                } else {
                    summary.frames_skipped += 1;
                }
            }
            RecordingEvent::Command(phrase) => match Command::from_phrase(phrase) {
                Some(command) => self.run_command(command, summary)?,
                None => {
                    log::warn!("Unrecognized command: {:?}", phrase);
                    summary.ignored += 1;
                }
            },
            RecordingEvent::Key(chord) => match ShortcutRegistry::find_chord(chord) {
                Some(command) => self.run_command(command, summary)?,
                None => {
                    log::warn!("Unbound key: {:?}", chord);
                    summary.ignored += 1;
                }
            },
        }
        Ok(())
    }

    /// Replay a whole recording. The active stroke or shape is finished at
    /// the end, then the board is exported if configured.
    pub fn replay(&mut self, events: &[RecordingEvent], output: Option<&Path>) -> Result<ReplaySummary, AppError> {
        let mut summary = ReplaySummary::default();
        for event in events {
            self.handle_event(event, &mut summary)?;
        }
        self.session.board_mut().finish_active();

        if self.config.export_on_finish {
            let path = self.export(output)?;
            summary.exports.push(path);
        }
        log::info!(
            "Replay done: {} frames, {} skipped, {} commands, {} ignored",
            summary.frames_processed,
            summary.frames_skipped,
            summary.commands,
            summary.ignored
        );
        Ok(summary)
    }
}
