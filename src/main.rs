use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shapeboard::config::{ConfigError, EditorConfig};
use shapeboard::doc::EditorState;
use shapeboard::engine::{Editor, RenderSink};
use shapeboard::input::InputEvent;
use shapeboard::persist::{FileStore, StateStore, StoreError};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("{path}:{line}: invalid event: {source}")]
    Script { path: PathBuf, line: usize, source: serde_json::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Parser, Debug)]
#[command(name = "shapeboard", about = "Headless driver for the shapeboard editor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSON-lines event script through the editor.
    Replay {
        /// One `InputEvent` per line. Blank lines and `#` comments are skipped.
        #[arg(long)]
        script: PathBuf,
        /// Board file to load from and save to.
        #[arg(long, env = "SHAPEBOARD_STATE", default_value = "shapeboard.json")]
        state: PathBuf,
        /// Print the resulting state as JSON.
        #[arg(long)]
        print: bool,
    },
    /// Summarize a saved board.
    Show {
        #[arg(long, env = "SHAPEBOARD_STATE", default_value = "shapeboard.json")]
        state: PathBuf,
    },
}

/// Render sink for headless runs: counts repaint requests.
#[derive(Debug, Default)]
struct FrameCounter {
    frames: usize,
}

impl RenderSink for FrameCounter {
    fn mark_dirty(&mut self, state: &EditorState) {
        self.frames += 1;
        tracing::debug!(frame = self.frames, shapes = state.len(), "render");
    }

    fn set_cursor(&mut self, cursor: &str) {
        tracing::debug!(cursor, "cursor");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Replay { script, state, print } => replay(&script, state, print),
        Command::Show { state } => show(state),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shapeboard failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_script(path: &Path) -> Result<Vec<InputEvent>, ReplayError> {
    let raw = fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.to_owned(), source })?;
    let mut events = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|source| ReplayError::Script {
            path: path.to_owned(),
            line: idx + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

fn replay(script: &Path, state_path: PathBuf, print: bool) -> Result<(), ReplayError> {
    let config = EditorConfig::from_env()?;
    let events = read_script(script)?;
    tracing::info!(events = events.len(), state = %state_path.display(), "replaying script");

    let mut editor = Editor::open(config, FileStore::new(state_path), FrameCounter::default());
    for event in events {
        editor.handle(event);
    }

    let state = editor.state();
    tracing::info!(
        shapes = state.len(),
        frames = editor.sink().frames,
        undo_depth = editor.core().history().past().len(),
        "replay finished"
    );
    if print {
        let pretty = serde_json::to_string_pretty(state).map_err(StoreError::Encode)?;
        println!("{pretty}");
    }
    Ok(())
}

fn show(state_path: PathBuf) -> Result<(), ReplayError> {
    let store = FileStore::new(state_path);
    let Some(state) = store.load()? else {
        println!("{}: no saved board", store.path().display());
        return Ok(());
    };
    tracing::info!(path = %store.path().display(), shapes = state.len(), "loaded board");

    let t = state.transform;
    println!("{}: {} shape(s)", store.path().display(), state.len());
    println!("viewport: pan ({}, {}) zoom {}", t.pan_x, t.pan_y, t.zoom);
    for shape in state.shapes() {
        let marker = if state.selected_shape_id == Some(shape.id) { '*' } else { ' ' };
        println!(
            "{marker} {} at ({}, {}) size {}x{} fill {} stroke {} {}px",
            shape.id, shape.x, shape.y, shape.width, shape.height, shape.fill, shape.stroke, shape.stroke_width
        );
    }
    Ok(())
}
