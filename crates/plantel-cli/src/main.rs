//! `plantel` — terminal UI for the Plantel employee roster.
//!
//! # Usage
//!
//! ```
//! plantel --url http://127.0.0.1:8000
//! plantel --config ~/.config/plantel/config.toml
//! ```
//!
//! The session (user + bearer token) persists in `auth-storage.json` under
//! the state directory, so an authenticated run goes straight to the
//! directory; the login screen only appears when no valid session record
//! exists.

mod app;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plantel_client::{ApiClient, ApiConfig, SessionStore};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "plantel", about = "Terminal UI for the Plantel employee roster")]
struct Args {
  /// Path to a TOML config file (url, state_dir, download_dir).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the roster backend (default: http://127.0.0.1:8000).
  #[arg(long, env = "PLANTEL_URL")]
  url: Option<String>,

  /// Directory holding the durable session record.
  #[arg(long, env = "PLANTEL_STATE_DIR")]
  state_dir: Option<PathBuf>,

  /// Directory where Excel exports are written.
  #[arg(long, env = "PLANTEL_DOWNLOAD_DIR")]
  download_dir: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  state_dir:    Option<PathBuf>,
  #[serde(default)]
  download_dir: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Errors are rare and short; they go to stderr where they surface after
  // the alternate screen is torn down.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());
  let state_dir = args
    .state_dir
    .or(file_cfg.state_dir)
    .or_else(|| dirs::data_dir().map(|d| d.join("plantel")))
    .unwrap_or_else(|| PathBuf::from("."));
  let download_dir = args
    .download_dir
    .or(file_cfg.download_dir)
    .or_else(dirs::download_dir)
    .unwrap_or_else(|| PathBuf::from("."));

  let client = ApiClient::new(ApiConfig { base_url })?;

  // Rehydrate the session before anything renders: the starting screen is
  // decided from durable state, never from an "unknown" placeholder.
  let store = SessionStore::open(&state_dir)
    .with_context(|| format!("opening session store in {}", state_dir.display()))?;

  let mut app = App::new(client, store, download_dir);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Initial data load for an already-authenticated session. A failure
  // degrades to an empty list with a status message; the app still runs.
  if app.screen == app::Screen::Directory {
    app.load_employees().await;
  }

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
