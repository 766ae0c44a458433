//! Application state machine and event dispatcher.

use std::path::PathBuf;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use plantel_client::{ApiClient, Credentials, SessionStore, download};
use plantel_core::{
  directory::Directory,
  modal::{ModalFlow, ModalState},
};

/// Roster years the backend currently serves.
pub const YEARS: [i32; 2] = [2024, 2025];

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Credential form; the only screen reachable while unauthenticated.
  Login,
  /// The employee directory, with its modal layer.
  Directory,
}

// ─── Login form ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
  Username,
  Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
  pub focus:    LoginField,
  /// User-facing Spanish message from the last failed attempt.
  pub error:    Option<String>,
}

impl Default for LoginField {
  fn default() -> Self {
    Self::Username
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// De-duplicating view over the current year's records.
  pub directory: Directory,

  /// Modal layer: detail view and duplicate chooser.
  pub modal: ModalFlow,

  /// Currently selected roster year.
  pub year: i32,

  /// Whether the user is typing a search query.
  pub search_active: bool,

  /// Cursor position within the *visible* (deduplicated) list.
  pub list_cursor: usize,

  /// Cursor position within the duplicate chooser.
  pub chooser_cursor: usize,

  /// Scroll offset within the detail modal.
  pub detail_scroll: usize,

  /// A directory fetch is in flight.
  pub loading: bool,

  /// An export download is in flight ("downloading" indicator).
  pub exporting: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub login: LoginForm,

  /// Where export workbooks are written.
  pub download_dir: PathBuf,

  pub client: ApiClient,
  pub store:  SessionStore,
}

impl App {
  /// The session store must already be rehydrated; the starting screen
  /// follows directly from it, so no guard ever sees an "unknown" state.
  pub fn new(client: ApiClient, store: SessionStore, download_dir: PathBuf) -> Self {
    let screen = if store.is_authenticated() {
      Screen::Directory
    } else {
      Screen::Login
    };
    Self {
      screen,
      directory: Directory::new(),
      modal: ModalFlow::new(),
      year: YEARS[YEARS.len() - 1],
      search_active: false,
      list_cursor: 0,
      chooser_cursor: 0,
      detail_scroll: 0,
      loading: false,
      exporting: false,
      status_msg: String::new(),
      login: LoginForm::default(),
      download_dir,
      client,
      store,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the selected year's records. Errors degrade to an empty list
  /// with the loading flag cleared; the view never crashes on a fetch
  /// failure.
  pub async fn load_employees(&mut self) {
    self.loading = true;
    self.status_msg = format!("Cargando empleados de {}…", self.year);

    match self
      .client
      .list_employees(self.store.session(), self.year)
      .await
    {
      Ok(records) => {
        self.directory.set_records(records);
        self.status_msg = String::new();
      }
      Err(e) => {
        tracing::error!("loading employees for {}: {e}", self.year);
        self.directory.set_records(Vec::new());
        self.status_msg = e.user_message().to_string();
      }
    }

    self.list_cursor = 0;
    self.loading = false;
  }

  /// Switch to the next roster year and refetch. The fetch is awaited
  /// inline, so year switches cannot interleave.
  pub async fn cycle_year(&mut self) {
    let idx = YEARS.iter().position(|y| *y == self.year).unwrap_or(0);
    self.year = YEARS[(idx + 1) % YEARS.len()];
    self.load_employees().await;
  }

  // ── Login / logout ────────────────────────────────────────────────────────

  async fn submit_login(&mut self) -> anyhow::Result<()> {
    self.login.error = None;
    let credentials = Credentials {
      username: self.login.username.trim().to_string(),
      password: self.login.password.clone(),
    };

    match self.client.login(&credentials).await {
      Ok(resp) => {
        self.store.set_auth(resp.user, resp.access)?;
        self.login = LoginForm::default();
        self.screen = Screen::Directory;
        self.load_employees().await;
      }
      Err(e) => {
        tracing::warn!("login failed: {e}");
        let message = match &e {
          plantel_client::Error::Auth | plantel_client::Error::Network(_) => {
            e.user_message()
          }
          _ => "Error al iniciar sesión. Intenta nuevamente.",
        };
        self.login.error = Some(message.to_string());
        self.login.password.clear();
      }
    }
    Ok(())
  }

  async fn logout(&mut self) -> anyhow::Result<()> {
    // The backend's logout is advisory; a failure there must not keep the
    // user signed in locally.
    if let Err(e) = self.client.logout(self.store.session()).await {
      tracing::warn!("server logout failed: {e}");
    }
    self.store.clear_auth()?;
    self.modal.reset();
    self.directory = Directory::new();
    self.search_active = false;
    self.list_cursor = 0;
    self.screen = Screen::Login;
    Ok(())
  }

  // ── Export ────────────────────────────────────────────────────────────────

  /// Download the Excel export. The indicator is cleared unconditionally:
  /// a failure logs, leaves no file, and shows no error dialog.
  pub async fn export_excel(&mut self) {
    self.exporting = true;
    self.status_msg = "Descargando exportación…".to_string();

    match self.client.export_excel(self.store.session()).await {
      Ok(bytes) => {
        match download::save_export(&bytes, &self.download_dir, Local::now()) {
          Ok(path) => self.status_msg = format!("Exportado: {}", path.display()),
          Err(e) => {
            tracing::error!("writing export file: {e}");
            self.status_msg = String::new();
          }
        }
      }
      Err(e) => {
        tracing::error!("export failed: {e}");
        self.status_msg = String::new();
      }
    }

    self.exporting = false;
  }

  // ── Click resolution ──────────────────────────────────────────────────────

  /// Open the entry under the list cursor: resolve the full duplicate
  /// group for its name and let the modal flow decide between the detail
  /// view and the chooser.
  pub fn open_selected(&mut self) {
    let Some(record) = self.directory.visible().get(self.list_cursor).copied()
    else {
      return;
    };
    let group: Vec<_> = self
      .directory
      .duplicates_for(&record.full_name)
      .into_iter()
      .cloned()
      .collect();

    self.chooser_cursor = 0;
    self.detail_scroll = 0;
    if let Err(e) = self.modal.open(group) {
      tracing::warn!("open modal: {e}");
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    match self.screen {
      Screen::Login => self.handle_login_key(key).await,
      Screen::Directory if self.search_active => {
        self.handle_search_key(key);
        Ok(true)
      }
      Screen::Directory => match self.modal.state() {
        ModalState::Browsing => self.handle_list_key(key).await,
        ModalState::ChoosingDuplicate { .. } => {
          self.handle_chooser_key(key);
          Ok(true)
        }
        ModalState::ViewingSingle { .. }
        | ModalState::ViewingFromDuplicates { .. } => {
          self.handle_detail_key(key);
          Ok(true)
        }
      },
    }
  }

  async fn handle_login_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => return Ok(false),
      KeyCode::Tab | KeyCode::BackTab => {
        self.login.focus = match self.login.focus {
          LoginField::Username => LoginField::Password,
          LoginField::Password => LoginField::Username,
        };
      }
      KeyCode::Enter => self.submit_login().await?,
      KeyCode::Backspace => {
        match self.login.focus {
          LoginField::Username => self.login.username.pop(),
          LoginField::Password => self.login.password.pop(),
        };
      }
      KeyCode::Char(c) => match self.login.focus {
        LoginField::Username => self.login.username.push(c),
        LoginField::Password => self.login.password.push(c),
      },
      _ => {}
    }
    Ok(true)
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.directory.set_query("");
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.search_active = false;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        let mut q = self.directory.query().to_string();
        q.pop();
        self.directory.set_query(q);
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        let mut q = self.directory.query().to_string();
        q.push(c);
        self.directory.set_query(q);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.directory.visible().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter => self.open_selected(),

      KeyCode::Char('/') => {
        self.search_active = true;
        self.directory.set_query("");
        self.list_cursor = 0;
      }

      KeyCode::Char('y') => self.cycle_year().await,
      KeyCode::Char('e') => self.export_excel().await,
      KeyCode::Char('L') => self.logout().await?,

      _ => {}
    }
    Ok(true)
  }

  fn handle_chooser_key(&mut self, key: KeyEvent) {
    let group_len = match self.modal.state() {
      ModalState::ChoosingDuplicate { group } => group.len(),
      _ => return,
    };

    match key.code {
      KeyCode::Esc => {
        self.modal.close();
        self.chooser_cursor = 0;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        if self.chooser_cursor + 1 < group_len {
          self.chooser_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.chooser_cursor = self.chooser_cursor.saturating_sub(1);
      }
      KeyCode::Enter => {
        let id = match self.modal.state() {
          ModalState::ChoosingDuplicate { group } => {
            group.get(self.chooser_cursor).map(|r| r.id)
          }
          _ => None,
        };
        if let Some(id) = id {
          self.detail_scroll = 0;
          if let Err(e) = self.modal.choose(id) {
            tracing::warn!("choose duplicate: {e}");
          }
        }
      }
      _ => {}
    }
  }

  fn handle_detail_key(&mut self, key: KeyEvent) {
    match key.code {
      // Asymmetric close lives in the modal flow: a detail reached through
      // the chooser goes back to the chooser.
      KeyCode::Esc => {
        self.modal.close();
        self.detail_scroll = 0;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }
      _ => {}
    }
  }
}
