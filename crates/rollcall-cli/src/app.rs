//! Form session state and event dispatcher.
//!
//! The session owns the last fetched list, the form view-model, the edit lock
//! and the delete-confirmation modal. Every mutation goes through the
//! [`Backend`] and is followed by a full re-fetch; nothing is patched locally.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rollcall_core::{
  ValidationError,
  form::{FormField, MateriaForm},
  materia::{Materia, MateriaInput},
};
use uuid::Uuid;

use crate::client::Backend;

pub const FINISH_EDIT_BEFORE_EDIT: &str =
  "Finish the current edit before editing another subject.";
pub const FINISH_EDIT_BEFORE_DELETE: &str = "Finish the current edit before deleting a subject.";
const NOT_EDITING: &str = "No subject is being edited.";
const NO_PENDING_DELETE: &str = "No deletion is pending.";
const UNKNOWN_RECORD: &str = "That subject is no longer listed.";

// ─── Outcome ──────────────────────────────────────────────────────────────────

/// Result of a user-triggered operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The operation reached the store (or changed local state) successfully.
  Applied,
  /// Refused locally; the message is also in [`App::error_message`].
  Rejected(String),
  /// The store call failed; the message is also in [`App::request_error`].
  Failed(String),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level session state.
pub struct App<B> {
  /// Records from the last successful fetch.
  pub materias: Vec<Materia>,

  pub form: MateriaForm,

  /// Input with keyboard focus.
  pub focus: FormField,

  /// Record bound to the form. At most one record is editable at a time.
  pub edit_id: Option<Uuid>,

  /// Record awaiting delete confirmation; the modal is open iff `Some`.
  pub pending_delete: Option<Uuid>,

  /// Last local rejection (validation or edit lock).
  pub error_message: Option<String>,

  /// Last failed store call. Cleared by the next successful one.
  pub request_error: Option<String>,

  /// One-line confirmation of the last applied operation.
  pub status_msg: String,

  /// Cursor position within `materias`.
  pub card_cursor: usize,

  backend: B,
}

impl<B> App<B> {
  pub fn modal_visible(&self) -> bool { self.pending_delete.is_some() }

  pub fn is_editing(&self) -> bool { self.edit_id.is_some() }

  /// The record under the card cursor, if any.
  pub fn cursor_materia(&self) -> Option<&Materia> { self.materias.get(self.card_cursor) }
}

impl<B: Backend> App<B> {
  /// Create a session with an empty list and a blank form in create mode.
  pub fn new(backend: B) -> Self {
    Self {
      materias: Vec::new(),
      form: MateriaForm::default(),
      focus: FormField::Materia,
      edit_id: None,
      pending_delete: None,
      error_message: None,
      request_error: None,
      status_msg: String::new(),
      card_cursor: 0,
      backend,
    }
  }

  // ── Outcome helpers ───────────────────────────────────────────────────────

  fn reject(&mut self, message: impl Into<String>) -> Outcome {
    let message = message.into();
    self.error_message = Some(message.clone());
    Outcome::Rejected(message)
  }

  fn fail(&mut self, what: &str, e: anyhow::Error) -> Outcome {
    tracing::warn!(error = %e, "{what} failed");
    let message = format!("{what} failed: {e:#}");
    self.request_error = Some(message.clone());
    Outcome::Failed(message)
  }

  fn applied(&mut self, status: &str) -> Outcome {
    self.request_error = None;
    self.status_msg = status.to_string();
    Outcome::Applied
  }

  // ── Fetch ─────────────────────────────────────────────────────────────────

  /// Replace `materias` wholesale with the store's current list.
  ///
  /// On failure the previous list is kept.
  pub async fn fetch_all(&mut self) -> Outcome {
    match self.backend.list_materias().await {
      Ok(materias) => {
        self.materias = materias;
        self.card_cursor = self.card_cursor.min(self.materias.len().saturating_sub(1));
        self.request_error = None;
        Outcome::Applied
      }
      Err(e) => self.fail("Loading subjects", e),
    }
  }

  // ── Validation ────────────────────────────────────────────────────────────

  /// Check the form against the current list; sets or clears
  /// `error_message`. The duplicate-name check is skipped while editing.
  pub fn validate_form(&mut self) -> Result<MateriaInput, ValidationError> {
    match self.form.validate(&self.materias, self.is_editing()) {
      Ok(input) => {
        self.error_message = None;
        Ok(input)
      }
      Err(e) => {
        self.error_message = Some(e.to_string());
        Err(e)
      }
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Create when no record is being edited, update otherwise.
  pub async fn submit(&mut self) -> Outcome {
    if self.is_editing() {
      self.update().await
    } else {
      self.create().await
    }
  }

  /// Validate and submit the form as a new record, then re-fetch and clear
  /// the form. The form is kept if the store call fails.
  pub async fn create(&mut self) -> Outcome {
    let input = match self.validate_form() {
      Ok(input) => input,
      Err(e) => return Outcome::Rejected(e.to_string()),
    };

    if let Err(e) = self.backend.create_materia(&input).await {
      return self.fail("Creating subject", e);
    }

    self.form.clear();
    self.focus = FormField::Materia;
    let outcome = self.applied("Subject registered.");
    self.fetch_all().await;
    outcome
  }

  /// Bind the form to `id`, pre-filling every input from the record.
  ///
  /// Refused while another edit is in progress.
  pub fn begin_edit(&mut self, id: Uuid) -> Outcome {
    if self.is_editing() {
      return self.reject(FINISH_EDIT_BEFORE_EDIT);
    }
    let Some(record) = self.materias.iter().find(|m| m.id == id).cloned() else {
      return self.reject(UNKNOWN_RECORD);
    };

    self.form.fill_from(&record);
    self.focus = FormField::Materia;
    self.edit_id = Some(id);
    self.status_msg = "Editing subject.".to_string();
    Outcome::Applied
  }

  /// Validate and submit the form as the new values of the record being
  /// edited, then clear the form, leave edit mode and re-fetch.
  pub async fn update(&mut self) -> Outcome {
    let Some(id) = self.edit_id else {
      return self.reject(NOT_EDITING);
    };
    let input = match self.validate_form() {
      Ok(input) => input,
      Err(e) => return Outcome::Rejected(e.to_string()),
    };

    if let Err(e) = self.backend.update_materia(id, &input).await {
      return self.fail("Updating subject", e);
    }

    self.form.clear();
    self.focus = FormField::Materia;
    self.edit_id = None;
    let outcome = self.applied("Subject updated.");
    self.fetch_all().await;
    outcome
  }

  /// Leave edit mode without touching the store.
  pub fn cancel_edit(&mut self) -> Outcome {
    if !self.is_editing() {
      return self.reject(NOT_EDITING);
    }
    self.edit_id = None;
    self.form.clear();
    self.focus = FormField::Materia;
    self.error_message = None;
    self.applied("Edit cancelled.")
  }

  /// Open the confirmation modal for `id`. Refused while editing.
  pub fn request_delete(&mut self, id: Uuid) -> Outcome {
    if self.is_editing() {
      return self.reject(FINISH_EDIT_BEFORE_DELETE);
    }
    self.pending_delete = Some(id);
    Outcome::Applied
  }

  /// Delete the pending record, re-fetch and close the modal.
  ///
  /// The modal stays open if the store call fails.
  pub async fn confirm_delete(&mut self) -> Outcome {
    let Some(id) = self.pending_delete else {
      return self.reject(NO_PENDING_DELETE);
    };

    if let Err(e) = self.backend.delete_materia(id).await {
      return self.fail("Deleting subject", e);
    }

    let outcome = self.applied("Subject deleted.");
    self.fetch_all().await;
    self.pending_delete = None;
    outcome
  }

  /// Close the modal without calling the store.
  pub fn cancel_delete(&mut self) -> Outcome {
    self.pending_delete = None;
    Outcome::Applied
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global: Ctrl-C and Ctrl-Q quit from anywhere, modal included.
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
      return false;
    }

    self.status_msg.clear();

    // The modal captures every other key while open.
    if self.modal_visible() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
          self.confirm_delete().await;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
          self.cancel_delete();
        }
        _ => {}
      }
      return true;
    }

    if ctrl {
      match key.code {
        KeyCode::Char('r') => {
          self.fetch_all().await;
        }
        KeyCode::Char('e') => {
          if let Some(id) = self.cursor_materia().map(|m| m.id) {
            self.begin_edit(id);
          }
        }
        KeyCode::Char('d') => {
          if let Some(id) = self.cursor_materia().map(|m| m.id) {
            self.request_delete(id);
          }
        }
        _ => {}
      }
      return true;
    }

    match key.code {
      // Focus
      KeyCode::Tab => self.focus = self.focus.next(),
      KeyCode::BackTab => self.focus = self.focus.prev(),

      // Cards
      KeyCode::Down => {
        if self.card_cursor + 1 < self.materias.len() {
          self.card_cursor += 1;
        }
      }
      KeyCode::Up => {
        self.card_cursor = self.card_cursor.saturating_sub(1);
      }

      // Term picker
      KeyCode::Left if self.focus == FormField::Semestre => self.form.cycle_semestre(-1),
      KeyCode::Right if self.focus == FormField::Semestre => self.form.cycle_semestre(1),

      // Editing
      KeyCode::Backspace => self.form.pop_char(self.focus),
      KeyCode::Char(c) => self.form.push_char(self.focus, c),

      KeyCode::Enter => {
        self.submit().await;
      }
      KeyCode::Esc => {
        if self.is_editing() {
          self.cancel_edit();
        }
      }

      _ => {}
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  };

  use anyhow::{Result, anyhow, bail};

  use super::*;

  /// In-memory backend with an on/off failure switch and a call counter.
  #[derive(Default)]
  struct FakeBackend {
    rows:  Mutex<Vec<Materia>>,
    fail:  AtomicBool,
    calls: AtomicUsize,
  }

  impl FakeBackend {
    fn check(&self) -> Result<()> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if self.fail.load(Ordering::SeqCst) {
        bail!("connection refused");
      }
      Ok(())
    }
  }

  impl Backend for &FakeBackend {
    async fn list_materias(&self) -> Result<Vec<Materia>> {
      self.check()?;
      Ok(self.rows.lock().unwrap().clone())
    }

    async fn create_materia(&self, input: &MateriaInput) -> Result<()> {
      self.check()?;
      let row = Materia::from_input(Uuid::new_v4(), input.clone());
      self.rows.lock().unwrap().push(row);
      Ok(())
    }

    async fn update_materia(&self, id: Uuid, input: &MateriaInput) -> Result<()> {
      self.check()?;
      let mut rows = self.rows.lock().unwrap();
      let row = rows
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| anyhow!("404 Not Found"))?;
      *row = Materia::from_input(id, input.clone());
      Ok(())
    }

    async fn delete_materia(&self, id: Uuid) -> Result<()> {
      self.check()?;
      let mut rows = self.rows.lock().unwrap();
      let before = rows.len();
      rows.retain(|m| m.id != id);
      if rows.len() == before {
        bail!("404 Not Found");
      }
      Ok(())
    }
  }

  fn fill(
    app: &mut App<&FakeBackend>,
    materia: &str,
    professor: &str,
    semestre: &str,
    faltas: &str,
  ) {
    app.form.set(FormField::Materia, materia);
    app.form.set(FormField::Professor, professor);
    app.form.set(FormField::Semestre, semestre);
    app.form.set(FormField::Faltas, faltas);
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn ctrl(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL) }

  async fn with_calculus(backend: &FakeBackend) -> App<&FakeBackend> {
    let mut app = App::new(backend);
    fill(&mut app, "Calculus", "Dr. A", "3", "0");
    assert_eq!(app.create().await, Outcome::Applied);
    app
  }

  // ── Scenario ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_duplicate_update_delete_scenario() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;

    assert_eq!(app.materias.len(), 1);
    let first = app.materias[0].clone();
    assert_eq!(first.materia, "Calculus");
    assert_eq!(first.faltas, 0);
    assert_eq!(app.form, MateriaForm::default());

    // Case-insensitive duplicate is refused before reaching the store.
    fill(&mut app, "calculus", "Dr. B", "1", "0");
    let calls = backend.calls.load(Ordering::SeqCst);
    assert_eq!(
      app.create().await,
      Outcome::Rejected(ValidationError::Duplicate.to_string())
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), calls);
    assert_eq!(app.materias.len(), 1);

    // Edit absences only.
    app.form.clear();
    assert_eq!(app.begin_edit(first.id), Outcome::Applied);
    assert_eq!(app.form.get(FormField::Faltas), "0");
    app.form.set(FormField::Faltas, "5");
    assert_eq!(app.submit().await, Outcome::Applied);
    assert_eq!(app.edit_id, None);
    assert_eq!(app.materias[0].faltas, 5);
    assert_eq!(app.materias[0].materia, "Calculus");
    assert_eq!(app.materias[0].id, first.id);

    // Delete.
    assert_eq!(app.request_delete(first.id), Outcome::Applied);
    assert!(app.modal_visible());
    assert_eq!(app.confirm_delete().await, Outcome::Applied);
    assert!(!app.modal_visible());
    assert!(app.materias.iter().all(|m| m.id != first.id));
  }

  // ── Validation ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn invalid_form_sets_message_and_skips_store() {
    let backend = FakeBackend::default();
    let mut app = App::new(&backend);
    fill(&mut app, "Calculus", "Dr. A", "0", "0");

    assert!(matches!(app.create().await, Outcome::Rejected(_)));
    assert_eq!(
      app.error_message.as_deref(),
      Some("Term must be greater than 0 and absences cannot be negative.")
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

    // A later successful validation clears the message.
    app.form.set(FormField::Semestre, "1");
    assert_eq!(app.create().await, Outcome::Applied);
    assert_eq!(app.error_message, None);
  }

  #[tokio::test]
  async fn update_may_rename_to_an_existing_name() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    fill(&mut app, "Algebra", "Dr. B", "1", "0");
    app.create().await;

    let algebra = app.materias[1].id;
    app.begin_edit(algebra);
    app.form.set(FormField::Materia, "CALCULUS");
    assert_eq!(app.update().await, Outcome::Applied);

    let names: Vec<_> = app.materias.iter().map(|m| m.materia.as_str()).collect();
    assert_eq!(names, ["Calculus", "CALCULUS"]);
  }

  // ── Edit lock ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn second_begin_edit_is_rejected_and_keeps_edit_id() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    fill(&mut app, "Algebra", "Dr. B", "1", "0");
    app.create().await;
    let (first, second) = (app.materias[0].id, app.materias[1].id);

    assert_eq!(app.begin_edit(first), Outcome::Applied);
    assert_eq!(
      app.begin_edit(second),
      Outcome::Rejected(FINISH_EDIT_BEFORE_EDIT.into())
    );
    assert_eq!(app.edit_id, Some(first));
    assert_eq!(app.form.get(FormField::Materia), "Calculus");
    assert_eq!(app.error_message.as_deref(), Some(FINISH_EDIT_BEFORE_EDIT));
  }

  #[tokio::test]
  async fn delete_is_refused_while_editing() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;

    app.begin_edit(id);
    assert_eq!(
      app.request_delete(id),
      Outcome::Rejected(FINISH_EDIT_BEFORE_DELETE.into())
    );
    assert!(!app.modal_visible());
  }

  #[tokio::test]
  async fn cancel_edit_unlocks_without_store_call() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;
    let calls = backend.calls.load(Ordering::SeqCst);

    app.begin_edit(id);
    assert_eq!(app.cancel_edit(), Outcome::Applied);
    assert_eq!(app.edit_id, None);
    assert_eq!(app.form, MateriaForm::default());
    assert_eq!(backend.calls.load(Ordering::SeqCst), calls);
  }

  // ── Modal ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn cancel_delete_closes_modal_without_store_call() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;
    let calls = backend.calls.load(Ordering::SeqCst);

    app.request_delete(id);
    app.cancel_delete();
    assert!(!app.modal_visible());
    assert_eq!(app.materias.len(), 1);
    assert_eq!(backend.calls.load(Ordering::SeqCst), calls);
  }

  // ── Store failures ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn failed_create_keeps_form_and_reports() {
    let backend = FakeBackend::default();
    let mut app = App::new(&backend);
    fill(&mut app, "Calculus", "Dr. A", "3", "0");
    backend.fail.store(true, Ordering::SeqCst);

    assert!(matches!(app.create().await, Outcome::Failed(_)));
    assert_eq!(app.form.get(FormField::Materia), "Calculus");
    assert!(app.request_error.as_deref().unwrap().contains("connection refused"));

    backend.fail.store(false, Ordering::SeqCst);
    assert_eq!(app.create().await, Outcome::Applied);
    assert_eq!(app.request_error, None);
  }

  #[tokio::test]
  async fn failed_fetch_keeps_previous_list() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    backend.fail.store(true, Ordering::SeqCst);

    assert!(matches!(app.fetch_all().await, Outcome::Failed(_)));
    assert_eq!(app.materias.len(), 1);
  }

  #[tokio::test]
  async fn begin_edit_keeps_pending_request_error() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;
    backend.fail.store(true, Ordering::SeqCst);
    app.fetch_all().await;
    assert!(app.request_error.is_some());

    assert_eq!(app.begin_edit(id), Outcome::Applied);
    assert!(app.request_error.is_some());
    assert_eq!(app.status_msg, "Editing subject.");
  }

  #[tokio::test]
  async fn failed_update_stays_in_edit_mode() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;
    app.begin_edit(id);
    app.form.set(FormField::Faltas, "2");
    backend.fail.store(true, Ordering::SeqCst);

    assert!(matches!(app.update().await, Outcome::Failed(_)));
    assert_eq!(app.edit_id, Some(id));
    assert_eq!(app.form.get(FormField::Faltas), "2");
  }

  #[tokio::test]
  async fn failed_delete_leaves_modal_open() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;

    app.request_delete(id);
    backend.fail.store(true, Ordering::SeqCst);
    assert!(matches!(app.confirm_delete().await, Outcome::Failed(_)));
    assert_eq!(app.pending_delete, Some(id));
  }

  #[tokio::test]
  async fn deleting_a_vanished_record_fails() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;
    let id = app.materias[0].id;
    backend.rows.lock().unwrap().clear();

    app.request_delete(id);
    assert!(matches!(app.confirm_delete().await, Outcome::Failed(_)));
  }

  // ── Keys ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn typing_and_enter_submit_the_form() {
    let backend = FakeBackend::default();
    let mut app = App::new(&backend);

    for c in "Physics".chars() {
      assert!(app.handle_key(key(KeyCode::Char(c))).await);
    }
    app.handle_key(key(KeyCode::Tab)).await;
    for c in "Dr. C".chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
    app.handle_key(key(KeyCode::Tab)).await;
    app.handle_key(key(KeyCode::Right)).await;
    app.handle_key(key(KeyCode::Right)).await;
    app.handle_key(key(KeyCode::Tab)).await;
    app.handle_key(key(KeyCode::Char('1'))).await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(app.materias.len(), 1);
    assert_eq!(app.materias[0].materia, "Physics");
    assert_eq!(app.materias[0].professor, "Dr. C");
    assert_eq!(app.materias[0].semestre, 2);
    assert_eq!(app.materias[0].faltas, 1);
  }

  #[tokio::test]
  async fn modal_keys_and_quit() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;

    app.handle_key(ctrl('d')).await;
    assert!(app.modal_visible());
    // Typing is swallowed by the modal.
    app.handle_key(key(KeyCode::Char('x'))).await;
    assert_eq!(app.form.get(FormField::Materia), "");
    app.handle_key(key(KeyCode::Char('n'))).await;
    assert!(!app.modal_visible());

    app.handle_key(ctrl('d')).await;
    app.handle_key(key(KeyCode::Char('y'))).await;
    assert!(app.materias.is_empty());

    assert!(!app.handle_key(ctrl('c')).await);
  }

  #[tokio::test]
  async fn ctrl_q_quits_with_modal_open() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;

    app.handle_key(ctrl('d')).await;
    assert!(app.modal_visible());
    assert!(!app.handle_key(ctrl('q')).await);
  }

  #[tokio::test]
  async fn ctrl_e_and_esc_toggle_edit_mode() {
    let backend = FakeBackend::default();
    let mut app = with_calculus(&backend).await;

    app.handle_key(ctrl('e')).await;
    assert!(app.is_editing());
    assert_eq!(app.form.get(FormField::Professor), "Dr. A");

    app.handle_key(key(KeyCode::Esc)).await;
    assert!(!app.is_editing());
  }
}
