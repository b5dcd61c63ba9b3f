//! Application state and core logic

use crate::config::WizardConfig;
use crate::state::{Autosave, AutosaveStatus, FieldKind, Form, NextOutcome, Wizard};
use crate::store::{FileSnapshotStore, SnapshotStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Main application struct
pub struct App {
    /// Form, steps and summary
    pub wizard: Wizard,
    /// Debounced snapshot persistence
    pub autosave: Autosave,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App backed by the configured snapshot directory
    pub async fn new(config: &WizardConfig) -> Result<Self> {
        let store = match &config.storage_dir {
            Some(dir) => FileSnapshotStore::new(dir),
            None => FileSnapshotStore::for_platform()?,
        };
        tracing::info!("Storing snapshots in {}", store.dir().display());
        Ok(Self::with_store(Box::new(store), config).await)
    }

    /// Create an App over any store, restoring a previous snapshot if present
    pub async fn with_store(store: Box<dyn SnapshotStore>, config: &WizardConfig) -> Self {
        let mut wizard = Wizard::new();
        let mut autosave = Autosave::new(store, config.storage_key(), config.autosave_timing());
        tracing::debug!("Autosave key: {}", autosave.key());
        autosave.load(&mut wizard.form).await;

        Self {
            wizard,
            autosave,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Current autosave indicator
    pub fn autosave_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    /// Whether the event loop should poll quickly (animation or timers in flight)
    pub fn is_busy(&self, now: Instant) -> bool {
        self.wizard.steps.is_animating(now) || self.autosave.has_pending_work()
    }

    /// Run due timers
    pub async fn tick(&mut self, now: Instant) {
        self.autosave.tick(&self.wizard.form, now).await;
    }

    /// Persist anything typed within the debounce window before exiting
    pub async fn shutdown(&mut self) {
        self.autosave.flush(&self.wizard.form, Instant::now()).await;
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.handle_key_at(key, Instant::now()).await
    }

    async fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if self.wizard.is_submitted() {
            self.handle_submitted_key(key).await
        } else {
            self.handle_form_key(key, now).await
        }
    }

    fn is_shortcut(key: &KeyEvent, c: char) -> bool {
        key.code == KeyCode::Char(c)
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER))
    }

    /// Handle keys while the form is shown
    async fn handle_form_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if Self::is_shortcut(&key, 'r') {
            self.reset().await;
            return Ok(());
        }
        if Self::is_shortcut(&key, 't') {
            self.wizard.form.toggle_reveal();
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }

        let changed = match key.code {
            KeyCode::Enter => {
                self.next(now).await;
                false
            }
            KeyCode::Esc => {
                self.wizard.prev(now);
                false
            }
            KeyCode::Tab | KeyCode::Down => {
                self.wizard.form.next_field();
                false
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.wizard.form.prev_field();
                false
            }
            // Selects change value as the cursor moves; groups only move the cursor
            KeyCode::Left => self.wizard.edit_active_field(|field| {
                field.prev_option();
                field.kind == FieldKind::Select && field.activate_option()
            }),
            KeyCode::Right => self.wizard.edit_active_field(|field| {
                field.next_option();
                field.kind == FieldKind::Select && field.activate_option()
            }),
            KeyCode::Char(c) => self.wizard.edit_active_field(|field| {
                if field.kind.is_text_like() {
                    field.push_char(c)
                } else if c == ' ' {
                    field.activate_option()
                } else {
                    false
                }
            }),
            KeyCode::Backspace => self.wizard.edit_active_field(|field| field.pop_char()),
            _ => false,
        };

        // Every value change is an input event for autosave
        if changed {
            self.autosave.touch(now);
        }
        Ok(())
    }

    /// Handle keys on the success view
    async fn handle_submitted_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => self.reset().await,
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Validate and advance; submission clears the stored snapshot
    async fn next(&mut self, now: Instant) {
        if self.wizard.next(now) == NextOutcome::Submitted {
            self.autosave.clear().await;
        }
    }

    /// Clear the form, return to step 1 and drop the snapshot
    async fn reset(&mut self) {
        self.wizard.reset();
        self.autosave.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RegistrationForm, WizardPhase};
    use crate::store::{MemorySnapshotStore, MockSnapshotStore};
    use std::time::Duration;

    const KEY: &str = "formData";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn memory_app() -> (App, MemorySnapshotStore) {
        let store = MemorySnapshotStore::new();
        let app = App::with_store(Box::new(store.clone()), &WizardConfig::default()).await;
        (app, store)
    }

    async fn type_str(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key_at(key(KeyCode::Char(c)), now).await.unwrap();
        }
    }

    fn fill_all_steps(app: &mut App) {
        let form = &mut app.wizard.form;
        for (name, value) in [
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("dateOfBirth", "1815-12-10"),
            ("email", "ada@example.com"),
            ("phone", "(555) 123-4567"),
            ("address", "12 St James's Square"),
            ("city", "London"),
            ("username", "adal"),
            ("password", "analytical"),
            ("confirmPassword", "analytical"),
        ] {
            form.field_mut(name).unwrap().set_text(value);
        }
        form.field_mut("gender").unwrap().select_value("female");
        form.field_mut("country").unwrap().select_value("France");
    }

    mod startup {
        use super::*;

        #[tokio::test]
        async fn test_fresh_start() {
            let (app, _) = memory_app().await;
            assert!(!app.should_quit());
            assert_eq!(app.wizard.steps.current(), 1);
            assert_eq!(app.autosave_status(), AutosaveStatus::Idle);
        }

        #[tokio::test]
        async fn test_restores_previous_snapshot() {
            let store = MemorySnapshotStore::new();
            store.insert(
                KEY,
                r#"{"firstName":"Ada","gender":"female","interests":["tech","math"]}"#,
            );
            let app = App::with_store(Box::new(store), &WizardConfig::default()).await;

            assert_eq!(app.wizard.form.text("firstName"), "Ada");
            assert_eq!(
                app.wizard.form.field("gender").unwrap().selected(),
                Some("female")
            );
            assert_eq!(
                app.wizard.form.field("interests").unwrap().checked_values(),
                vec!["tech", "math"]
            );
            assert_eq!(app.autosave_status(), AutosaveStatus::Restored);
        }

        #[tokio::test]
        async fn test_uses_configured_key() {
            let store = MemorySnapshotStore::new();
            store.insert("draft", r#"{"city":"Paris"}"#);
            let config = WizardConfig {
                storage_key: Some("draft".to_string()),
                ..Default::default()
            };
            let app = App::with_store(Box::new(store), &config).await;
            assert_eq!(app.wizard.form.text("city"), "Paris");
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typing_autosaves_after_debounce() {
            let (mut app, store) = memory_app().await;
            let start = Instant::now();

            type_str(&mut app, "Ada", start).await;
            assert!(app.is_busy(start));
            app.tick(start + Duration::from_millis(100)).await;
            assert!(store.get(KEY).is_none());

            app.tick(start + Duration::from_millis(500)).await;
            let saved: serde_json::Value = serde_json::from_str(&store.get(KEY).unwrap()).unwrap();
            assert_eq!(saved["firstName"], "Ada");
            assert_eq!(app.autosave_status(), AutosaveStatus::Saving);

            app.tick(start + Duration::from_millis(800)).await;
            assert_eq!(app.autosave_status(), AutosaveStatus::Saved);
        }

        #[tokio::test]
        async fn test_burst_of_keys_saves_once() {
            let mut store = MockSnapshotStore::new();
            store.expect_get_item().returning(|_| Ok(None));
            store.expect_set_item().times(1).returning(|_, _| Ok(()));
            let mut app = App::with_store(Box::new(store), &WizardConfig::default()).await;
            let start = Instant::now();

            for (i, c) in "Lovelace".chars().enumerate() {
                let now = start + Duration::from_millis(100 * i as u64);
                app.handle_key_at(key(KeyCode::Char(c)), now).await.unwrap();
                app.tick(now).await;
            }
            app.tick(start + Duration::from_millis(5000)).await;
        }

        #[tokio::test]
        async fn test_shutdown_flushes_pending_input() {
            let (mut app, store) = memory_app().await;
            type_str(&mut app, "Ada", Instant::now()).await;
            app.shutdown().await;
            let saved: serde_json::Value = serde_json::from_str(&store.get(KEY).unwrap()).unwrap();
            assert_eq!(saved["firstName"], "Ada");
        }

        #[tokio::test]
        async fn test_navigation_keys_are_not_input() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            app.handle_key_at(key(KeyCode::Tab), now).await.unwrap();
            app.handle_key_at(key(KeyCode::Esc), now).await.unwrap();
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            assert!(!app.autosave.has_pending_work());
        }

        #[tokio::test]
        async fn test_radio_space_selects() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            for _ in 0..3 {
                app.handle_key_at(key(KeyCode::Tab), now).await.unwrap();
            }
            app.handle_key_at(key(KeyCode::Right), now).await.unwrap();
            assert!(app.wizard.form.field("gender").unwrap().selected().is_none());

            app.handle_key_at(key(KeyCode::Char(' ')), now).await.unwrap();
            assert_eq!(
                app.wizard.form.field("gender").unwrap().selected(),
                Some("female")
            );
            assert!(app.autosave.has_pending_work());
        }

        #[tokio::test]
        async fn test_select_changes_with_arrows() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            fill_all_steps(&mut app);
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            // Country is the last field of step 2
            app.handle_key_at(key(KeyCode::BackTab), now).await.unwrap();
            app.handle_key_at(key(KeyCode::Right), now).await.unwrap();
            assert_eq!(
                app.wizard.form.field("country").unwrap().selected(),
                Some("Germany")
            );
        }

        #[tokio::test]
        async fn test_input_clears_field_error() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            assert!(app.wizard.form.field("firstName").unwrap().error.is_some());

            type_str(&mut app, "A", now).await;
            assert!(app.wizard.form.field("firstName").unwrap().error.is_none());
        }

        #[tokio::test]
        async fn test_reveal_password_shortcut() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            fill_all_steps(&mut app);
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            app.handle_key_at(key(KeyCode::Tab), now).await.unwrap();

            app.handle_key_at(ctrl('t'), now).await.unwrap();
            assert!(app.wizard.form.field("password").unwrap().revealed);
            // Ctrl chords never reach the field
            assert_eq!(app.wizard.form.text("password"), "analytical");
        }
    }

    mod navigation {
        use super::*;

        #[tokio::test]
        async fn test_enter_blocked_until_step_valid() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            assert_eq!(app.wizard.steps.current(), 1);

            fill_all_steps(&mut app);
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            assert_eq!(app.wizard.steps.current(), 2);
        }

        #[tokio::test]
        async fn test_esc_goes_back() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            fill_all_steps(&mut app);
            app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            app.handle_key_at(key(KeyCode::Esc), now).await.unwrap();
            assert_eq!(app.wizard.steps.current(), 1);
            app.handle_key_at(key(KeyCode::Esc), now).await.unwrap();
            assert_eq!(app.wizard.steps.current(), 1);
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_submit_clears_snapshot() {
            let (mut app, store) = memory_app().await;
            let start = Instant::now();
            fill_all_steps(&mut app);
            type_str(&mut app, "!", start).await;
            app.tick(start + Duration::from_millis(500)).await;
            assert!(store.get(KEY).is_some());

            for _ in 0..4 {
                app.handle_key_at(key(KeyCode::Enter), start).await.unwrap();
            }
            assert_eq!(app.wizard.phase(), WizardPhase::Submitted);
            assert!(store.get(KEY).is_none());
        }

        #[tokio::test]
        async fn test_submit_cancels_pending_save() {
            let (mut app, store) = memory_app().await;
            let start = Instant::now();
            fill_all_steps(&mut app);
            for _ in 0..3 {
                app.handle_key_at(key(KeyCode::Enter), start).await.unwrap();
            }
            // Step 4 has no inputs; edit step 3 again then submit quickly
            app.handle_key_at(key(KeyCode::Esc), start).await.unwrap();
            type_str(&mut app, "x", start).await;
            app.handle_key_at(key(KeyCode::Backspace), start).await.unwrap();
            app.handle_key_at(key(KeyCode::Enter), start).await.unwrap();
            app.handle_key_at(key(KeyCode::Enter), start).await.unwrap();
            assert!(app.wizard.is_submitted());

            app.tick(start + Duration::from_secs(2)).await;
            assert!(store.get(KEY).is_none());
        }

        #[tokio::test]
        async fn test_reset_from_submitted() {
            let (mut app, store) = memory_app().await;
            let now = Instant::now();
            fill_all_steps(&mut app);
            for _ in 0..4 {
                app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            }
            assert!(app.wizard.is_submitted());

            app.handle_key_at(key(KeyCode::Char('r')), now).await.unwrap();
            assert_eq!(app.wizard.phase(), WizardPhase::Editing);
            assert_eq!(app.wizard.steps.current(), 1);
            assert_eq!(app.wizard.form.values(), RegistrationForm::new().values());
            assert!(store.get(KEY).is_none());
        }

        #[tokio::test]
        async fn test_reset_shortcut_while_editing() {
            let (mut app, store) = memory_app().await;
            let start = Instant::now();
            type_str(&mut app, "Ada", start).await;
            app.tick(start + Duration::from_millis(500)).await;
            assert!(store.get(KEY).is_some());

            app.handle_key_at(ctrl('r'), start).await.unwrap();
            assert_eq!(app.wizard.form.text("firstName"), "");
            assert!(store.get(KEY).is_none());
        }

        #[tokio::test]
        async fn test_submit_removes_snapshot_once() {
            let mut store = MockSnapshotStore::new();
            store.expect_get_item().returning(|_| Ok(None));
            store.expect_remove_item().times(1).returning(|_| Ok(()));
            let mut app = App::with_store(Box::new(store), &WizardConfig::default()).await;
            let now = Instant::now();
            fill_all_steps(&mut app);
            for _ in 0..4 {
                app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            }
            assert!(app.wizard.is_submitted());
        }

        #[tokio::test]
        async fn test_quit_from_success_view() {
            let (mut app, _) = memory_app().await;
            let now = Instant::now();
            fill_all_steps(&mut app);
            for _ in 0..4 {
                app.handle_key_at(key(KeyCode::Enter), now).await.unwrap();
            }
            app.handle_key_at(key(KeyCode::Char('q')), now).await.unwrap();
            assert!(app.should_quit());
        }
    }
}
