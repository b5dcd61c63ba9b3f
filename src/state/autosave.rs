//! Debounced autosave of the form into the snapshot store

use super::scheduler::PendingTask;
use super::{FormState, RegistrationForm};
use crate::store::SnapshotStore;
use std::time::{Duration, Instant};

/// Timing of the autosave cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTiming {
    /// Quiet period after the last input before a save runs
    pub debounce: Duration,
    /// Delay between "Saving..." and "All changes saved"
    pub saved_message_delay: Duration,
}

impl Default for AutosaveTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            saved_message_delay: Duration::from_millis(300),
        }
    }
}

/// What the autosave indicator shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutosaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Restored,
    Failed,
}

impl AutosaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Saving => "Saving...",
            Self::Saved => "All changes saved",
            Self::Restored => "Previous data restored",
            Self::Failed => "Autosave failed",
        }
    }
}

pub struct Autosave {
    store: Box<dyn SnapshotStore>,
    key: String,
    debounce: PendingTask,
    saved_message: PendingTask,
    status: AutosaveStatus,
}

impl Autosave {
    pub fn new(store: Box<dyn SnapshotStore>, key: impl Into<String>, timing: AutosaveTiming) -> Self {
        Self {
            store,
            key: key.into(),
            debounce: PendingTask::new(timing.debounce),
            saved_message: PendingTask::new(timing.saved_message_delay),
            status: AutosaveStatus::default(),
        }
    }

    pub fn status(&self) -> AutosaveStatus {
        self.status
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Record a form input event; restarts the debounce window
    pub fn touch(&mut self, now: Instant) {
        self.debounce.schedule(now);
    }

    /// Whether a save or a status transition is still scheduled
    pub fn has_pending_work(&self) -> bool {
        self.debounce.is_pending() || self.saved_message.is_pending()
    }

    /// Run whatever is due at `now`. Returns true if a save was performed.
    pub async fn tick(&mut self, form: &RegistrationForm, now: Instant) -> bool {
        if self.saved_message.fire_if_due(now) && self.status == AutosaveStatus::Saving {
            self.status = AutosaveStatus::Saved;
        }
        if self.debounce.fire_if_due(now) {
            self.save(form, now).await;
            return true;
        }
        false
    }

    /// Write a pending save immediately. Returns true if one was pending.
    pub async fn flush(&mut self, form: &RegistrationForm, now: Instant) -> bool {
        if !self.debounce.is_pending() {
            return false;
        }
        self.debounce.cancel();
        self.save(form, now).await;
        true
    }

    /// Serialize every field value and write the snapshot
    pub async fn save(&mut self, form: &RegistrationForm, now: Instant) {
        self.status = AutosaveStatus::Saving;

        let snapshot = match serde_json::to_string(&form.values()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Failed to serialize form snapshot: {e}");
                self.status = AutosaveStatus::Failed;
                return;
            }
        };

        match self.store.set_item(&self.key, &snapshot).await {
            Ok(()) => {
                tracing::debug!("Saved snapshot ({} bytes)", snapshot.len());
                self.saved_message.schedule(now);
            }
            Err(e) => {
                tracing::warn!("Autosave failed: {e}");
                self.status = AutosaveStatus::Failed;
            }
        }
    }

    /// Restore a previously saved snapshot into `form`.
    ///
    /// Absent, unreadable or malformed snapshots count as no prior data.
    /// Returns true if a snapshot was restored.
    pub async fn load(&mut self, form: &mut RegistrationForm) -> bool {
        let raw = match self.store.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("Could not read snapshot: {e}");
                return false;
            }
        };

        let state: FormState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring malformed snapshot: {e}");
                return false;
            }
        };

        if state.is_empty() {
            tracing::debug!("Snapshot holds no fields");
            return false;
        }

        let applied = form.apply(&state);
        tracing::info!("Restored {applied} of {} stored fields", state.len());
        self.status = AutosaveStatus::Restored;
        true
    }

    /// Remove the snapshot and drop any scheduled save
    pub async fn clear(&mut self) {
        self.debounce.cancel();
        self.saved_message.cancel();
        match self.store.remove_item(&self.key).await {
            Ok(()) => {
                tracing::info!("Cleared snapshot");
                self.status = AutosaveStatus::Idle;
            }
            Err(e) => {
                tracing::warn!("Failed to clear snapshot: {e}");
                self.status = AutosaveStatus::Failed;
            }
        }
    }
}
