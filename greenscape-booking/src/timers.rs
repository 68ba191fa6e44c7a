use crate::display::DisplaySurface;
use greenscape_store::DraftRepo;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Debounced draft persistence. At most one save is pending at a time:
/// scheduling replaces the previous timer instead of stacking a new one,
/// and dropping the saver aborts whatever is pending so no callback fires
/// against a torn-down form.
pub struct DraftSaver {
    drafts: DraftRepo,
    form_id: String,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DraftSaver {
    pub fn new(drafts: DraftRepo, form_id: &str, delay: Duration) -> Self {
        Self {
            drafts,
            form_id: form_id.to_string(),
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Queue a save of this snapshot after the debounce delay, replacing
    /// any save still pending.
    pub fn schedule(&self, fields: HashMap<String, String>) {
        let drafts = self.drafts.clone();
        let form_id = self.form_id.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            drafts.save(&form_id, &fields);
            debug!("Draft autosaved for {}", form_id);
        });

        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Save immediately and drop any pending timer.
    pub fn flush(&self, fields: &HashMap<String, String>) {
        self.cancel();
        self.drafts.save(&self.form_id, fields);
    }

    /// Abort the pending save, if any.
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for DraftSaver {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Auto-hides the global status line a few seconds after a success
/// message, the way the site's form message fades out. Replacement
/// semantics match DraftSaver: a new schedule supersedes the pending one,
/// and dropping the dismisser aborts it so a discarded display surface is
/// never touched.
pub struct StatusDismisser {
    display: Arc<dyn DisplaySurface>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl StatusDismisser {
    pub fn new(display: Arc<dyn DisplaySurface>, delay: Duration) -> Self {
        Self {
            display,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Clear the status line after the delay, replacing any pending clear.
    pub fn schedule(&self) {
        let display = self.display.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            display.clear_status();
        });

        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.replace(handle) {
                previous.abort();
            }
        }
    }

    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for StatusDismisser {
    fn drop(&mut self) {
        self.cancel();
    }
}
