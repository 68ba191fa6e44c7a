use greenscape_catalog::QuoteDisplay;
use serde::{Deserialize, Serialize};

/// Severity tag for status messages and notifications
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Read access to the current form field values. Injected rather than
/// resolved by element id so the controller never touches the page itself.
pub trait FieldSource: Send + Sync {
    fn read(&self, field: &str) -> Option<String>;
}

/// Write-only sink for everything the controller renders: per-field
/// validation messages, the four pricing strings, the global status line
/// and the busy flag on the submit control.
pub trait DisplaySurface: Send + Sync {
    fn field_error(&self, field: &str, message: &str);
    fn clear_field_error(&self, field: &str);
    fn clear_field_errors(&self);
    fn show_quote(&self, quote: &QuoteDisplay);
    fn set_status(&self, message: &str, severity: Severity);
    fn clear_status(&self);
    fn set_busy(&self, busy: bool);
    /// Empties every form field (successful submission).
    fn clear_fields(&self);
    /// Writes one field value (draft restore, URL preselect).
    fn set_field_value(&self, field: &str, value: &str);
}

/// Toast-style notifications, decoupled from the form status line.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Drops every notification. Useful where no toast area exists.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _severity: Severity) {}
}
