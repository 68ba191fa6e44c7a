use greenscape_forms::ValidationResult;
use greenscape_shared::Masked;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The current pricing-relevant form state, re-derived from the field
/// source on every relevant event and discarded on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub activity_id: Option<String>,
    pub participants: i32,
}

impl BookingSelection {
    pub fn empty() -> Self {
        Self {
            activity_id: None,
            participants: 0,
        }
    }
}

/// What gets handed to the submission collaborator.
#[derive(Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub form_id: String,
    pub fields: HashMap<String, String>,
}

// Email and phone are PII; mask them when the request hits the logs.
impl fmt::Debug for SubmissionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        map.entry(&"form_id", &self.form_id);
        for (key, value) in &self.fields {
            if key == "email" || key == "phone" {
                map.entry(key, &Masked::new(value));
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Opaque response from the submission collaborator. Any transport failure
/// is mapped to the generic network-error outcome before callers see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: Option<String>,
    pub reference: Option<String>,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { reference: Option<String> },
    /// Validation failed; carries the failing fields only. No network call
    /// was made.
    Rejected(Vec<ValidationResult>),
    /// The collaborator said no, or the transport/timeout did.
    Failed(String),
    /// A submission was already in flight; this attempt was dropped.
    AlreadyInFlight,
}

/// Observable controller phase. Success/Error are reported through the
/// display surface; the controller always settles back to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_masks_pii_fields() {
        let mut fields = HashMap::new();
        fields.insert("email".to_string(), "jo@example.com".to_string());
        let request = SubmissionRequest {
            form_id: "contact".to_string(),
            fields,
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("jo@example.com"), "{}", debug);
        assert!(debug.contains("j*******"), "{}", debug);
    }

    #[test]
    fn non_pii_fields_stay_readable() {
        let mut fields = HashMap::new();
        fields.insert("activity".to_string(), "forest-hiking".to_string());
        let request = SubmissionRequest {
            form_id: "booking".to_string(),
            fields,
        };
        let debug = format!("{:?}", request);
        assert!(debug.contains("forest-hiking"));
    }
}
