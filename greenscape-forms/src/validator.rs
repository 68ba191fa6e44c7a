use crate::rules::{self, ValidationError};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which rule set applies to a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Message,
    Participants,
    BookingDate,
    /// Required-or-not only, no format rule (selects, subject lines)
    Generic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
        }
    }
}

/// Per-field outcome. Superseded wholesale by the next validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub field: String,
    pub valid: bool,
    pub reason: Option<String>,
}

impl ValidationResult {
    fn pass(field: &str) -> Self {
        Self {
            field: field.to_string(),
            valid: true,
            reason: None,
        }
    }

    fn fail(field: &str, error: ValidationError) -> Self {
        Self {
            field: field.to_string(),
            valid: false,
            reason: Some(error.to_string()),
        }
    }
}

/// Validates a whole form against its declared field specs.
pub struct FormValidator {
    specs: Vec<FieldSpec>,
}

impl FormValidator {
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        Self { specs }
    }

    /// The booking page form.
    pub fn booking_form() -> Self {
        Self::new(vec![
            FieldSpec::required("name", FieldKind::Name),
            FieldSpec::required("email", FieldKind::Email),
            FieldSpec::required("phone", FieldKind::Phone),
            FieldSpec::required("activity", FieldKind::Generic),
            FieldSpec::required("participants", FieldKind::Participants),
            FieldSpec::required("date", FieldKind::BookingDate),
        ])
    }

    /// The contact page form.
    pub fn contact_form() -> Self {
        Self::new(vec![
            FieldSpec::required("name", FieldKind::Name),
            FieldSpec::required("email", FieldKind::Email),
            FieldSpec::optional("subject", FieldKind::Generic),
            FieldSpec::required("message", FieldKind::Message),
        ])
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn spec(&self, field: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.name == field)
    }

    /// Validate one field by name. Unknown fields pass (nothing declared,
    /// nothing to enforce).
    pub fn validate_field(&self, field: &str, value: &str) -> ValidationResult {
        match self.spec(field) {
            Some(spec) => Self::apply(spec, value),
            None => ValidationResult::pass(field),
        }
    }

    /// One result per declared field, in declaration order. Missing values
    /// are treated as empty strings.
    pub fn validate_all(&self, values: &HashMap<String, String>) -> Vec<ValidationResult> {
        self.specs
            .iter()
            .map(|spec| {
                let value = values.get(&spec.name).map(String::as_str).unwrap_or("");
                Self::apply(spec, value)
            })
            .collect()
    }

    pub fn is_valid(results: &[ValidationResult]) -> bool {
        results.iter().all(|r| r.valid)
    }

    fn apply(spec: &FieldSpec, value: &str) -> ValidationResult {
        let trimmed = value.trim();

        // Required-but-empty takes precedence over any format rule, and an
        // empty optional field passes without format checks.
        if trimmed.is_empty() {
            return if spec.required {
                ValidationResult::fail(&spec.name, ValidationError::Required)
            } else {
                ValidationResult::pass(&spec.name)
            };
        }

        let outcome = match spec.kind {
            FieldKind::Name => rules::check_name(trimmed),
            FieldKind::Email => rules::check_email(trimmed),
            FieldKind::Phone => rules::check_phone(trimmed),
            FieldKind::Message => rules::check_message(trimmed),
            FieldKind::Participants => rules::check_participants(trimmed),
            FieldKind::BookingDate => {
                rules::check_booking_date(trimmed, Utc::now().date_naive())
            }
            FieldKind::Generic => Ok(()),
        };

        match outcome {
            Ok(()) => ValidationResult::pass(&spec.name),
            Err(e) => ValidationResult::fail(&spec.name, e),
        }
    }

    /// Same as `validate_all` but with an explicit "today" for the date
    /// rule, for deterministic tests.
    pub fn validate_all_at(
        &self,
        values: &HashMap<String, String>,
        today: NaiveDate,
    ) -> Vec<ValidationResult> {
        self.specs
            .iter()
            .map(|spec| {
                let value = values.get(&spec.name).map(String::as_str).unwrap_or("");
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return if spec.required {
                        ValidationResult::fail(&spec.name, ValidationError::Required)
                    } else {
                        ValidationResult::pass(&spec.name)
                    };
                }
                if spec.kind == FieldKind::BookingDate {
                    return match rules::check_booking_date(trimmed, today) {
                        Ok(()) => ValidationResult::pass(&spec.name),
                        Err(e) => ValidationResult::fail(&spec.name, e),
                    };
                }
                Self::apply(spec, value)
            })
            .collect()
    }
}
