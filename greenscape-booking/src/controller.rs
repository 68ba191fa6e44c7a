use crate::display::{DisplaySurface, FieldSource, Notifier, Severity};
use crate::timers::{DraftSaver, StatusDismisser};
use crate::models::{BookingSelection, SubmissionRequest, SubmitOutcome, SubmitPhase};
use crate::submission::SubmissionAdapter;
use greenscape_catalog::{Catalog, DurationOption, PriceQuote, PricingEngine, PricingRules};
use greenscape_forms::FormValidator;
use greenscape_shared::models::events::FormSubmittedEvent;
use greenscape_store::app_config::BusinessRules;
use greenscape_store::DraftRepo;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

const VALIDATION_ERROR_MESSAGE: &str = "Please fill in all required fields correctly.";
const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";
const SUCCESS_MESSAGE: &str =
    "Thank you! Your request has been received. We will get back to you within 24 hours.";

/// Form events the controller reacts to, dispatched through one
/// declarative handler instead of per-element listener wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A select/committed value changed
    Change,
    /// Keystroke-level input
    Input,
    /// Focus left the field
    Blur,
}

// Fields whose changes re-derive the price quote
const PRICING_FIELDS: &[&str] = &["activity", "participants"];

/// Injected collaborators for a form instance.
pub struct ControllerDeps {
    pub fields: Arc<dyn FieldSource>,
    pub display: Arc<dyn DisplaySurface>,
    pub notifier: Arc<dyn Notifier>,
    pub submitter: Arc<dyn SubmissionAdapter>,
    pub drafts: DraftRepo,
    pub rules: BusinessRules,
}

/// Bridges the form fields to the pricing engine, the validator and the
/// submission collaborator. One instance per form on the page; instances
/// share nothing.
pub struct FormController {
    form_id: String,
    catalog: Catalog,
    engine: PricingEngine,
    validator: FormValidator,
    fields: Arc<dyn FieldSource>,
    display: Arc<dyn DisplaySurface>,
    notifier: Arc<dyn Notifier>,
    submitter: Arc<dyn SubmissionAdapter>,
    drafts: DraftRepo,
    rules: BusinessRules,
    autosave: DraftSaver,
    status_dismiss: StatusDismisser,
    in_flight: AtomicBool,
    phase: Mutex<SubmitPhase>,
}

impl FormController {
    pub fn new(
        form_id: &str,
        catalog: Catalog,
        engine: PricingEngine,
        validator: FormValidator,
        deps: ControllerDeps,
    ) -> Self {
        let autosave = DraftSaver::new(
            deps.drafts.clone(),
            form_id,
            Duration::from_secs(deps.rules.draft_autosave_seconds),
        );
        let status_dismiss = StatusDismisser::new(
            deps.display.clone(),
            Duration::from_secs(deps.rules.status_dismiss_seconds),
        );
        Self {
            form_id: form_id.to_string(),
            catalog,
            engine,
            validator,
            fields: deps.fields,
            display: deps.display,
            notifier: deps.notifier,
            submitter: deps.submitter,
            drafts: deps.drafts,
            rules: deps.rules,
            autosave,
            status_dismiss,
            in_flight: AtomicBool::new(false),
            phase: Mutex::new(SubmitPhase::Idle),
        }
    }

    /// A controller over the production catalog, with the KSH price
    /// series and discount thresholds derived from the business rules.
    pub fn booking(form_id: &str, validator: FormValidator, deps: ControllerDeps) -> Self {
        let catalog = Catalog::greenscape_with_rate(deps.rules.usd_to_ksh_rate);
        let engine = PricingEngine::new(PricingRules {
            group_discount_min: deps.rules.group_discount_min,
            group_discount_rate: deps.rules.group_discount_rate,
        });
        Self::new(form_id, catalog, engine, validator, deps)
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
            .lock()
            .map(|p| *p)
            .unwrap_or(SubmitPhase::Idle)
    }

    fn set_phase(&self, phase: SubmitPhase) {
        if let Ok(mut current) = self.phase.lock() {
            *current = phase;
        }
    }

    /// Current pricing-relevant form state, read fresh from the source.
    pub fn selection(&self) -> BookingSelection {
        let activity_id = self
            .fields
            .read("activity")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        // Same lenient parse the site used: anything unparsable is "no
        // selection", not an error.
        let participants = self
            .fields
            .read("participants")
            .and_then(|v| v.trim().parse::<i32>().ok())
            .unwrap_or(0);
        BookingSelection {
            activity_id,
            participants,
        }
    }

    /// Re-derive the quote and push it to the display. Total and
    /// idempotent: unchanged inputs produce identical output.
    pub fn refresh_pricing(&self) {
        let selection = self.selection();
        let quote = match &selection.activity_id {
            Some(id) => self.engine.quote(&self.catalog, id, selection.participants),
            None => PriceQuote::zero(),
        };

        self.display.show_quote(&quote.display());

        if quote.discount_applied {
            let message = format!(
                "Group discount applied! {}% off for groups of {} or more.",
                (self.rules.group_discount_rate * 100.0).round() as i64,
                self.rules.group_discount_min,
            );
            self.display.set_status(&message, Severity::Success);
        } else {
            self.display.clear_status();
        }
    }

    /// One dispatch point for every form event.
    pub fn handle_event(&self, field: &str, kind: EventKind) {
        match kind {
            EventKind::Change => {
                if PRICING_FIELDS.contains(&field) {
                    self.refresh_pricing();
                }
            }
            EventKind::Input => {
                // Typing clears the field's stale error and queues a draft save.
                self.display.clear_field_error(field);
                self.autosave.schedule(self.collect_fields());
            }
            EventKind::Blur => {
                let value = self.fields.read(field).unwrap_or_default();
                let result = self.validator.validate_field(field, &value);
                if let Some(reason) = result.reason {
                    self.display.field_error(field, &reason);
                }
            }
        }
    }

    /// One submit attempt: Idle -> Validating -> Idle on rejection, or
    /// Validating -> Submitting -> Idle with the terminal result pushed to
    /// the display. At most one attempt is in flight per form instance.
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return SubmitOutcome::AlreadyInFlight;
        }

        self.set_phase(SubmitPhase::Validating);
        let values = self.collect_fields();
        let results = self.validator.validate_all(&values);

        if !FormValidator::is_valid(&results) {
            // Reset messages from the previous attempt so a since-corrected
            // field does not keep its stale error.
            self.display.clear_field_errors();
            for result in results.iter().filter(|r| !r.valid) {
                if let Some(reason) = &result.reason {
                    self.display.field_error(&result.field, reason);
                }
            }
            self.display
                .set_status(VALIDATION_ERROR_MESSAGE, Severity::Error);
            self.settle();
            let failing = results.into_iter().filter(|r| !r.valid).collect();
            return SubmitOutcome::Rejected(failing);
        }

        self.set_phase(SubmitPhase::Submitting);
        self.display.clear_field_errors();
        self.display.set_busy(true);

        let request = SubmissionRequest {
            form_id: self.form_id.clone(),
            fields: values,
        };
        let timeout = Duration::from_secs(self.rules.submission_timeout_seconds);
        let outcome = match tokio::time::timeout(timeout, self.submitter.submit(&request)).await {
            Ok(Ok(response)) if response.success => {
                self.on_accepted(&request, response.message, response.reference)
            }
            Ok(Ok(response)) => {
                // The collaborator declined; keep the fields for a retry.
                let message = response
                    .message
                    .unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string());
                self.display.set_status(&message, Severity::Error);
                SubmitOutcome::Failed(message)
            }
            Ok(Err(e)) => {
                warn!("Submission transport error for {}: {}", self.form_id, e);
                self.display
                    .set_status(NETWORK_ERROR_MESSAGE, Severity::Error);
                SubmitOutcome::Failed(NETWORK_ERROR_MESSAGE.to_string())
            }
            Err(_) => {
                warn!("Submission timed out for {}", self.form_id);
                self.display
                    .set_status(NETWORK_ERROR_MESSAGE, Severity::Error);
                SubmitOutcome::Failed(NETWORK_ERROR_MESSAGE.to_string())
            }
        };

        self.display.set_busy(false);
        self.settle();
        outcome
    }

    fn on_accepted(
        &self,
        request: &SubmissionRequest,
        message: Option<String>,
        reference: Option<String>,
    ) -> SubmitOutcome {
        self.autosave.cancel();
        self.drafts.clear(&self.form_id);
        self.display.clear_fields();
        self.display.show_quote(&PriceQuote::zero().display());

        let message = message.unwrap_or_else(|| SUCCESS_MESSAGE.to_string());
        self.display.set_status(&message, Severity::Success);
        self.notifier.notify(&message, Severity::Success);
        // Success messages fade out on their own; errors stay until retry.
        self.status_dismiss.schedule();

        let event = FormSubmittedEvent {
            form_id: self.form_id.clone(),
            reference: reference.as_deref().and_then(|r| Uuid::parse_str(r).ok()),
            activity_id: request.fields.get("activity").cloned(),
            participants: request
                .fields
                .get("participants")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            timestamp: chrono::Utc::now().timestamp(),
        };
        info!(?event, "Form submission accepted");

        SubmitOutcome::Accepted { reference }
    }

    /// Every submit path ends here: interactive again, nothing in flight.
    fn settle(&self) {
        self.set_phase(SubmitPhase::Idle);
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// Restore a saved draft into the form, if one exists.
    pub fn restore_draft(&self) {
        for (field, value) in self.drafts.load(&self.form_id) {
            if !value.is_empty() {
                self.display.set_field_value(&field, &value);
            }
        }
    }

    /// Apply an `?activity=` style preselect when the id is real.
    pub fn preselect_activity(&self, activity_id: &str) {
        if self.catalog.contains(activity_id) {
            self.display.set_field_value("activity", activity_id);
        }
    }

    /// Duration choices for the currently relevant activity.
    pub fn duration_options_for(&self, activity_id: &str) -> &'static [DurationOption] {
        self.catalog
            .get(activity_id)
            .map(|a| a.duration_options())
            .unwrap_or(&[])
    }

    /// Tear down timers before the form instance goes away.
    pub fn teardown(&self) {
        self.autosave.cancel();
        self.status_dismiss.cancel();
    }

    fn collect_fields(&self) -> HashMap<String, String> {
        self.validator
            .specs()
            .iter()
            .map(|spec| {
                let value = self.fields.read(&spec.name).unwrap_or_default();
                (spec.name.clone(), value)
            })
            .collect()
    }
}
