use chrono::{Duration as ChronoDuration, Utc};
use greenscape_booking::{
    ControllerDeps, DisplaySurface, FieldSource, FormController, MockSubmissionAdapter,
    NullNotifier, Severity, SubmitOutcome, SubmitPhase,
};
use greenscape_catalog::{Catalog, PricingEngine, PricingRules, QuoteDisplay};
use greenscape_forms::FormValidator;
use greenscape_store::app_config::BusinessRules;
use greenscape_store::{DraftRepo, MemoryStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct PageDisplay {
    field_errors: Mutex<HashMap<String, String>>,
    last_quote: Mutex<Option<QuoteDisplay>>,
    status: Mutex<Option<(String, Severity)>>,
    fields_cleared: Mutex<bool>,
}

impl DisplaySurface for PageDisplay {
    fn field_error(&self, field: &str, message: &str) {
        self.field_errors
            .lock()
            .unwrap()
            .insert(field.to_string(), message.to_string());
    }
    fn clear_field_error(&self, field: &str) {
        self.field_errors.lock().unwrap().remove(field);
    }
    fn clear_field_errors(&self) {
        self.field_errors.lock().unwrap().clear();
    }
    fn show_quote(&self, quote: &QuoteDisplay) {
        *self.last_quote.lock().unwrap() = Some(quote.clone());
    }
    fn set_status(&self, message: &str, severity: Severity) {
        *self.status.lock().unwrap() = Some((message.to_string(), severity));
    }
    fn clear_status(&self) {
        *self.status.lock().unwrap() = None;
    }
    fn set_busy(&self, _busy: bool) {}
    fn clear_fields(&self) {
        *self.fields_cleared.lock().unwrap() = true;
    }
    fn set_field_value(&self, _field: &str, _value: &str) {}
}

struct PageFields(HashMap<String, String>);

impl FieldSource for PageFields {
    fn read(&self, field: &str) -> Option<String> {
        self.0.get(field).cloned()
    }
}

fn booking_controller(
    fields: HashMap<String, String>,
    display: Arc<PageDisplay>,
) -> FormController {
    FormController::new(
        "booking",
        Catalog::greenscape(),
        PricingEngine::new(PricingRules::default()),
        FormValidator::booking_form(),
        ControllerDeps {
            fields: Arc::new(PageFields(fields)),
            display,
            notifier: Arc::new(NullNotifier),
            submitter: Arc::new(MockSubmissionAdapter::accepting()),
            drafts: DraftRepo::new(Arc::new(MemoryStore::new())),
            rules: BusinessRules::default(),
        },
    )
}

fn filled_booking_form() -> HashMap<String, String> {
    let tomorrow = (Utc::now().date_naive() + ChronoDuration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    [
        ("name", "Jo Ann-Lee"),
        ("email", "jo@example.com"),
        ("phone", "+254 712 345678"),
        ("activity", "forest-hiking"),
        ("participants", "7"),
        ("date", tomorrow.as_str()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[tokio::test]
async fn group_booking_end_to_end() {
    let display = Arc::new(PageDisplay::default());
    let controller = booking_controller(filled_booking_form(), display.clone());

    // Selecting forest-hiking with 7 participants prices at the discounted
    // unit rate: 45 * 0.85 = 38.25 -> $38 shown, $266 total shown.
    controller.refresh_pricing();
    {
        let quote = display.last_quote.lock().unwrap().clone().unwrap();
        assert_eq!(quote.unit_usd, "$38");
        assert_eq!(quote.total_usd, "$266");
        assert_eq!(quote.unit_ksh, "KSH 5,738");
        assert!(quote.discount_applied);
    }

    let outcome = controller.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
    assert!(*display.fields_cleared.lock().unwrap());
    assert_eq!(controller.phase(), SubmitPhase::Idle);

    let status = display.status.lock().unwrap().clone().unwrap();
    assert_eq!(status.1, Severity::Success);

    controller.teardown();
}

#[tokio::test]
async fn missing_required_fields_are_each_reported() {
    let display = Arc::new(PageDisplay::default());
    let controller = booking_controller(HashMap::new(), display.clone());

    let outcome = controller.submit().await;
    match outcome {
        SubmitOutcome::Rejected(failing) => assert_eq!(failing.len(), 6),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(display.field_errors.lock().unwrap().len(), 6);
    assert!(!*display.fields_cleared.lock().unwrap());
    assert_eq!(controller.phase(), SubmitPhase::Idle);
}
