pub mod controller;
pub mod display;
pub mod models;
pub mod submission;
pub mod timers;

pub use timers::{DraftSaver, StatusDismisser};
pub use controller::{ControllerDeps, EventKind, FormController};
pub use display::{DisplaySurface, FieldSource, Notifier, NullNotifier, Severity};
pub use models::{
    BookingSelection, SubmissionRequest, SubmissionResponse, SubmitOutcome, SubmitPhase,
};
pub use submission::{MockBehavior, MockSubmissionAdapter, SubmissionAdapter};
