pub mod rules;
pub mod validator;

pub use rules::ValidationError;
pub use validator::{FieldKind, FieldSpec, FormValidator, ValidationResult};
