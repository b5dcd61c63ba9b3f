//! Form domain layer
//!
//! Field value objects, the declared registration form and the
//! serializable [`FormState`] mirrored into the snapshot store.

mod field;
mod form_state;

pub use field::{FieldKind, FieldValue, FormField};
pub use form_state::{Form, FormState, RegistrationForm, GENDERS, INTERESTS, STEP_TITLES};
