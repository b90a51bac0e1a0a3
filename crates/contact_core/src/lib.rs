//! Contact form core: pure state machine, validation and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{ContactPayload, Effect};
pub use msg::{DeliveryResult, Msg};
pub use state::{
    delivery_failure_message, Field, FieldState, FormState, SubmissionId, SubmissionState,
    SubmitPolicy, DEFAULT_FALLBACK_EMAIL,
};
pub use update::{update, update_with};
pub use validate::{is_valid_email, EmailValidator, StandardEmailValidator};
pub use view_model::{FieldView, FormViewModel, THANK_YOU_TEXT};
