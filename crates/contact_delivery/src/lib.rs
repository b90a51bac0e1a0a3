//! Contact delivery: sends contact form submissions through EmailJS and
//! reports completions back to the caller.
mod handle;
mod send;
mod types;

pub use handle::{DeliveryHandle, HandleError};
pub use send::{default_endpoint, DeliverySettings, EmailJsMailer, Mailer, DEFAULT_ENDPOINT};
pub use types::{DeliveryError, DeliveryEvent, FailureKind, SubmissionId, TemplateParams};
