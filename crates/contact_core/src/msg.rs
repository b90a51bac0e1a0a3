use crate::{Field, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a field.
    FieldChanged { field: Field, value: String },
    /// Focus left a field; `value` is the text at that moment.
    FieldBlurred { field: Field, value: String },
    /// User pressed "Send Message".
    SubmitClicked,
    /// The email-delivery service answered for an earlier submission.
    DeliveryCompleted {
        submission_id: SubmissionId,
        result: DeliveryResult,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Sent,
    Failed { detail: String },
}
