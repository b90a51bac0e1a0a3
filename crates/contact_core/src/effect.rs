use crate::SubmissionId;

/// Template parameters handed to the email-delivery service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the payload; the outcome comes back as `Msg::DeliveryCompleted`.
    SendEmail {
        submission_id: SubmissionId,
        payload: ContactPayload,
    },
}
