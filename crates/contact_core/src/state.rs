use crate::validate::EmailValidator;
use crate::view_model::{FieldView, FormViewModel};
use crate::ContactPayload;

/// Address shown when no fallback contact has been configured.
pub const DEFAULT_FALLBACK_EMAIL: &str = "contact@example.com";

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email address",
            Field::Message => "Message",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    fn empty_hint(self) -> &'static str {
        match self {
            Field::Name => "Please enter your name",
            Field::Email => "Please enter your email address",
            Field::Message => "Please enter a message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// Set when the field lost focus while blank.
    pub is_empty: bool,
    /// Only the email field ever flips this to false.
    pub is_valid: bool,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            value: String::new(),
            is_empty: false,
            is_valid: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionState {
    /// True once any send has succeeded.
    pub submitted: bool,
    /// Last delivery failure, empty until one happens.
    pub error_message: String,
}

/// Whether `SubmitClicked` checks the fields before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// Send whatever is in the fields; hints stay informational.
    #[default]
    Permissive,
    /// Run the blur checks on every field and only send when all pass.
    RequireValid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    name: FieldState,
    email: FieldState,
    message: FieldState,
    submission: SubmissionState,
    fallback_email: String,
    policy: SubmitPolicy,
    next_submission_id: SubmissionId,
    dirty: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_EMAIL)
    }
}

impl FormState {
    pub fn new(fallback_email: impl Into<String>) -> Self {
        Self {
            name: FieldState::default(),
            email: FieldState::default(),
            message: FieldState::default(),
            submission: SubmissionState::default(),
            fallback_email: fallback_email.into(),
            policy: SubmitPolicy::default(),
            next_submission_id: 1,
            dirty: false,
        }
    }

    pub fn with_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn fallback_email(&self) -> &str {
        &self.fallback_email
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn view(&self) -> FormViewModel {
        FormViewModel {
            name: self.field_view(Field::Name),
            email: self.field_view(Field::Email),
            message: self.field_view(Field::Message),
            submitted: self.submission.submitted,
            error_message: self.submission.error_message.clone(),
            fallback_email: self.fallback_email.clone(),
            dirty: self.dirty,
        }
    }

    fn field_view(&self, field: Field) -> FieldView {
        let state = self.field(field);
        let helper_text = if state.is_empty {
            Some(field.empty_hint())
        } else if !state.is_valid {
            Some("Please enter a valid email address")
        } else {
            None
        };
        FieldView {
            field,
            label: field.label(),
            value: state.value.clone(),
            error: state.is_empty || !state.is_valid,
            helper_text,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_value(&mut self, field: Field, value: String) {
        let slot = self.field_mut(field);
        if slot.value != value {
            slot.value = value;
            self.mark_dirty();
        }
    }

    /// Applies the blur checks. Returns true when the field passes them.
    pub(crate) fn check_field(
        &mut self,
        field: Field,
        value: &str,
        validator: &dyn EmailValidator,
    ) -> bool {
        let slot = self.field_mut(field);
        let before = (slot.is_empty, slot.is_valid);
        let blank = value.is_empty();
        if blank {
            slot.is_empty = true;
        }
        let malformed = field == Field::Email && !validator.is_valid(value);
        if malformed {
            slot.is_valid = false;
        }
        if before != (slot.is_empty, slot.is_valid) {
            self.mark_dirty();
        }
        !blank && !malformed
    }

    pub(crate) fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            message: self.message.value.clone(),
        }
    }

    pub(crate) fn allocate_submission_id(&mut self) -> SubmissionId {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        id
    }

    pub(crate) fn apply_sent(&mut self) {
        for field in Field::ALL {
            *self.field_mut(field) = FieldState::default();
        }
        self.submission.submitted = true;
        self.mark_dirty();
    }

    pub(crate) fn apply_failed(&mut self, detail: &str) {
        self.submission.error_message = delivery_failure_message(detail, &self.fallback_email);
        self.mark_dirty();
    }
}

/// Text shown after a failed send, pointing the visitor at a manual contact path.
pub fn delivery_failure_message(detail: &str, fallback_email: &str) -> String {
    format!(
        "I'm sorry, there was an issue sending your message: {detail}. You can email me at {fallback_email}."
    )
}
