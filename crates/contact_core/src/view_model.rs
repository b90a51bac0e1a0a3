use crate::Field;

pub const THANK_YOU_TEXT: &str = "Thank you for your message!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormViewModel {
    pub name: FieldView,
    pub email: FieldView,
    pub message: FieldView,
    pub submitted: bool,
    /// Empty when no delivery has failed.
    pub error_message: String,
    pub fallback_email: String,
    pub dirty: bool,
}

impl FormViewModel {
    pub fn fields(&self) -> [&FieldView; 3] {
        [&self.name, &self.email, &self.message]
    }

    pub fn thank_you(&self) -> Option<&'static str> {
        self.submitted.then_some(THANK_YOU_TEXT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub error: bool,
    pub helper_text: Option<&'static str>,
}
