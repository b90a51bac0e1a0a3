use contact_core::{FieldView, FormViewModel};

use super::constants::EMPTY_VALUE;

/// Formats the form for the terminal, one entry per output line.
pub fn render(view: &FormViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    for field in view.fields() {
        lines.extend(render_field(field));
    }

    if !view.error_message.is_empty() {
        lines.push(format!("! {}", view.error_message));
    }
    if let Some(thanks) = view.thank_you() {
        lines.push(thanks.to_string());
    }

    lines
}

fn render_field(field: &FieldView) -> Vec<String> {
    let marker = if field.error { "*" } else { " " };
    let mut value_lines = field.value.lines();
    let first = match value_lines.next() {
        Some(line) => line,
        None => EMPTY_VALUE,
    };

    let mut lines = vec![format!("{marker} {}: {first}", field.label)];
    let indent = " ".repeat(field.label.len() + 4);
    lines.extend(value_lines.map(|line| format!("{indent}{line}")));
    if let Some(hint) = field.helper_text {
        lines.push(format!("    {hint}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::{update, DeliveryResult, Field, FormState, Msg};

    fn apply(state: FormState, msgs: Vec<Msg>) -> FormState {
        msgs.into_iter().fold(state, |state, msg| update(state, msg).0)
    }

    #[test]
    fn empty_form_shows_placeholders() {
        let lines = render(&FormState::default().view());
        assert_eq!(
            lines,
            vec![
                "  Name: (empty)".to_string(),
                "  Email address: (empty)".to_string(),
                "  Message: (empty)".to_string(),
            ]
        );
    }

    #[test]
    fn errors_are_marked_with_hints() {
        let state = apply(
            FormState::default(),
            vec![
                Msg::FieldChanged {
                    field: Field::Email,
                    value: "nope".to_string(),
                },
                Msg::FieldBlurred {
                    field: Field::Email,
                    value: "nope".to_string(),
                },
            ],
        );
        let lines = render(&state.view());
        assert_eq!(lines[1], "* Email address: nope");
        assert_eq!(lines[2], "    Please enter a valid email address");
    }

    #[test]
    fn multiline_message_is_indented() {
        let state = apply(
            FormState::default(),
            vec![Msg::FieldChanged {
                field: Field::Message,
                value: "Hi\nThanks".to_string(),
            }],
        );
        let lines = render(&state.view());
        assert_eq!(lines[2], "  Message: Hi");
        assert_eq!(lines[3], format!("{}Thanks", " ".repeat(11)));
    }

    #[test]
    fn outcome_lines_follow_fields() {
        let state = apply(
            FormState::new("owner@example.com"),
            vec![
                Msg::DeliveryCompleted {
                    submission_id: 1,
                    result: DeliveryResult::Failed {
                        detail: "timeout".to_string(),
                    },
                },
                Msg::DeliveryCompleted {
                    submission_id: 2,
                    result: DeliveryResult::Sent,
                },
            ],
        );
        let lines = render(&state.view());
        assert!(lines[3].starts_with("! I'm sorry"));
        assert!(lines[3].contains("owner@example.com"));
        assert_eq!(lines[4], "Thank you for your message!");
    }
}
