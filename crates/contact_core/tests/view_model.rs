use contact_core::{update, DeliveryResult, Field, FormState, Msg, THANK_YOU_TEXT};

fn blur(state: FormState, field: Field, value: &str) -> FormState {
    update(
        state,
        Msg::FieldBlurred {
            field,
            value: value.to_string(),
        },
    )
    .0
}

#[test]
fn fresh_form_has_no_hints() {
    let view = FormState::new("owner@example.com").view();
    for field in view.fields() {
        assert!(!field.error);
        assert_eq!(field.helper_text, None);
    }
    assert_eq!(view.name.label, "Name");
    assert_eq!(view.email.label, "Email address");
    assert_eq!(view.message.label, "Message");
    assert_eq!(view.thank_you(), None);
    assert_eq!(view.fallback_email, "owner@example.com");
}

#[test]
fn empty_hints_per_field() {
    let mut state = FormState::default();
    for field in Field::ALL {
        state = blur(state, field, "");
    }
    let view = state.view();

    assert!(view.name.error);
    assert_eq!(view.name.helper_text, Some("Please enter your name"));
    assert_eq!(view.email.helper_text, Some("Please enter your email address"));
    assert_eq!(view.message.helper_text, Some("Please enter a message"));
}

#[test]
fn invalid_email_hint() {
    let view = blur(FormState::default(), Field::Email, "nope").view();
    assert!(view.email.error);
    assert_eq!(
        view.email.helper_text,
        Some("Please enter a valid email address")
    );
}

#[test]
fn thank_you_after_send() {
    let (state, _) = update(
        FormState::default(),
        Msg::DeliveryCompleted {
            submission_id: 1,
            result: DeliveryResult::Sent,
        },
    );
    let view = state.view();
    assert!(view.submitted);
    assert_eq!(view.thank_you(), Some(THANK_YOU_TEXT));
    assert!(view.dirty);
}

#[test]
fn field_keys_round_trip() {
    for field in Field::ALL {
        assert_eq!(Field::from_key(field.key()), Some(field));
    }
    assert_eq!(Field::from_key("phone"), None);
}
