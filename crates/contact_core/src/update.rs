use crate::validate::{EmailValidator, StandardEmailValidator};
use crate::{DeliveryResult, Effect, Field, FormState, Msg, SubmitPolicy};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    update_with(state, msg, &StandardEmailValidator)
}

/// Same as [`update`] with a caller-supplied email predicate.
pub fn update_with(
    mut state: FormState,
    msg: Msg,
    validator: &dyn EmailValidator,
) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { field, value } => {
            // Flags are left alone until the next blur or successful send.
            state.set_value(field, value);
            Vec::new()
        }
        Msg::FieldBlurred { field, value } => {
            state.check_field(field, &value, validator);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.policy() == SubmitPolicy::RequireValid && !gate_passes(&mut state, validator)
            {
                return (state, Vec::new());
            }
            let submission_id = state.allocate_submission_id();
            vec![Effect::SendEmail {
                submission_id,
                payload: state.payload(),
            }]
        }
        Msg::DeliveryCompleted {
            submission_id: _,
            result,
        } => {
            // No in-flight tracking: whichever completion arrives last wins.
            match result {
                DeliveryResult::Sent => state.apply_sent(),
                DeliveryResult::Failed { detail } => state.apply_failed(&detail),
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn gate_passes(state: &mut FormState, validator: &dyn EmailValidator) -> bool {
    let mut passes = true;
    for field in Field::ALL {
        let value = state.field(field).value.clone();
        passes &= state.check_field(field, &value, validator);
    }
    passes
}
