use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use contact_core::{ContactPayload, DeliveryResult, Effect, Msg};
use contact_delivery::{DeliveryEvent, DeliveryHandle, TemplateParams};
use form_logging::{form_debug, form_info, form_warn};

use super::app::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct EffectRunner {
    delivery: DeliveryHandle,
}

impl EffectRunner {
    pub fn new(delivery: DeliveryHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { delivery };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendEmail {
                    submission_id,
                    payload,
                } => {
                    form_debug!("SendEmail submission_id={}", submission_id);
                    self.delivery.send(submission_id, to_template_params(payload));
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let delivery = self.delivery.clone();
        thread::spawn(move || {
            while forward(delivery.recv_timeout(POLL_INTERVAL), &event_tx) {}
            form_debug!("Delivery event loop stopped");
        });
    }
}

/// Passes one delivery outcome on to the app. Returns false once either side
/// has gone away.
fn forward(
    received: Result<DeliveryEvent, RecvTimeoutError>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> bool {
    match received {
        Ok(event) => event_tx.send(AppEvent::Form(to_msg(event))).is_ok(),
        Err(RecvTimeoutError::Timeout) => true,
        Err(RecvTimeoutError::Disconnected) => {
            form_warn!("Delivery worker disconnected");
            false
        }
    }
}

fn to_template_params(payload: ContactPayload) -> TemplateParams {
    TemplateParams {
        name: payload.name,
        email: payload.email,
        message: payload.message,
    }
}

fn to_msg(event: DeliveryEvent) -> Msg {
    match event {
        DeliveryEvent::Completed {
            submission_id,
            result,
        } => {
            let result = match result {
                Ok(()) => {
                    form_info!("Submission {} delivered", submission_id);
                    DeliveryResult::Sent
                }
                Err(err) => {
                    form_warn!("Submission {} failed: {}", submission_id, err);
                    DeliveryResult::Failed {
                        detail: err.to_string(),
                    }
                }
            };
            Msg::DeliveryCompleted {
                submission_id,
                result,
            }
        }
    }
}
