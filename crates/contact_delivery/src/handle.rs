use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use form_logging::{form_debug, form_warn};

use crate::send::{DeliverySettings, EmailJsMailer, Mailer};
use crate::{DeliveryEvent, SubmissionId, TemplateParams};

#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    #[error("failed to start delivery worker: {0}")]
    Startup(#[from] io::Error),
}

enum DeliveryCommand {
    Send {
        submission_id: SubmissionId,
        params: TemplateParams,
    },
}

/// Runs sends on a background tokio runtime and hands completions back
/// through a channel, so the caller's loop never blocks on the network.
#[derive(Clone)]
pub struct DeliveryHandle {
    cmd_tx: mpsc::Sender<DeliveryCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<DeliveryEvent>>>,
}

impl DeliveryHandle {
    pub fn new(settings: DeliverySettings) -> Result<Self, HandleError> {
        Self::with_mailer(Arc::new(EmailJsMailer::new(settings)))
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Result<Self, HandleError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("contact-delivery-io")
            .build()?;

        thread::Builder::new()
            .name("contact-delivery".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let mailer = mailer.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(mailer.as_ref(), command, event_tx).await;
                    });
                }
                form_debug!("Delivery command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn send(&self, submission_id: SubmissionId, params: TemplateParams) {
        if self
            .cmd_tx
            .send(DeliveryCommand::Send {
                submission_id,
                params,
            })
            .is_err()
        {
            form_warn!("Delivery worker gone; submission {} dropped", submission_id);
        }
    }

    pub fn try_recv(&self) -> Option<DeliveryEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next completion. `Disconnected` means the
    /// worker is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<DeliveryEvent, RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    mailer: &dyn Mailer,
    command: DeliveryCommand,
    event_tx: mpsc::Sender<DeliveryEvent>,
) {
    match command {
        DeliveryCommand::Send {
            submission_id,
            params,
        } => {
            let result = mailer.send(submission_id, &params).await;
            let _ = event_tx.send(DeliveryEvent::Completed {
                submission_id,
                result,
            });
        }
    }
}
