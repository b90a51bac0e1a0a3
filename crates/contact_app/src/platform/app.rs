use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use contact_core::{update, Effect, FormState, Msg};
use contact_delivery::DeliveryHandle;
use form_logging::{form_debug, form_info, form_warn};

use super::cli::Cli;
use super::config::{self, ConfigSource};
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::PROMPT;
use super::ui::input::{parse_line, UiCommand};
use super::ui::{layout, render};

pub enum AppEvent {
    Ui(UiCommand),
    Form(Msg),
    InvalidInput(String),
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = config::load(cli.config.as_deref()).context("loading config")?;
    logging::initialize(loaded.config.log);
    match &loaded.source {
        ConfigSource::File(path) => form_info!("Loaded config from {:?}", path),
        ConfigSource::Defaults { looked_at } => {
            form_warn!("No config at {:?}; using defaults", looked_at);
            eprintln!("Warning: no config at {looked_at:?}; using defaults");
        }
    }
    let config = loaded.config;

    let delivery =
        DeliveryHandle::new(config.delivery.to_settings()).context("starting email delivery")?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(delivery, event_tx.clone());
    spawn_input_reader(event_tx);

    let state = FormState::new(config.contact.fallback_email.clone())
        .with_policy(config.contact.submit_policy.into());
    let mut shell = Shell::new(state, effects, io::stdout());
    shell.start()?;

    form_info!("Contact form ready");
    while let Ok(event) = event_rx.recv() {
        if shell.handle(event)? == Flow::Exit {
            break;
        }
    }

    form_info!("Contact form closed");
    Ok(())
}

/// Owns the form state and turns app events into updates, effects and output.
pub struct Shell<W> {
    state: FormState,
    effects: EffectRunner,
    /// Sends issued but not yet answered.
    in_flight: usize,
    input_closed: bool,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(state: FormState, effects: EffectRunner, out: W) -> Self {
        Self {
            state,
            effects,
            in_flight: 0,
            input_closed: false,
            out,
        }
    }

    /// Prints the page and the empty form.
    pub fn start(&mut self) -> io::Result<()> {
        let mut lines = layout::initial_screen(self.state.fallback_email());
        lines.push(String::new());
        lines.extend(render::render(&self.state.view()));
        self.show(&lines)?;
        self.prompt()
    }

    /// Applies one event. Once input has closed, keeps going until every
    /// outstanding send has been answered.
    pub fn handle(&mut self, event: AppEvent) -> io::Result<Flow> {
        match event {
            AppEvent::Ui(UiCommand::Quit) => return Ok(Flow::Exit),
            AppEvent::Ui(UiCommand::Help) => self.show(&layout::help_lines())?,
            AppEvent::Ui(command) => {
                let msgs = command.into_msgs(|field| self.state.field(field).value.clone());
                for msg in msgs {
                    self.apply(msg);
                }
                self.render_if_dirty()?;
            }
            AppEvent::Form(msg) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.apply(msg);
                self.render_if_dirty()?;
            }
            AppEvent::InvalidInput(message) => self.show(&[message])?,
            AppEvent::InputClosed => self.input_closed = true,
        }

        if self.input_closed {
            return Ok(if self.in_flight == 0 {
                Flow::Exit
            } else {
                Flow::Continue
            });
        }
        self.prompt()?;
        Ok(Flow::Continue)
    }

    fn apply(&mut self, msg: Msg) {
        form_debug!("dispatch {}", msg_kind(&msg));
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;

        self.in_flight += effects
            .iter()
            .filter(|effect| matches!(effect, Effect::SendEmail { .. }))
            .count();
        self.effects.enqueue(effects);
    }

    fn render_if_dirty(&mut self) -> io::Result<()> {
        if self.state.consume_dirty() {
            let lines = render::render(&self.state.view());
            self.show(&lines)?;
        }
        Ok(())
    }

    fn show(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }
}

// Field values stay out of the log.
fn msg_kind(msg: &Msg) -> String {
    match msg {
        Msg::FieldChanged { field, .. } => format!("FieldChanged({})", field.key()),
        Msg::FieldBlurred { field, .. } => format!("FieldBlurred({})", field.key()),
        Msg::SubmitClicked => "SubmitClicked".to_string(),
        Msg::DeliveryCompleted { submission_id, .. } => {
            format!("DeliveryCompleted({submission_id})")
        }
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_line(&line) {
                Ok(Some(command)) => AppEvent::Ui(command),
                Ok(None) => continue,
                Err(err) => AppEvent::InvalidInput(err.to_string()),
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use contact_core::Field;
    use contact_delivery::{DeliveryError, FailureKind, Mailer, SubmissionId, TemplateParams};

    use super::*;

    /// Accepts every message except one whose text is "fail".
    struct ScriptedMailer;

    #[async_trait::async_trait]
    impl Mailer for ScriptedMailer {
        async fn send(
            &self,
            _submission_id: SubmissionId,
            params: &TemplateParams,
        ) -> Result<(), DeliveryError> {
            if params.message == "fail" {
                Err(DeliveryError {
                    kind: FailureKind::Network,
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn shell() -> (Shell<Vec<u8>>, mpsc::Receiver<AppEvent>) {
        let delivery = DeliveryHandle::with_mailer(Arc::new(ScriptedMailer)).unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        let effects = EffectRunner::new(delivery, event_tx);
        let shell = Shell::new(FormState::new("owner@example.com"), effects, Vec::new());
        (shell, event_rx)
    }

    fn enter(field: Field, value: &str) -> AppEvent {
        AppEvent::Ui(UiCommand::Enter {
            field,
            value: value.to_string(),
        })
    }

    fn next_completion(event_rx: &mpsc::Receiver<AppEvent>) -> AppEvent {
        let event = event_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("delivery completion");
        assert!(matches!(event, AppEvent::Form(Msg::DeliveryCompleted { .. })));
        event
    }

    fn output(shell: &mut Shell<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut shell.out)).unwrap()
    }

    #[test]
    fn pending_send_is_applied_after_input_closes() {
        let (mut shell, event_rx) = shell();
        assert_eq!(shell.handle(enter(Field::Name, "Ada")).unwrap(), Flow::Continue);
        assert_eq!(shell.handle(enter(Field::Email, "a@b.com")).unwrap(), Flow::Continue);
        assert_eq!(shell.handle(enter(Field::Message, "hi")).unwrap(), Flow::Continue);
        assert_eq!(shell.handle(AppEvent::Ui(UiCommand::Send)).unwrap(), Flow::Continue);
        assert_eq!(shell.in_flight, 1);

        assert_eq!(shell.handle(AppEvent::InputClosed).unwrap(), Flow::Continue);

        let completion = next_completion(&event_rx);
        assert_eq!(shell.handle(completion).unwrap(), Flow::Exit);
        assert_eq!(shell.in_flight, 0);
        assert!(shell.state.submission().submitted);
        assert_eq!(shell.state.field(Field::Name).value, "");
        assert!(output(&mut shell).contains("Thank you for your message!"));
    }

    #[test]
    fn closing_input_with_nothing_pending_exits() {
        let (mut shell, _event_rx) = shell();
        assert_eq!(shell.handle(AppEvent::InputClosed).unwrap(), Flow::Exit);
    }

    #[test]
    fn every_send_is_awaited() {
        let (mut shell, event_rx) = shell();
        shell.handle(enter(Field::Message, "fail")).unwrap();
        shell.handle(AppEvent::Ui(UiCommand::Send)).unwrap();
        shell.handle(AppEvent::Ui(UiCommand::Send)).unwrap();
        assert_eq!(shell.in_flight, 2);
        shell.handle(AppEvent::InputClosed).unwrap();

        let first = next_completion(&event_rx);
        assert_eq!(shell.handle(first).unwrap(), Flow::Continue);
        let second = next_completion(&event_rx);
        assert_eq!(shell.handle(second).unwrap(), Flow::Exit);

        let error = &shell.state.submission().error_message;
        assert!(error.contains("connection refused"));
        assert!(error.contains("owner@example.com"));
    }

    #[test]
    fn quit_exits_immediately() {
        let (mut shell, _event_rx) = shell();
        assert_eq!(shell.handle(AppEvent::Ui(UiCommand::Quit)).unwrap(), Flow::Exit);
    }

    #[test]
    fn one_command_renders_the_form_once() {
        let (mut shell, _event_rx) = shell();
        shell.handle(enter(Field::Email, "nope")).unwrap();

        let printed = output(&mut shell);
        assert_eq!(printed.matches("Email address:").count(), 1);
        assert!(printed.contains("Please enter a valid email address"));
        assert!(printed.ends_with(PROMPT));
    }

    #[test]
    fn unchanged_form_is_not_reprinted() {
        let (mut shell, _event_rx) = shell();
        shell.handle(enter(Field::Name, "Ada")).unwrap();
        output(&mut shell);

        shell.handle(enter(Field::Name, "Ada")).unwrap();
        assert_eq!(output(&mut shell), PROMPT);
    }
}
