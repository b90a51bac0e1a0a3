use contact_core::{Field, Msg};

use super::constants::NEWLINE_ESCAPE;

/// One line of terminal input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// `<field> <text>`: type into the field, then move focus away.
    Enter { field: Field, value: String },
    /// `type <field> <text>`: type into the field and keep focus.
    Type { field: Field, value: String },
    /// `leave <field>`: move focus away without typing.
    Leave { field: Field },
    Send,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command `{0}` (type `help`)")]
    UnknownCommand(String),
    #[error("unknown field `{0}`; use name, email or message")]
    UnknownField(String),
    #[error("`{0}` needs a field name")]
    MissingField(&'static str),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<UiCommand>, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (word, rest) = split_word(line.trim_start());

    let command = match word {
        "send" | "submit" => UiCommand::Send,
        "help" | "?" => UiCommand::Help,
        "quit" | "exit" => UiCommand::Quit,
        "type" => {
            let (field, value) = split_word(rest);
            UiCommand::Type {
                field: parse_field(field, "type")?,
                value: unescape(value),
            }
        }
        "leave" => {
            let (field, _) = split_word(rest);
            UiCommand::Leave {
                field: parse_field(field, "leave")?,
            }
        }
        other => match Field::from_key(other) {
            Some(field) => UiCommand::Enter {
                field,
                value: unescape(rest),
            },
            None => return Err(InputError::UnknownCommand(other.to_string())),
        },
    };
    Ok(Some(command))
}

impl UiCommand {
    /// Form events this command produces, in order.
    pub fn into_msgs(self, current: impl Fn(Field) -> String) -> Vec<Msg> {
        match self {
            UiCommand::Enter { field, value } => vec![
                Msg::FieldChanged {
                    field,
                    value: value.clone(),
                },
                Msg::FieldBlurred { field, value },
            ],
            UiCommand::Type { field, value } => vec![Msg::FieldChanged { field, value }],
            UiCommand::Leave { field } => vec![Msg::FieldBlurred {
                field,
                value: current(field),
            }],
            UiCommand::Send => vec![Msg::SubmitClicked],
            UiCommand::Help | UiCommand::Quit => Vec::new(),
        }
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(' ') {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn parse_field(key: &str, command: &'static str) -> Result<Field, InputError> {
    if key.is_empty() {
        return Err(InputError::MissingField(command));
    }
    Field::from_key(key).ok_or_else(|| InputError::UnknownField(key.to_string()))
}

fn unescape(value: &str) -> String {
    value.trim_end().replace(NEWLINE_ESCAPE, "\n")
}
