use super::constants::{DIVIDER, HEADING, SEND_LABEL};

/// Static page chrome printed once when the form mounts.
pub fn initial_screen(fallback_email: &str) -> Vec<String> {
    let mut lines = vec![
        HEADING.to_string(),
        DIVIDER.to_string(),
        format!(
            "You can get in touch by sending a message here or emailing me at {fallback_email}"
        ),
        String::new(),
    ];
    lines.extend(help_lines());
    lines
}

pub fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  name <text>          fill in your name".to_string(),
        "  email <text>         fill in your email address".to_string(),
        "  message <text>       fill in the message (\\n for a new line)".to_string(),
        "  type <field> <text>  edit a field without leaving it".to_string(),
        "  leave <field>        leave a field as it is".to_string(),
        format!("  send                 {SEND_LABEL}"),
        "  help                 show this list".to_string(),
        "  quit                 close the form".to_string(),
    ]
}
