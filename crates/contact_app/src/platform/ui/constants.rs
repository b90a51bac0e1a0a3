pub const HEADING: &str = "Contact Me";
pub const DIVIDER: &str = "----------";
pub const PROMPT: &str = "> ";
pub const SEND_LABEL: &str = "Send Message";
/// Escape accepted in field text for a line break in the message.
pub const NEWLINE_ESCAPE: &str = "\\n";
pub const EMPTY_VALUE: &str = "(empty)";
