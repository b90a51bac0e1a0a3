use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[a-z0-9_.+-]+@[a-z0-9.-]+\.[a-z.]{2,6}$")
        .expect("email pattern compiles")
});

/// Decides whether a string looks like an email address.
pub trait EmailValidator {
    fn is_valid(&self, text: &str) -> bool;
}

impl<F> EmailValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid(&self, text: &str) -> bool {
        self(text)
    }
}

/// `local@domain.tld` with a 2-6 letter top-level domain.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEmailValidator;

impl EmailValidator for StandardEmailValidator {
    fn is_valid(&self, text: &str) -> bool {
        is_valid_email(text)
    }
}

pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_compiles() {
        LazyLock::force(&EMAIL_PATTERN);
    }

    #[test]
    fn accepts_common_addresses() {
        for addr in ["a@b.com", "jane.doe+site@mail.example.org", "X_Y@Host.IO"] {
            assert!(is_valid_email(addr), "{addr}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for addr in ["", "not-an-email", "a@b", "@b.com", "a b@c.com", "a@b.c", "a@b.toolongtld"] {
            assert!(!is_valid_email(addr), "{addr}");
        }
    }

    #[test]
    fn closures_are_validators() {
        let only_example = |text: &str| text.ends_with("@example.com");
        assert!(only_example.is_valid("me@example.com"));
        assert!(!only_example.is_valid("me@b.com"));
    }
}
