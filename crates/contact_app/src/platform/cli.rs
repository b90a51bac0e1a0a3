use std::path::PathBuf;

use clap::Parser;

/// Terminal contact form that sends messages through EmailJS.
#[derive(Parser, Debug)]
#[command(name = "contact_app")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// RON config file; `./contact.ron` is used when present and this is omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_optional() {
        let cli = Cli::try_parse_from(["contact_app"]).unwrap();
        assert_eq!(cli.config, None);
    }

    #[test]
    fn config_flag_takes_a_path() {
        let cli = Cli::try_parse_from(["contact_app", "--config", "site.ron"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.ron")));
    }

    #[test]
    fn help_is_not_a_config_path() {
        let err = Cli::try_parse_from(["contact_app", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
