use burrow_registry::DIRECT_ACCESS;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "BURROW_STORE_PATH";
pub const BASE_URL_ENV: &str = "BURROW_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_STORE_PATH: &str = "burrow.json";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow", about = "Create, resolve and inspect short codes")]
pub struct CLI {
    /// JSON file holding every record and click.
    #[arg(long, env = STORE_PATH_ENV, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    /// Origin used to build display URLs.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL.
    Create {
        url: String,
        /// Custom short code (3-10 alphanumeric characters).
        #[arg(long)]
        code: Option<String>,
        /// Minutes until the short URL expires.
        #[arg(long)]
        validity: Option<u32>,
    },
    /// Look up an active short code and record a visit.
    Resolve {
        code: String,
        #[arg(long, default_value = DIRECT_ACCESS)]
        source: String,
        /// User-agent-like client signature.
        #[arg(long, default_value = "")]
        client: String,
        /// Only look up, do not record a click.
        #[arg(long)]
        no_click: bool,
    },
    /// Record a visit without resolving.
    Click {
        code: String,
        #[arg(long, default_value = DIRECT_ACCESS)]
        source: String,
        #[arg(long, default_value = "")]
        client: String,
    },
    /// List every record with its clicks.
    List,
    /// Print active/expired/click totals.
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_options() {
        let cli = CLI::try_parse_from([
            "burrow", "create", "https://example.com", "--code", "abc123", "--validity", "5",
        ])
        .unwrap();

        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        match cli.command {
            Command::Create {
                url,
                code,
                validity,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(code.as_deref(), Some("abc123"));
                assert_eq!(validity, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn resolve_defaults_to_direct_access() {
        let cli = CLI::try_parse_from(["burrow", "--log-format", "json", "resolve", "abc123"])
            .unwrap();

        assert_eq!(cli.log_format, LogFormatArg::Json);
        match cli.command {
            Command::Resolve {
                source, no_click, ..
            } => {
                assert_eq!(source, DIRECT_ACCESS);
                assert!(!no_click);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
