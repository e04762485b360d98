//! Command-line entry flags
//!
//! There is no functional command surface: the binary launches the TUI.
//! Flags only configure where it points and how it logs.

use std::path::PathBuf;

use clap::Parser;

/// Vacation planner terminal client
#[derive(Debug, Parser)]
#[command(name = "vp", about = "Terminal client for the AI vacation planning service", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Planning service base URL (overrides config and environment)
    #[arg(short = 'u', long = "base-url", help = "Planning service base URL")]
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_parse() {
        let cli = Cli::parse_from(["vp"]);
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["vp", "-c", "custom.yml", "-l", "DEBUG", "-u", "http://planner:9000"]);
        assert_eq!(cli.config.unwrap(), PathBuf::from("custom.yml"));
        assert_eq!(cli.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(cli.base_url.as_deref(), Some("http://planner:9000"));
    }
}
