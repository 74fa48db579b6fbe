//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use calfetch_core::TracingOutputFormat;

/// Fetch calendar events from Google via the Google Calendar API.
///
/// Prints the events of the requested calendar to stdout, one JSON object
/// per line.
#[derive(Debug, Parser)]
#[command(name = "calfetch")]
#[command(author, version, about)]
pub struct Cli {
    /// Calendar id
    #[arg(long, short = 'c', default_value = "primary")]
    pub calendar: String,

    /// Only events that start before 3am of the next day and end after now.
    /// Give a number (fractions allowed) to make it that many days ahead.
    #[arg(
        long,
        value_name = "DAYS",
        num_args = 0..=1,
        default_missing_value = "1",
        value_parser = parse_days
    )]
    pub upcoming: Option<f64>,

    /// Path to the OAuth credentials file [default: ~/.google-api.yaml]
    #[arg(long, env = "CALFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Returns the credentials file to load.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(calfetch_providers::credentials::default_path)
    }
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable logs
    Compact,
    /// One JSON object per log line
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

fn parse_days(value: &str) -> Result<f64, String> {
    let days: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if !days.is_finite() || days < 0.0 {
        return Err(format!("`{}` must be a finite number >= 0", value));
    }
    Ok(days)
}
