//! CLI argument definitions for csvq.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvq",
    version,
    about = "Process CSV files with filtering and aggregation",
    long_about = "Load a CSV file, optionally keep the rows matching one condition,\n\
                  and either print the rows or one aggregate over a column.\n\n\
                  Examples:\n  \
                  csvq products.csv --where 'price>300'\n  \
                  csvq products.csv --where 'brand=apple' --aggregate 'rating=avg'"
)]
pub struct Cli {
    /// Path to the CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Filter condition, e.g. "price>300" (operators: = != > < >= <=).
    #[arg(long = "where", value_name = "CONDITION")]
    pub condition: Option<String>,

    /// Aggregation as column=operation, e.g. "rating=avg" (avg, min, max).
    #[arg(long = "aggregate", value_name = "COLUMN=OPERATION")]
    pub aggregate: Option<String>,

    /// Field delimiter (a single ASCII character).
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_delimiter
    )]
    pub delimiter: u8,

    /// Output format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputFormatArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{value}'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_where_and_aggregate() {
        let cli = Cli::try_parse_from([
            "csvq",
            "data.csv",
            "--where",
            "rating>=4.5",
            "--aggregate",
            "price=max",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("data.csv"));
        assert_eq!(cli.condition.as_deref(), Some("rating>=4.5"));
        assert_eq!(cli.aggregate.as_deref(), Some("price=max"));
        assert_eq!(cli.delimiter, b',');
        assert!(!cli.log_timestamps);
    }

    #[test]
    fn test_parse_log_timestamps() {
        let cli = Cli::try_parse_from(["csvq", "data.csv", "--log-timestamps"]).unwrap();
        assert!(cli.log_timestamps);
    }

    #[test]
    fn test_delimiter_parser() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
