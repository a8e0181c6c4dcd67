//! Command-line interface.
//!
//! Argument parsing lives here; `commands` does the work against an
//! already-loaded dataset so every command can be exercised with an
//! in-memory writer.

pub mod commands;
pub mod render;
pub mod session;
pub mod setup;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::foundation::{DimensionId, Scale};
use crate::domain::survey::AggregationPolicy;
use crate::ports::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "strategy-spectrum")]
#[command(about = "Place an AI strategy on the conservative-to-aggressive spectrum", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML by extension)
    #[arg(long, global = true, env = "STRATEGY_SPECTRUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset JSON file (defaults to the bundled dataset)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Slider scale (discrete = 1-7, percentage = 0-100)
    #[arg(long, global = true)]
    pub scale: Option<Scale>,

    /// How unset dimensions enter the overall score
    #[arg(long, global = true)]
    pub aggregation: Option<AggregationPolicy>,

    /// Fail on dataset issues instead of logging them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the dataset's dimensions
    Dimensions {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Score slider values and print labels with feedback
    Score {
        /// Slider value for one dimension, repeatable
        #[arg(long = "value", value_name = "ID=VALUE", value_parser = parse_assignment)]
        values: Vec<(DimensionId, i64)>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Labels only, without feedback text
        #[arg(long)]
        summary: bool,
    },

    /// Export the scored report to a file
    Export {
        /// Slider value for one dimension, repeatable
        #[arg(long = "value", value_name = "ID=VALUE", value_parser = parse_assignment)]
        values: Vec<(DimensionId, i64)>,

        /// Export format (markdown, html, pdf, json)
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// Output directory (overrides export.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name without extension (overrides export.base_filename)
        #[arg(long)]
        name: Option<String>,

        /// Labels-only document
        #[arg(long)]
        summary: bool,
    },

    /// Print a mailto: link pre-filled with the scored report
    Mail {
        /// Slider value for one dimension, repeatable
        #[arg(long = "value", value_name = "ID=VALUE", value_parser = parse_assignment)]
        values: Vec<(DimensionId, i64)>,

        /// Recipient address (overrides mail.recipient)
        #[arg(long)]
        to: Option<String>,

        /// Print the whole draft as JSON instead of the link
        #[arg(long)]
        json: bool,
    },

    /// Interactive session reading commands from stdin
    Session,
}

/// Output formats for terminal commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

/// Parses `ID=VALUE` into a dimension id and a raw slider value.
pub fn parse_assignment(s: &str) -> Result<(DimensionId, i64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", s))?;
    let id = id.trim().parse::<DimensionId>().map_err(|e| e.to_string())?;
    Ok((id, parse_slider_input(value)?))
}

/// Parses a raw slider value. Integers too large for `i64` saturate, since
/// the scale clamps them anyway.
pub fn parse_slider_input(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid value '{}'", raw));
    }
    Ok(if negative { i64::MIN } else { i64::MAX })
}
