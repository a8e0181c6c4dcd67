//! Command implementations.
//!
//! Each command writes to a caller-supplied writer; `execute` wires them to
//! stdout and stdin.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;

use crate::adapters::{MailtoComposer, MarkdownReportGenerator, PulldownExportService};
use crate::application::{
    ComposeMailCommand, ComposeMailHandler, ExportReportCommand, ExportReportHandler,
};
use crate::config::AppConfig;
use crate::domain::foundation::DimensionId;
use crate::domain::survey::{Dataset, ResponseSet, SurveyReport};
use crate::ports::{ExportFormat, GenerationOptions, ReportGenerator};

use super::{render, session, setup, Cli, Commands, OutputFormat};

/// Loads configuration, logging and the dataset, then runs the parsed command.
pub fn execute(cli: Cli) -> Result<()> {
    let config = setup::load_config(&cli)?;
    setup::init_logging(&config.logging, cli.verbosity);
    let dataset = setup::open_dataset(&config.survey).context("loading dataset")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Dimensions { format } => dimensions(&dataset, format, &mut out),
        Commands::Score {
            values,
            format,
            summary,
        } => score(&dataset, &config, &values, format, summary, &mut out),
        Commands::Export {
            values,
            format,
            output,
            name,
            summary,
        } => {
            let request = ExportRequest {
                format,
                output_dir: output.unwrap_or_else(|| config.export.output_dir.clone()),
                base_filename: name.unwrap_or_else(|| config.export.base_filename.clone()),
                summary,
            };
            export(&dataset, &config, &values, request, &mut out)
        }
        Commands::Mail { values, to, json } => mail(&dataset, &config, &values, to, json, &mut out),
        Commands::Session => {
            let services = session::SessionServices::from_config(&config);
            let stdin = io::stdin();
            let responses = session::run_session(
                &dataset,
                config.survey.aggregation,
                &services,
                stdin.lock(),
                &mut out,
            )?;
            let report = SurveyReport::build(&dataset, &responses, Local::now().date_naive());
            write!(out, "\n{}", render::overall_text(&report))?;
            Ok(())
        }
    }
}

/// Applies `--value` pairs to a fresh response set and snapshots the report.
pub fn scored_report(
    dataset: &Dataset,
    config: &AppConfig,
    values: &[(DimensionId, i64)],
) -> Result<SurveyReport> {
    let mut responses = ResponseSet::new(dataset, config.survey.aggregation);
    for (id, value) in values {
        responses
            .set(*id, *value)
            .with_context(|| format!("applying --value {}={}", id, value))?;
    }
    Ok(SurveyReport::build(dataset, &responses, Local::now().date_naive()))
}

pub fn dimensions<W: Write>(dataset: &Dataset, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", render::dimensions_text(dataset))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(dataset.dimensions())?)?,
        OutputFormat::Markdown => {
            writeln!(out, "| ID | Dimension | Conservative | Aggressive |")?;
            writeln!(out, "|----|-----------|--------------|------------|")?;
            for dimension in dataset.dimensions() {
                writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    dimension.id(),
                    dimension.name(),
                    dimension.conservative_approach(),
                    dimension.aggressive_approach()
                )?;
            }
        }
    }
    Ok(())
}

pub fn score<W: Write>(
    dataset: &Dataset,
    config: &AppConfig,
    values: &[(DimensionId, i64)],
    format: OutputFormat,
    summary: bool,
    out: &mut W,
) -> Result<()> {
    let report = scored_report(dataset, config, values)?;
    match format {
        OutputFormat::Text => write!(out, "{}", render::report_text(&report, !summary))?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
        OutputFormat::Markdown => {
            let options = if summary {
                GenerationOptions::summary()
            } else {
                GenerationOptions::full()
            };
            write!(out, "{}", MarkdownReportGenerator::new().generate(&report, &options)?)?;
        }
    }
    Ok(())
}

/// Resolved export settings, CLI flags over configuration.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub output_dir: PathBuf,
    pub base_filename: String,
    pub summary: bool,
}

pub fn export<W: Write>(
    dataset: &Dataset,
    config: &AppConfig,
    values: &[(DimensionId, i64)],
    request: ExportRequest,
    out: &mut W,
) -> Result<()> {
    let report = scored_report(dataset, config, values)?;
    let options = if request.summary {
        GenerationOptions::summary()
    } else {
        GenerationOptions::full()
    };
    let cmd = ExportReportCommand::new(request.format, request.base_filename)
        .with_options(options)
        .written_to(request.output_dir);

    let handler = ExportReportHandler::new(
        Arc::new(MarkdownReportGenerator::new()),
        Arc::new(PulldownExportService::from_config(&config.export)),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting export runtime")?;
    let result = runtime
        .block_on(async { ExportReportHandler::join(handler.spawn(cmd, report)).await })
        .with_context(|| format!("{} export failed", request.format))?;

    match result.path {
        Some(path) => writeln!(out, "Wrote {}", path.display())?,
        None => writeln!(out, "Exported {}", result.document.filename)?,
    }
    Ok(())
}

pub fn mail<W: Write>(
    dataset: &Dataset,
    config: &AppConfig,
    values: &[(DimensionId, i64)],
    to: Option<String>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let report = scored_report(dataset, config, values)?;
    let handler = ComposeMailHandler::new(Arc::new(MailtoComposer::from_config(&config.mail)));
    let draft = handler.handle(ComposeMailCommand { recipient: to }, &report)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&draft)?)?;
    } else {
        writeln!(out, "{}", draft.link)?;
    }
    Ok(())
}
