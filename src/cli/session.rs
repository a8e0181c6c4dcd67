//! Line-based interactive session.
//!
//! Reads one command per line and answers on the output writer after every
//! mutation with the recomputed overall score:
//!
//! ```text
//! set 2 80            record a slider value (clamped into the scale)
//! clear 2             forget a value
//! reset               forget every value
//! show                print the full report
//! export pdf [NAME]   export a snapshot in the background
//! mail [TO]           print a mailto: link for the current report
//! help                list commands
//! quit                end the session
//! ```
//!
//! Exports run on a snapshot, so sliders stay editable while they finish.
//! Their outcome is printed once they complete, and `quit` waits for any
//! still running.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Local;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::adapters::{MailtoComposer, MarkdownReportGenerator, PulldownExportService};
use crate::application::{
    ComposeMailCommand, ComposeMailHandler, ExportReportCommand, ExportReportError,
    ExportReportHandler, ExportReportResult,
};
use crate::config::AppConfig;
use crate::domain::foundation::DimensionId;
use crate::domain::survey::{AggregationPolicy, Dataset, OverallScore, ResponseSet, SurveyReport};
use crate::ports::ExportFormat;

use super::{parse_slider_input, render};

const HELP: &str =
    "Commands: set ID VALUE | clear ID | reset | show | export FORMAT [NAME] | mail [TO] | help | quit";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set(DimensionId, i64),
    Clear(DimensionId),
    Reset,
    Show,
    Export(ExportFormat, Option<String>),
    Mail(Option<String>),
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        let id = |raw: &str| raw.parse::<DimensionId>().map_err(|e| e.to_string());

        match (verb.as_str(), args.as_slice()) {
            ("set", [dimension, value]) => {
                Ok(SessionCommand::Set(id(*dimension)?, parse_slider_input(value)?))
            }
            ("clear", [dimension]) => Ok(SessionCommand::Clear(id(*dimension)?)),
            ("reset", []) => Ok(SessionCommand::Reset),
            ("show", []) => Ok(SessionCommand::Show),
            ("export", [format, rest @ ..]) if rest.len() <= 1 => {
                let format = format.parse::<ExportFormat>().map_err(|e| e.to_string())?;
                let name = match rest.first() {
                    Some(name) if name.contains(|c: char| c == '/' || c == '\\') => {
                        return Err(format!("file name '{}' must not contain a path", name))
                    }
                    Some(name) => Some(name.to_string()),
                    None => None,
                };
                Ok(SessionCommand::Export(format, name))
            }
            ("mail", []) => Ok(SessionCommand::Mail(None)),
            ("mail", [to]) => Ok(SessionCommand::Mail(Some(to.to_string()))),
            ("help" | "?", []) => Ok(SessionCommand::Help),
            ("quit" | "exit", []) => Ok(SessionCommand::Quit),
            ("set" | "clear" | "reset" | "show" | "export" | "mail" | "help" | "quit" | "exit", _) => {
                Err(format!("wrong arguments for '{}'. {}", verb, HELP))
            }
            _ => Err(format!("unknown command '{}'. {}", line.trim(), HELP)),
        }
    }
}

/// Export and mail handlers available to a session.
#[derive(Clone)]
pub struct SessionServices {
    exporter: ExportReportHandler,
    mailer: ComposeMailHandler,
    output_dir: PathBuf,
    base_filename: String,
}

impl SessionServices {
    pub fn new(
        exporter: ExportReportHandler,
        mailer: ComposeMailHandler,
        output_dir: impl Into<PathBuf>,
        base_filename: impl Into<String>,
    ) -> Self {
        Self {
            exporter,
            mailer,
            output_dir: output_dir.into(),
            base_filename: base_filename.into(),
        }
    }

    /// Wires the document and mail adapters from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            ExportReportHandler::new(
                Arc::new(MarkdownReportGenerator::new()),
                Arc::new(PulldownExportService::from_config(&config.export)),
            ),
            ComposeMailHandler::new(Arc::new(MailtoComposer::from_config(&config.mail))),
            config.export.output_dir.clone(),
            config.export.base_filename.clone(),
        )
    }
}

type PendingExport = (ExportFormat, JoinHandle<Result<ExportReportResult, ExportReportError>>);

/// Runs a session until `quit` or end of input and returns the final
/// responses.
///
/// Only failures writing to `output` or reading from `input` end the
/// session early; undecodable lines are reported and skipped.
pub fn run_session<R, W>(
    dataset: &Dataset,
    policy: AggregationPolicy,
    services: &SessionServices,
    mut input: R,
    output: &mut W,
) -> io::Result<ResponseSet>
where
    R: BufRead,
    W: Write,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let mut pending: Vec<PendingExport> = Vec::new();
    let mut responses = ResponseSet::new(dataset, policy);
    writeln!(
        output,
        "{}: {} dimensions on a {}-{} scale. {}",
        dataset.title(),
        dataset.len(),
        dataset.scale().min(),
        dataset.scale().max(),
        HELP
    )?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        report_exports(&runtime, &mut pending, output, false)?;

        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::debug!(bytes = buf.len(), "Skipping undecodable session line");
            writeln!(output, "error: invalid UTF-8 input")?;
            continue;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = match trimmed.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "error: {}", message)?;
                continue;
            }
        };

        match command {
            SessionCommand::Set(id, value) => match responses.set(id, value) {
                Ok(overall) => {
                    write_dimension(output, dataset, &responses, id)?;
                    write_overall(output, &overall)?;
                }
                Err(err) => writeln!(output, "error: {}", err)?,
            },
            SessionCommand::Clear(id) => match responses.clear(id) {
                Ok(overall) => write_overall(output, &overall)?,
                Err(err) => writeln!(output, "error: {}", err)?,
            },
            SessionCommand::Reset => {
                let overall = responses.reset();
                write_overall(output, &overall)?;
            }
            SessionCommand::Show => {
                write!(output, "{}", render::report_text(&snapshot(dataset, &responses), true))?;
            }
            SessionCommand::Export(format, name) => {
                let cmd = ExportReportCommand::new(
                    format,
                    name.unwrap_or_else(|| services.base_filename.clone()),
                )
                .written_to(services.output_dir.clone());
                let report = snapshot(dataset, &responses);
                let _guard = runtime.enter();
                pending.push((format, services.exporter.spawn(cmd, report)));
                writeln!(output, "Exporting {} in the background", format)?;
            }
            SessionCommand::Mail(to) => {
                let report = snapshot(dataset, &responses);
                match services.mailer.handle(ComposeMailCommand { recipient: to }, &report) {
                    Ok(draft) => writeln!(output, "{}", draft.link)?,
                    Err(err) => writeln!(output, "error: {}", err)?,
                }
            }
            SessionCommand::Help => writeln!(output, "{}", HELP)?,
            SessionCommand::Quit => break,
        }
    }

    report_exports(&runtime, &mut pending, output, true)?;
    tracing::info!(recorded = responses.recorded_count(), "Session ended");
    Ok(responses)
}

fn snapshot(dataset: &Dataset, responses: &ResponseSet) -> SurveyReport {
    SurveyReport::build(dataset, responses, Local::now().date_naive())
}

/// Prints the outcome of finished exports. With `wait`, blocks on every
/// pending one.
fn report_exports<W: Write>(
    runtime: &Runtime,
    pending: &mut Vec<PendingExport>,
    output: &mut W,
    wait: bool,
) -> io::Result<()> {
    let mut running = Vec::new();
    for (format, handle) in pending.drain(..) {
        if !wait && !handle.is_finished() {
            running.push((format, handle));
            continue;
        }
        match runtime.block_on(ExportReportHandler::join(handle)) {
            Ok(result) => match result.path {
                Some(path) => writeln!(output, "Exported {} to {}", format, path.display())?,
                None => writeln!(output, "Exported {}", result.document.filename)?,
            },
            Err(err) => writeln!(output, "error: {} export failed: {}", format, err)?,
        }
    }
    *pending = running;
    Ok(())
}

fn write_dimension<W: Write>(
    output: &mut W,
    dataset: &Dataset,
    responses: &ResponseSet,
    id: DimensionId,
) -> io::Result<()> {
    let Some(dimension) = dataset.get(id) else {
        return Ok(());
    };
    let scorer = responses.scorer();
    let value = responses.value_of(id);
    writeln!(
        output,
        "{}: {} ({})",
        dimension.name(),
        value,
        scorer.label_for(value)
    )?;
    let feedback = scorer.feedback_for(dimension, value);
    if !feedback.is_empty() {
        writeln!(output, "  {}", feedback)?;
    }
    Ok(())
}

fn write_overall<W: Write>(output: &mut W, overall: &OverallScore) -> io::Result<()> {
    writeln!(output, "Overall: {} ({:.2})", overall.label, overall.value)
}
