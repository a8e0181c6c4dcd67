//! Integration tests for report export.
//!
//! Runs the real markdown generator and pulldown-cmark exporter. PDF paths
//! point Pandoc at a binary that does not exist, so the unavailable-backend
//! flow is exercised on every machine.

use std::sync::Arc;

use chrono::NaiveDate;

use strategy_spectrum::adapters::{JsonDatasetSource, MarkdownReportGenerator, PulldownExportService};
use strategy_spectrum::application::{ExportReportCommand, ExportReportError, ExportReportHandler};
use strategy_spectrum::domain::foundation::{DimensionId, Scale};
use strategy_spectrum::domain::survey::{AggregationPolicy, Dataset, ResponseSet, SurveyReport};
use strategy_spectrum::ports::{DatasetSource, ExportError, ExportFormat, GenerationOptions};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn dataset() -> Dataset {
    JsonDatasetSource::bundled(Scale::Percentage).load().unwrap().dataset
}

fn handler(exporter: PulldownExportService) -> ExportReportHandler {
    ExportReportHandler::new(Arc::new(MarkdownReportGenerator::new()), Arc::new(exporter))
}

fn report_for(dataset: &Dataset, responses: &ResponseSet) -> SurveyReport {
    SurveyReport::build(dataset, responses, NaiveDate::from_ymd_opt(2024, 11, 5).unwrap())
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn html_export_contains_every_dimension() {
    let dataset = dataset();
    let responses = ResponseSet::new(&dataset, AggregationPolicy::DefaultMidpoint);
    let report = report_for(&dataset, &responses);

    let result = handler(PulldownExportService::new())
        .handle(ExportReportCommand::new(ExportFormat::Html, "report"), &report)
        .await
        .unwrap();

    let html = String::from_utf8(result.document.content).unwrap();
    assert!(html.contains("<title>AI Strategy Spectrum</title>"));
    for (i, dimension) in dataset.dimensions().iter().enumerate() {
        let heading = format!("<h2>{}. {}</h2>", i + 1, dimension.name().replace('&', "&amp;"));
        assert!(html.contains(&heading), "missing {}", heading);
    }
    assert!(html.contains("2024-11-05"));
}

#[tokio::test]
async fn summary_markdown_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dataset();
    let mut responses = ResponseSet::new(&dataset, AggregationPolicy::DefaultMidpoint);
    responses.set(DimensionId::new(1), 95).unwrap();
    let report = report_for(&dataset, &responses);
    let cmd = ExportReportCommand::new(ExportFormat::Markdown, "summary")
        .with_options(GenerationOptions::summary())
        .written_to(dir.path().join("nested"));

    let result = handler(PulldownExportService::new())
        .handle(cmd, &report)
        .await
        .unwrap();

    let written = std::fs::read_to_string(result.path.unwrap()).unwrap();
    assert!(written.contains("| 1 | Adoption Pace | 95 | Strongly Aggressive |"));
}

#[tokio::test]
async fn pdf_export_without_backend_fails_and_leaves_values_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dataset();
    let mut responses = ResponseSet::new(&dataset, AggregationPolicy::DefaultMidpoint);
    responses.set(DimensionId::new(2), 10).unwrap();
    responses.set(DimensionId::new(3), 90).unwrap();
    let before = responses.values().clone();
    let report = report_for(&dataset, &responses);

    let exporter = PulldownExportService::new().with_pandoc_path("/nonexistent/pandoc");
    let cmd = ExportReportCommand::new(ExportFormat::Pdf, "report").written_to(dir.path());
    let err = handler(exporter).handle(cmd, &report).await.unwrap_err();

    assert!(matches!(
        err,
        ExportReportError::Export(ExportError::ServiceUnavailable(_))
    ));
    assert!(err.to_string().contains("Export service unavailable"));
    assert_eq!(responses.values(), &before);
    assert_eq!(responses.recompute(), report.overall);
    assert!(!dir.path().join("report.pdf").exists());
}

#[tokio::test]
async fn spawned_export_completes_while_responses_keep_changing() {
    let dataset = dataset();
    let mut responses = ResponseSet::new(&dataset, AggregationPolicy::DefaultMidpoint);
    responses.set(DimensionId::new(1), 30).unwrap();
    let report = report_for(&dataset, &responses);

    let pending = handler(PulldownExportService::new())
        .spawn(ExportReportCommand::new(ExportFormat::Json, "snapshot"), report.clone());
    responses.set(DimensionId::new(1), 99).unwrap();
    let result = ExportReportHandler::join(pending).await.unwrap();

    let exported: SurveyReport = serde_json::from_slice(&result.document.content).unwrap();
    assert_eq!(exported, report);
    assert_eq!(exported.dimensions[0].value.value(), 30);
}
