//! Markdown report generator adapter.
//!
//! Renders a survey report with a fixed template: a header carrying the
//! overall approach and generation date, then one section per dimension.
//! This is the primary implementation of the ReportGenerator port.

use crate::domain::foundation::Scale;
use crate::domain::survey::{value_bar, DimensionResult, SurveyReport};
use crate::ports::{DocumentError, DocumentFormat, GenerationOptions, ReportGenerator};

const BAR_WIDTH: usize = 20;

/// Template-based implementation of ReportGenerator.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// One table row per dimension, for the summary format.
    fn generate_summary_table(&self, report: &SurveyReport) -> String {
        let mut table = String::from("| # | Dimension | Value | Approach |\n");
        table.push_str("|---|-----------|-------|----------|\n");
        for (i, result) in report.dimensions.iter().enumerate() {
            table.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                i + 1,
                escape_cell(&result.name),
                result.value,
                result.label
            ));
        }
        table.push('\n');
        table
    }

    fn section_body(&self, result: &DimensionResult, scale: Scale, options: &GenerationOptions) -> String {
        let mut body = String::new();

        if options.include_questions && !result.question.is_empty() {
            body.push_str(&format!("*{}*\n\n", result.question));
        }

        body.push_str(&format!(
            "**Your Approach:** {} ({} of {})\n\n",
            result.label,
            result.value,
            scale.max()
        ));

        if options.include_value_bars {
            body.push_str(&format!(
                "`{}` {} ← → {}\n\n",
                value_bar(result.value.as_f64(), scale, BAR_WIDTH),
                result.conservative_approach,
                result.aggressive_approach
            ));
        }

        if result.feedback.is_empty() {
            body.push_str("*No feedback available for this position.*\n\n");
        } else {
            body.push_str(&format!("{}\n\n", result.feedback));
        }

        if options.include_examples {
            if let Some(example) = &result.example {
                body.push_str(&format!("> **Example:** {}\n\n", example));
            }
        }

        body
    }
}

impl ReportGenerator for MarkdownReportGenerator {
    fn generate(
        &self,
        report: &SurveyReport,
        options: &GenerationOptions,
    ) -> Result<String, DocumentError> {
        let mut doc = self.generate_header(report, options)?;
        doc.push_str("\n---\n\n");

        match options.format {
            DocumentFormat::Summary => doc.push_str(&self.generate_summary_table(report)),
            DocumentFormat::Full => {
                for (i, result) in report.dimensions.iter().enumerate() {
                    let section = self.generate_section(result, report.scale, options)?;
                    // Sections are numbered in report order.
                    doc.push_str(&section.replacen("## ", &format!("## {}. ", i + 1), 1));
                    doc.push_str("---\n\n");
                }
            }
        }

        doc.push_str("*Generated by Strategy Spectrum*\n");
        Ok(doc)
    }

    fn generate_header(
        &self,
        report: &SurveyReport,
        _options: &GenerationOptions,
    ) -> Result<String, DocumentError> {
        if report.title.trim().is_empty() {
            return Err(DocumentError::missing_data("title"));
        }

        let mut header = format!("# {}\n\n", report.title);
        header.push_str(&format!(
            "> **Overall Approach:** {} | **Overall Value:** {:.2} ({}-{} scale)\n",
            report.overall.label,
            report.overall.value,
            report.scale.min(),
            report.scale.max()
        ));
        header.push_str(&format!(
            "> **Generated:** {}\n\n",
            report.generated_on.format("%Y-%m-%d")
        ));
        header.push_str(&format!("{}\n", report.leaning_sentence()));

        Ok(header)
    }

    fn generate_section(
        &self,
        result: &DimensionResult,
        scale: Scale,
        options: &GenerationOptions,
    ) -> Result<String, DocumentError> {
        if result.name.trim().is_empty() {
            return Err(DocumentError::missing_data(format!("name of dimension {}", result.id)));
        }

        let mut section = format!("## {}\n\n", result.name);
        section.push_str(&self.section_body(result, scale, options));
        Ok(section)
    }
}

/// Keeps pipes in free text from breaking table rows.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
