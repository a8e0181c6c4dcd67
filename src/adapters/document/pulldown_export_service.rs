//! Pulldown-cmark based export service adapter.
//!
//! - HTML conversion uses pulldown-cmark (pure Rust, always available)
//! - PDF conversion shells out to Pandoc, which must be installed
//!
//! A missing Pandoc yields `ExportError::ServiceUnavailable`; nothing here
//! panics on a failing backend.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ExportConfig;
use crate::ports::{DocumentExportService, ExportError, ExportFormat};

const DEFAULT_TITLE: &str = "Strategy Report";

/// Export service using pulldown-cmark for HTML and Pandoc for PDF.
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,
    pdf_timeout_secs: u64,
    include_default_css: bool,
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownExportService {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: 30,
            include_default_css: true,
        }
    }

    /// Builds a service from the `export` configuration section.
    pub fn from_config(config: &ExportConfig) -> Self {
        let mut service = Self::new().with_pdf_timeout(config.pdf_timeout_secs);
        if let Some(path) = &config.pandoc_path {
            service = service.with_pandoc_path(path.clone());
        }
        if !config.include_default_css {
            service = service.without_default_css();
        }
        service
    }

    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    pub fn without_default_css(mut self) -> Self {
        self.include_default_css = false;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    fn wrap_html(&self, body: &str, title: &str) -> String {
        let css = if self.include_default_css { DEFAULT_CSS } else { "" };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="strategy-report">
{body}
    </article>
</body>
</html>"#,
            title = html_escape(title),
            css = css,
            body = body
        )
    }

    /// First level-one heading, or a generic title.
    fn extract_title(&self, markdown: &str) -> String {
        markdown
            .lines()
            .find_map(|line| line.trim().strip_prefix("# "))
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    async fn check_pandoc(&self) -> bool {
        let output = Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        output.map(|o| o.status.success()).unwrap_or(false)
    }
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if !self.check_pandoc().await {
            tracing::warn!(pandoc = self.pandoc_command(), "Pandoc not available for PDF export");
            return Err(ExportError::service_unavailable(format!(
                "'{}' could not be run. PDF export requires Pandoc \
                 (https://pandoc.org/installing.html)",
                self.pandoc_command()
            )));
        }

        let pdf_failed = |reason: String| ExportError::conversion_failed(ExportFormat::Pdf, reason);

        let mut child = Command::new(self.pandoc_command())
            .args([
                "-f",
                "markdown",
                "-t",
                "pdf",
                "-V",
                "geometry:margin=1in",
                "-V",
                "fontsize=11pt",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| pdf_failed(format!("failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| pdf_failed(format!("failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| pdf_failed(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(pdf_failed(format!("Pandoc returned error: {}", stderr.trim())));
        }

        tracing::debug!(bytes = output.stdout.len(), "Rendered PDF");
        Ok(output.stdout)
    }

    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options);

        let mut body = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut body, parser);

        Ok(self.wrap_html(&body, &self.extract_title(markdown)))
    }

    async fn is_available(&self) -> bool {
        self.check_pandoc().await
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DEFAULT_CSS: &str = r#"
:root {
    --conservative: #2563eb;
    --aggressive: #dc2626;
    --text-color: #1f2937;
    --muted-color: #6b7280;
    --border-color: #e5e7eb;
    --code-bg: #f3f4f6;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: var(--text-color);
    max-width: 860px;
    margin: 0 auto;
    padding: 2rem;
}

h1 {
    border-bottom: 2px solid var(--conservative);
    padding-bottom: 0.5rem;
}

h2 {
    border-bottom: 1px solid var(--border-color);
    padding-bottom: 0.25rem;
    margin-top: 2rem;
}

blockquote {
    margin: 1em 0;
    padding: 0.5em 1em;
    border-left: 4px solid var(--aggressive);
    background-color: var(--code-bg);
    color: var(--muted-color);
}

code {
    font-family: 'SF Mono', 'Fira Code', Consolas, monospace;
    background: linear-gradient(90deg, var(--conservative), var(--aggressive));
    -webkit-background-clip: text;
    color: transparent;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th, td {
    padding: 0.5rem;
    text-align: left;
    border: 1px solid var(--border-color);
}

hr {
    border: none;
    border-top: 1px solid var(--border-color);
    margin: 2em 0;
}

@media print {
    body { padding: 0; font-size: 12pt; }
    h2 { page-break-after: avoid; }
    table { page-break-inside: avoid; }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
