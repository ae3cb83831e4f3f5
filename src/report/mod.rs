//! Report rendering and report file management.

pub mod files;
pub mod html;
pub mod xlsx;

pub use files::{browser_command, cleanup_old_reports, report_path, timestamp_suffix};
pub use html::render_html;
pub use xlsx::build_workbook;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors raised while rendering or writing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("no HTML report has been generated")]
    NoReport,

    #[error("failed to open report with `{command}`: {message}")]
    Browser { command: String, message: String },
}

/// Per-variant presentation of the reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub title: &'static str,
    /// File name prefix, followed by a timestamp and the extension
    pub prefix: &'static str,
    /// Show the executed steps as a row of badges
    pub pipeline_badges: bool,
    /// Endpoint catalog sheet of the spreadsheet
    pub catalog: &'static [(&'static str, &'static str)],
}
