use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur while the
/// tool loads, aligns, and reassembles the report PDFs.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the PDF reader/writer implementation.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Raised when per-page text extraction fails on a document.
    #[error("text extraction error: {0}")]
    Extract(#[from] pdf_extract::OutputError),

    /// Raised when serializing the merge summary fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the coordination PDF has fewer pages than the base PDF.
    /// The coordination document must carry the leading pages, so a shorter
    /// one means the inputs are mismatched.
    #[error(
        "coordination PDF has {coordination} pages but the base PDF has {base}; \
         the coordination document must be at least as long"
    )]
    CoordinationTooShort { coordination: usize, base: usize },

    /// Raised in offset-zip mode when the base and recommended PDFs disagree
    /// on page count.
    #[error("base PDF has {base} pages but the recommended PDF has {recommended}")]
    PageCountMismatch { base: usize, recommended: usize },

    /// Raised when label matching needs a placeholder PDF but none was
    /// configured.
    #[error("matching mode with a recommended PDF requires a placeholder PDF")]
    MissingPlaceholder,

    /// Raised when a planned page index falls outside its source document.
    #[error("page {index} is out of range for a {count} page document")]
    PageOutOfRange { index: usize, count: usize },

    /// Raised when a page object is not a dictionary.
    #[error("page {index} is not a well-formed page dictionary")]
    MalformedPage { index: usize },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when default-mode discovery finds no candidate for a required
    /// input.
    #[error("no {role} PDF matched '{pattern}'")]
    DiscoveryEmpty { role: &'static str, pattern: String },

    /// Raised when default-mode discovery finds several candidates where
    /// exactly one is expected.
    #[error("found {count} {role} PDFs matching '{pattern}'; remove the extras")]
    DiscoveryAmbiguous {
        role: &'static str,
        pattern: String,
        count: usize,
    },

    /// Raised when a discovery glob pattern itself is invalid.
    #[error("invalid discovery pattern: {0}")]
    DiscoveryPattern(#[from] glob::PatternError),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ReportError {
    /// Process exit status for this failure class: 2 for precondition
    /// violations, 3 for I/O and parse failures, 4 for discovery and
    /// configuration problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::CoordinationTooShort { .. }
            | ReportError::PageCountMismatch { .. }
            | ReportError::MissingPlaceholder
            | ReportError::PageOutOfRange { .. }
            | ReportError::MalformedPage { .. } => 2,
            ReportError::Io(_)
            | ReportError::Pdf(_)
            | ReportError::Extract(_)
            | ReportError::Json(_) => 3,
            ReportError::MissingInput(_)
            | ReportError::DiscoveryEmpty { .. }
            | ReportError::DiscoveryAmbiguous { .. }
            | ReportError::DiscoveryPattern(_) => 4,
            ReportError::Logging(_) => 1,
        }
    }
}
