use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Section identifier parsed from a page of report text, e.g. `TCC_12a`.
///
/// Two labels are equal iff the full captured id strings are identical;
/// digits, the optional trailing letter, and any suffix characters are all
/// significant. The string always starts with the literal `TCC_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionLabel(String);

impl SectionLabel {
    /// Wraps a captured id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw captured id, including the `TCC_` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the three documents are interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeMode {
    /// Strict positional correspondence once the leading pages are skipped.
    OffsetZip,
    /// Text-label-driven alignment of equivalent sections.
    LabelMatch,
}

/// Fully resolved configuration for one merge run. Built once by the CLI (or
/// a test) and passed immutably into [`merge`](crate::tcc::report::merge::merge).
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Path to the coordination PDF. Defines section order and carries the
    /// leading front-matter pages.
    pub coordination: PathBuf,
    /// Path to the base results PDF.
    pub base: PathBuf,
    /// Path to the recommended results PDF, when one exists for the project.
    pub recommended: Option<PathBuf>,
    /// Path to the single-page placeholder PDF inserted when an expected
    /// recommended section is absent. Required in label-match mode whenever
    /// a recommended PDF is configured.
    pub placeholder: Option<PathBuf>,
    /// Interleaving mode.
    pub mode: MergeMode,
    /// Destination path for the assembled PDF.
    pub output: PathBuf,
    /// Keep matching further labels on a page after the first one that found
    /// a base page. The historical behavior stops at the first hit, so this
    /// defaults to `false`.
    pub match_all_labels: bool,
}

/// One planned output page, identified by its source and page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePick {
    /// Page of the coordination document.
    Coordination(usize),
    /// Page of the base document.
    Base(usize),
    /// Page of the recommended document.
    Recommended(usize),
    /// The placeholder page standing in for a missing recommended section.
    Placeholder,
}

/// Summary of a completed merge run, suitable for logging or serialising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Mode the run executed in.
    pub mode: MergeMode,
    /// Number of leading coordination pages copied verbatim.
    pub lead_offset: usize,
    /// Page count of the coordination document.
    pub coordination_pages: usize,
    /// Page count of the base document.
    pub base_pages: usize,
    /// Page count of the recommended document, when present.
    pub recommended_pages: Option<usize>,
    /// Number of pages written to the output document.
    pub output_pages: usize,
    /// Sections whose base page was found and interleaved.
    pub sections_matched: usize,
    /// Labels that found no base page. The output is missing those sections.
    pub base_misses: Vec<SectionLabel>,
    /// Labels whose expected recommended page was absent; a placeholder was
    /// inserted for each.
    pub placeholders_inserted: Vec<SectionLabel>,
}
