use std::path::{Path, PathBuf};

use tracing::info;

use crate::tcc::report::error::{ReportError, Result};

/// Filename pattern for the coordination PDF, relative to the project root.
const COORDINATION_GLOB: &str = "PDF/*Coordination*.pdf";
/// Filename pattern for the base TCC PDF. Different export versions share
/// the same stem, so the version component is wildcarded.
const BASE_GLOB: &str = "TCCs/TCC?Base?v*.pdf";
/// Filename pattern for the recommended TCC PDF.
const RECOMMENDED_GLOB: &str = "TCCs/TCC?Rec?v*.pdf";

/// Input paths resolved from a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredInputs {
    pub coordination: PathBuf,
    pub base: PathBuf,
    pub recommended: Option<PathBuf>,
}

/// Resolves the three input PDFs under a project root by filename pattern.
///
/// The coordination and base PDFs must each match exactly once; zero or
/// multiple candidates is an error naming the ambiguity. The recommended PDF
/// is optional: no candidate means the project simply has none, while
/// multiple candidates is still an error.
pub fn discover(root: &Path) -> Result<DiscoveredInputs> {
    let coordination = require_one(root, "coordination", COORDINATION_GLOB)?;
    let base = require_one(root, "base", BASE_GLOB)?;
    let recommended = optional_one(root, "recommended", RECOMMENDED_GLOB)?;
    info!(
        coordination = %coordination.display(),
        base = %base.display(),
        ?recommended,
        "resolved project inputs"
    );
    Ok(DiscoveredInputs {
        coordination,
        base,
        recommended,
    })
}

/// Derives the default output path next to the coordination PDF. The
/// coordination filename decides the `CE`/`RH` tag carried in the output
/// name.
pub fn default_output_path(coordination: &Path) -> PathBuf {
    let name = format!(
        "8.0 - Coordination Results & Recommendations_{}.pdf",
        output_tag(coordination)
    );
    match coordination.parent() {
        Some(parent) => parent.join(&name),
        None => PathBuf::from(name),
    }
}

/// Tag derived from the coordination filename, used in the default output
/// name.
pub fn output_tag(coordination: &Path) -> &'static str {
    let name = match coordination.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return "",
    };
    if name.contains("CE") {
        "CE"
    } else if name.contains("RH") {
        "RH"
    } else {
        ""
    }
}

fn candidates(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = root.join(pattern).to_string_lossy().into_owned();
    let mut paths = Vec::new();
    for entry in glob::glob(&full_pattern)? {
        let path = entry.map_err(|error| ReportError::Io(error.into_error()))?;
        paths.push(path);
    }
    Ok(paths)
}

fn require_one(root: &Path, role: &'static str, pattern: &str) -> Result<PathBuf> {
    let mut paths = candidates(root, pattern)?;
    match paths.len() {
        0 => Err(ReportError::DiscoveryEmpty {
            role,
            pattern: pattern.to_string(),
        }),
        1 => Ok(paths.remove(0)),
        count => Err(ReportError::DiscoveryAmbiguous {
            role,
            pattern: pattern.to_string(),
            count,
        }),
    }
}

fn optional_one(root: &Path, role: &'static str, pattern: &str) -> Result<Option<PathBuf>> {
    let mut paths = candidates(root, pattern)?;
    match paths.len() {
        0 => {
            info!(role, "no optional PDF found for project");
            Ok(None)
        }
        1 => Ok(Some(paths.remove(0))),
        count => Err(ReportError::DiscoveryAmbiguous {
            role,
            pattern: pattern.to_string(),
            count,
        }),
    }
}
