use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::tcc::report::error::{ReportError, Result};
use crate::tcc::report::model::{PagePick, SectionLabel};

/// Pattern announcing a section on a coordination page.
static SOURCE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"TCC Curve: (TCC_[\w/ \[\]"-]+)"#).expect("hard-coded pattern")
});

/// Pattern naming a section on a base or recommended page.
static TARGET_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"TCC Name: (TCC_[\w/ \[\]"-]+)"#).expect("hard-coded pattern")
});

/// Phrases on a coordination page that signal an associated recommendation.
const RECOMMENDATION_MARKERS: [&str; 3] = [
    "the following settings changes",
    "shows the effect of recommendations made",
    "revised TCC",
];

fn capture_labels(pattern: &Regex, text: &str) -> Vec<SectionLabel> {
    pattern
        .captures_iter(text)
        .map(|capture| SectionLabel::new(&capture[1]))
        .collect()
}

/// Parses the section labels announced on a coordination page, in order of
/// appearance. An empty result means the page carries no section boundary.
pub fn parse_source_labels(text: &str) -> Vec<SectionLabel> {
    capture_labels(&SOURCE_LABEL, text)
}

/// Parses the section labels named on a base or recommended page.
pub fn parse_target_labels(text: &str) -> Vec<SectionLabel> {
    capture_labels(&TARGET_LABEL, text)
}

/// Finds the first target page carrying a label equal to `label`.
///
/// Pages are scanned in ascending index order and the first hit wins; later
/// pages repeating the same label are ignored. Page index 0 is a legitimate
/// match, which is why "not found" is `None` rather than a sentinel index.
pub fn find_matching_page(label: &SectionLabel, target_texts: &[String]) -> Option<usize> {
    for (index, text) in target_texts.iter().enumerate() {
        if parse_target_labels(text).iter().any(|candidate| candidate == label) {
            return Some(index);
        }
    }
    None
}

/// True iff the coordination page text announces an associated
/// recommendation. Gates recommended-page lookup and placeholder insertion
/// in label-match mode.
pub fn has_recommendation(text: &str) -> bool {
    RECOMMENDATION_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

/// Number of leading coordination pages that have no counterpart in the base
/// document. Fails when the coordination document is the shorter one.
pub fn lead_offset(coordination_pages: usize, base_pages: usize) -> Result<usize> {
    if coordination_pages < base_pages {
        return Err(ReportError::CoordinationTooShort {
            coordination: coordination_pages,
            base: base_pages,
        });
    }
    Ok(coordination_pages - base_pages)
}

/// Alignment outcome accompanying a label-match plan.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AlignmentStats {
    /// Sections whose base page was found.
    pub sections_matched: usize,
    /// Labels with no base page anywhere in the base document.
    pub base_misses: Vec<SectionLabel>,
    /// Labels whose expected recommended page was absent.
    pub placeholders_inserted: Vec<SectionLabel>,
}

/// Plans a strict positional interleave: the leading coordination pages,
/// then one coordination/base/recommended triple per section.
pub fn plan_offset_zip(
    lead_offset: usize,
    base_pages: usize,
    recommended_pages: Option<usize>,
) -> Result<Vec<PagePick>> {
    if let Some(recommended) = recommended_pages {
        if recommended != base_pages {
            return Err(ReportError::PageCountMismatch {
                base: base_pages,
                recommended,
            });
        }
    }

    let mut picks = Vec::new();
    for index in 0..lead_offset {
        picks.push(PagePick::Coordination(index));
    }
    for index in 0..base_pages {
        picks.push(PagePick::Coordination(lead_offset + index));
        picks.push(PagePick::Base(index));
        if recommended_pages.is_some() {
            picks.push(PagePick::Recommended(index));
        }
    }
    Ok(picks)
}

/// Plans a label-driven interleave over the extracted page texts.
///
/// Every coordination page is emitted. For each label announced on a page,
/// the base document is searched for the matching section; a miss is logged
/// and skipped rather than halting the run. When a base page is found and a
/// recommended document exists, the page text decides whether a
/// recommendation is expected; an expected-but-missing recommended page is
/// represented by the placeholder. Unless `match_all_labels` is set, label
/// processing for a page stops after the first label that found its base
/// page, mirroring the one-section-per-page layout of these reports.
pub fn plan_label_match(
    coordination_texts: &[String],
    base_texts: &[String],
    recommended_texts: Option<&[String]>,
    lead_offset: usize,
    match_all_labels: bool,
) -> (Vec<PagePick>, AlignmentStats) {
    let mut picks = Vec::new();
    let mut stats = AlignmentStats::default();

    for index in 0..lead_offset {
        picks.push(PagePick::Coordination(index));
    }

    for (index, text) in coordination_texts.iter().enumerate().skip(lead_offset) {
        picks.push(PagePick::Coordination(index));

        for label in parse_source_labels(text) {
            debug!(%label, page = index, "attempting to match section");
            let Some(base_index) = find_matching_page(&label, base_texts) else {
                warn!(%label, "unable to find a base page for section");
                stats.base_misses.push(label);
                continue;
            };
            info!(%label, base_page = base_index, "matched base page");
            picks.push(PagePick::Base(base_index));
            stats.sections_matched += 1;

            if let Some(recommended_texts) = recommended_texts {
                if has_recommendation(text) {
                    match find_matching_page(&label, recommended_texts) {
                        Some(rec_index) => {
                            info!(%label, recommended_page = rec_index, "matched recommended page");
                            picks.push(PagePick::Recommended(rec_index));
                        }
                        None => {
                            warn!(%label, "expected recommendation missing; inserting placeholder");
                            picks.push(PagePick::Placeholder);
                            stats.placeholders_inserted.push(label);
                        }
                    }
                }
            }

            if !match_all_labels {
                break;
            }
        }
    }

    (picks, stats)
}
