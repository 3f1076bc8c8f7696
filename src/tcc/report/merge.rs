use tracing::{info, instrument};

use crate::tcc::report::align::{self, AlignmentStats};
use crate::tcc::report::error::{ReportError, Result};
use crate::tcc::report::io::pdf_read::{self, SourceDocument};
use crate::tcc::report::io::pdf_write::OutputAssembler;
use crate::tcc::report::model::{MergeConfig, MergeMode, MergeReport, PagePick};

/// Merges the coordination, base, and optional recommended PDFs into one
/// interleaved output document.
///
/// Precondition failures and I/O errors abort the run before the output file
/// exists; alignment misses in label-match mode are logged and recorded in
/// the returned report instead of failing the run.
#[instrument(
    level = "info",
    skip_all,
    fields(
        coordination = %config.coordination.display(),
        base = %config.base.display(),
        mode = ?config.mode,
    )
)]
pub fn merge(config: &MergeConfig) -> Result<MergeReport> {
    let coordination = SourceDocument::load(&config.coordination)?;
    let base = SourceDocument::load(&config.base)?;
    let recommended = match &config.recommended {
        Some(path) => Some(SourceDocument::load(path)?),
        None => None,
    };

    let coordination_pages = coordination.page_count();
    let base_pages = base.page_count();
    let recommended_pages = recommended.as_ref().map(SourceDocument::page_count);

    let lead_offset = align::lead_offset(coordination_pages, base_pages)?;
    info!(lead_offset, "coordination leading pages");

    let (picks, stats) = plan(config, lead_offset, base_pages, recommended_pages)?;

    let mut assembler = OutputAssembler::new();
    let coordination = assembler.import(coordination);
    let base = assembler.import(base);
    let recommended = recommended.map(|document| assembler.import(document));
    let placeholder = if picks.contains(&PagePick::Placeholder) {
        let path = config
            .placeholder
            .as_ref()
            .ok_or(ReportError::MissingPlaceholder)?;
        Some(assembler.import(SourceDocument::load(path)?))
    } else {
        None
    };

    for pick in &picks {
        match pick {
            PagePick::Coordination(index) => assembler.append_page(&coordination, *index)?,
            PagePick::Base(index) => assembler.append_page(&base, *index)?,
            PagePick::Recommended(index) => {
                if let Some(recommended) = recommended.as_ref() {
                    assembler.append_page(recommended, *index)?;
                }
            }
            PagePick::Placeholder => {
                if let Some(placeholder) = placeholder.as_ref() {
                    assembler.append_page(placeholder, 0)?;
                }
            }
        }
    }

    let output_pages = assembler.save(&config.output)?;
    info!(
        output_pages,
        sections_matched = stats.sections_matched,
        base_misses = stats.base_misses.len(),
        placeholders = stats.placeholders_inserted.len(),
        "merge complete"
    );

    Ok(MergeReport {
        mode: config.mode,
        lead_offset,
        coordination_pages,
        base_pages,
        recommended_pages,
        output_pages,
        sections_matched: stats.sections_matched,
        base_misses: stats.base_misses,
        placeholders_inserted: stats.placeholders_inserted,
    })
}

fn plan(
    config: &MergeConfig,
    lead_offset: usize,
    base_pages: usize,
    recommended_pages: Option<usize>,
) -> Result<(Vec<PagePick>, AlignmentStats)> {
    match config.mode {
        MergeMode::OffsetZip => {
            let picks = align::plan_offset_zip(lead_offset, base_pages, recommended_pages)?;
            let stats = AlignmentStats {
                sections_matched: base_pages,
                ..AlignmentStats::default()
            };
            Ok((picks, stats))
        }
        MergeMode::LabelMatch => {
            if recommended_pages.is_some() && config.placeholder.is_none() {
                return Err(ReportError::MissingPlaceholder);
            }
            let coordination_texts = pdf_read::page_texts(&config.coordination)?;
            let base_texts = pdf_read::page_texts(&config.base)?;
            let recommended_texts = match &config.recommended {
                Some(path) => Some(pdf_read::page_texts(path)?),
                None => None,
            };
            Ok(align::plan_label_match(
                &coordination_texts,
                &base_texts,
                recommended_texts.as_deref(),
                lead_offset,
                config.match_all_labels,
            ))
        }
    }
}
