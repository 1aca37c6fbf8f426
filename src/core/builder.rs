//! Aggregation of per-file extraction results over a whole tree.
//!
//! Every file is extracted independently on the rayon pool and returns its
//! own outcome; outcomes are merged sequentially in path order, which keeps
//! the entry set (and its representative locations) deterministic.

use std::fs;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::{
    bundle::BundleKind,
    entries::{EntrySet, LocalizationEntry},
    error::{ExtractionError, FileExtractionError, SkipReason, SkippedFile},
    files::FileScan,
    markup::{MarkupEvaluator, collect_markup_keys},
    scanner::scan_call_sites,
    source::SourceLocation,
};

/// Entries of one bundle plus everything that kept files out of it.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub entries: EntrySet,
    /// Files whose call sites are malformed. Their entries are excluded.
    pub extraction_errors: Vec<FileExtractionError>,
    /// Files that could not be read or evaluated.
    pub skipped_files: Vec<SkippedFile>,
}

enum FileOutcome {
    Entries(Vec<LocalizationEntry>),
    Failed(FileExtractionError),
    Skipped(SkippedFile),
}

/// Entries of one source file's text.
pub fn source_entries(
    file_path: &str,
    content: &str,
    kind: BundleKind,
) -> Result<Vec<LocalizationEntry>, ExtractionError> {
    Ok(scan_call_sites(content, kind)?
        .into_iter()
        .map(|occurrence| {
            LocalizationEntry::new(
                SourceLocation::new(file_path, occurrence.line, occurrence.col),
                occurrence.key,
                kind,
            )
            .with_source_line(occurrence.source_line)
        })
        .collect())
}

fn extract_source_file(file_path: &str, kind: BundleKind) -> FileOutcome {
    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) => return skipped(file_path, e.into()),
    };
    match source_entries(file_path, &content, kind) {
        Ok(entries) => FileOutcome::Entries(entries),
        Err(error) => FileOutcome::Failed(FileExtractionError {
            file_path: file_path.to_string(),
            error,
        }),
    }
}

fn extract_markup_file(
    file_path: &str,
    kind: BundleKind,
    evaluator: &dyn MarkupEvaluator,
) -> FileOutcome {
    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) => return skipped(file_path, e.into()),
    };
    match collect_markup_keys(&content, evaluator) {
        Ok(keys) => FileOutcome::Entries(
            keys.into_iter()
                .map(|key| LocalizationEntry::new(SourceLocation::file(file_path), key, kind))
                .collect(),
        ),
        Err(e) => skipped(file_path, e.into()),
    }
}

fn skipped(file_path: &str, reason: SkipReason) -> FileOutcome {
    FileOutcome::Skipped(SkippedFile {
        file_path: file_path.to_string(),
        reason,
    })
}

/// Collect the entries of bundle `kind` from every file of `files`.
///
/// Markup files only contribute to bundles that read markup.
pub fn build_entry_set(
    files: &FileScan,
    kind: BundleKind,
    evaluator: &dyn MarkupEvaluator,
) -> BuildOutcome {
    let mut outcomes: Vec<FileOutcome> = files
        .source_files
        .par_iter()
        .map(|path| extract_source_file(path, kind))
        .collect();

    if kind.reads_markup() {
        outcomes.par_extend(
            files
                .markup_files
                .par_iter()
                .map(|path| extract_markup_file(path, kind, evaluator)),
        );
    }

    let mut build = BuildOutcome::default();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Entries(entries) => build.entries.extend(entries),
            FileOutcome::Failed(error) => {
                warn!(bundle = %kind, "{}", error);
                build.extraction_errors.push(error);
            }
            FileOutcome::Skipped(skipped) => {
                warn!(bundle = %kind, "skipping {}", skipped);
                build.skipped_files.push(skipped);
            }
        }
    }

    debug!(
        bundle = %kind,
        keys = build.entries.len(),
        failed = build.extraction_errors.len(),
        skipped = build.skipped_files.len(),
        "entry set built"
    );

    build
}
