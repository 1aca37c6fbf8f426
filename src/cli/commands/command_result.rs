use serde::Serialize;

use crate::core::{BundleKind, SkippedFile};
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    /// Bundles that were checked, in check order.
    pub bundles: Vec<BundleKind>,
    /// Files left out because they could not be read or evaluated.
    pub skipped_files: Vec<SkippedFileSummary>,
    /// Paths the tree walk could not access.
    pub inaccessible_paths: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// A skipped file, reduced to what reports print.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFileSummary {
    pub file_path: String,
    pub reason: String,
}

impl From<&SkippedFile> for SkippedFileSummary {
    fn from(skipped: &SkippedFile) -> Self {
        Self {
            file_path: skipped.file_path.clone(),
            reason: skipped.reason.to_string(),
        }
    }
}

/// Result of running l10nscan commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found during the check, sorted.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
    /// Number of files and paths that could not be read or evaluated.
    pub skipped_file_count: usize,
    /// Number of source files that were scanned.
    pub source_files_checked: usize,
    /// Number of markup files that were evaluated.
    /// 0 if no checked bundle reads markup.
    pub markup_files_checked: usize,
}
