use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Severity};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    markup_files_checked: usize,
) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    let skipped_file_count = match &summary {
        CommandSummary::Check(check) => check.skipped_files.len() + check.inaccessible_paths,
        CommandSummary::Init(_) => 0,
    };

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        skipped_file_count,
        source_files_checked,
        markup_files_checked,
    }
}
