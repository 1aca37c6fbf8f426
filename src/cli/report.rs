//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style text format or as one JSON document.
//! Separate from core logic to allow l10nscan to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CheckSummary, CommandResult, CommandSummary, InitSummary, SkippedFileSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{BundleKind, SourceLocation};
use crate::issues::{Issue, Report, Rule, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of usages to display per issue.
const MAX_USAGES_DISPLAY: usize = 3;

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, markup_files: usize) {
    print_success_to(source_files, markup_files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(source_files: usize, markup_files: usize, writer: &mut W) {
    let checked = if markup_files == 0 {
        format!("{} source {}", source_files, plural(source_files, "file"))
    } else {
        format!(
            "{} source {}, {} markup {}",
            source_files,
            plural(source_files, "file"),
            markup_files,
            plural(markup_files, "file")
        )
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Checked {} - no issues found", checked).green()
    );
}

/// Print a warning about files that could not be read or evaluated.
pub fn print_skipped_warning(summary: &CheckSummary, verbose: bool) {
    print_skipped_warning_to(summary, verbose, &mut io::stderr().lock());
}

/// Print a skipped-files warning to a custom writer.
///
/// Verbose runs list each file instead of the count.
pub fn print_skipped_warning_to<W: Write>(summary: &CheckSummary, verbose: bool, writer: &mut W) {
    let total = summary.skipped_files.len() + summary.inaccessible_paths;
    if total == 0 {
        return;
    }

    if !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            total,
            "-v".cyan()
        );
        return;
    }

    for file in &summary.skipped_files {
        let _ = writeln!(
            writer,
            "{} skipped {}: {}",
            "warning:".bold().yellow(),
            file.file_path,
            file.reason
        );
    }
    if summary.inaccessible_paths > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be accessed while walking the tree",
            "warning:".bold().yellow(),
            summary.inaccessible_paths
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let location = loc.location;

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let message = if issue.message_is_key() {
        format!("\"{}\"", issue.message())
    } else {
        issue.message()
    };

    let _ = writeln!(
        writer,
        "{}: {}  {} {}",
        severity_str,
        message,
        issue.report_rule().to_string().dimmed().cyan(),
        format!("[{}]", issue.report_bundle()).dimmed()
    );

    // Clickable location: --> path:line:col
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(source_line) = loc.source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            location.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = source_line
            .chars()
            .take(location.col.saturating_sub(1))
            .collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let usages = issue.usages();
    if !usages.is_empty() {
        print_usages(usages, writer, max_line_width);
    }

    let _ = writeln!(writer);
}

fn print_usages<W: Write>(usages: &[SourceLocation], writer: &mut W, max_line_width: usize) {
    let total = usages.len();
    let display_count = total.min(MAX_USAGES_DISPLAY);

    for (i, usage) in usages.iter().take(display_count).enumerate() {
        let is_last = i == display_count - 1;
        let remaining = total.saturating_sub(display_count);
        let suffix = if is_last && remaining > 0 {
            format!(" (and {} more)", remaining)
        } else {
            String::new()
        };

        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}{}",
            "",
            "=".blue(),
            "used:".bold(),
            usage,
            suffix,
            width = max_line_width
        );
    }
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter(|i| i.location().source_line.is_some())
        .map(|i| i.location().location.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// JSON Output
// ============================================================

#[derive(Serialize)]
struct JsonIssue<'a> {
    rule: Rule,
    severity: Severity,
    #[serde(flatten)]
    issue: &'a Issue,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    source_files: usize,
    markup_files: usize,
    skipped_files: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    bundles: &'a [BundleKind],
    issues: Vec<JsonIssue<'a>>,
    skipped_files: &'a [SkippedFileSummary],
    summary: JsonSummary,
}

/// Write the check result as one pretty-printed JSON document.
pub fn report_json_to<W: Write>(result: &CommandResult, writer: &mut W) -> io::Result<()> {
    let (bundles, skipped_files): (&[BundleKind], &[SkippedFileSummary]) = match &result.summary
    {
        CommandSummary::Check(summary) => (&summary.bundles, &summary.skipped_files),
        CommandSummary::Init(_) => (&[], &[]),
    };

    let report = JsonReport {
        bundles,
        issues: result
            .issues
            .iter()
            .map(|issue| JsonIssue {
                rule: issue.rule(),
                severity: issue.severity(),
                issue,
            })
            .collect(),
        skipped_files,
        summary: JsonSummary {
            errors: result.error_count,
            warnings: result.warning_count,
            source_files: result.source_files_checked,
            markup_files: result.markup_files_checked,
            skipped_files: result.skipped_file_count,
        },
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)
}

// ============================================================
// Command Output
// ============================================================

pub fn print(result: &CommandResult, format: OutputFormat, verbose: bool) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            match format {
                OutputFormat::Text => {
                    report(&result.issues);
                    if result.issues.is_empty() {
                        print_success(result.source_files_checked, result.markup_files_checked);
                    }
                }
                OutputFormat::Json => {
                    if let Err(err) = report_json_to(result, &mut io::stdout().lock()) {
                        eprintln!("Error: {}", err);
                    }
                }
            }
            print_skipped_warning(summary, verbose);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
