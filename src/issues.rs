//! Issue types for localization analysis results.
//!
//! Each issue is self-contained with everything the reporters (text and
//! JSON) need to display it.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::{BundleKind, BundleReport, DuplicateKey, FileExtractionError, SourceLocation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    ExtractionError,
    MissingKey,
    ObsoleteKey,
    DuplicateKey,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ExtractionError => write!(f, "extraction-error"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::ObsoleteKey => write!(f, "obsolete-key"),
            Rule::DuplicateKey => write!(f, "duplicate-key"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Key used in code or markup but absent from the base resource file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingKeyIssue {
    pub bundle: BundleKind,
    /// Key in properties-file form.
    pub key: String,
    pub location: SourceLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
    /// Further places the key is used.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub usages: Vec<SourceLocation>,
    /// Base resource file the key should be added to.
    pub bundle_file: String,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// Key defined in the base resource file but referenced nowhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObsoleteKeyIssue {
    pub bundle: BundleKind,
    pub key: String,
    pub location: SourceLocation,
}

impl ObsoleteKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ObsoleteKey
    }
}

/// Malformed call site; the file's keys were left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionErrorIssue {
    pub bundle: BundleKind,
    pub location: SourceLocation,
    pub error: String,
}

impl ExtractionErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ExtractionError
    }
}

/// Key defined twice in a base resource file; the later definition is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKeyIssue {
    pub bundle: BundleKind,
    pub key: String,
    pub location: SourceLocation,
    pub first_line: usize,
}

impl DuplicateKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateKey
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A localization issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Issue {
    ExtractionError(ExtractionErrorIssue),
    MissingKey(MissingKeyIssue),
    ObsoleteKey(ObsoleteKeyIssue),
    DuplicateKey(DuplicateKeyIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ExtractionError(_) => ExtractionErrorIssue::severity(),
            Issue::MissingKey(_) => MissingKeyIssue::severity(),
            Issue::ObsoleteKey(_) => ObsoleteKeyIssue::severity(),
            Issue::DuplicateKey(_) => DuplicateKeyIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ExtractionError(_) => ExtractionErrorIssue::rule(),
            Issue::MissingKey(_) => MissingKeyIssue::rule(),
            Issue::ObsoleteKey(_) => ObsoleteKeyIssue::rule(),
            Issue::DuplicateKey(_) => DuplicateKeyIssue::rule(),
        }
    }
}

// ============================================================
// Conversion from analysis results
// ============================================================

impl From<(BundleKind, &FileExtractionError)> for ExtractionErrorIssue {
    fn from((bundle, failure): (BundleKind, &FileExtractionError)) -> Self {
        Self {
            bundle,
            location: SourceLocation::new(
                &failure.file_path,
                failure.error.line(),
                failure.error.col(),
            ),
            error: failure.error.to_string(),
        }
    }
}

/// All issues of one checked bundle.
pub fn issues_from_report(report: &BundleReport) -> Vec<Issue> {
    let bundle = report.kind;
    let bundle_file = report.key_set.file_path();
    let mut issues = Vec::new();

    for failure in &report.build.extraction_errors {
        issues.push(Issue::ExtractionError((bundle, failure).into()));
    }

    for entry in &report.result.missing_keys {
        issues.push(Issue::MissingKey(MissingKeyIssue {
            bundle,
            key: entry.properties_key().to_string(),
            location: entry.location.clone(),
            source_line: entry.source_line.clone(),
            usages: report.build.entries.other_usages(entry).to_vec(),
            bundle_file: bundle_file.to_string(),
        }));
    }

    for key in &report.result.obsolete_keys {
        let line = report.key_set.line_of(key).unwrap_or(1);
        issues.push(Issue::ObsoleteKey(ObsoleteKeyIssue {
            bundle,
            key: key.clone(),
            location: SourceLocation::new(bundle_file, line, 1),
        }));
    }

    for DuplicateKey {
        key,
        line,
        first_line,
    } in report.key_set.duplicates()
    {
        issues.push(Issue::DuplicateKey(DuplicateKeyIssue {
            bundle,
            key: key.clone(),
            location: SourceLocation::new(bundle_file, *line, 1),
            first_line: *first_line,
        }));
    }

    issues
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub struct ReportLocation<'a> {
    pub location: &'a SourceLocation,
    /// Source line for context display, when known.
    pub source_line: Option<&'a str>,
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on
/// [`Issue`] without dynamic dispatch.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key or error).
    fn message(&self) -> String;

    /// Keys are shown in quotes, free-form messages are not.
    fn message_is_key(&self) -> bool {
        true
    }

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    fn report_bundle(&self) -> BundleKind;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Further usage locations.
    fn usages(&self) -> &[SourceLocation] {
        &[]
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            location: &self.location,
            source_line: self.source_line.as_deref(),
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn report_bundle(&self) -> BundleKind {
        self.bundle
    }

    fn hint(&self) -> Option<String> {
        Some(format!("add \"{}\" to {}", self.key, self.bundle_file))
    }

    fn usages(&self) -> &[SourceLocation] {
        &self.usages
    }
}

impl Report for ObsoleteKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            location: &self.location,
            source_line: None,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn report_bundle(&self) -> BundleKind {
        self.bundle
    }

    fn details(&self) -> Option<String> {
        Some("defined but not used in any source or markup file".to_string())
    }
}

impl Report for ExtractionErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            location: &self.location,
            source_line: None,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn message_is_key(&self) -> bool {
        false
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn report_bundle(&self) -> BundleKind {
        self.bundle
    }

    fn details(&self) -> Option<String> {
        Some("keys of this file were not checked".to_string())
    }
}

impl Report for DuplicateKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation {
            location: &self.location,
            source_line: None,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn report_bundle(&self) -> BundleKind {
        self.bundle
    }

    fn details(&self) -> Option<String> {
        Some(format!("first defined on line {}", self.first_line))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.location
            .cmp(b.location)
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.report_bundle().cmp(&other.report_bundle()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
