use anyhow::Result;
use tracing::debug;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary, SkippedFileSummary, helper::finish};
use crate::{
    core::{BundleKind, CheckContext, FxmlEvaluator},
    issues::{Issue, issues_from_report},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let common = &cmd.args.common;
    let ctx = CheckContext::new(&common.check_options())?;

    let bundles = if cmd.bundles.is_empty() {
        BundleKind::all()
    } else {
        let mut bundles = cmd.bundles.clone();
        bundles.sort();
        bundles.dedup();
        bundles
    };

    let mut all_issues: Vec<Issue> = Vec::new();
    let mut skipped_files: Vec<SkippedFileSummary> = Vec::new();

    for &kind in &bundles {
        let report = ctx.check_bundle(kind, &FxmlEvaluator)?;
        debug!(
            bundle = %kind,
            used = report.build.entries.len(),
            defined = report.key_set.len(),
            missing = report.result.missing_keys.len(),
            obsolete = report.result.obsolete_keys.len(),
            "bundle checked"
        );

        all_issues.extend(issues_from_report(&report));
        skipped_files.extend(report.build.skipped_files.iter().map(SkippedFileSummary::from));
    }

    // A file unreadable for one bundle is unreadable for all of them.
    skipped_files.sort();
    skipped_files.dedup();

    let markup_files_checked = ctx.markup_files_checked(&bundles);

    Ok(finish(
        CommandSummary::Check(CheckSummary {
            bundles,
            skipped_files,
            inaccessible_paths: ctx.files.skipped_count,
        }),
        all_issues,
        ctx.files.source_files.len(),
        markup_files_checked,
    ))
}
