use crate::apply::apply_plan;
use crate::options::RenameOptions;
use crate::output::RenameResult;
use crate::planner::{plan_renames, PlanOutcome, RememberedChoices};
use crate::resolver::OccurrenceResolver;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Plan renames for `folders` and, unless `dry_run`, perform them.
///
/// Returns the structured result together with the plan and the session's
/// remembered choices, so the caller can render the preview or re-plan.
pub fn rename_operation<R>(
    folders: &[PathBuf],
    options: &RenameOptions,
    dry_run: bool,
    resolver: &mut R,
    choices: RememberedChoices,
) -> Result<(RenameResult, PlanOutcome)>
where
    R: OccurrenceResolver + ?Sized,
{
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let resolved = resolve_folders(folders, &current_dir);

    let outcome = plan_renames(&resolved, options, resolver, choices)?;

    if dry_run {
        let result = RenameResult::new(&outcome.plan, None);
        return Ok((result, outcome));
    }

    let report = apply_plan(&outcome.plan);
    info!(
        renamed = report.renamed.len(),
        failed = report.failures.len(),
        "apply finished"
    );
    let result = RenameResult::new(&outcome.plan, Some(&report));
    Ok((result, outcome))
}

/// Make folders absolute relative to `current_dir`, canonicalizing when possible.
fn resolve_folders(folders: &[PathBuf], current_dir: &Path) -> Vec<PathBuf> {
    folders
        .iter()
        .map(|path| {
            let absolute = if path.is_absolute() {
                path.clone()
            } else {
                current_dir.join(path)
            };
            absolute.canonicalize().unwrap_or(absolute)
        })
        .collect()
}
