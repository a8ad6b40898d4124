use crate::planner::{Plan, PlannedChange};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// A rename that could not be performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub change: PlannedChange,
    pub reason: String,
}

/// What happened when a plan was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub renamed: Vec<PlannedChange>,
    pub failures: Vec<RenameFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Perform every rename in `plan`, in plan order.
///
/// A failing rename is recorded and the remaining renames are still
/// attempted. Existing entries are never overwritten.
pub fn apply_plan(plan: &Plan) -> ApplyReport {
    let mut report = ApplyReport::default();

    for change in &plan.changes {
        match perform_rename(change) {
            Ok(()) => {
                info!(
                    from = %change.original_path().display(),
                    to = %change.new_name,
                    "renamed"
                );
                report.renamed.push(change.clone());
            },
            Err(e) => {
                warn!(
                    from = %change.original_path().display(),
                    to = %change.new_name,
                    error = %format!("{e:#}"),
                    "rename failed"
                );
                report.failures.push(RenameFailure {
                    change: change.clone(),
                    reason: format!("{e:#}"),
                });
            },
        }
    }

    report
}

fn perform_rename(change: &PlannedChange) -> Result<()> {
    validate_new_name(&change.new_name)?;

    let from = change.original_path();
    let to = change.new_path();

    if fs::symlink_metadata(&from).is_err() {
        return Err(anyhow!("{} no longer exists", from.display()));
    }

    let case_only_rename = change.original_name.to_lowercase() == change.new_name.to_lowercase();

    if fs::symlink_metadata(&to).is_ok() {
        if case_only_rename && is_case_insensitive_fs(&change.folder) {
            // Same entry seen through a case-insensitive lookup: go via a temporary name
            let temp_name = change
                .folder
                .join(format!(".{}.renbatch.{}.tmp", change.original_name, std::process::id()));
            fs::rename(&from, &temp_name)
                .with_context(|| format!("Failed to rename {} to temp", from.display()))?;
            fs::rename(&temp_name, &to)
                .with_context(|| format!("Failed to rename temp to {}", to.display()))?;
            return Ok(());
        }
        return Err(anyhow!("{} already exists", to.display()));
    }

    fs::rename(&from, &to)
        .with_context(|| format!("Failed to rename {} to {}", from.display(), to.display()))
}

/// Reject names that would move the entry out of its folder.
fn validate_new_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(anyhow!("invalid new name '{}'", name));
    }
    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        return Err(anyhow!("invalid new name '{}': contains a path separator", name));
    }
    Ok(())
}

fn is_case_insensitive_fs(dir: &Path) -> bool {
    let test_lower = dir.join(".renbatch_case_test");
    let test_upper = dir.join(".RENBATCH_CASE_TEST");

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&test_lower)
    {
        Ok(_) => {
            let case_insensitive = test_upper.exists();
            let _ = fs::remove_file(&test_lower);
            case_insensitive
        },
        // An entry we did not create is only looked at, never removed
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => test_upper.exists(),
        // Assume case-sensitive if we can't test
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenameOptions;
    use crate::planner::{EntryKind, PlanStats};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn plan_of(folder: &Path, renames: &[(&str, &str)]) -> Plan {
        Plan {
            options: RenameOptions::default(),
            folders: vec![folder.to_path_buf()],
            changes: renames
                .iter()
                .map(|(from, to)| PlannedChange {
                    original_name: (*from).to_string(),
                    new_name: (*to).to_string(),
                    folder: folder.to_path_buf(),
                    kind: EntryKind::File,
                })
                .collect(),
            spans: BTreeMap::new(),
            stats: PlanStats::default(),
        }
    }

    #[test]
    fn test_apply_renames_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a_old.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b_old.txt"), "b").unwrap();

        let plan = plan_of(
            temp_dir.path(),
            &[("a_old.txt", "a.txt"), ("b_old.txt", "b.txt")],
        );
        let report = apply_plan(&plan);

        assert!(report.is_success());
        assert_eq!(report.renamed.len(), 2);
        assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "a");
        assert!(!temp_dir.path().join("b_old.txt").exists());
    }

    #[test]
    fn test_apply_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("one.txt"), "1").unwrap();
        fs::write(temp_dir.path().join("taken.txt"), "existing").unwrap();
        fs::write(temp_dir.path().join("three.txt"), "3").unwrap();

        let plan = plan_of(
            temp_dir.path(),
            &[
                ("one.txt", "taken.txt"),
                ("missing.txt", "found.txt"),
                ("three.txt", "3.txt"),
            ],
        );
        let report = apply_plan(&plan);

        assert_eq!(report.failures.len(), 2);
        assert!(report.failures[0].reason.contains("already exists"));
        assert!(report.failures[1].reason.contains("no longer exists"));
        assert_eq!(report.renamed.len(), 1);
        assert_eq!(report.renamed[0].new_name, "3.txt");

        // The collision target was left untouched
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("taken.txt")).unwrap(),
            "existing"
        );
        assert!(temp_dir.path().join("one.txt").exists());
    }

    #[test]
    fn test_apply_rejects_path_separators() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();

        let plan = plan_of(temp_dir.path(), &[("a.txt", "sub/a.txt"), ("a.txt", "")]);
        let report = apply_plan(&plan);

        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().all(|f| f.reason.contains("invalid new name")));
        assert!(temp_dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_case_only_rename() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("readme.md"), "x").unwrap();

        let plan = plan_of(temp_dir.path(), &[("readme.md", "README.md")]);
        let report = apply_plan(&plan);

        assert!(report.is_success());
        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["README.md".to_string()]);
    }

    #[test]
    fn test_case_check_leaves_existing_marker_file() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join(".renbatch_case_test");
        fs::write(&marker, "user data").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "x").unwrap();

        is_case_insensitive_fs(temp_dir.path());
        let report = apply_plan(&plan_of(temp_dir.path(), &[("notes.md", "NOTES.md")]));

        assert!(report.is_success());
        assert_eq!(fs::read_to_string(&marker).unwrap(), "user data");
        assert!(temp_dir.path().join("NOTES.md").exists());
    }

    #[test]
    fn test_case_check_cleans_up_after_itself() {
        let temp_dir = TempDir::new().unwrap();

        is_case_insensitive_fs(temp_dir.path());

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
