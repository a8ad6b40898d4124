use crate::apply::{ApplyReport, RenameFailure};
use crate::planner::Plan;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Shown when a removal pattern matched no entry in any folder
pub const NO_MATCHES_NOTICE: &str = "No files matching the specified pattern were found.";

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan or apply run
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub pattern_to_remove: String,
    pub replacement: String,
    pub pattern_to_add: String,
    pub dry_run: bool,
    pub entries_scanned: usize,
    pub entries_with_matches: usize,
    pub total_matches: usize,
    pub planned: usize,
    pub renamed: usize,
    pub failures: Vec<RenameFailure>,
    pub no_matches: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

impl RenameResult {
    pub fn new(plan: &Plan, report: Option<&ApplyReport>) -> Self {
        Self {
            pattern_to_remove: plan.options.pattern_to_remove.clone(),
            replacement: plan.options.replacement.clone(),
            pattern_to_add: plan.options.pattern_to_add.clone(),
            dry_run: report.is_none(),
            entries_scanned: plan.stats.entries_scanned,
            entries_with_matches: plan.stats.entries_with_matches,
            total_matches: plan.stats.total_matches,
            planned: plan.changes.len(),
            renamed: report.map_or(0, |r| r.renamed.len()),
            failures: report.map(|r| r.failures.clone()).unwrap_or_default(),
            no_matches: plan.no_matches(),
            plan: None,
        }
    }

    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RenameResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failures.is_empty(),
            "operation": if self.dry_run { "plan" } else { "apply" },
            "dry_run": self.dry_run,
            "remove": self.pattern_to_remove,
            "replace": self.replacement,
            "add": self.pattern_to_add,
            "summary": {
                "entries_scanned": self.entries_scanned,
                "entries_with_matches": self.entries_with_matches,
                "total_matches": self.total_matches,
                "planned": self.planned,
                "renamed": self.renamed,
                "failed": self.failures.len(),
            },
            "no_matches": self.no_matches,
            "failures": self.failures,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.dry_run {
            writeln!(
                output,
                "Planned {} renames ({} of {} entries matched, {} matches)",
                self.planned, self.entries_with_matches, self.entries_scanned, self.total_matches
            )
            .unwrap();
            return output;
        }

        writeln!(output, "Renamed {} files.", self.renamed).unwrap();
        for failure in &self.failures {
            writeln!(
                output,
                "✗ Failed to rename {} -> {}: {}",
                failure.change.original_name, failure.change.new_name, failure.reason
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
