mod annotate;
mod json;
mod listing;
mod summary;
mod table;

pub use annotate::{annotate_new, annotate_original, Segment, SegmentKind};
pub use json::render_json;
pub use listing::render_annotated;
pub use summary::render_summary;
pub use table::render_table;

use crate::planner::Plan;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Annotated,
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annotated" => Ok(Self::Annotated),
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &Plan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Annotated => render_annotated(plan, use_color),
        Preview::Table => render_table(plan, use_color),
        Preview::Summary => render_summary(plan),
        Preview::Json => render_json(plan),
        Preview::None => String::new(),
    }
}

/// Write plan preview to stdout
pub fn write_preview(plan: &Plan, format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_plan(plan, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}

/// Path relative to the current directory when possible, for cleaner display
fn display_path(path: &Path) -> String {
    match std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
    {
        Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Some(relative) => relative.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OccurrencePolicy, RenameOptions};
    use crate::pattern::Span;
    use crate::planner::{EntryKind, PlanStats, PlannedChange, SpanRecord};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn create_test_plan() -> Plan {
        let folder = PathBuf::from("/tmp/renbatch-preview-test");
        let change = PlannedChange {
            original_name: "a_x_b_x.txt".to_string(),
            new_name: "a_x_b_b_new.txt".to_string(),
            folder: folder.clone(),
            kind: EntryKind::File,
        };
        let mut spans = BTreeMap::new();
        spans.insert(
            change.original_path(),
            SpanRecord {
                matches: [Span::new(1, 3), Span::new(5, 7)].into_iter().collect(),
                replaced: [Span::new(5, 7)].into_iter().collect(),
                added: [Span::new(7, 11)].into_iter().collect(),
            },
        );

        Plan {
            options: RenameOptions {
                pattern_to_remove: "_x".to_string(),
                occurrence: OccurrencePolicy::Last,
                replacement: "_b".to_string(),
                pattern_to_add: "_new".to_string(),
                ..RenameOptions::default()
            },
            folders: vec![folder],
            changes: vec![change],
            spans,
            stats: PlanStats {
                entries_scanned: 3,
                entries_with_matches: 1,
                total_matches: 2,
            },
        }
    }

    #[test]
    fn test_preview_from_str() {
        assert_eq!(Preview::from_str("annotated"), Ok(Preview::Annotated));
        assert_eq!(Preview::from_str("table"), Ok(Preview::Table));
        assert_eq!(Preview::from_str("summary"), Ok(Preview::Summary));
        assert_eq!(Preview::from_str("JSON"), Ok(Preview::Json));
        assert_eq!(Preview::from_str("none"), Ok(Preview::None));
        assert!(Preview::from_str("diff").is_err());
    }

    #[test]
    fn test_should_use_color() {
        assert!(should_use_color_with_detector(Some(true), || false));
        assert!(!should_use_color_with_detector(Some(false), || true));
        assert!(should_use_color_with_detector(None, || true));
        assert!(!should_use_color_with_detector(None, || false));
    }

    #[test]
    fn test_render_annotated_no_color() {
        let plan = create_test_plan();
        let result = render_annotated(&plan, false);

        assert!(
            result.contains("  a[=_x=]_b[-_x-].txt -> a_x_b_b[+_new+].txt"),
            "unexpected output:\n{}",
            result
        );
        assert!(result.contains("Legend: [-replaced-] [=unchanged match=] [+added+]"));
    }

    #[test]
    fn test_render_annotated_color() {
        let plan = create_test_plan();
        let result = render_annotated(&plan, true);

        // Replaced text: white on red
        assert!(result.contains("\u{1b}[41;37m_x\u{1b}[0m"));
        assert!(!result.contains("[-"));
    }

    #[test]
    fn test_render_annotated_empty() {
        let mut plan = create_test_plan();
        plan.changes.clear();
        assert_eq!(render_annotated(&plan, false), "No renames planned\n");
    }

    #[test]
    fn test_render_annotated_keeps_folder_order() {
        let zeta = PathBuf::from("/tmp/renbatch-preview-zeta");
        let alpha = PathBuf::from("/tmp/renbatch-preview-alpha");
        let change = |folder: &PathBuf, from: &str, to: &str| PlannedChange {
            original_name: from.to_string(),
            new_name: to.to_string(),
            folder: folder.clone(),
            kind: EntryKind::File,
        };

        let mut plan = create_test_plan();
        plan.folders = vec![zeta.clone(), alpha.clone()];
        plan.changes = vec![
            change(&zeta, "a.txt", "a_new.txt"),
            change(&alpha, "b.txt", "b_new.txt"),
            change(&zeta, "c.txt", "c_new.txt"),
        ];
        plan.spans.clear();

        let result = render_annotated(&plan, false);
        let zeta_at = result.find("renbatch-preview-zeta").unwrap();
        let alpha_at = result.find("renbatch-preview-alpha").unwrap();
        let c_at = result.find("  c.txt -> c_new.txt").unwrap();

        // One heading per folder, first-seen folder first, its changes together
        assert_eq!(result.matches("renbatch-preview-zeta").count(), 1);
        assert!(zeta_at < c_at);
        assert!(c_at < alpha_at);
    }

    #[test]
    fn test_render_table_no_color() {
        let plan = create_test_plan();
        let result = render_table(&plan, false);

        assert!(result.contains("Original"));
        assert!(result.contains("a_x_b_x.txt"));
        assert!(result.contains("→ a_x_b_b_new.txt"));
        assert!(result.contains("TOTALS"));
    }

    #[test]
    fn test_render_summary() {
        let plan = create_test_plan();
        let result = render_summary(&plan);

        assert!(result.contains("[RENAME PLAN]"));
        assert!(result.contains("Remove: _x (literal, last)"));
        assert!(result.contains("Add: _new (before extension)"));
        assert!(result.contains("Renames: 1"));
        assert!(result.contains("[PATHS]"));
        assert!(result.contains("file: "));
        assert!(result.contains("a_x_b_x.txt -> a_x_b_b_new.txt"));
    }

    #[test]
    fn test_render_json() {
        let plan = create_test_plan();
        let result = render_json(&plan);
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["changes"][0]["new_name"], "a_x_b_b_new.txt");
        assert_eq!(value["changes"][0]["kind"], "file");
        assert_eq!(value["options"]["occurrence"], "last");
        assert_eq!(value["stats"]["total_matches"], 2);
    }

    #[test]
    fn test_render_none() {
        let plan = create_test_plan();
        assert!(render_plan(&plan, Preview::None, Some(false)).is_empty());
    }
}
