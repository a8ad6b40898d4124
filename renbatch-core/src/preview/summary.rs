use super::display_path;
use crate::options::AddPosition;
use crate::planner::{EntryKind, Plan};
use std::fmt::Write;

/// Render plan as a plain summary, one line per rename
pub fn render_summary(plan: &Plan) -> String {
    let mut output = String::new();
    let options = &plan.options;

    writeln!(output, "[RENAME PLAN]").unwrap();
    if !options.pattern_to_remove.is_empty() {
        let mode = if options.use_regex { "regex" } else { "literal" };
        writeln!(
            output,
            "Remove: {} ({}, {})",
            options.pattern_to_remove, mode, options.occurrence
        )
        .unwrap();
        writeln!(output, "Replace: {}", options.replacement).unwrap();
    }
    if !options.pattern_to_add.is_empty() {
        let position = match options.add_position {
            AddPosition::Start => "start",
            AddPosition::End => "before extension",
        };
        writeln!(output, "Add: {} ({})", options.pattern_to_add, position).unwrap();
    }
    if !options.extension_filter.is_empty() {
        writeln!(output, "Filter: *{}", options.extension_filter).unwrap();
    }
    writeln!(output, "Scanned: {}", plan.stats.entries_scanned).unwrap();
    writeln!(output, "Matched: {}", plan.stats.entries_with_matches).unwrap();
    writeln!(output, "Renames: {}", plan.changes.len()).unwrap();

    if !plan.changes.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[PATHS]").unwrap();
        for change in &plan.changes {
            let kind = match change.kind {
                EntryKind::File => "file",
                EntryKind::Dir => "dir",
            };
            let from = display_path(&change.original_path());
            writeln!(output, "{}: {} -> {}", kind, from, change.new_name).unwrap();
        }
    }

    output
}
