use super::display_path;
use crate::planner::{EntryKind, Plan};
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

/// Render plan as a table
pub fn render_table(plan: &Plan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(vec![
            ColumnConstraint::Absolute(Width::Fixed(50)), // Folder
            ColumnConstraint::Absolute(Width::Fixed(6)),  // Kind
            ColumnConstraint::Absolute(Width::Fixed(45)), // Original
            ColumnConstraint::Absolute(Width::Fixed(45)), // New
        ]);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Folder").fg(Color::Cyan),
            Cell::new("Kind").fg(Color::Cyan),
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Folder", "Kind", "Original", "New"]);
    }

    for change in &plan.changes {
        let folder = display_path(&change.folder);
        let kind = match change.kind {
            EntryKind::File => "File",
            EntryKind::Dir => "Dir",
        };

        if use_color {
            table.add_row(vec![
                Cell::new(&folder),
                Cell::new(kind).fg(Color::Blue),
                Cell::new(&change.original_name).fg(Color::Red),
                Cell::new(format!("→ {}", change.new_name)).fg(Color::Green),
            ]);
        } else {
            table.add_row(vec![
                folder.as_str(),
                kind,
                change.original_name.as_str(),
                &format!("→ {}", change.new_name),
            ]);
        }
    }

    let totals = format!(
        "{} renames, {} of {} entries matched",
        plan.changes.len(),
        plan.stats.entries_with_matches,
        plan.stats.entries_scanned
    );
    if use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(""),
            Cell::new(totals).fg(Color::White),
            Cell::new(format!("{} matches", plan.stats.total_matches)).fg(Color::Yellow),
        ]);
    } else {
        table.add_row(vec!["─────────", "────", "─────────", "─────────"]);
        table.add_row(vec![
            "TOTALS",
            "",
            totals.as_str(),
            &format!("{} matches", plan.stats.total_matches),
        ]);
    }

    table.to_string()
}
