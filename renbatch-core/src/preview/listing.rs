use super::annotate::{annotate_new, annotate_original, Segment, SegmentKind};
use super::display_path;
use crate::planner::{Plan, PlannedChange, SpanRecord};
use nu_ansi_term::{Color as AnsiColor, Style};
use std::fmt::Write;
use std::path::Path;

const ORANGE: AnsiColor = AnsiColor::Rgb(0xFF, 0xA5, 0x00);
const GREEN: AnsiColor = AnsiColor::Rgb(0x00, 0xA9, 0x58);

/// Render each change as `original -> new` with replaced text, untouched
/// matches and inserted text highlighted. Without color the categories are
/// marked `[-replaced-]`, `[=untouched=]` and `[+added+]`.
pub fn render_annotated(plan: &Plan, use_color: bool) -> String {
    let mut output = String::new();

    if plan.changes.is_empty() {
        writeln!(output, "No renames planned").unwrap();
        return output;
    }

    let empty = SpanRecord::default();
    for (folder, changes) in group_by_folder(plan) {
        let heading = display_path(folder);
        if use_color {
            writeln!(output, "{}", AnsiColor::Cyan.bold().paint(heading)).unwrap();
        } else {
            writeln!(output, "{}", heading).unwrap();
        }

        for change in changes {
            let spans = plan.spans_for(change).unwrap_or(&empty);
            let original = paint(&annotate_original(&change.original_name, spans), use_color);
            let new = paint(&annotate_new(&change.new_name, spans), use_color);
            writeln!(output, "  {} -> {}", original, new).unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "{}", legend(use_color)).unwrap();
    output
}

/// Changes grouped by folder, folders in the order they first appear in the
/// plan and changes in plan order within each folder.
fn group_by_folder(plan: &Plan) -> Vec<(&Path, Vec<&PlannedChange>)> {
    let mut groups: Vec<(&Path, Vec<&PlannedChange>)> = Vec::new();
    for change in &plan.changes {
        let folder = change.folder.as_path();
        match groups.iter_mut().find(|(seen, _)| *seen == folder) {
            Some((_, changes)) => changes.push(change),
            None => groups.push((folder, vec![change])),
        }
    }
    groups
}

fn paint(segments: &[Segment<'_>], use_color: bool) -> String {
    let mut out = String::new();
    for segment in segments {
        if use_color {
            match segment.kind {
                SegmentKind::Plain => out.push_str(segment.text),
                kind => write!(out, "{}", style_for(kind).paint(segment.text)).unwrap(),
            }
        } else {
            match segment.kind {
                SegmentKind::Plain => out.push_str(segment.text),
                SegmentKind::Untouched => write!(out, "[={}=]", segment.text).unwrap(),
                SegmentKind::Replaced => write!(out, "[-{}-]", segment.text).unwrap(),
                SegmentKind::Added => write!(out, "[+{}+]", segment.text).unwrap(),
            }
        }
    }
    out
}

fn style_for(kind: SegmentKind) -> Style {
    match kind {
        SegmentKind::Plain => Style::new(),
        SegmentKind::Untouched => Style::new().on(ORANGE).fg(AnsiColor::Black),
        SegmentKind::Replaced => Style::new().on(AnsiColor::Red).fg(AnsiColor::White),
        SegmentKind::Added => Style::new().on(GREEN).fg(AnsiColor::White),
    }
}

fn legend(use_color: bool) -> String {
    if use_color {
        format!(
            "Legend: {} {} {}",
            style_for(SegmentKind::Replaced).paint(" replaced "),
            style_for(SegmentKind::Untouched).paint(" unchanged match "),
            style_for(SegmentKind::Added).paint(" added "),
        )
    } else {
        "Legend: [-replaced-] [=unchanged match=] [+added+]".to_string()
    }
}
