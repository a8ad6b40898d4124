use crate::pattern::Span;
use crate::planner::SpanRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Plain,
    /// A pattern occurrence that was not selected for replacement
    Untouched,
    Replaced,
    Added,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
}

/// Split the original name into plain text, untouched matches and replaced
/// spans, left to right.
pub fn annotate_original<'a>(name: &'a str, spans: &SpanRecord) -> Vec<Segment<'a>> {
    let mut marked: Vec<(Span, SegmentKind)> = spans
        .matches
        .iter()
        .filter(|span| !spans.replaced.contains(*span))
        .map(|span| (*span, SegmentKind::Untouched))
        .chain(spans.replaced.iter().map(|span| (*span, SegmentKind::Replaced)))
        .collect();
    marked.sort_by_key(|(span, _)| (span.start, span.end));
    segments(name, &marked)
}

/// Split the new name into plain text and inserted spans, left to right.
pub fn annotate_new<'a>(name: &'a str, spans: &SpanRecord) -> Vec<Segment<'a>> {
    let marked: Vec<(Span, SegmentKind)> = spans
        .added
        .iter()
        .map(|span| (*span, SegmentKind::Added))
        .collect();
    segments(name, &marked)
}

/// `marked` must be sorted by start. Empty, overlapping or out-of-bounds
/// spans are dropped.
fn segments<'a>(text: &'a str, marked: &[(Span, SegmentKind)]) -> Vec<Segment<'a>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for &(span, kind) in marked {
        if span.is_empty() || span.start < cursor {
            continue;
        }
        let (Some(before), Some(inner)) =
            (text.get(cursor..span.start), text.get(span.start..span.end))
        else {
            continue;
        };
        if !before.is_empty() {
            out.push(Segment {
                kind: SegmentKind::Plain,
                text: before,
            });
        }
        out.push(Segment { kind, text: inner });
        cursor = span.end;
    }

    if let Some(rest) = text.get(cursor..) {
        if !rest.is_empty() {
            out.push(Segment {
                kind: SegmentKind::Plain,
                text: rest,
            });
        }
    }

    out
}
