use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` inside a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One occurrence of the removal pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Match {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Compiled form of the removal pattern.
///
/// Literal patterns are escaped so that every character matches itself;
/// regex patterns go to the engine untouched.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    pub regex: Regex,
    literal: bool,
}

pub fn build_pattern(pattern: &str, use_regex: bool) -> Result<MatchPattern, PatternError> {
    let source = if use_regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };

    let regex = RegexBuilder::new(&source)
        .build()
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;

    Ok(MatchPattern {
        regex,
        literal: !use_regex,
    })
}

/// All non-overlapping matches, scanned left to right.
pub fn find_matches(pattern: &MatchPattern, name: &str) -> Vec<Match> {
    pattern
        .regex
        .find_iter(name)
        .map(|m| Match {
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Replace the matches at `selected` (zero-based indices into the scan of
/// `name`) and return the new name with the spans that were replaced.
///
/// Edits are applied from the highest index down so earlier offsets stay
/// valid. In regex mode `$1` / `${name}` in `replacement` expand against the
/// match being replaced. A group reference followed by a letter, digit or `_`
/// needs braces (`${1}_bak`), otherwise the name swallows those characters.
pub fn replace_selected(
    pattern: &MatchPattern,
    name: &str,
    selected: &[usize],
    replacement: &str,
) -> (String, Vec<Span>) {
    let captures: Vec<regex::Captures<'_>> = pattern.regex.captures_iter(name).collect();

    let mut indices: Vec<usize> = selected
        .iter()
        .copied()
        .filter(|&i| i < captures.len())
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut new_name = name.to_string();
    let mut spans = Vec::with_capacity(indices.len());

    for &idx in indices.iter().rev() {
        let caps = &captures[idx];
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let mut expanded = String::new();
        if pattern.literal {
            expanded.push_str(replacement);
        } else {
            caps.expand(replacement, &mut expanded);
        }

        new_name.replace_range(whole.start()..whole.end(), &expanded);
        spans.push(Span::new(whole.start(), whole.end()));
    }

    spans.reverse();
    (new_name, spans)
}

/// Split a name into stem and extension.
///
/// The extension begins at the last `.` as long as a non-dot character comes
/// before it, so leading dots of hidden files never start an extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if name[..dot].bytes().any(|b| b != b'.') => name.split_at(dot),
        _ => (name, ""),
    }
}
