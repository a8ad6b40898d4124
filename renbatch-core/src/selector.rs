//! Grammar for the free-text answer to "which occurrences should be replaced?"
//!
//! - `l` selects the last match
//! - `a` selects every match
//! - `1,3` selects the first and third match (1-based)
//!
//! Anything else, including an empty answer, selects nothing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccurrenceSelector {
    Last,
    All,
    /// 1-based indices as typed, in input order
    Indices(Vec<usize>),
    Skip,
}

impl OccurrenceSelector {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Skip;
        }
        if input.eq_ignore_ascii_case("l") {
            return Self::Last;
        }
        if input.eq_ignore_ascii_case("a") {
            return Self::All;
        }

        let indices: Vec<usize> = input
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty() && item.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|item| item.parse().ok())
            .collect();

        if indices.is_empty() {
            Self::Skip
        } else {
            Self::Indices(indices)
        }
    }

    /// Parse a remembered answer, where `None` means the user declined.
    pub fn from_choice(choice: Option<&str>) -> Self {
        choice.map_or(Self::Skip, Self::parse)
    }

    /// Zero-based indices selected out of `match_count` matches, ascending,
    /// without duplicates. Out-of-range indices are dropped.
    pub fn resolve(&self, match_count: usize) -> Vec<usize> {
        match self {
            Self::Skip => vec![],
            _ if match_count == 0 => vec![],
            Self::Last => vec![match_count - 1],
            Self::All => (0..match_count).collect(),
            Self::Indices(indices) => {
                let mut selected: Vec<usize> = indices
                    .iter()
                    .filter(|&&i| i >= 1 && i <= match_count)
                    .map(|&i| i - 1)
                    .collect();
                selected.sort_unstable();
                selected.dedup();
                selected
            },
        }
    }
}

/// The option list shown alongside the prompt, e.g. `1, 2, 3, l (last), a (all)`.
pub fn prompt_options(match_count: usize) -> String {
    let mut parts: Vec<String> = (1..=match_count).map(|i| i.to_string()).collect();
    parts.push("l (last)".to_string());
    parts.push("a (all)".to_string());
    parts.join(", ")
}
