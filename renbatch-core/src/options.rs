use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which occurrence(s) of the removal pattern to act on when a name contains
/// it more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OccurrencePolicy {
    #[default]
    All,
    First,
    Last,
}

impl OccurrencePolicy {
    /// Zero-based indices of the matches this policy selects.
    pub fn select(self, match_count: usize) -> Vec<usize> {
        match (self, match_count) {
            (_, 0) => vec![],
            (Self::All, n) => (0..n).collect(),
            (Self::First, _) => vec![0],
            (Self::Last, n) => vec![n - 1],
        }
    }
}

impl FromStr for OccurrencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(format!("Invalid occurrence policy: {}", s)),
        }
    }
}

impl fmt::Display for OccurrencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::All => "all",
            Self::First => "first",
            Self::Last => "last",
        };
        f.write_str(s)
    }
}

/// Where inserted text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddPosition {
    Start,
    /// Between the stem and the extension
    #[default]
    End,
}

impl FromStr for AddPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(format!("Invalid add position: {}", s)),
        }
    }
}

impl fmt::Display for AddPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Everything that controls how names are transformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenameOptions {
    /// Substring or regex to remove. Empty disables removal.
    #[serde(default)]
    pub pattern_to_remove: String,
    #[serde(default)]
    pub occurrence: OccurrencePolicy,
    /// Text that replaces each selected match. Empty means delete.
    #[serde(default)]
    pub replacement: String,
    /// Text to insert. Empty disables insertion.
    #[serde(default)]
    pub pattern_to_add: String,
    #[serde(default)]
    pub add_position: AddPosition,
    /// Only names ending with this suffix are considered. Empty disables the filter.
    #[serde(default)]
    pub extension_filter: String,
    #[serde(default)]
    pub use_regex: bool,
    /// Ask which occurrences to replace when a name has more than one match
    #[serde(default)]
    pub interactive: bool,
}

impl RenameOptions {
    pub fn accepts_name(&self, name: &str) -> bool {
        self.extension_filter.is_empty() || name.ends_with(&self.extension_filter)
    }
}
