use crate::error::PatternError;
use crate::options::{AddPosition, RenameOptions};
use crate::pattern::{
    build_pattern, find_matches, replace_selected, split_extension, MatchPattern, Span,
};
use crate::resolver::{DeclineResolver, OccurrenceResolver};
use crate::selector::OccurrenceSelector;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// A single rename that planning decided on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedChange {
    pub original_name: String,
    pub new_name: String,
    pub folder: PathBuf,
    pub kind: EntryKind,
}

impl PlannedChange {
    pub fn original_path(&self) -> PathBuf {
        self.folder.join(&self.original_name)
    }

    pub fn new_path(&self) -> PathBuf {
        self.folder.join(&self.new_name)
    }
}

/// Highlighting data for one change. Never read by the rename logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Every occurrence of the removal pattern, in original-name coordinates
    pub matches: BTreeSet<Span>,
    /// Occurrences that were replaced, in original-name coordinates
    pub replaced: BTreeSet<Span>,
    /// Inserted text, in new-name coordinates
    pub added: BTreeSet<Span>,
}

/// Answers given to the occurrence prompt during one session, by file name.
/// `None` records a declined or empty answer so the question is not repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedChoices(BTreeMap<String, Option<String>>);

impl RememberedChoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&Option<String>> {
        self.0.get(file_name)
    }

    pub fn remember(&mut self, file_name: impl Into<String>, choice: Option<String>) {
        self.0.insert(file_name.into(), choice);
    }

    /// Forget everything, so the next planning pass asks again.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for RememberedChoices {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    /// Entries that passed the extension filter
    pub entries_scanned: usize,
    pub entries_with_matches: usize,
    pub total_matches: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub options: RenameOptions,
    pub folders: Vec<PathBuf>,
    pub changes: Vec<PlannedChange>,
    /// Keyed by the original path of each change
    pub spans: BTreeMap<PathBuf, SpanRecord>,
    pub stats: PlanStats,
}

impl Plan {
    pub fn spans_for(&self, change: &PlannedChange) -> Option<&SpanRecord> {
        self.spans.get(&change.original_path())
    }

    /// A removal pattern was given but nothing matched it anywhere.
    pub fn no_matches(&self) -> bool {
        !self.options.pattern_to_remove.is_empty() && self.stats.entries_with_matches == 0
    }
}

#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: Plan,
    /// The session's choices, including any answers collected by this pass
    pub choices: RememberedChoices,
}

impl PlanOutcome {
    pub fn no_matches(&self) -> bool {
        self.plan.no_matches()
    }
}

/// Result of transforming a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEdit {
    pub new_name: String,
    pub spans: SpanRecord,
}

impl NameEdit {
    pub fn match_count(&self) -> usize {
        self.spans.matches.len()
    }
}

/// Compute the rename plan for the direct entries of `folders`.
///
/// Folders that are not directories are skipped. The removal pattern is
/// compiled before any folder is read, so an invalid regex fails the call
/// without side effects. Planning never touches the filesystem beyond
/// listing.
pub fn plan_renames<P, R>(
    folders: &[P],
    options: &RenameOptions,
    resolver: &mut R,
    mut choices: RememberedChoices,
) -> Result<PlanOutcome, PatternError>
where
    P: AsRef<Path>,
    R: OccurrenceResolver + ?Sized,
{
    let pattern = if options.pattern_to_remove.is_empty() {
        None
    } else {
        Some(build_pattern(&options.pattern_to_remove, options.use_regex)?)
    };

    let mut changes = Vec::new();
    let mut spans = BTreeMap::new();
    let mut stats = PlanStats::default();

    for folder in folders {
        let folder = folder.as_ref();
        if !folder.is_dir() {
            debug!(folder = %folder.display(), "skipping, not a directory");
            continue;
        }

        for (name, kind) in list_entries(folder) {
            if !options.accepts_name(&name) {
                continue;
            }
            stats.entries_scanned += 1;

            let edit = edit_name(&name, pattern.as_ref(), options, resolver, &mut choices);
            if edit.match_count() > 0 {
                stats.entries_with_matches += 1;
                stats.total_matches += edit.match_count();
            }

            if edit.new_name != name {
                let change = PlannedChange {
                    original_name: name,
                    new_name: edit.new_name,
                    folder: folder.to_path_buf(),
                    kind,
                };
                debug!(
                    from = %change.original_name,
                    to = %change.new_name,
                    "planned rename"
                );
                spans.insert(change.original_path(), edit.spans);
                changes.push(change);
            }
        }
    }

    Ok(PlanOutcome {
        plan: Plan {
            options: options.clone(),
            folders: folders.iter().map(|f| f.as_ref().to_path_buf()).collect(),
            changes,
            spans,
            stats,
        },
        choices,
    })
}

/// Transform one name without prompting. Useful for previews of a single
/// name and for tests; interactive options behave as if every prompt was
/// declined.
pub fn rename_name(name: &str, options: &RenameOptions) -> Result<NameEdit, PatternError> {
    let pattern = if options.pattern_to_remove.is_empty() {
        None
    } else {
        Some(build_pattern(&options.pattern_to_remove, options.use_regex)?)
    };
    let mut choices = RememberedChoices::new();
    Ok(edit_name(
        name,
        pattern.as_ref(),
        options,
        &mut DeclineResolver,
        &mut choices,
    ))
}

fn edit_name<R>(
    name: &str,
    pattern: Option<&MatchPattern>,
    options: &RenameOptions,
    resolver: &mut R,
    choices: &mut RememberedChoices,
) -> NameEdit
where
    R: OccurrenceResolver + ?Sized,
{
    let mut new_name = name.to_string();
    let mut spans = SpanRecord::default();

    if let Some(pattern) = pattern {
        let matches = find_matches(pattern, name);
        spans.matches = matches.iter().map(|m| m.span()).collect();

        if !matches.is_empty() {
            let selected = if options.interactive && matches.len() > 1 {
                let choice = remembered_or_ask(name, matches.len(), resolver, choices);
                OccurrenceSelector::from_choice(choice.as_deref()).resolve(matches.len())
            } else {
                options.occurrence.select(matches.len())
            };

            if !selected.is_empty() {
                let (replaced, replaced_spans) =
                    replace_selected(pattern, name, &selected, &options.replacement);
                new_name = replaced;
                spans.replaced.extend(replaced_spans);
            }
        }
    }

    let add = options.pattern_to_add.as_str();
    if !add.is_empty() {
        match options.add_position {
            AddPosition::Start => {
                new_name.insert_str(0, add);
                spans.added.insert(Span::new(0, add.len()));
            },
            AddPosition::End => {
                let (stem, ext) = split_extension(&new_name);
                let stem_len = stem.len();
                new_name = format!("{}{}{}", stem, add, ext);
                spans.added.insert(Span::new(stem_len, stem_len + add.len()));
            },
        }
    }

    NameEdit { new_name, spans }
}

fn remembered_or_ask<R>(
    name: &str,
    match_count: usize,
    resolver: &mut R,
    choices: &mut RememberedChoices,
) -> Option<String>
where
    R: OccurrenceResolver + ?Sized,
{
    if let Some(choice) = choices.get(name) {
        return choice.clone();
    }

    let answer = resolver
        .resolve_occurrences(name, match_count)
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty());
    choices.remember(name, answer.clone());
    answer
}

/// Direct entries of `folder`, sorted by name. Unreadable entries and names
/// that are not valid UTF-8 are skipped with a warning.
fn list_entries(folder: &Path) -> Vec<(String, EntryKind)> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "failed to read entry");
                continue;
            },
        };

        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };

        let kind = if entry.file_type().is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        entries.push((name.to_string(), kind));
    }

    entries
}
