use std::collections::HashMap;

/// Supplies the selector text for a name with more than one match.
///
/// Returning `None` means the question was declined; the name then gets no
/// replacement. The answer is parsed with
/// [`OccurrenceSelector::parse`](crate::selector::OccurrenceSelector::parse).
pub trait OccurrenceResolver {
    fn resolve_occurrences(&mut self, file_name: &str, match_count: usize) -> Option<String>;
}

impl<F> OccurrenceResolver for F
where
    F: FnMut(&str, usize) -> Option<String>,
{
    fn resolve_occurrences(&mut self, file_name: &str, match_count: usize) -> Option<String> {
        self(file_name, match_count)
    }
}

/// Never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineResolver;

impl OccurrenceResolver for DeclineResolver {
    fn resolve_occurrences(&mut self, _file_name: &str, _match_count: usize) -> Option<String> {
        None
    }
}

/// Gives the same answer for every name.
#[derive(Debug, Clone)]
pub struct FixedResolver(pub String);

impl OccurrenceResolver for FixedResolver {
    fn resolve_occurrences(&mut self, _file_name: &str, _match_count: usize) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Answers from a per-name table and records which names were asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    answers: HashMap<String, String>,
    pub asked: Vec<(String, usize)>,
}

impl ScriptedResolver {
    pub fn new<I, K, V>(answers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            asked: Vec::new(),
        }
    }
}

impl OccurrenceResolver for ScriptedResolver {
    fn resolve_occurrences(&mut self, file_name: &str, match_count: usize) -> Option<String> {
        self.asked.push((file_name.to_string(), match_count));
        self.answers.get(file_name).cloned()
    }
}
