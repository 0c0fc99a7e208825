use crate::error::SearchError;
use crate::tokenizer::split_words;
use std::collections::HashSet;

/// A parsed query. Plus terms must occur in a document for it to score;
/// a single minus term occurring in a document disqualifies it outright.
#[derive(Debug, Default)]
pub struct Query {
    pub plus: HashSet<String>,
    pub minus: HashSet<String>,
}

impl Query {
    /// Parse a raw query string against a stop-word set.
    ///
    /// A leading '-' marks a minus term; the marker is stripped before
    /// the stop-word check, so "-на" with "на" as a stop word drops the
    /// term entirely. A bare '-' is rejected rather than silently
    /// dropped. An empty plus set is a legal outcome and matches nothing.
    pub fn parse(raw: &str, stop_words: &HashSet<String>) -> Result<Self, SearchError> {
        let mut query = Query::default();
        for word in split_words(raw) {
            if let Some(term) = word.strip_prefix('-') {
                if term.is_empty() {
                    return Err(SearchError::MalformedQueryTerm);
                }
                if !stop_words.contains(term) {
                    query.minus.insert(term.to_string());
                }
            } else if !stop_words.contains(word) {
                query.plus.insert(word.to_string());
            }
        }
        Ok(query)
    }
}
