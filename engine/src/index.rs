use crate::error::SearchError;
use crate::query::Query;
use crate::tokenizer::split_words;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub type DocId = u32;

/// How many results a query returns unless overridden at construction.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Lifecycle tag attached to every document, used as a query-time filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Active,
    Irrelevant,
    Banned,
    Removed,
}

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

#[derive(Debug, Clone, Copy)]
struct DocumentInfo {
    status: DocumentStatus,
    rating: i32,
}

/// In-memory inverted index plus per-document metadata.
///
/// Ingestion takes `&mut self` and queries take `&self`, so the borrow
/// checker enforces the no-interleaving rule; wrap the index in a
/// reader-writer lock to serve it concurrently.
pub struct SearchIndex {
    stop_words: HashSet<String>,
    /// term -> document id -> normalized term frequency
    postings: HashMap<String, BTreeMap<DocId, f64>>,
    documents: BTreeMap<DocId, DocumentInfo>,
    max_results: usize,
}

impl SearchIndex {
    /// Create an empty index. The stop words are taken from the given
    /// space-delimited text and are fixed for the index lifetime.
    pub fn new(stop_words: &str) -> Self {
        Self {
            stop_words: split_words(stop_words).map(str::to_string).collect(),
            postings: HashMap::new(),
            documents: BTreeMap::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Override how many results a query returns.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Index one document. The id must not have been ingested before; a
    /// duplicate is rejected before the index is touched. A document
    /// whose text is all stop words still counts toward the document
    /// total and keeps its metadata, it just has no postings.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocumentId(id));
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in split_words(text).filter(|w| !self.stop_words.contains(*w)) {
            *counts.entry(word).or_insert(0) += 1;
        }
        let total: usize = counts.values().sum();
        for (word, count) in &counts {
            self.postings
                .entry((*word).to_string())
                .or_default()
                .insert(id, *count as f64 / total as f64);
        }

        self.documents.insert(
            id,
            DocumentInfo {
                status,
                rating: average_rating(ratings),
            },
        );
        tracing::debug!(id, terms = counts.len(), "indexed document");
        Ok(())
    }

    /// Top-K search over documents with the default `active` status.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Active)
    }

    /// Top-K search restricted to documents carrying the given status.
    ///
    /// Relevance is the sum over plus terms of
    /// `tf(term, doc) * ln(total_docs / docs_with_term)`; a term present
    /// in every document contributes zero. Documents holding any minus
    /// term are excluded regardless of score. Results are ordered by
    /// relevance descending, then rating descending, then ascending id.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        if query.plus.is_empty() {
            return Ok(Vec::new());
        }

        // BTreeMap keeps candidates in id order so the final stable sort
        // breaks full ties by ascending id.
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        let total_docs = self.documents.len() as f64;
        for term in &query.plus {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            let idf = (total_docs / postings.len() as f64).ln();
            for (&id, &tf) in postings {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
        for term in &query.minus {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            for id in postings.keys() {
                relevance.remove(id);
            }
        }

        let mut hits: Vec<SearchHit> = relevance
            .into_iter()
            .filter_map(|(id, score)| {
                let info = self.documents.get(&id)?;
                (info.status == status).then(|| SearchHit {
                    id,
                    relevance: score,
                    rating: info.rating,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.rating.cmp(&a.rating))
        });
        hits.truncate(self.max_results);
        tracing::debug!(query = raw_query, hits = hits.len(), "query evaluated");
        Ok(hits)
    }

    /// Plus terms of the query that occur in the given document, sorted,
    /// or an empty list when the document holds any minus term.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<Vec<String>, SearchError> {
        if !self.documents.contains_key(&id) {
            return Err(SearchError::DocumentNotFound(id));
        }
        let query = Query::parse(raw_query, &self.stop_words)?;
        let in_document =
            |term: &String| self.postings.get(term).is_some_and(|p| p.contains_key(&id));
        if query.minus.iter().any(in_document) {
            return Ok(Vec::new());
        }
        let mut matched: Vec<String> = query.plus.into_iter().filter(in_document).collect();
        matched.sort_unstable();
        Ok(matched)
    }
}

/// Truncating-toward-zero integer mean; 0 for an empty list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i32 = ratings.iter().sum();
    sum / ratings.len() as i32
}
