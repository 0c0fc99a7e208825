use engine::{DocumentStatus, SearchError, SearchIndex};

const EPSILON: f64 = 1e-6;

fn sample_index() -> SearchIndex {
    let mut index = SearchIndex::new("и в на");
    index
        .add_document(0, "белый кот и модный ошейник", DocumentStatus::Active, &[8, -3])
        .unwrap();
    index
        .add_document(1, "пушистый кот пушистый хвост", DocumentStatus::Active, &[7, 2, 7])
        .unwrap();
    index
        .add_document(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9])
        .unwrap();
    index
}

#[test]
fn ranks_by_relevance() {
    let index = sample_index();
    let hits = index.find_top_documents("пушистый ухоженный кот").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, 1);
    assert_eq!(hits[1].id, 0);
    assert!(hits[0].relevance > hits[1].relevance + EPSILON);
    assert_eq!(hits[0].rating, 5);
    assert_eq!(hits[1].rating, 2);
}

#[test]
fn relevance_matches_tf_idf_by_hand() {
    let index = sample_index();
    let hits = index.find_top_documents("пушистый ухоженный кот").unwrap();
    // doc 1: пушистый tf 0.5 * ln(3/1) + кот tf 0.25 * ln(3/2)
    let expected = 0.5 * 3.0_f64.ln() + 0.25 * 1.5_f64.ln();
    assert!((hits[0].relevance - expected).abs() < EPSILON);
}

#[test]
fn status_filter_hides_other_statuses() {
    let index = sample_index();
    assert!(index.find_top_documents("ухоженный скворец").unwrap().is_empty());
    let banned = index
        .find_top_documents_with_status("ухоженный скворец", DocumentStatus::Banned)
        .unwrap();
    assert_eq!(banned.len(), 1);
    assert_eq!(banned[0].id, 3);
}

#[test]
fn minus_terms_disqualify() {
    let index = sample_index();
    let hits = index.find_top_documents("пушистый кот -хвост").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 0);
}

#[test]
fn minus_matching_every_candidate_yields_nothing() {
    let index = sample_index();
    assert!(index.find_top_documents("кот -кот").unwrap().is_empty());
}

#[test]
fn query_without_plus_terms_returns_nothing() {
    let index = sample_index();
    assert!(index.find_top_documents("-ошейник").unwrap().is_empty());
    assert!(index.find_top_documents("и в на").unwrap().is_empty());
    assert!(index.find_top_documents("").unwrap().is_empty());
}

#[test]
fn unknown_terms_contribute_nothing() {
    let index = sample_index();
    let hits = index.find_top_documents("кот жираф").unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn bare_minus_is_rejected() {
    let index = sample_index();
    let err = index.find_top_documents("кот -").unwrap_err();
    assert_eq!(err, SearchError::MalformedQueryTerm);
}

#[test]
fn repeated_queries_are_deterministic() {
    let index = sample_index();
    let first = index.find_top_documents("пушистый ухоженный кот").unwrap();
    let second = index.find_top_documents("пушистый ухоженный кот").unwrap();
    assert_eq!(first, second);
}

#[test]
fn results_truncate_to_configured_k() {
    let mut index = SearchIndex::new("").with_max_results(3);
    for id in 0..10 {
        index
            .add_document(id, "общий терм", DocumentStatus::Active, &[id as i32])
            .unwrap();
    }
    // The term occurs in every document, so idf is zero and ranking
    // falls through to the rating tie-break.
    let hits = index.find_top_documents("общий").unwrap();
    let ids: Vec<u32> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![9, 8, 7]);
    assert!(hits.iter().all(|h| h.relevance.abs() < EPSILON));
}

#[test]
fn full_ties_keep_ascending_id_order() {
    let mut index = SearchIndex::new("");
    index.add_document(5, "кот", DocumentStatus::Active, &[3]).unwrap();
    index.add_document(2, "кот", DocumentStatus::Active, &[3]).unwrap();
    index.add_document(9, "кот", DocumentStatus::Active, &[3]).unwrap();
    let ids: Vec<u32> = index
        .find_top_documents("кот")
        .unwrap()
        .iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(ids, vec![2, 5, 9]);
}

#[test]
fn match_document_lists_sorted_plus_terms() {
    let index = sample_index();
    let matched = index.match_document("кот пушистый жираф", 1).unwrap();
    assert_eq!(matched, vec!["кот".to_string(), "пушистый".to_string()]);
}

#[test]
fn match_document_empties_on_minus_hit() {
    let index = sample_index();
    let matched = index.match_document("пушистый кот -хвост", 1).unwrap();
    assert!(matched.is_empty());
}

#[test]
fn match_document_rejects_unknown_id() {
    let index = sample_index();
    let err = index.match_document("кот", 42).unwrap_err();
    assert_eq!(err, SearchError::DocumentNotFound(42));
}
