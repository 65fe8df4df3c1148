//! Word-overlap similarity for knowledge lookups.
//!
//! Deliberately simple: no stemming, no token sets, just substring overlap
//! between whitespace-separated words. Good enough to route short topic
//! queries onto a four-entry knowledge base.

/// Minimum score for rag_search results
pub const SEARCH_THRESHOLD: f64 = 0.3;

/// Minimum score for ai_chatbot_response topic matching (more permissive,
/// the tutor would rather answer loosely than apologize)
pub const TUTOR_THRESHOLD: f64 = 0.2;

/// Score the overlap between a query and a candidate key.
///
/// Both inputs are expected lowercased. Every (query-word, key-word) pair
/// counts as a match when either word contains the other; the score is the
/// match count divided by the larger word count. Repetitive short words can
/// push the score past 1.0.
pub fn word_overlap(query: &str, key: &str) -> f64 {
    let query_words: Vec<&str> = query.split_whitespace().collect();
    let key_words: Vec<&str> = key.split_whitespace().collect();

    if query_words.is_empty() || key_words.is_empty() {
        return 0.0;
    }

    let mut matches = 0usize;
    for q in &query_words {
        for k in &key_words {
            if k.contains(q) || q.contains(k) {
                matches += 1;
            }
        }
    }

    matches as f64 / query_words.len().max(key_words.len()) as f64
}
