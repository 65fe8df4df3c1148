//! In-memory knowledge base backing rag_search and ai_chatbot_response.
//!
//! A fixed, read-only seed of math/ML topics. Lookup is fuzzy word-overlap
//! similarity over the (lowercase) topic keys, never over the record bodies.

pub mod similarity;

pub use similarity::{SEARCH_THRESHOLD, TUTOR_THRESHOLD};

/// One topic entry: a prose definition plus whichever structured lists the
/// topic carries.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeRecord {
    pub definition: String,
    pub formulas: Option<Vec<String>>,
    pub components: Option<Vec<String>>,
    pub methods: Option<Vec<String>>,
    pub applications: Option<String>,
}

/// A scored lookup hit. Borrows from the store; never persisted.
#[derive(Debug, Clone)]
pub struct ScoredEntry<'a> {
    pub key: &'a str,
    pub record: &'a KnowledgeRecord,
    pub score: f64,
}

/// Read-only topic store, populated once at startup.
pub struct KnowledgeBase {
    /// Keys are lowercase; insertion order is the tie-break order for
    /// equal-scored search hits.
    entries: Vec<(String, KnowledgeRecord)>,
}

impl KnowledgeBase {
    /// Build the seeded knowledge base.
    pub fn new() -> Self {
        let entries = vec![
            (
                "trigonometric functions".to_string(),
                KnowledgeRecord {
                    definition: "Trigonometric functions relate the angles of a right triangle \
                                 to the ratios of its side lengths. The basic functions are \
                                 sin, cos and tan."
                        .to_string(),
                    formulas: Some(vec![
                        "sin²θ + cos²θ = 1".to_string(),
                        "tan θ = sin θ / cos θ".to_string(),
                        "sin(30°) = 1/2, cos(30°) = √3/2".to_string(),
                    ]),
                    components: None,
                    methods: None,
                    applications: Some(
                        "wave analysis, signal processing, architecture and navigation"
                            .to_string(),
                    ),
                },
            ),
            (
                "rag".to_string(),
                KnowledgeRecord {
                    definition: "RAG (Retrieval-Augmented Generation) combines information \
                                 retrieval with text generation: relevant documents are \
                                 retrieved first and the answer is generated from them."
                        .to_string(),
                    formulas: None,
                    components: Some(vec![
                        "Retriever (search engine)".to_string(),
                        "Generator (language model)".to_string(),
                        "Knowledge Base (document store)".to_string(),
                    ]),
                    methods: None,
                    applications: Some(
                        "question answering, chatbots, document summarization".to_string(),
                    ),
                },
            ),
            (
                "vector embedding".to_string(),
                KnowledgeRecord {
                    definition: "A vector embedding maps text to a dense numeric vector so \
                                 that semantically similar texts end up close to each other \
                                 in vector space."
                        .to_string(),
                    formulas: None,
                    components: None,
                    methods: Some(vec![
                        "Word2Vec".to_string(),
                        "GloVe".to_string(),
                        "BERT".to_string(),
                        "Sentence Transformers".to_string(),
                    ]),
                    applications: Some(
                        "semantic search, recommendation systems, text classification"
                            .to_string(),
                    ),
                },
            ),
            (
                "calculus".to_string(),
                KnowledgeRecord {
                    definition: "Calculus studies continuous change through derivatives \
                                 (instantaneous rate of change) and integrals (accumulated \
                                 quantities)."
                        .to_string(),
                    formulas: Some(vec![
                        "d/dx(x²) = 2x".to_string(),
                        "∫x dx = x²/2 + C".to_string(),
                        "lim(h→0) [f(x+h)-f(x)]/h".to_string(),
                    ]),
                    components: None,
                    methods: None,
                    applications: None,
                },
            ),
        ];

        KnowledgeBase { entries }
    }

    /// Number of seeded topics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Score every topic against the query and return the entries scoring
    /// strictly above `threshold`, best first. The query is lowercased here
    /// so callers never have to pre-normalize.
    pub fn search(&self, query: &str, threshold: f64) -> Vec<ScoredEntry<'_>> {
        let query = query.to_lowercase();

        let mut hits: Vec<ScoredEntry<'_>> = self
            .entries
            .iter()
            .map(|(key, record)| ScoredEntry {
                key: key.as_str(),
                record,
                score: similarity::word_overlap(&query, key),
            })
            .filter(|entry| entry.score > threshold)
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }

    /// Best-scoring entry above `threshold`, if any.
    pub fn best_match(&self, query: &str, threshold: f64) -> Option<ScoredEntry<'_>> {
        self.search(query, threshold).into_iter().next()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}
