//! Simulated machine-learning backend.
//!
//! The ML-flavored tools (embedding, similarity, classification, sequence
//! prediction, numeric analysis) never talk to a model server directly.
//! They go through the [`MlBackend`] trait, so a real inference service can
//! replace the bundled simulation without touching the dispatcher. The
//! shipped implementation is [`mock::MockMlBackend`]: fixed-shape, partly
//! randomized payloads after an artificial scheduling delay.

pub mod mock;

// Re-export main types
pub use mock::MockMlBackend;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ToolResult;

/// Analysis flavors understood by [`MlBackend::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Statistical,
    Distribution,
}

impl AnalysisKind {
    /// Parse a kind name (case-insensitive). Returns `None` for anything
    /// outside the supported set.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "statistical" => Some(AnalysisKind::Statistical),
            "distribution" => Some(AnalysisKind::Distribution),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisKind::Statistical => "statistical",
            AnalysisKind::Distribution => "distribution",
        }
    }
}

/// Dense vector representation of a text.
#[derive(Debug, Clone, Serialize)]
pub struct Embedding {
    pub vector: Vec<f64>,
    pub dimension: usize,
    pub method: String,
}

/// Pairwise similarity verdict for two texts.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityScore {
    pub similarity: f64,
    pub text1_length: usize,
    pub text2_length: usize,
    pub method: String,
}

/// Category decision for a single text.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    pub text_length: usize,
    pub model: String,
}

/// Extrapolated continuation of a numeric sequence.
#[derive(Debug, Clone, Serialize)]
pub struct SequencePrediction {
    pub next_value: f64,
    pub pattern_type: String,
    pub sequence_length: usize,
    pub model: String,
}

/// Numeric analysis summary. The payload shape depends on the requested
/// [`AnalysisKind`], so the two flavors are separate variants.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub enum MathAnalysis {
    Statistical {
        data_size: usize,
        tensorflow_version: String,
        mean: f64,
        std: f64,
        variance: f64,
        min: f64,
        max: f64,
    },
    Distribution {
        data_size: usize,
        tensorflow_version: String,
        q1: f64,
        q3: f64,
        iqr: f64,
        skewness: f64,
    },
}

/// Capability interface for the ML-flavored tools.
///
/// Implementations must be shareable across concurrently running tool calls,
/// hence the `Send + Sync` bound.
#[async_trait]
pub trait MlBackend: Send + Sync {
    /// Produce a dense vector embedding for `text`.
    async fn embed(&self, text: &str) -> ToolResult<Embedding>;

    /// Score how similar two texts are, in `[0.0, 1.0]`.
    async fn similarity(&self, text1: &str, text2: &str) -> ToolResult<SimilarityScore>;

    /// Assign a category to `text`.
    async fn classify(&self, text: &str) -> ToolResult<Classification>;

    /// Predict the next value of a numeric sequence.
    async fn predict_next(&self, sequence: &[f64]) -> ToolResult<SequencePrediction>;

    /// Run a numeric analysis over `numbers`.
    async fn analyze(&self, numbers: &[f64], kind: AnalysisKind) -> ToolResult<MathAnalysis>;
}
