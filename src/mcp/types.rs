//! Request parameter types for the tool executors.
//!
//! Input schemas advertised by tools/list are descriptive only; these structs
//! are what actually gets enforced, with defaults matching the schemas.

use serde::Deserialize;

/// calculate parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateParams {
    pub expression: String,
    #[serde(default)]
    pub explain: bool,
}

/// advanced_math parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AdvancedMathParams {
    pub function: String,
    pub value: f64,
}

/// rag_search parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RagSearchParams {
    pub query: String,
    #[serde(default = "default_detailed")]
    pub detailed: bool,
}

fn default_detailed() -> bool {
    true
}

/// data_analysis parameters
#[derive(Debug, Clone, Deserialize)]
pub struct DataAnalysisParams {
    pub data: Vec<f64>,
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
}

fn default_analysis_type() -> String {
    "basic_stats".to_string()
}

/// ai_chatbot_response parameters
///
/// `level` stays a free string: it is echoed back verbatim, and anything
/// besides "beginner" or "advanced" gets the intermediate treatment.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatbotParams {
    pub topic: String,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "intermediate".to_string()
}

/// tensorflow_embedding parameters
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingParams {
    pub text: String,
}

/// ml_similarity parameters
#[derive(Debug, Clone, Deserialize)]
pub struct MlSimilarityParams {
    pub text1: String,
    pub text2: String,
}

/// text_classification parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationParams {
    pub text: String,
}

/// sequence_prediction parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SequencePredictionParams {
    pub sequence: Vec<f64>,
}

/// tensorflow_analysis parameters
#[derive(Debug, Clone, Deserialize)]
pub struct TensorFlowAnalysisParams {
    pub numbers: Vec<f64>,
    #[serde(default = "default_tf_analysis_type")]
    pub analysis_type: String,
}

fn default_tf_analysis_type() -> String {
    "statistical".to_string()
}
