//! Mock ML backend.
//!
//! Stands in for a TensorFlow model server that was never deployed. Every
//! operation sleeps for a configurable artificial delay (defaults to ~100ms,
//! mimicking inference latency) and then fabricates a payload whose shape
//! matches what a real backend would return. Numeric analysis is the one
//! exception: its statistics are computed for real from the input data.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::{ToolError, ToolResult};
use crate::math::stats;
use crate::ml::{
    AnalysisKind, Classification, Embedding, MathAnalysis, MlBackend, SequencePrediction,
    SimilarityScore,
};

/// Vector width of the fabricated embeddings.
const EMBEDDING_DIM: usize = 100;

/// Keywords that tip the classifier toward the `mathematics` category.
const MATH_KEYWORDS: [&str; 6] = ["sin", "cos", "sqrt", "integral", "derivative", "equation"];

/// Version string reported in analysis payloads.
const TENSORFLOW_VERSION: &str = "2.20.0";

/// Simulated ML backend with an artificial per-call delay.
#[derive(Debug, Clone)]
pub struct MockMlBackend {
    delay: Duration,
}

impl MockMlBackend {
    /// Create a mock backend that sleeps for `delay` before each response.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Mock inference latency.
    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for MockMlBackend {
    fn default() -> Self {
        // ~100ms, roughly what a warm local model server takes per call
        Self::new(Duration::from_millis(100))
    }
}

#[async_trait]
impl MlBackend for MockMlBackend {
    async fn embed(&self, _text: &str) -> ToolResult<Embedding> {
        self.simulate_latency().await;

        let mut rng = rand::thread_rng();
        let vector: Vec<f64> = (0..EMBEDDING_DIM).map(|_| rng.gen::<f64>()).collect();

        Ok(Embedding {
            vector,
            dimension: EMBEDDING_DIM,
            method: "TF-IDF (Simulated)".to_string(),
        })
    }

    async fn similarity(&self, text1: &str, text2: &str) -> ToolResult<SimilarityScore> {
        self.simulate_latency().await;

        let mut rng = rand::thread_rng();
        Ok(SimilarityScore {
            similarity: rng.gen::<f64>() * 0.5 + 0.3,
            text1_length: text1.chars().count(),
            text2_length: text2.chars().count(),
            method: "TensorFlow + Cosine Similarity".to_string(),
        })
    }

    async fn classify(&self, text: &str) -> ToolResult<Classification> {
        self.simulate_latency().await;

        let lowered = text.to_lowercase();
        let is_math = MATH_KEYWORDS.iter().any(|word| lowered.contains(word));

        let mut rng = rand::thread_rng();
        Ok(Classification {
            category: if is_math { "mathematics" } else { "general" }.to_string(),
            confidence: rng.gen::<f64>() * 0.3 + 0.7,
            text_length: text.chars().count(),
            model: "TensorFlow Sequential".to_string(),
        })
    }

    async fn predict_next(&self, sequence: &[f64]) -> ToolResult<SequencePrediction> {
        self.simulate_latency().await;

        let last = *sequence.last().ok_or(ToolError::EmptyData)?;
        let diff = if sequence.len() > 1 {
            last - sequence[sequence.len() - 2]
        } else {
            1.0
        };

        Ok(SequencePrediction {
            next_value: last + diff,
            pattern_type: "arithmetic_progression".to_string(),
            sequence_length: sequence.len(),
            model: "TensorFlow Regression".to_string(),
        })
    }

    async fn analyze(&self, numbers: &[f64], kind: AnalysisKind) -> ToolResult<MathAnalysis> {
        self.simulate_latency().await;

        if numbers.is_empty() {
            return Err(ToolError::EmptyData);
        }

        match kind {
            AnalysisKind::Statistical => {
                let mean = stats::mean(numbers);
                let variance = stats::population_variance(numbers);
                Ok(MathAnalysis::Statistical {
                    data_size: numbers.len(),
                    tensorflow_version: TENSORFLOW_VERSION.to_string(),
                    mean,
                    std: variance.sqrt(),
                    variance,
                    min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
                    max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                })
            }
            AnalysisKind::Distribution => {
                let (q1, q3) = stats::quartiles(numbers);
                // Skewness is the one figure the simulation does not compute;
                // a real backend would derive it from the data.
                let mut rng = rand::thread_rng();
                Ok(MathAnalysis::Distribution {
                    data_size: numbers.len(),
                    tensorflow_version: TENSORFLOW_VERSION.to_string(),
                    q1,
                    q3,
                    iqr: q3 - q1,
                    skewness: 0.1 + rng.gen::<f64>() * 0.3,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> MockMlBackend {
        MockMlBackend::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_embedding_shape() {
        let embedding = instant().embed("hello world").await.unwrap();
        assert_eq!(embedding.dimension, EMBEDDING_DIM);
        assert_eq!(embedding.vector.len(), EMBEDDING_DIM);
        assert!(embedding.vector.iter().all(|v| (0.0..1.0).contains(v)));
        assert_eq!(embedding.method, "TF-IDF (Simulated)");
    }

    #[tokio::test]
    async fn test_similarity_range_and_lengths() {
        let score = instant().similarity("abc", "defgh").await.unwrap();
        assert!((0.3..0.8).contains(&score.similarity));
        assert_eq!(score.text1_length, 3);
        assert_eq!(score.text2_length, 5);
    }

    #[tokio::test]
    async fn test_classify_math_keywords() {
        let backend = instant();

        let math = backend.classify("what is the integral of x").await.unwrap();
        assert_eq!(math.category, "mathematics");
        assert!((0.7..1.0).contains(&math.confidence));

        let general = backend.classify("hello there").await.unwrap();
        assert_eq!(general.category, "general");
    }

    #[tokio::test]
    async fn test_classify_is_case_insensitive() {
        let result = instant().classify("SQRT of nine").await.unwrap();
        assert_eq!(result.category, "mathematics");
    }

    #[tokio::test]
    async fn test_predict_constant_difference() {
        let prediction = instant().predict_next(&[1.0, 3.0, 5.0]).await.unwrap();
        assert_eq!(prediction.next_value, 7.0);
        assert_eq!(prediction.pattern_type, "arithmetic_progression");
        assert_eq!(prediction.sequence_length, 3);
    }

    #[tokio::test]
    async fn test_predict_single_value_steps_by_one() {
        let prediction = instant().predict_next(&[42.0]).await.unwrap();
        assert_eq!(prediction.next_value, 43.0);
    }

    #[tokio::test]
    async fn test_predict_empty_sequence_fails() {
        let err = instant().predict_next(&[]).await.unwrap_err();
        assert_eq!(err, ToolError::EmptyData);
    }

    #[tokio::test]
    async fn test_analyze_statistical_uses_real_statistics() {
        let analysis = instant()
            .analyze(&[1.0, 2.0, 3.0, 4.0], AnalysisKind::Statistical)
            .await
            .unwrap();

        match analysis {
            MathAnalysis::Statistical {
                data_size,
                mean,
                std,
                variance,
                min,
                max,
                ..
            } => {
                assert_eq!(data_size, 4);
                assert_eq!(mean, 2.5);
                assert_eq!(variance, 1.25);
                assert!((std - 1.25f64.sqrt()).abs() < 1e-12);
                assert_eq!(min, 1.0);
                assert_eq!(max, 4.0);
            }
            other => panic!("expected statistical payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_distribution_quartiles() {
        let data: Vec<f64> = (1..=8).map(f64::from).collect();
        let analysis = instant()
            .analyze(&data, AnalysisKind::Distribution)
            .await
            .unwrap();

        match analysis {
            MathAnalysis::Distribution {
                q1, q3, iqr, skewness, ..
            } => {
                assert_eq!(q1, 3.0);
                assert_eq!(q3, 7.0);
                assert_eq!(iqr, 4.0);
                assert!((0.1..0.4).contains(&skewness));
            }
            other => panic!("expected distribution payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_empty_data_fails() {
        let err = instant()
            .analyze(&[], AnalysisKind::Statistical)
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::EmptyData);
    }

    #[tokio::test]
    async fn test_delay_is_applied() {
        let backend = MockMlBackend::new(Duration::from_millis(20));
        let start = std::time::Instant::now();
        backend.embed("timing").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
