//! MCP tool handlers
//! Implements the initialize, tools/list and tools/call methods

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{ToolError, ToolResult};
use crate::knowledge::{KnowledgeBase, SEARCH_THRESHOLD, TUTOR_THRESHOLD};
use crate::math::{eval, functions::MathFunction, stats};
use crate::ml::{AnalysisKind, MathAnalysis, MlBackend};

use super::protocol::{
    InitializeResult, JsonRpcError, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolCallResult, ToolsCapability,
};
use super::registry;
use super::types::{
    AdvancedMathParams, CalculateParams, ChatbotParams, ClassificationParams, DataAnalysisParams,
    EmbeddingParams, MlSimilarityParams, RagSearchParams, SequencePredictionParams,
    TensorFlowAnalysisParams,
};

/// MCP protocol revision this server speaks.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name advertised to clients during initialize.
const SERVER_NAME: &str = "advanced-calculator-rag-server";

/// Read-only state shared by every tool call.
pub struct ToolContext {
    pub knowledge: KnowledgeBase,
    pub ml: Arc<dyn MlBackend>,
}

/// Handle the initialize method
pub fn handle_initialize(id: Value) -> JsonRpcResponse {
    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability { list_changed: None },
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

/// Handle the tools/list method
pub fn handle_tools_list(id: Value) -> JsonRpcResponse {
    let tools = registry::tool_definitions();
    tracing::debug!(count = tools.len(), "sending tool catalog");
    JsonRpcResponse::success(id, json!({ "tools": tools }))
}

/// Handle the tools/call method
///
/// Transport-level problems (missing params, missing or unknown tool name)
/// become -32602; anything a tool itself rejects becomes -32603 with the
/// tool's message embedded.
pub async fn handle_tools_call(
    id: Value,
    params: Option<Value>,
    ctx: &ToolContext,
) -> JsonRpcResponse {
    let params = match params {
        Some(p) => p,
        None => {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params("Missing params".to_string()),
            );
        }
    };

    let tool_name = match params.get("name").and_then(|v| v.as_str()) {
        Some(name) => name.to_string(),
        None => {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params("Missing tool name".to_string()),
            );
        }
    };

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
    tracing::debug!(tool = %tool_name, "tool call");

    let result = match tool_name.as_str() {
        "calculate" => run_calculate(arguments),
        "advanced_math" => run_advanced_math(arguments),
        "rag_search" => run_rag_search(arguments, &ctx.knowledge),
        "data_analysis" => run_data_analysis(arguments),
        "ai_chatbot_response" => run_chatbot_response(arguments, &ctx.knowledge),
        "tensorflow_embedding" => run_embedding(arguments, ctx.ml.as_ref()).await,
        "ml_similarity" => run_ml_similarity(arguments, ctx.ml.as_ref()).await,
        "text_classification" => run_classification(arguments, ctx.ml.as_ref()).await,
        "sequence_prediction" => run_sequence_prediction(arguments, ctx.ml.as_ref()).await,
        "tensorflow_analysis" => run_tensorflow_analysis(arguments, ctx.ml.as_ref()).await,
        _ => {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", tool_name)),
            );
        }
    };

    match result {
        Ok(text) => match serde_json::to_value(ToolCallResult::text(text)) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        },
        Err(e) => {
            tracing::warn!(tool = %tool_name, "tool call failed: {}", e);
            JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
        }
    }
}

/// Decode tool arguments, mapping serde failures into the domain error space.
fn decode_args<T: DeserializeOwned>(arguments: Value) -> ToolResult<T> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_numbers<'a>(values: impl Iterator<Item = &'a f64>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ─── Math tools ──────────────────────────────────────────────────────────────

fn run_calculate(arguments: Value) -> ToolResult<String> {
    let params: CalculateParams = decode_args(arguments)?;
    let evaluation = eval::evaluate(&params.expression)?;

    let mut text = format!(
        "Calculation result: {} = {}",
        params.expression, evaluation.value
    );

    if params.explain {
        text.push_str("\n\nCalculation steps:\n");
        text.push_str(&format!("1. Input expression: {}\n", params.expression));
        text.push_str(&format!(
            "2. Processed expression: {}\n",
            evaluation.normalized
        ));
        text.push_str(&format!("3. Final result: {}\n", evaluation.value));

        if let Some(radicand) = eval::sqrt_radicand(&params.expression) {
            text.push_str(&format!(
                "4. Square root: √{} = {}",
                radicand, evaluation.value
            ));
        }
    }

    Ok(text)
}

fn run_advanced_math(arguments: Value) -> ToolResult<String> {
    let params: AdvancedMathParams = decode_args(arguments)?;
    let function = MathFunction::from_str(&params.function)
        .ok_or_else(|| ToolError::UnsupportedFunction(params.function.clone()))?;
    let result = function.apply(params.value)?;

    let mut text = format!(
        "Advanced math: {}({}) = {}",
        function.name(),
        params.value,
        result
    );
    if let Some(explanation) = function.explanation() {
        text.push_str(&format!("\n\nExplanation: {}", explanation));
    }
    Ok(text)
}

fn run_data_analysis(arguments: Value) -> ToolResult<String> {
    let params: DataAnalysisParams = decode_args(arguments)?;
    if params.data.is_empty() {
        return Err(ToolError::EmptyData);
    }

    let analysis = stats::AnalysisType::from_str(&params.analysis_type)
        .ok_or_else(|| ToolError::UnsupportedAnalysis(params.analysis_type.clone()))?;

    let mut text = format!("Data analysis result ({})\n\n", params.analysis_type);
    text.push_str(&format!("Data size: {} values\n", params.data.len()));

    match analysis {
        stats::AnalysisType::BasicStats => {
            let summary = stats::basic_stats(&params.data)?;
            text.push_str("Basic statistics:\n");
            text.push_str(&format!("• Mean: {:.4}\n", summary.mean));
            text.push_str(&format!("• Median: {:.4}\n", summary.median));
            text.push_str(&format!("• Standard deviation: {:.4}\n", summary.std_dev));
            text.push_str(&format!("• Min: {}\n", summary.min));
            text.push_str(&format!("• Max: {}\n", summary.max));
            text.push_str(&format!("• Sum: {}\n", summary.sum));
        }
        stats::AnalysisType::Distribution => {
            let shape = stats::distribution(&params.data)?;
            text.push_str("Distribution analysis:\n");
            text.push_str(&format!("• Skewness: {:.4}\n", shape.skewness));
            text.push_str(&format!("• Kurtosis: {:.4}\n", shape.kurtosis));
            text.push_str(&format!("• Q1 (25%): {:.4}\n", shape.q1));
            text.push_str(&format!("• Q3 (75%): {:.4}\n", shape.q3));
        }
    }

    Ok(text)
}

// ─── Knowledge tools ─────────────────────────────────────────────────────────

fn run_rag_search(arguments: Value, knowledge: &KnowledgeBase) -> ToolResult<String> {
    let params: RagSearchParams = decode_args(arguments)?;
    let results = knowledge.search(&params.query, SEARCH_THRESHOLD);

    let top = match results.first() {
        Some(entry) => entry,
        None => {
            return Ok(format!(
                "RAG search result: no information found for \"{}\".",
                params.query
            ));
        }
    };

    let mut text = format!(
        "RAG search result (similarity: {:.1}%)\n\n",
        top.score * 100.0
    );
    text.push_str(&format!("Topic: {}\n", top.key));
    text.push_str(&format!("Definition: {}\n", top.record.definition));

    if params.detailed {
        if let Some(formulas) = &top.record.formulas {
            text.push_str(&format!("\nFormulas/concepts:\n{}\n", bullet_list(formulas)));
        }
        if let Some(components) = &top.record.components {
            text.push_str(&format!("\nComponents:\n{}\n", bullet_list(components)));
        }
        if let Some(methods) = &top.record.methods {
            text.push_str(&format!("\nKey methods:\n{}\n", bullet_list(methods)));
        }
        if let Some(applications) = &top.record.applications {
            text.push_str(&format!("\nApplications: {}", applications));
        }
    }

    Ok(text)
}

fn run_chatbot_response(arguments: Value, knowledge: &KnowledgeBase) -> ToolResult<String> {
    let params: ChatbotParams = decode_args(arguments)?;
    let results = knowledge.search(&params.topic, TUTOR_THRESHOLD);

    let mut text = String::from("AI math tutor's explanation\n\n");
    text.push_str(&format!("Topic: {}\n", params.topic));
    text.push_str(&format!("Level: {}\n\n", params.level));

    let best = match results.first() {
        Some(entry) => entry,
        None => {
            text.push_str(&format!(
                "Sorry, I could not find any information about \"{}\". ",
                params.topic
            ));
            text.push_str(
                "Please ask about another math topic, or request a specific calculation!",
            );
            return Ok(text);
        }
    };

    text.push_str(&format!("Let me explain {}!\n\n", best.key));
    text.push_str(&format!("{}\n\n", best.record.definition));

    match params.level.as_str() {
        "beginner" => {
            text.push_str("A simple explanation for beginners:\n");
            text.push_str(
                "This is an important concept that comes up often in everyday life. ",
            );
            text.push_str("Learn it step by step and it is not difficult!\n\n");
        }
        "advanced" => {
            text.push_str("Advanced explanation:\n");
            if let Some(formulas) = &best.record.formulas {
                text.push_str(&format!("Key formulas:\n{}\n\n", bullet_list(formulas)));
            }
        }
        _ => {}
    }

    if let Some(applications) = &best.record.applications {
        text.push_str(&format!("Real-world uses: {}\n\n", applications));
    }
    text.push_str("If you have any more questions, feel free to ask anytime!");

    Ok(text)
}

// ─── Simulated ML tools ──────────────────────────────────────────────────────

async fn run_embedding(arguments: Value, ml: &dyn MlBackend) -> ToolResult<String> {
    let params: EmbeddingParams = decode_args(arguments)?;
    let embedding = ml.embed(&params.text).await?;

    let preview = embedding
        .vector
        .iter()
        .take(5)
        .map(|v| format!("{:.4}", v))
        .collect::<Vec<_>>()
        .join(", ");

    let mut text = String::from("TensorFlow embedding generated\n\n");
    text.push_str(&format!("Text: \"{}\"\n", params.text));
    text.push_str(&format!("Embedding dimension: {}\n", embedding.dimension));
    text.push_str(&format!("Method: {}\n", embedding.method));
    text.push_str(&format!("First 5 values: [{}...]\n", preview));
    Ok(text)
}

async fn run_ml_similarity(arguments: Value, ml: &dyn MlBackend) -> ToolResult<String> {
    let params: MlSimilarityParams = decode_args(arguments)?;
    let score = ml.similarity(&params.text1, &params.text2).await?;

    let verdict = if score.similarity > 0.7 {
        "very similar"
    } else if score.similarity > 0.4 {
        "moderately similar"
    } else {
        "low similarity"
    };

    let mut text = String::from("TensorFlow-based text similarity analysis\n\n");
    text.push_str(&format!("Text 1: \"{}\"\n", params.text1));
    text.push_str(&format!("Text 2: \"{}\"\n", params.text2));
    text.push_str(&format!("Similarity: {:.2}%\n", score.similarity * 100.0));
    text.push_str(&format!("Method: {}\n", score.method));
    text.push_str(&format!("Interpretation: {}\n", verdict));
    Ok(text)
}

async fn run_classification(arguments: Value, ml: &dyn MlBackend) -> ToolResult<String> {
    let params: ClassificationParams = decode_args(arguments)?;
    let classification = ml.classify(&params.text).await?;

    let description = match classification.category.as_str() {
        "mathematics" => "mathematics-related text",
        "science" => "science-related text",
        "general" => "general text",
        other => other,
    };

    let mut text = String::from("TensorFlow-based text classification result\n\n");
    text.push_str(&format!("Input text: \"{}\"\n", params.text));
    text.push_str(&format!("Category: {}\n", classification.category));
    text.push_str(&format!(
        "Confidence: {:.1}%\n",
        classification.confidence * 100.0
    ));
    text.push_str(&format!("Model: {}\n", classification.model));
    text.push_str(&format!("Description: {}\n", description));
    Ok(text)
}

async fn run_sequence_prediction(arguments: Value, ml: &dyn MlBackend) -> ToolResult<String> {
    let params: SequencePredictionParams = decode_args(arguments)?;
    let prediction = ml.predict_next(&params.sequence).await?;

    let description = match prediction.pattern_type.as_str() {
        "arithmetic_progression" => "arithmetic progression, constant difference between terms",
        "geometric_progression" => "geometric progression, constant ratio between terms",
        "complex_pattern" => "complex pattern, several factors in play",
        "insufficient_data" => "insufficient data, more values are needed",
        other => other,
    };

    let mut text = String::from("TensorFlow-based numeric sequence prediction\n\n");
    text.push_str(&format!(
        "Input sequence: [{}]\n",
        join_numbers(params.sequence.iter())
    ));
    text.push_str(&format!("Predicted value: {:.4}\n", prediction.next_value));
    text.push_str(&format!("Pattern type: {}\n", prediction.pattern_type));
    text.push_str(&format!("Model: {}\n", prediction.model));
    text.push_str(&format!("Pattern description: {}\n", description));
    Ok(text)
}

async fn run_tensorflow_analysis(arguments: Value, ml: &dyn MlBackend) -> ToolResult<String> {
    let params: TensorFlowAnalysisParams = decode_args(arguments)?;
    let kind = AnalysisKind::from_str(&params.analysis_type)
        .ok_or_else(|| ToolError::UnsupportedAnalysis(params.analysis_type.clone()))?;
    let analysis = ml.analyze(&params.numbers, kind).await?;

    let mut preview = join_numbers(params.numbers.iter().take(10));
    if params.numbers.len() > 10 {
        preview.push_str("...");
    }

    let mut text = String::from("TensorFlow-based mathematical analysis result\n\n");
    text.push_str(&format!("Data: [{}]\n", preview));

    match analysis {
        MathAnalysis::Statistical {
            data_size,
            tensorflow_version,
            mean,
            std,
            variance,
            min,
            max,
        } => {
            text.push_str(&format!("Data size: {} values\n", data_size));
            text.push_str(&format!("TensorFlow version: {}\n", tensorflow_version));
            text.push_str(&format!("Analysis type: {}\n\n", kind.name()));
            text.push_str("Statistical results:\n");
            text.push_str(&format!("• Mean: {:.4}\n", mean));
            text.push_str(&format!("• Standard deviation: {:.4}\n", std));
            text.push_str(&format!("• Variance: {:.4}\n", variance));
            text.push_str(&format!("• Min: {:.4}\n", min));
            text.push_str(&format!("• Max: {:.4}\n", max));
        }
        MathAnalysis::Distribution {
            data_size,
            tensorflow_version,
            q1,
            q3,
            iqr,
            skewness,
        } => {
            text.push_str(&format!("Data size: {} values\n", data_size));
            text.push_str(&format!("TensorFlow version: {}\n", tensorflow_version));
            text.push_str(&format!("Analysis type: {}\n\n", kind.name()));
            text.push_str("Distribution analysis:\n");
            text.push_str(&format!("• Q1 (25%): {:.4}\n", q1));
            text.push_str(&format!("• Q3 (75%): {:.4}\n", q3));
            text.push_str(&format!("• IQR: {:.4}\n", iqr));
            text.push_str(&format!("• Skewness: {:.4}\n", skewness));
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::MockMlBackend;
    use std::time::Duration;

    fn test_context() -> ToolContext {
        ToolContext {
            knowledge: KnowledgeBase::new(),
            ml: Arc::new(MockMlBackend::new(Duration::ZERO)),
        }
    }

    async fn call(ctx: &ToolContext, name: &str, arguments: Value) -> JsonRpcResponse {
        handle_tools_call(
            json!(1),
            Some(json!({ "name": name, "arguments": arguments })),
            ctx,
        )
        .await
    }

    fn response_text(response: &JsonRpcResponse) -> String {
        let result = response.result.as_ref().expect("expected success");
        result["content"][0]["text"].as_str().unwrap().to_string()
    }

    fn error_message(response: &JsonRpcResponse) -> (i32, String) {
        let error = response.error.as_ref().expect("expected error");
        (error.code, error.message.clone())
    }

    #[test]
    fn test_initialize_advertises_identity_and_tools() {
        let response = handle_initialize(json!(0));
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "advanced-calculator-rag-server");
        assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(result["capabilities"], json!({ "tools": {} }));
    }

    #[test]
    fn test_tools_list_returns_catalog() {
        let response = handle_tools_list(json!(2));
        let result = response.result.unwrap();
        assert_eq!(result["tools"].as_array().unwrap().len(), 10);
        assert_eq!(result["tools"][0]["name"], "calculate");
    }

    #[tokio::test]
    async fn test_missing_params_is_invalid_params() {
        let ctx = test_context();
        let response = handle_tools_call(json!(1), None, &ctx).await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32602);
        assert_eq!(message, "Missing params");
    }

    #[tokio::test]
    async fn test_missing_tool_name_is_invalid_params() {
        let ctx = test_context();
        let response =
            handle_tools_call(json!(1), Some(json!({ "arguments": {} })), &ctx).await;
        let (code, _) = error_message(&response);
        assert_eq!(code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let ctx = test_context();
        let response = call(&ctx, "quantum_solver", json!({})).await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32602);
        assert_eq!(message, "Unknown tool: quantum_solver");
    }

    #[tokio::test]
    async fn test_calculate_basic_expressions() {
        let ctx = test_context();

        let response = call(&ctx, "calculate", json!({ "expression": "2+2" })).await;
        assert_eq!(
            response_text(&response),
            "Calculation result: 2+2 = 4"
        );

        let response = call(&ctx, "calculate", json!({ "expression": "sqrt(9)" })).await;
        assert_eq!(response_text(&response), "Calculation result: sqrt(9) = 3");

        let response = call(&ctx, "calculate", json!({ "expression": "2^3" })).await;
        assert_eq!(response_text(&response), "Calculation result: 2^3 = 8");
    }

    #[tokio::test]
    async fn test_calculate_explain_trace() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "calculate",
            json!({ "expression": "2+3*4", "explain": true }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.starts_with("Calculation result: 2+3*4 = 14"));
        assert!(text.contains("Calculation steps:"));
        assert!(text.contains("1. Input expression: 2+3*4"));
        assert!(text.contains("2. Processed expression: (2 + (3 * 4))"));
        assert!(text.contains("3. Final result: 14"));
        assert!(!text.contains("4. Square root"));
    }

    #[tokio::test]
    async fn test_calculate_explain_adds_sqrt_line() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "calculate",
            json!({ "expression": "sqrt(16)", "explain": true }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("4. Square root: √16 = 4"));
    }

    #[tokio::test]
    async fn test_calculate_rejects_bad_expressions_with_internal_error() {
        let ctx = test_context();

        let response = call(&ctx, "calculate", json!({ "expression": "2+*3" })).await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert!(message.contains("2+*3"));

        let response = call(&ctx, "calculate", json!({ "expression": "let x = 1" })).await;
        let (code, _) = error_message(&response);
        assert_eq!(code, -32603);
    }

    #[tokio::test]
    async fn test_advanced_math_factorial() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "advanced_math",
            json!({ "function": "factorial", "value": 5 }),
        )
        .await;
        assert_eq!(
            response_text(&response),
            "Advanced math: factorial(5) = 120"
        );
    }

    #[tokio::test]
    async fn test_advanced_math_explanations() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "advanced_math",
            json!({ "function": "derivative", "value": 5 }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.starts_with("Advanced math: derivative(5) = 10"));
        assert!(text.contains("Explanation:"));
    }

    #[tokio::test]
    async fn test_advanced_math_domain_errors() {
        let ctx = test_context();

        let response = call(
            &ctx,
            "advanced_math",
            json!({ "function": "factorial", "value": -3 }),
        )
        .await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert!(message.contains("factorial"));

        let response = call(
            &ctx,
            "advanced_math",
            json!({ "function": "cot", "value": 1 }),
        )
        .await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert_eq!(message, "unsupported function: cot");
    }

    #[tokio::test]
    async fn test_rag_search_exact_topic() {
        let ctx = test_context();
        let response = call(&ctx, "rag_search", json!({ "query": "rag" })).await;
        let text = response_text(&response);
        assert!(text.starts_with("RAG search result (similarity: 100.0%)"));
        assert!(text.contains("Topic: rag"));
        assert!(text.contains("Components:"));
        assert!(text.contains("• Retriever (search engine)"));
        assert!(text.contains("Applications:"));
    }

    #[tokio::test]
    async fn test_rag_search_is_case_insensitive() {
        let ctx = test_context();
        let upper = call(&ctx, "rag_search", json!({ "query": "RAG" })).await;
        let lower = call(&ctx, "rag_search", json!({ "query": "rag" })).await;
        assert_eq!(response_text(&upper), response_text(&lower));
    }

    #[tokio::test]
    async fn test_rag_search_compact_mode_skips_details() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "rag_search",
            json!({ "query": "rag", "detailed": false }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Definition:"));
        assert!(!text.contains("Components:"));
        assert!(!text.contains("Applications:"));
    }

    #[tokio::test]
    async fn test_rag_search_no_match_is_not_an_error() {
        let ctx = test_context();
        let response = call(&ctx, "rag_search", json!({ "query": "linear algebra" })).await;
        assert_eq!(
            response_text(&response),
            "RAG search result: no information found for \"linear algebra\"."
        );
    }

    #[tokio::test]
    async fn test_data_analysis_basic_stats_reference_values() {
        let ctx = test_context();
        let response = call(&ctx, "data_analysis", json!({ "data": [1, 2, 3, 4] })).await;
        let text = response_text(&response);
        assert!(text.starts_with("Data analysis result (basic_stats)"));
        assert!(text.contains("Data size: 4 values"));
        assert!(text.contains("• Mean: 2.5000"));
        assert!(text.contains("• Median: 2.5000"));
        assert!(text.contains("• Min: 1"));
        assert!(text.contains("• Max: 4"));
        assert!(text.contains("• Sum: 10"));
    }

    #[tokio::test]
    async fn test_data_analysis_distribution() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "data_analysis",
            json!({ "data": [1, 2, 3, 4, 5, 6, 7, 8], "analysis_type": "distribution" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Distribution analysis:"));
        assert!(text.contains("• Skewness: "));
        assert!(text.contains("• Kurtosis: "));
        assert!(text.contains("• Q1 (25%): 3.0000"));
        assert!(text.contains("• Q3 (75%): 7.0000"));
    }

    #[tokio::test]
    async fn test_data_analysis_rejects_advertised_but_unimplemented_types() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "data_analysis",
            json!({ "data": [1, 2], "analysis_type": "correlation" }),
        )
        .await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert_eq!(message, "unsupported analysis type: correlation");
    }

    #[tokio::test]
    async fn test_data_analysis_rejects_empty_data() {
        let ctx = test_context();
        let response = call(&ctx, "data_analysis", json!({ "data": [] })).await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert!(message.contains("non-empty"));
    }

    #[tokio::test]
    async fn test_chatbot_beginner_adds_encouragement() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "ai_chatbot_response",
            json!({ "topic": "calculus", "level": "beginner" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.starts_with("AI math tutor's explanation"));
        assert!(text.contains("Topic: calculus"));
        assert!(text.contains("Level: beginner"));
        assert!(text.contains("A simple explanation for beginners:"));
        assert!(text.contains("feel free to ask anytime!"));
    }

    #[tokio::test]
    async fn test_chatbot_advanced_lists_formulas() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "ai_chatbot_response",
            json!({ "topic": "trigonometric functions", "level": "advanced" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Advanced explanation:"));
        assert!(text.contains("Key formulas:"));
        assert!(text.contains("• sin²θ + cos²θ = 1"));
    }

    #[tokio::test]
    async fn test_chatbot_matches_below_search_threshold() {
        // Scores in (0.2, 0.3] are misses for rag_search but hits here.
        let ctx = test_context();

        let search = call(&ctx, "rag_search", json!({ "query": "what is rag exactly" })).await;
        assert!(response_text(&search).contains("no information found"));

        let tutor = call(
            &ctx,
            "ai_chatbot_response",
            json!({ "topic": "what is rag exactly" }),
        )
        .await;
        assert!(response_text(&tutor).contains("Let me explain rag!"));
    }

    #[tokio::test]
    async fn test_chatbot_unknown_topic_apologizes() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "ai_chatbot_response",
            json!({ "topic": "number theory", "level": "expert" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Level: expert"));
        assert!(text.contains("Sorry, I could not find any information about \"number theory\"."));
    }

    #[tokio::test]
    async fn test_embedding_tool_reports_shape() {
        let ctx = test_context();
        let response = call(&ctx, "tensorflow_embedding", json!({ "text": "hello" })).await;
        let text = response_text(&response);
        assert!(text.starts_with("TensorFlow embedding generated"));
        assert!(text.contains("Text: \"hello\""));
        assert!(text.contains("Embedding dimension: 100"));
        assert!(text.contains("Method: TF-IDF (Simulated)"));
        assert!(text.contains("First 5 values: ["));
    }

    #[tokio::test]
    async fn test_ml_similarity_tool_reports_interpretation() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "ml_similarity",
            json!({ "text1": "abc", "text2": "abd" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Similarity: "));
        assert!(text.contains("Method: TensorFlow + Cosine Similarity"));
        assert!(text.contains("Interpretation: "));
    }

    #[tokio::test]
    async fn test_classification_tool_describes_category() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "text_classification",
            json!({ "text": "solve the equation" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Category: mathematics"));
        assert!(text.contains("Description: mathematics-related text"));
    }

    #[tokio::test]
    async fn test_sequence_prediction_tool() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "sequence_prediction",
            json!({ "sequence": [1, 3, 5] }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Input sequence: [1, 3, 5]"));
        assert!(text.contains("Predicted value: 7.0000"));
        assert!(text.contains("Pattern type: arithmetic_progression"));
        assert!(text.contains("arithmetic progression, constant difference"));
    }

    #[tokio::test]
    async fn test_sequence_prediction_empty_input_fails() {
        let ctx = test_context();
        let response = call(&ctx, "sequence_prediction", json!({ "sequence": [] })).await;
        let (code, _) = error_message(&response);
        assert_eq!(code, -32603);
    }

    #[tokio::test]
    async fn test_tensorflow_analysis_statistical() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "tensorflow_analysis",
            json!({ "numbers": [1, 2, 3, 4] }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Data: [1, 2, 3, 4]"));
        assert!(text.contains("TensorFlow version: 2.20.0"));
        assert!(text.contains("Analysis type: statistical"));
        assert!(text.contains("• Mean: 2.5000"));
        assert!(text.contains("• Variance: 1.2500"));
    }

    #[tokio::test]
    async fn test_tensorflow_analysis_truncates_long_data_preview() {
        let ctx = test_context();
        let numbers: Vec<f64> = (1..=12).map(f64::from).collect();
        let response = call(
            &ctx,
            "tensorflow_analysis",
            json!({ "numbers": numbers, "analysis_type": "distribution" }),
        )
        .await;
        let text = response_text(&response);
        assert!(text.contains("Data: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10...]"));
        assert!(text.contains("Distribution analysis:"));
        assert!(text.contains("• IQR: "));
    }

    #[tokio::test]
    async fn test_tensorflow_analysis_rejects_unknown_kind() {
        let ctx = test_context();
        let response = call(
            &ctx,
            "tensorflow_analysis",
            json!({ "numbers": [1, 2], "analysis_type": "fourier" }),
        )
        .await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert_eq!(message, "unsupported analysis type: fourier");
    }

    #[tokio::test]
    async fn test_malformed_arguments_surface_as_internal_error() {
        let ctx = test_context();
        let response = call(&ctx, "calculate", json!({ "expression": 42 })).await;
        let (code, message) = error_message(&response);
        assert_eq!(code, -32603);
        assert!(message.contains("invalid arguments"));
    }

    #[tokio::test]
    async fn test_response_id_matches_request_id() {
        let ctx = test_context();
        let response = handle_tools_call(
            json!("req-9"),
            Some(json!({ "name": "calculate", "arguments": { "expression": "1+1" } })),
            &ctx,
        )
        .await;
        assert_eq!(response.id, json!("req-9"));
    }
}
