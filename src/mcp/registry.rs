//! Tool catalog advertised through tools/list.
//!
//! Schemas here are descriptive, for client display and model steering; the
//! executors in `handlers` re-validate everything they rely on.

use serde_json::json;

use super::protocol::ToolDefinition;

/// Tools backed by the simulated ML backend. Calls to these run on their own
/// task so the backend's artificial latency does not hold up the read loop.
pub const ML_TOOLS: [&str; 5] = [
    "tensorflow_embedding",
    "ml_similarity",
    "text_classification",
    "sequence_prediction",
    "tensorflow_analysis",
];

pub fn is_ml_tool(name: &str) -> bool {
    ML_TOOLS.contains(&name)
}

/// Full tool catalog, in the order clients see it.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "calculate".to_string(),
            description: "Evaluates basic math expressions, optionally explaining the steps."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "Math expression to evaluate"
                    },
                    "explain": {
                        "type": "boolean",
                        "description": "Whether to include the evaluation steps",
                        "default": false
                    }
                },
                "required": ["expression"]
            }),
        },
        ToolDefinition {
            name: "advanced_math".to_string(),
            description:
                "Computes advanced math functions (trigonometry, logarithms, calculus and more)."
                    .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "function": {
                        "type": "string",
                        "enum": ["sin", "cos", "tan", "log", "ln", "factorial", "sqrt", "abs", "derivative", "integral"],
                        "description": "Math function to apply"
                    },
                    "value": {
                        "type": "number",
                        "description": "Input value for the function"
                    }
                },
                "required": ["function", "value"]
            }),
        },
        ToolDefinition {
            name: "rag_search".to_string(),
            description: "Searches the math/AI knowledge base through the RAG pipeline."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (e.g. \"trigonometric functions\", \"RAG\", \"calculus\")"
                    },
                    "detailed": {
                        "type": "boolean",
                        "description": "Whether to include detailed information",
                        "default": true
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "data_analysis".to_string(),
            description: "Performs data analysis and statistical calculations.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "data": {
                        "type": "array",
                        "items": { "type": "number" },
                        "description": "Numeric data array to analyze"
                    },
                    "analysis_type": {
                        "type": "string",
                        "enum": ["basic_stats", "correlation", "regression", "distribution"],
                        "description": "Type of analysis to perform",
                        "default": "basic_stats"
                    }
                },
                "required": ["data"]
            }),
        },
        ToolDefinition {
            name: "ai_chatbot_response".to_string(),
            description: "Generates a chatbot-style educational math explanation.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Math topic to explain"
                    },
                    "level": {
                        "type": "string",
                        "enum": ["beginner", "intermediate", "advanced"],
                        "description": "Explanation difficulty",
                        "default": "intermediate"
                    }
                },
                "required": ["topic"]
            }),
        },
        ToolDefinition {
            name: "tensorflow_embedding".to_string(),
            description: "Generates a TensorFlow-based text embedding.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to embed"
                    }
                },
                "required": ["text"]
            }),
        },
        ToolDefinition {
            name: "ml_similarity".to_string(),
            description: "Computes TensorFlow-based similarity between two texts.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text1": {
                        "type": "string",
                        "description": "First text"
                    },
                    "text2": {
                        "type": "string",
                        "description": "Second text"
                    }
                },
                "required": ["text1", "text2"]
            }),
        },
        ToolDefinition {
            name: "text_classification".to_string(),
            description: "Classifies a text with TensorFlow (mathematics/science/general)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to classify"
                    }
                },
                "required": ["text"]
            }),
        },
        ToolDefinition {
            name: "sequence_prediction".to_string(),
            description: "Predicts the next value of a numeric sequence with TensorFlow."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "sequence": {
                        "type": "array",
                        "items": { "type": "number" },
                        "description": "Numeric sequence to extend"
                    }
                },
                "required": ["sequence"]
            }),
        },
        ToolDefinition {
            name: "tensorflow_analysis".to_string(),
            description: "Runs TensorFlow-based mathematical analysis over a data set.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "numbers": {
                        "type": "array",
                        "items": { "type": "number" },
                        "description": "Numbers to analyze"
                    },
                    "analysis_type": {
                        "type": "string",
                        "enum": ["statistical", "distribution"],
                        "description": "Analysis flavor",
                        "default": "statistical"
                    }
                },
                "required": ["numbers"]
            }),
        },
    ]
}
