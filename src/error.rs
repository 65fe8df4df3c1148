//! Error types for Calcore

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure raised by a tool executor.
///
/// These never leave the dispatcher as panics: the router catches them and
/// reports the `Display` text inside a `-32603` JSON-RPC error envelope, so
/// the message strings here are part of the wire contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// Expression rejected by the whitelist or the evaluator
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// Function name outside the advanced_math dispatch table
    #[error("unsupported function: {0}")]
    UnsupportedFunction(String),

    /// Factorial of a negative or non-integer value
    #[error("factorial is only defined for non-negative integers")]
    FactorialDomain,

    /// Statistics requested over an empty data array
    #[error("a non-empty numeric data array is required")]
    EmptyData,

    /// Analysis sub-type outside the implemented set
    #[error("unsupported analysis type: {0}")]
    UnsupportedAnalysis(String),

    /// Arguments object failed typed decoding
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Division by zero in a binary arithmetic operation
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type alias for tool executor operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;
