//! Calcore - calculator and RAG tool server for AI assistant integration
//!
//! This crate provides the core functionality of Calcore:
//! - MCP (JSON-RPC 2.0 over stdio) server exposing calculator, knowledge
//!   search and simulated-ML tools
//! - Whitelisted arithmetic expression evaluator and advanced math functions
//! - Descriptive statistics over numeric arrays
//! - In-memory knowledge base with word-overlap similarity search
//! - HTTP API for structured and natural-language arithmetic with a bounded
//!   calculation history
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use calcore::{Config, Core};
//!
//! let config = Config::load_or_default(Config::default_path());
//! let core = Core::new(config);
//! // core.start_api_server().await.unwrap();
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! calcore            # HTTP calculator API
//! calcore --mcp      # MCP tool server on stdio
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod knowledge;
pub mod math;
pub mod mcp;
pub mod ml;
pub mod phrase;

// Re-export main types for convenience
pub use config::Config;
pub use error::{CoreError, Result};
pub use history::HistoryStore;

use knowledge::KnowledgeBase;
use ml::MockMlBackend;
use std::sync::Arc;
use std::time::Duration;

/// Core service that coordinates all Calcore functionality
pub struct Core {
    /// Configuration
    pub config: Config,

    /// Shared calculation history
    pub history: Arc<HistoryStore>,
}

impl Core {
    /// Create a new Core instance with the given configuration
    pub fn new(config: Config) -> Self {
        let history = Arc::new(HistoryStore::new(config.history.capacity));
        Core { config, history }
    }

    /// Start the HTTP API server (blocks until shutdown)
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting API server on {}", addr);
        api::serve(addr, self.history.clone()).await
    }

    /// Run the MCP server over stdio (blocks until the input stream closes)
    pub async fn run_mcp_server(&self) -> Result<()> {
        let ctx = mcp::ToolContext {
            knowledge: KnowledgeBase::new(),
            ml: Arc::new(MockMlBackend::new(Duration::from_millis(
                self.config.ml.delay_ms,
            ))),
        };
        mcp::run_mcp_server(ctx).await
    }
}
