//! MCP (Model Context Protocol) server for AI assistant integration
//!
//! This module implements an MCP server that exposes Calcore's calculator,
//! knowledge-search and simulated-ML tools to AI assistants like Claude Code.
//!
//! # Usage
//!
//! Run calcore with the `--mcp` flag to start in MCP server mode:
//! ```text
//! calcore --mcp
//! ```
//!
//! The server communicates over stdio using JSON-RPC 2.0, one message per
//! line. Simulated ML tools run on their own tasks so their model latency
//! never stalls the read loop; their responses may therefore arrive out of
//! request order, paired back up by id.

mod framing;
mod handlers;
mod protocol;
pub(crate) mod registry;
pub(crate) mod types;

pub use handlers::ToolContext;

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::Result;
use framing::LineFramer;
use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Run the MCP server over stdio
pub async fn run_mcp_server(ctx: ToolContext) -> Result<()> {
    tracing::info!("Starting MCP server (stdio mode)");
    serve(ctx, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Main event loop - reads JSON-RPC requests from the input stream, writes
/// responses to the output stream. Generic over the streams so tests can run
/// it against an in-memory duplex pipe.
async fn serve<R, W>(ctx: ToolContext, mut reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let ctx = Arc::new(ctx);
    let writer = Arc::new(Mutex::new(writer));
    let mut framer = LineFramer::new();
    let mut tasks: Vec<JoinHandle<()>> = Vec::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        framer.push(&buf[..n]);
        while let Some(line) = framer.next_line() {
            if line.trim().is_empty() {
                continue;
            }
            handle_line(&line, &ctx, &writer, &mut tasks).await?;
        }
    }

    if framer.pending() > 0 {
        tracing::debug!(
            bytes = framer.pending(),
            "discarding unterminated trailing input"
        );
    }

    // Let in-flight tool calls finish writing before shutting down.
    for task in tasks {
        if let Err(e) = task.await {
            tracing::error!("tool task failed: {}", e);
        }
    }

    tracing::info!("input stream closed, MCP server stopping");
    Ok(())
}

/// Dispatch a single input line.
///
/// A line that is not valid JSON gets a `-32700` response with a null id and
/// the stream keeps going. Notifications produce no response at all.
async fn handle_line<W>(
    line: &str,
    ctx: &Arc<ToolContext>,
    writer: &Arc<Mutex<W>>,
    tasks: &mut Vec<JoinHandle<()>>,
) -> Result<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            let response = JsonRpcResponse::error(
                Value::Null,
                JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
            );
            return write_response(writer, &response).await;
        }
    };

    match request.method.as_str() {
        "initialize" => {
            let response = handlers::handle_initialize(request.id);
            write_response(writer, &response).await
        }
        "tools/list" => {
            let response = handlers::handle_tools_list(request.id);
            write_response(writer, &response).await
        }
        "tools/call" if is_ml_request(&request) => {
            // Simulated model calls sleep before answering; run them off the
            // read loop so later requests are not held up behind the delay.
            let ctx = Arc::clone(ctx);
            let writer = Arc::clone(writer);
            tasks.retain(|task| !task.is_finished());
            tasks.push(tokio::spawn(async move {
                let response =
                    handlers::handle_tools_call(request.id, request.params, &ctx).await;
                if let Err(e) = write_response(&writer, &response).await {
                    tracing::error!("failed to write tool response: {}", e);
                }
            }));
            Ok(())
        }
        "tools/call" => {
            let response = handlers::handle_tools_call(request.id, request.params, ctx).await;
            write_response(writer, &response).await
        }
        "notifications/initialized" => {
            tracing::info!("client initialized");
            Ok(())
        }
        _ => {
            let response = JsonRpcResponse::error(
                request.id,
                JsonRpcError::method_not_found(format!("Method not found: {}", request.method)),
            );
            write_response(writer, &response).await
        }
    }
}

/// Whether a tools/call request targets one of the simulated ML tools.
fn is_ml_request(request: &JsonRpcRequest) -> bool {
    request
        .params
        .as_ref()
        .and_then(|params| params.get("name"))
        .and_then(|name| name.as_str())
        .map(registry::is_ml_tool)
        .unwrap_or(false)
}

/// Serialize a response and write it as one line, holding the writer lock so
/// concurrent tool tasks never interleave bytes.
async fn write_response<W>(writer: &Arc<Mutex<W>>, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;

    let mut writer = writer.lock().await;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    match &response.error {
        Some(error) => {
            tracing::info!(id = %response.id, code = error.code, "error response: {}", error.message)
        }
        None => tracing::debug!(id = %response.id, "response sent"),
    }
    Ok(())
}
