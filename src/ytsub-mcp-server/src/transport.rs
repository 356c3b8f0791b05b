//! Newline-delimited JSON-RPC over a byte stream, and its stdio binding.
//!
//! One message per line in each direction. Nothing but responses is ever
//! written to the output stream.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use ytsub_mcp_types::{IncomingMessage, JsonRpcResponse};

use crate::server::{McpServer, ServerState};

impl McpServer {
    /// Serve `reader` until EOF, a read error, or [`McpServer::stop`].
    /// Requests are handled one at a time, in arrival order.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.running.store(true, Ordering::SeqCst);
        let mut buf = String::new();

        while self.is_running() {
            buf.clear();
            match reader.read_line(&mut buf).await {
                Ok(0) => {
                    debug!("Input closed");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Failed to read from transport");
                    break;
                }
            }

            let line = buf.trim();
            if line.is_empty() {
                continue;
            }

            let response = match IncomingMessage::parse(line) {
                Ok(IncomingMessage::Request(request)) => self.handle_request(request).await,
                Ok(IncomingMessage::Notification(notification)) => {
                    self.handle_notification(notification).await;
                    continue;
                }
                Err(invalid) => {
                    warn!(%line, error = %invalid, "Unreadable message");
                    JsonRpcResponse::from(invalid)
                }
            };
            write_line(&mut writer, &response).await?;
        }

        self.set_state(ServerState::Stopped).await;
        self.running.store(false, Ordering::SeqCst);
        info!("MCP server stopped");
        Ok(())
    }

    /// Serve the process's stdin and stdout.
    pub async fn run_stdio(self: Arc<Self>) -> Result<()> {
        info!(server = %self.info.name, version = %self.info.version, "Serving on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Stop reading after the message currently being handled.
    pub async fn stop(&self) {
        info!("Stopping MCP server");
        self.set_state(ServerState::ShuttingDown).await;
        self.running.store(false, Ordering::SeqCst);
    }
}

async fn write_line<W, T>(writer: &mut W, message: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(message).context("Failed to serialize response")?;
    line.push(b'\n');
    writer
        .write_all(&line)
        .await
        .context("Failed to write response")?;
    writer.flush().await.context("Failed to flush response")
}
