//! Stdio server loop
//!
//! Reads one line at a time, hands each parsed envelope to the handler,
//! and writes back at most one compact JSON line per request. The loop
//! is strictly sequential: a line is processed to completion before the
//! next read.

use std::io::{BufRead, BufReader, Write};

use serde_json::Value;

use crate::error::Result;
use crate::mcp::protocol::{McpRequest, McpResponse};

/// Trait for handling MCP requests. `None` means the request was a
/// notification or otherwise not answerable; nothing is written.
pub trait McpHandler: Send + Sync {
    fn handle_request(&self, request: McpRequest) -> Option<McpResponse>;
}

/// MCP server pumping lines between a reader and a writer
pub struct McpServer<H>
where
    H: McpHandler,
{
    handler: H,
}

impl<H: McpHandler> McpServer<H> {
    /// Create a new MCP server
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Run the server over stdin/stdout until end of input.
    pub fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(BufReader::new(stdin.lock()), stdout.lock())
    }

    /// Pump the protocol over arbitrary streams.
    ///
    /// A line that is not valid JSON is dropped with a diagnostic only:
    /// no id can be recovered from it, so there is nothing to address an
    /// error response to. Each emitted response is flushed immediately.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let value: Value = match serde_json::from_str(trimmed) {
                        Ok(value) => value,
                        Err(e) => {
                            tracing::warn!("dropping unparsable input line: {}", e);
                            continue;
                        }
                    };

                    let request = McpRequest::from_value(value);
                    if let Some(response) = self.handler.handle_request(request) {
                        let payload = serde_json::to_string(&response)?;
                        tracing::debug!(payload = %payload, "writing response");
                        writeln!(writer, "{}", payload)?;
                        writer.flush()?;
                    }
                }
                Err(e) => {
                    tracing::error!("Error reading input: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }
}
