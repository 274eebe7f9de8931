//! STDIO transport implementation.
//!
//! Newline-delimited JSON-RPC on stdin/stdout. Frames are handled one at a
//! time, so responses leave in exactly the order requests arrived. Nothing
//! but protocol frames is ever written to stdout.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::TransportResult;
use crate::core::McpServer;
use crate::core::protocol::JsonRpcResponse;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin closes.
    ///
    /// A read failure on stdin ends the loop with an error.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        serve(&server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

        info!("STDIO transport finished");
        Ok(())
    }
}

/// Serve line-delimited frames from `reader`, writing responses to `writer`.
///
/// Lines are read as raw bytes: a line that is not valid UTF-8 or not JSON
/// gets a `-32700` reply and the loop carries on. Only I/O errors end it.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> TransportResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_slice::<Value>(line) {
            Ok(frame) => server.handle_value(frame).await,
            Err(e) => {
                warn!("Discarding undecodable frame: {}", e);
                Some(JsonRpcResponse::parse_error())
            }
        };

        match response {
            Some(response) => write_frame(&mut writer, &response).await?,
            None => debug!("No response required"),
        }
    }

    Ok(())
}

async fn write_frame<W>(writer: &mut W, response: &JsonRpcResponse) -> TransportResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut frame = serde_json::to_vec(response)?;
    frame.push(b'\n');
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}
