//! TCP control server
//!
//! Accepts controller connections and serves the line protocol: one
//! command per line in, one status line back per recognized command.

use crate::command::CommandExecutor;
use anyhow::Result;
use reflow_shared::codec::LineDecoder;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

/// Listens for controller connections and spawns a session per peer
pub struct OvenServer {
    listen_addr: String,
    executor: Arc<CommandExecutor>,
}

impl OvenServer {
    /// Create a new server over the shared command executor
    pub fn new(listen_addr: String, executor: Arc<CommandExecutor>) -> Self {
        Self {
            listen_addr,
            executor,
        }
    }

    /// Bind and run the accept loop until the process exits
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        info!("Control server listening on {}", self.listen_addr);

        loop {
            let (stream, addr) = listener.accept().await?;
            info!("Controller connected from {}", addr);

            let executor = self.executor.clone();
            tokio::spawn(async move {
                if let Err(e) = run_session(stream, executor.as_ref()).await {
                    warn!("Session with {} ended with error: {}", addr, e);
                }
                info!("Controller {} disconnected", addr);
            });
        }
    }
}

/// Serve one connected controller until it closes the connection
async fn run_session(mut stream: TcpStream, executor: &CommandExecutor) -> Result<()> {
    let mut decoder = LineDecoder::new();
    let mut buf = vec![0u8; 1024];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // peer closed
        }
        decoder.extend(&buf[..n]);

        // Drain every complete line before reading again
        while let Some(line) = decoder.next_line()? {
            if let Some(reply) = executor.execute(&line).await {
                stream.write_all(reply.as_bytes()).await?;
            }
        }
    }
}
