//! TCP server for maze requests
//!
//! Each connection reads newline-delimited JSON requests and answers every one
//! in order. Generation runs on tokio's blocking pool so large mazes never
//! stall the accept loop.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::protocol::{handle_line, RequestLimits, Response};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on `rows * columns` for one request.
    pub max_cells: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_cells: 250_000,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("MAZE_SERVER_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("MAZE_SERVER_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_cells = lookup("MAZE_SERVER_MAX_CELLS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_cells);

        Self {
            host,
            port,
            max_cells,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn limits(&self) -> RequestLimits {
        RequestLimits {
            max_cells: self.max_cells,
        }
    }
}

/// Counters shared by all connections.
#[derive(Debug, Default)]
pub struct ServerStats {
    pub requests: AtomicU64,
    pub errors: AtomicU64,
}

impl ServerStats {
    /// Count one answered request.
    pub fn record(&self, response: &Response) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if response.is_error() {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// `(requests, errors)` so far.
    pub fn totals(&self) -> (u64, u64) {
        (
            self.requests.load(Ordering::Relaxed),
            self.errors.load(Ordering::Relaxed),
        )
    }
}

/// Start the TCP server. Runs until the listener fails.
///
/// `ready_tx` receives the bound address once the socket is listening, which
/// lets callers bind port 0 and discover the real port.
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    log::info!(
        "[Server] listening on {} (max {} cells)",
        bound,
        config.max_cells
    );
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let limits = config.limits();
    let stats = Arc::new(ServerStats::default());
    let mut client_id_counter = 0usize;

    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        log::info!("[Server] client {} connected from {}", client_id, peer);

        let stats = Arc::clone(&stats);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, limits, &stats).await {
                log::warn!("[Server] client {} error: {:#}", client_id, e);
            }
            let (requests, errors) = stats.totals();
            log::info!(
                "[Server] client {} disconnected ({} requests served in total, {} errors)",
                client_id,
                requests,
                errors
            );
        });
    }
}

/// Serve one connection until EOF.
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    limits: RequestLimits,
    stats: &ServerStats,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request = trimmed.to_string();
        let response: Response = tokio::task::spawn_blocking(move || {
            handle_line(&request, limits, rand::random::<u32>)
        })
        .await
        .context("request task panicked")?;

        stats.record(&response);
        if let Response::Error(err) = &response {
            log::warn!(
                "[Server] client {} seq {}: {:?} {}",
                client_id,
                err.seq,
                err.code,
                err.message
            );
        } else {
            log::debug!("[Server] client {} seq {} ok", client_id, response.seq());
        }

        buf.clear();
        serde_json::to_writer(&mut buf, &response)?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;
    }
    Ok(())
}
