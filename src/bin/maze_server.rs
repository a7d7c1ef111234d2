//! Maze server binary.
//!
//! Serves line-delimited JSON maze requests over TCP. See
//! [`tui_maze::adapter`] for the protocol and environment variables.

use anyhow::Result;

use tui_maze::adapter::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = ServerConfig::from_env();
    run_server(config, None).await
}
