//! Adapter module - maze generation over a TCP socket with a JSON protocol
//!
//! Lets external tools request mazes without linking the crate.
//!
//! # Protocol Overview
//!
//! A **line-delimited JSON protocol** over TCP. Every request carries a `type`
//! and a `seq`; the response echoes the `seq`. Connections may send any number
//! of requests and are never dropped because of a bad one.
//!
//! ## Client → Server
//!
//! - **generate** `{rows, columns, seed?}`: passage matrices
//! - **layout** `{rows, columns, seed?, width?, height?}`: arena bodies
//! - **solve** `{rows, columns, seed?}`: path from the top-left to the bottom-right cell
//!
//! ## Server → Client
//!
//! - **maze**: `seed`, `openPassages`, `verticalPassageOpen`, `horizontalPassageOpen`
//! - **layout**: `borders`, `walls`, `goal`, `ball`
//! - **solution**: `path` as `[row, column]` pairs plus `moves`
//! - **error**: `code` (`invalid_json`, `invalid_dimensions`, `too_large`,
//!   `unknown_type`) and `message`
//!
//! Omitting `seed` makes the server draw one; it is always echoed so that any
//! response can be reproduced.
//!
//! # Environment Variables
//!
//! - `MAZE_SERVER_HOST`: Bind address (default: "127.0.0.1")
//! - `MAZE_SERVER_PORT`: Port number (default: 7878)
//! - `MAZE_SERVER_MAX_CELLS`: Largest `rows * columns` accepted (default: 250000)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"generate","seq":1,"rows":2,"columns":2,"seed":7}
//! Server -> Client: {"type":"maze","seq":1,"rows":2,"columns":2,"seed":7,"openPassages":3,...}
//! Client -> Server: {"type":"solve","seq":2,"rows":0,"columns":2}
//! Server -> Client: {"type":"error","seq":2,"code":"invalid_dimensions","message":"..."}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"generate","seq":1,"rows":4,"columns":4}
//! ```

pub mod protocol;
pub mod server;

pub use tui_maze_core as core;
pub use tui_maze_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::{run_server, ServerConfig, ServerStats};
