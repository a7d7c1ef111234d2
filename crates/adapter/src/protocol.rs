//! Protocol module - JSON message types for the maze server
//!
//! Every message is one JSON object per line with a `type` and a `seq`. The
//! server echoes the request's `seq` in its response.

use serde::{Deserialize, Serialize};

use crate::core::{analysis, ArenaLayout, BallSpec, Grid, RectSpec};
use crate::types::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};

// ============== Client -> Server Messages ==============

/// Generate a maze and return its passage matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub seq: u64,
    pub rows: usize,
    pub columns: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

/// Generate a maze and return the arena bodies built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub seq: u64,
    pub rows: usize,
    pub columns: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Generate a maze and return the path from the top-left to the bottom-right cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub seq: u64,
    pub rows: usize,
    pub columns: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Request {
    Generate(GenerateRequest),
    Layout(LayoutRequest),
    Solve(SolveRequest),
}

impl Request {
    pub fn seq(&self) -> u64 {
        match self {
            Request::Generate(r) => r.seq,
            Request::Layout(r) => r.seq,
            Request::Solve(r) => r.seq,
        }
    }

    /// `(rows, columns, seed)` shared by every request kind.
    pub fn maze_params(&self) -> (usize, usize, Option<u32>) {
        match self {
            Request::Generate(r) => (r.rows, r.columns, r.seed),
            Request::Layout(r) => (r.rows, r.columns, r.seed),
            Request::Solve(r) => (r.rows, r.columns, r.seed),
        }
    }
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeMessage {
    pub seq: u64,
    pub rows: usize,
    pub columns: usize,
    pub seed: u32,
    pub open_passages: usize,
    pub vertical_passage_open: Vec<Vec<bool>>,
    pub horizontal_passage_open: Vec<Vec<bool>>,
}

impl MazeMessage {
    pub fn from_grid(seq: u64, seed: u32, grid: &Grid) -> Self {
        Self {
            seq,
            rows: grid.rows(),
            columns: grid.columns(),
            seed,
            open_passages: grid.open_passage_count(),
            vertical_passage_open: grid.vertical_passages().to_vec(),
            horizontal_passage_open: grid.horizontal_passages().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectWire {
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&RectSpec> for RectWire {
    fn from(r: &RectSpec) -> Self {
        Self {
            label: r.label.as_str().to_string(),
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallWire {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl From<&BallSpec> for BallWire {
    fn from(b: &BallSpec) -> Self {
        Self {
            x: b.x,
            y: b.y,
            radius: b.radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMessage {
    pub seq: u64,
    pub seed: u32,
    pub width: f32,
    pub height: f32,
    pub borders: Vec<RectWire>,
    pub walls: Vec<RectWire>,
    pub goal: RectWire,
    pub ball: BallWire,
}

impl LayoutMessage {
    pub fn from_layout(seq: u64, seed: u32, layout: &ArenaLayout) -> Self {
        Self {
            seq,
            seed,
            width: layout.settings.width,
            height: layout.settings.height,
            borders: layout.borders.iter().map(RectWire::from).collect(),
            walls: layout.walls.iter().map(RectWire::from).collect(),
            goal: RectWire::from(&layout.goal),
            ball: BallWire::from(&layout.ball),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionMessage {
    pub seq: u64,
    pub seed: u32,
    /// `[row, column]` pairs, start and goal included.
    pub path: Vec<[usize; 2]>,
    pub moves: Vec<String>,
}

impl SolutionMessage {
    /// `None` when the grid has no path between the corners.
    pub fn from_grid(seq: u64, seed: u32, grid: &Grid) -> Option<Self> {
        let path = analysis::solve(grid)?;
        let moves = analysis::path_directions(&path)
            .into_iter()
            .map(|d| d.as_str().to_string())
            .collect();
        Some(Self {
            seq,
            seed,
            path: path.iter().map(|c| [c.row, c.column]).collect(),
            moves,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_json")]
    InvalidJson,
    #[serde(rename = "invalid_dimensions")]
    InvalidDimensions,
    #[serde(rename = "too_large")]
    TooLarge,
    #[serde(rename = "unknown_type")]
    UnknownType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Response {
    Maze(MazeMessage),
    Layout(LayoutMessage),
    Solution(SolutionMessage),
    Error(ErrorMessage),
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Maze(m) => m.seq,
            Response::Layout(m) => m.seq,
            Response::Solution(m) => m.seq,
            Response::Error(m) => m.seq,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

// ============== Helpers ==============

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> Response {
    Response::Error(ErrorMessage {
        seq,
        code,
        message: message.to_string(),
    })
}

const KNOWN_TYPES: [&str; 3] = ["generate", "layout", "solve"];

/// Parse one request line.
///
/// Malformed JSON and bad field types map to `invalid_json`; a well-formed
/// object whose `type` is missing or unrecognized maps to `unknown_type`.
pub fn parse_request(line: &str) -> Result<Request, ErrorMessage> {
    let value: serde_json::Value = serde_json::from_str(line).map_err(|e| ErrorMessage {
        seq: extract_seq_best_effort(line).unwrap_or(0),
        code: ErrorCode::InvalidJson,
        message: format!("Invalid JSON: {}", e),
    })?;
    let seq = value.get("seq").and_then(|v| v.as_u64()).unwrap_or(0);

    let ty = value.get("type").and_then(|v| v.as_str());
    match ty {
        Some(t) if KNOWN_TYPES.contains(&t) => {}
        Some(t) => {
            return Err(ErrorMessage {
                seq,
                code: ErrorCode::UnknownType,
                message: format!("Unknown message type: {}", t),
            })
        }
        None => {
            return Err(ErrorMessage {
                seq,
                code: ErrorCode::UnknownType,
                message: "Missing message type".to_string(),
            })
        }
    }

    serde_json::from_value(value).map_err(|e| ErrorMessage {
        seq,
        code: ErrorCode::InvalidJson,
        message: format!("Invalid request: {}", e),
    })
}

/// Pull `"seq": <digits>` out of a line that failed to parse.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let after_key = &s[s.find("\"seq\"")? + 5..];
    let rest = after_key[after_key.find(':')? + 1..].trim_start();
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..end].parse().ok()
}

/// Limits applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_cells: usize,
}

fn validate(req: &Request, limits: RequestLimits) -> Result<(), ErrorMessage> {
    let (rows, columns, _) = req.maze_params();
    let seq = req.seq();
    if rows == 0 || columns == 0 {
        return Err(ErrorMessage {
            seq,
            code: ErrorCode::InvalidDimensions,
            message: format!("rows and columns must be at least 1 (got {}x{})", rows, columns),
        });
    }
    match rows.checked_mul(columns) {
        Some(cells) if cells <= limits.max_cells => {}
        _ => {
            return Err(ErrorMessage {
                seq,
                code: ErrorCode::TooLarge,
                message: format!(
                    "{}x{} exceeds the limit of {} cells",
                    rows, columns, limits.max_cells
                ),
            })
        }
    }
    if let Request::Layout(l) = req {
        let ok = |v: Option<f32>| v.map_or(true, |v| v.is_finite() && v > 0.0);
        if !ok(l.width) || !ok(l.height) {
            return Err(ErrorMessage {
                seq,
                code: ErrorCode::InvalidDimensions,
                message: "width and height must be positive".to_string(),
            });
        }
    }
    Ok(())
}

/// Answer one request. `draw_seed` is called only when the request has no seed.
///
/// Generation is synchronous; the server runs this on the blocking pool.
pub fn handle_request(req: &Request, limits: RequestLimits, draw_seed: impl FnOnce() -> u32) -> Response {
    if let Err(e) = validate(req, limits) {
        return Response::Error(e);
    }

    let (rows, columns, seed) = req.maze_params();
    let seed = seed.unwrap_or_else(draw_seed);
    let seq = req.seq();
    let grid = match crate::core::generate_seeded(rows, columns, seed) {
        Ok(grid) => grid,
        Err(e) => return create_error(seq, ErrorCode::InvalidDimensions, &e.to_string()),
    };

    match req {
        Request::Generate(_) => Response::Maze(MazeMessage::from_grid(seq, seed, &grid)),
        Request::Layout(l) => {
            let layout = ArenaLayout::from_grid(
                &grid,
                l.width.unwrap_or(DEFAULT_ARENA_WIDTH),
                l.height.unwrap_or(DEFAULT_ARENA_HEIGHT),
            );
            Response::Layout(LayoutMessage::from_layout(seq, seed, &layout))
        }
        Request::Solve(_) => match SolutionMessage::from_grid(seq, seed, &grid) {
            Some(solution) => Response::Solution(solution),
            None => create_error(seq, ErrorCode::InvalidDimensions, "maze has no solution"),
        },
    }
}

/// Parse and answer one line.
pub fn handle_line(line: &str, limits: RequestLimits, draw_seed: impl FnOnce() -> u32) -> Response {
    match parse_request(line) {
        Ok(req) => handle_request(&req, limits, draw_seed),
        Err(e) => Response::Error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: RequestLimits = RequestLimits { max_cells: 10_000 };

    fn no_seed() -> u32 {
        panic!("seed should not be drawn")
    }

    #[test]
    fn test_parse_generate() {
        let req = parse_request(r#"{"type":"generate","seq":3,"rows":4,"columns":5,"seed":9}"#).unwrap();
        assert_eq!(
            req,
            Request::Generate(GenerateRequest {
                seq: 3,
                rows: 4,
                columns: 5,
                seed: Some(9)
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        let e = parse_request(r#"{"type":"generate","seq":7,"rows":"#).unwrap_err();
        assert_eq!(e.code, ErrorCode::InvalidJson);
        assert_eq!(e.seq, 7);

        let e = parse_request(r#"{"type":"teleport","seq":2}"#).unwrap_err();
        assert_eq!(e.code, ErrorCode::UnknownType);
        assert_eq!(e.seq, 2);

        let e = parse_request(r#"{"seq":2,"rows":1,"columns":1}"#).unwrap_err();
        assert_eq!(e.code, ErrorCode::UnknownType);

        let e = parse_request(r#"{"type":"solve","seq":4,"rows":-1,"columns":2}"#).unwrap_err();
        assert_eq!(e.code, ErrorCode::InvalidJson);
        assert_eq!(e.seq, 4);
    }

    #[test]
    fn test_extract_seq() {
        assert_eq!(extract_seq_best_effort(r#"{"seq": 42, oops"#), Some(42));
        assert_eq!(extract_seq_best_effort(r#"{"seq":"x"}"#), None);
        assert_eq!(extract_seq_best_effort("garbage"), None);
    }

    #[test]
    fn test_generate_response_shape() {
        let resp = handle_line(r#"{"type":"generate","seq":1,"rows":3,"columns":4,"seed":5}"#, LIMITS, no_seed);
        let Response::Maze(m) = &resp else {
            panic!("expected maze, got {:?}", resp);
        };
        assert_eq!(m.open_passages, 11);
        assert_eq!(m.vertical_passage_open.len(), 3);
        assert_eq!(m.horizontal_passage_open.len(), 2);

        let v: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["type"], "maze");
        assert_eq!(v["seed"], 5);
        assert!(v["verticalPassageOpen"].is_array());
        assert!(v["horizontalPassageOpen"].is_array());
        assert_eq!(v["openPassages"], 11);
    }

    #[test]
    fn test_missing_seed_is_drawn_and_echoed() {
        let resp = handle_line(r#"{"type":"generate","seq":1,"rows":2,"columns":2}"#, LIMITS, || 777);
        let Response::Maze(m) = resp else {
            panic!("expected maze");
        };
        assert_eq!(m.seed, 777);
        let again = handle_line(r#"{"type":"generate","seq":2,"rows":2,"columns":2,"seed":777}"#, LIMITS, no_seed);
        let Response::Maze(m2) = again else {
            panic!("expected maze");
        };
        assert_eq!(m.vertical_passage_open, m2.vertical_passage_open);
        assert_eq!(m.horizontal_passage_open, m2.horizontal_passage_open);
    }

    #[test]
    fn test_dimension_errors() {
        let resp = handle_line(r#"{"type":"generate","seq":5,"rows":0,"columns":3}"#, LIMITS, no_seed);
        assert_eq!(resp.seq(), 5);
        assert!(matches!(resp, Response::Error(ErrorMessage { code: ErrorCode::InvalidDimensions, .. })));

        let resp = handle_line(r#"{"type":"solve","seq":6,"rows":1000,"columns":1000}"#, LIMITS, no_seed);
        assert!(matches!(resp, Response::Error(ErrorMessage { code: ErrorCode::TooLarge, .. })));

        let resp = handle_line(
            r#"{"type":"layout","seq":7,"rows":2,"columns":2,"seed":1,"width":-5}"#,
            LIMITS,
            no_seed,
        );
        assert!(matches!(resp, Response::Error(ErrorMessage { code: ErrorCode::InvalidDimensions, .. })));
    }

    #[test]
    fn test_layout_response() {
        let resp = handle_line(
            r#"{"type":"layout","seq":8,"rows":6,"columns":6,"seed":1}"#,
            LIMITS,
            no_seed,
        );
        let Response::Layout(l) = resp else {
            panic!("expected layout");
        };
        assert_eq!(l.width, 600.0);
        assert_eq!(l.borders.len(), 4);
        assert_eq!(l.walls.len(), 60 - 35);
        assert_eq!(l.goal.label, "goal");
        assert_eq!(l.ball, BallWire { x: 50.0, y: 50.0, radius: 25.0 });
    }

    #[test]
    fn test_solution_response() {
        let resp = handle_line(r#"{"type":"solve","seq":9,"rows":5,"columns":5,"seed":3}"#, LIMITS, no_seed);
        let Response::Solution(s) = resp else {
            panic!("expected solution");
        };
        assert_eq!(s.path.first(), Some(&[0, 0]));
        assert_eq!(s.path.last(), Some(&[4, 4]));
        assert_eq!(s.moves.len(), s.path.len() - 1);
    }

    #[test]
    fn test_error_serializes_with_code() {
        let v = serde_json::to_value(create_error(3, ErrorCode::TooLarge, "big")).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "too_large");
        assert_eq!(v["seq"], 3);
    }
}
