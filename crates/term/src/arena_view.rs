//! ArenaView: maps an [`ArenaSnapshot`] into a terminal framebuffer.
//!
//! World coordinates are scaled onto a grid of terminal cells, `cell_w × cell_h`
//! characters per maze cell. Bodies are rasterized by sampling their outline
//! in body space and rotating each sample, so walls keep their shape while
//! they tumble after the collapse.
//!
//! This module is pure (no I/O).

use crate::engine::{ArenaSnapshot, BodyShape, BodyView};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BodyLabel, CellPos};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PANEL_W: u16 = 18;

const FLOOR: CellStyle = CellStyle::new(Rgb::new(70, 70, 80), Rgb::new(24, 24, 32));
const FRAME: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const WALL: CellStyle = CellStyle::new(Rgb::new(150, 160, 190), Rgb::new(24, 24, 32));
const GOAL: CellStyle = CellStyle::new(Rgb::new(90, 210, 110), Rgb::new(24, 24, 32));
const BALL: CellStyle = CellStyle::new(Rgb::new(240, 90, 80), Rgb::new(24, 24, 32));
const HINT: CellStyle = CellStyle::new(Rgb::new(230, 200, 90), Rgb::new(24, 24, 32));
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));

/// Placement of the arena inside the viewport, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaRect {
    /// Top-left corner of the frame (the arena interior starts one cell in).
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
}

impl ArenaRect {
    pub fn frame_w(&self) -> u16 {
        self.cols.saturating_add(2)
    }

    pub fn frame_h(&self) -> u16 {
        self.rows.saturating_add(2)
    }
}

pub struct ArenaView {
    /// Preferred terminal columns per maze cell.
    cell_w: u16,
    /// Preferred terminal rows per maze cell.
    cell_h: u16,
}

impl Default for ArenaView {
    fn default() -> Self {
        // 2:1 compensates for typical glyph aspect ratio.
        Self {
            cell_w: 6,
            cell_h: 3,
        }
    }
}

impl ArenaView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Where the arena goes for this viewport.
    ///
    /// Cells shrink (down to 2×1) to fit beside the side panel; below that the
    /// arena is clipped by the framebuffer.
    pub fn place(&self, snap: &ArenaSnapshot, viewport: Viewport) -> ArenaRect {
        let columns = u16::try_from(snap.settings.columns).unwrap_or(u16::MAX).max(1);
        let rows = u16::try_from(snap.settings.rows).unwrap_or(u16::MAX).max(1);

        let avail_w = viewport.width.saturating_sub(PANEL_W + 2);
        let avail_h = viewport.height.saturating_sub(2);
        let cw = (avail_w / columns).clamp(2.min(self.cell_w), self.cell_w);
        let ch = (avail_h / rows).clamp(1, self.cell_h);

        let cols = columns.saturating_mul(cw);
        let rows = rows.saturating_mul(ch);
        let total_w = cols.saturating_add(2).saturating_add(PANEL_W);
        ArenaRect {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(rows.saturating_add(2)) / 2,
            cols,
            rows,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    pub fn render_into(&self, snap: &ArenaSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let rect = self.place(snap, viewport);
        fb.fill_rect(rect.x + 1, rect.y + 1, rect.cols, rect.rows, ' ', FLOOR);
        fb.draw_box(rect.x, rect.y, rect.frame_w(), rect.frame_h(), FRAME);

        let mapper = Mapper::new(snap, rect);
        if !snap.hint.is_empty() {
            draw_hint(fb, &mapper, &snap.hint);
        }

        // Borders coincide with the frame box and are not drawn.
        for body in &snap.bodies {
            match body.label {
                BodyLabel::Wall => draw_body(fb, &mapper, body, '█', WALL),
                BodyLabel::Goal => draw_body(fb, &mapper, body, '▓', GOAL),
                BodyLabel::Border | BodyLabel::Ball => {}
            }
        }
        // Ball last so nothing hides it.
        for body in snap.bodies.iter().filter(|b| b.label == BodyLabel::Ball) {
            draw_body(fb, &mapper, body, '●', BALL.bold());
        }

        self.draw_side_panel(fb, snap, viewport, rect);

        let banner = BANNER.bold();
        if snap.paused {
            let mid = rect.y + rect.frame_h() / 2;
            fb.put_str_centered(rect.x, rect.frame_w(), mid, " PAUSED ", banner);
        } else if snap.won {
            fb.put_str_centered(rect.x, rect.frame_w(), rect.y, " SOLVED! ", banner);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &ArenaSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &ArenaSnapshot,
        viewport: Viewport,
        rect: ArenaRect,
    ) {
        let panel_x = rect.x.saturating_add(rect.frame_w()).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let mut y = rect.y;
        // Writes a label and returns the row for its value.
        let mut label = |fb: &mut FrameBuffer, text: &str| {
            fb.put_str(panel_x, y, text, LABEL.bold());
            let value_y = y.saturating_add(1);
            y = y.saturating_add(3);
            value_y
        };

        let vy = label(fb, "MAZE");
        fb.put_str(
            panel_x,
            vy,
            &format!("{}x{}", snap.settings.rows, snap.settings.columns),
            VALUE,
        );
        let vy = label(fb, "SEED");
        fb.put_u32(panel_x, vy, snap.seed, VALUE);
        let vy = label(fb, "MOVES");
        fb.put_u32(panel_x, vy, snap.moves, VALUE);
        let state = if snap.won {
            "SOLVED"
        } else if snap.paused {
            "PAUSED"
        } else {
            "PLAYING"
        };
        let vy = label(fb, "STATE");
        fb.put_str(panel_x, vy, state, VALUE);

        let help = VALUE.dim();
        for line in ["arrows/wasd nudge", "r replay  n new", "? hint  p pause", "q quit"] {
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

/// World → terminal coordinate mapping for one frame.
struct Mapper {
    origin_x: f32,
    origin_y: f32,
    scale_x: f32,
    scale_y: f32,
    min_x: u16,
    min_y: u16,
    max_x: u16,
    max_y: u16,
    unit_x: f32,
    unit_y: f32,
}

impl Mapper {
    fn new(snap: &ArenaSnapshot, rect: ArenaRect) -> Self {
        let s = &snap.settings;
        Self {
            origin_x: (rect.x + 1) as f32,
            origin_y: (rect.y + 1) as f32,
            scale_x: rect.cols as f32 / s.width.max(1.0),
            scale_y: rect.rows as f32 / s.height.max(1.0),
            min_x: rect.x + 1,
            min_y: rect.y + 1,
            max_x: rect.x + rect.cols,
            max_y: rect.y + rect.rows,
            unit_x: s.unit_x(),
            unit_y: s.unit_y(),
        }
    }

    /// Terminal cell for a world point, if it lies inside the arena interior.
    fn to_cell(&self, wx: f32, wy: f32) -> Option<(u16, u16)> {
        let tx = (self.origin_x + wx * self.scale_x).floor();
        let ty = (self.origin_y + wy * self.scale_y).floor();
        if !tx.is_finite() || !ty.is_finite() || tx < 0.0 || ty < 0.0 {
            return None;
        }
        let (tx, ty) = (tx as u16, ty as u16);
        (tx >= self.min_x && tx <= self.max_x && ty >= self.min_y && ty <= self.max_y)
            .then_some((tx, ty))
    }

    /// World units per half terminal cell along each axis.
    fn sample_step(&self) -> (f32, f32) {
        (0.5 / self.scale_x.max(1e-6), 0.5 / self.scale_y.max(1e-6))
    }
}

fn draw_body(fb: &mut FrameBuffer, mapper: &Mapper, body: &BodyView, ch: char, style: CellStyle) {
    match body.shape {
        BodyShape::Circle { .. } => {
            // A ball is smaller than a maze cell; one glyph at its center reads best.
            if let Some((x, y)) = mapper.to_cell(body.x, body.y) {
                fb.put_char(x, y, ch, style);
            }
        }
        BodyShape::Rect {
            half_width,
            half_height,
        } => {
            let (step_x, step_y) = mapper.sample_step();
            let (sin, cos) = body.angle.sin_cos();
            let nx = samples(half_width, step_x);
            let ny = samples(half_height, step_y);
            for i in 0..nx {
                let lx = sample_at(half_width, nx, i);
                for j in 0..ny {
                    let ly = sample_at(half_height, ny, j);
                    let wx = body.x + lx * cos - ly * sin;
                    let wy = body.y + lx * sin + ly * cos;
                    if let Some((x, y)) = mapper.to_cell(wx, wy) {
                        fb.put_char(x, y, ch, style);
                    }
                }
            }
        }
    }
}

/// Number of samples across `2 * half` at spacing `step`, at least one.
fn samples(half: f32, step: f32) -> u32 {
    ((2.0 * half / step).ceil() as u32).max(1)
}

/// Center of the `i`-th of `n` equal slices of `[-half, half]`.
fn sample_at(half: f32, n: u32, i: u32) -> f32 {
    -half + (i as f32 + 0.5) * (2.0 * half / n as f32)
}

fn draw_hint(fb: &mut FrameBuffer, mapper: &Mapper, path: &[CellPos]) {
    let center = |c: CellPos| {
        (
            c.column as f32 * mapper.unit_x + mapper.unit_x / 2.0,
            c.row as f32 * mapper.unit_y + mapper.unit_y / 2.0,
        )
    };
    for pair in path.windows(2) {
        let (ax, ay) = center(pair[0]);
        let (bx, by) = center(pair[1]);
        for k in 0..=4 {
            let t = k as f32 / 4.0;
            if let Some((x, y)) = mapper.to_cell(ax + (bx - ax) * t, ay + (by - ay) * t) {
                fb.put_char(x, y, '·', HINT);
            }
        }
    }
    if let [only] = path {
        let (x, y) = center(*only);
        if let Some((x, y)) = mapper.to_cell(x, y) {
            fb.put_char(x, y, '·', HINT);
        }
    }
}
