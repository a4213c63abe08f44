//! GameView: maps a `GameSnapshot` and its tile map into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout: row 0 is the HUD, the world is framed below it. Each tile is drawn
//! `cell_w` columns wide and `cell_h` rows tall; the camera keeps the focus point
//! centred and never shows anything outside the map.

use crate::core::{GameSnapshot, Tile, TileMap};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CollectibleKind, Facing, PlayerPose, Rect, TILE_SIZE};

const HUD_ROW: u16 = 0;
const FRAME_TOP: u16 = 1;

const BG: Rgb = Rgb::new(0, 0, 0);
const WORLD_BG: Rgb = Rgb::new(20, 22, 34);

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

/// Top-left world pixel shown on one axis.
///
/// Centres `focus` in a `view_px` wide window, clamps the window to `[0, map_px)`
/// and snaps it down to a whole terminal cell of `step` pixels.
pub fn camera_origin(focus: i32, view_px: i32, map_px: i32, step: i32) -> i32 {
    let max = (map_px - view_px).max(0);
    let origin = (focus - view_px / 2).clamp(0, max);
    origin - origin.rem_euclid(step.max(1))
}

/// A lightweight terminal renderer for the platformer.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Visible world window in screen and world coordinates.
#[derive(Debug, Clone, Copy)]
struct Window {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    origin: (i32, i32),
    px_per_col: i32,
    px_per_row: i32,
}

impl Window {
    /// Screen cell for a world pixel, if it is inside the window.
    fn cell_at(&self, col: i32, row: i32) -> Option<(u16, u16)> {
        if col < 0 || row < 0 || col >= self.w as i32 || row >= self.h as i32 {
            return None;
        }
        Some((self.x + col as u16, self.y + row as u16))
    }

    fn col_of(&self, px: i32) -> i32 {
        (px - self.origin.0).div_euclid(self.px_per_col)
    }

    fn row_of(&self, py: i32) -> i32 {
        (py - self.origin.1).div_euclid(self.px_per_row)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        map: &TileMap,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::fg_on(Rgb::new(220, 220, 220), BG).cell(' '));

        self.draw_hud(fb, snap);

        let Some(win) = self.window(map, snap, viewport) else {
            return;
        };

        let border = CellStyle::fg_on(Rgb::new(160, 160, 170), BG);
        fb.draw_box(win.x - 1, win.y - 1, win.w + 2, win.h + 2, border);
        fb.fill_rect(
            win.x,
            win.y,
            win.w,
            win.h,
            ' ',
            CellStyle::fg_on(Rgb::new(60, 60, 70), WORLD_BG),
        );

        self.draw_tiles(fb, map, snap.exit_unlocked, &win);
        for item in &snap.collectibles {
            let (ch, style) = collectible_glyph(item.kind);
            fill_world_rect(fb, &win, &item.bounds, ch, style);
        }
        self.draw_player(fb, snap, &win);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, map: &TileMap, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(map, snap, viewport, &mut fb);
        fb
    }

    fn window(&self, map: &TileMap, snap: &GameSnapshot, viewport: Viewport) -> Option<Window> {
        let map_cols = map.cols().saturating_mul(self.cell_w);
        let map_rows = map.rows().saturating_mul(self.cell_h);
        let w = map_cols.min(viewport.width.saturating_sub(2));
        let h = map_rows.min(viewport.height.saturating_sub(FRAME_TOP + 2));
        if w == 0 || h == 0 {
            return None;
        }

        let px_per_col = (TILE_SIZE / self.cell_w as i32).max(1);
        let px_per_row = (TILE_SIZE / self.cell_h as i32).max(1);
        let origin = (
            camera_origin(
                snap.focus.0,
                w as i32 * px_per_col,
                map.pixel_width(),
                px_per_col,
            ),
            camera_origin(
                snap.focus.1,
                h as i32 * px_per_row,
                map.pixel_height(),
                px_per_row,
            ),
        );

        Some(Window {
            x: (viewport.width - (w + 2)) / 2 + 1,
            y: FRAME_TOP + 1,
            w,
            h,
            origin,
            px_per_col,
            px_per_row,
        })
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let label = CellStyle::fg_on(Rgb::new(220, 220, 220), BG).bold();
        let value = CellStyle::fg_on(Rgb::new(240, 220, 80), BG);

        let mut x = fb.put_str(0, HUD_ROW, "SCORE ", label);
        x = fb.put_u32(x, HUD_ROW, snap.score, value);
        x = fb.put_str(x, HUD_ROW, "  ", label);
        x = if snap.exit_unlocked {
            fb.put_str(x, HUD_ROW, "EXIT OPEN", CellStyle::fg_on(Rgb::new(100, 220, 120), BG).bold())
        } else {
            fb.put_str(x, HUD_ROW, "EXIT LOCKED", CellStyle::fg_on(Rgb::new(200, 80, 80), BG).dim())
        };
        if let Some(msg) = snap.message {
            x = fb.put_str(x, HUD_ROW, "  ", label);
            fb.put_str(x, HUD_ROW, msg, CellStyle::fg_on(Rgb::new(255, 255, 255), BG).bold());
        }
    }

    fn draw_tiles(&self, fb: &mut FrameBuffer, map: &TileMap, exit_unlocked: bool, win: &Window) {
        let wall = CellStyle::fg_on(Rgb::new(150, 110, 70), WORLD_BG);
        let exit = if exit_unlocked {
            CellStyle::fg_on(Rgb::new(100, 220, 120), WORLD_BG).bold()
        } else {
            CellStyle::fg_on(Rgb::new(200, 80, 80), WORLD_BG).dim()
        };

        for row in 0..win.h {
            let py = win.origin.1 + row as i32 * win.px_per_row;
            for col in 0..win.w {
                let px = win.origin.0 + col as i32 * win.px_per_col;
                let (ch, style) = match map.tile(px / TILE_SIZE, py / TILE_SIZE) {
                    Some(Tile::Blocker) => ('█', wall),
                    Some(Tile::Exit) => ('▒', exit),
                    _ => continue,
                };
                fb.put_char(win.x + col, win.y + row, ch, style);
            }
        }
    }

    fn draw_player(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, win: &Window) {
        let b = &snap.player.bounds;
        let (cx, cy) = (b.x + b.w / 2, b.y + b.h / 2);
        // The sprite is one tile wide, centred on the body.
        let col = win.col_of(cx - TILE_SIZE / 2 + win.px_per_col / 2);
        let row = win.row_of(cy);
        let style = CellStyle::fg_on(Rgb::new(255, 255, 255), WORLD_BG).bold();

        let glyphs = player_glyphs(snap.player.pose, snap.player.facing);
        for (i, &ch) in glyphs.iter().take(self.cell_w as usize).enumerate() {
            if let Some((x, y)) = win.cell_at(col + i as i32, row) {
                fb.put_char(x, y, ch, style);
            }
        }
    }
}

fn fill_world_rect(fb: &mut FrameBuffer, win: &Window, r: &Rect, ch: char, style: CellStyle) {
    if r.w <= 0 || r.h <= 0 {
        return;
    }
    for row in win.row_of(r.top())..=win.row_of(r.bottom() - 1) {
        for col in win.col_of(r.left())..=win.col_of(r.right() - 1) {
            if let Some((x, y)) = win.cell_at(col, row) {
                fb.put_char(x, y, ch, style);
            }
        }
    }
}

fn collectible_glyph(kind: CollectibleKind) -> (char, CellStyle) {
    let (ch, fg) = match kind {
        CollectibleKind::Diamond => ('◆', Rgb::new(80, 220, 220)),
        CollectibleKind::Ruby => ('◆', Rgb::new(220, 60, 80)),
        CollectibleKind::Pearl => ('●', Rgb::new(235, 235, 245)),
        CollectibleKind::Trophy => ('T', Rgb::new(240, 200, 60)),
    };
    (ch, CellStyle::fg_on(fg, WORLD_BG).bold())
}

fn player_glyphs(pose: PlayerPose, facing: Facing) -> [char; 2] {
    match (pose, facing) {
        (PlayerPose::Front, _) => ['@', '@'],
        (PlayerPose::Walk, Facing::Left) => ['<', '@'],
        (PlayerPose::Walk, Facing::Right) => ['@', '>'],
        (PlayerPose::Jump, Facing::Left) => ['^', '@'],
        (PlayerPose::Jump, Facing::Right) => ['@', '^'],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width()).map(|x| fb.get(x, y).unwrap().ch).collect()
    }

    /// Positions of `ch` below the HUD row.
    fn find(fb: &FrameBuffer, ch: char) -> Vec<(u16, u16)> {
        let mut out = Vec::new();
        for y in FRAME_TOP..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).unwrap().ch == ch {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn camera_centres_and_clamps() {
        // Map narrower than the view: pinned at zero.
        assert_eq!(camera_origin(100, 640, 320, 16), 0);
        // Focus near the start.
        assert_eq!(camera_origin(50, 320, 3200, 16), 0);
        // Focus in the middle, snapped to a cell.
        assert_eq!(camera_origin(1000, 320, 3200, 16), 832);
        // Focus past the end.
        assert_eq!(camera_origin(3190, 320, 3200, 16), 2880);
    }

    #[test]
    fn draws_frame_tiles_and_player() {
        let map = TileMap::parse("P..\n###").unwrap();
        let state = GameState::new(map);
        let fb = GameView::default().render(state.map(), &state.snapshot(), Viewport::new(10, 6));

        // 3 tiles x 2 columns, centred in 10 columns: frame at x=1..=8.
        assert_eq!(row_text(&fb, 1), " ┌──────┐ ");
        assert_eq!(row_text(&fb, 2), " │@@    │ ");
        assert_eq!(row_text(&fb, 3), " │██████│ ");
        assert_eq!(row_text(&fb, 4), " └──────┘ ");
    }

    #[test]
    fn hud_shows_score_and_exit_state() {
        let map = TileMap::parse("P\n#").unwrap();
        let state = GameState::new(map);
        let mut snap = state.snapshot();
        snap.score = 150;
        let view = GameView::default();

        let fb = view.render(state.map(), &snap, Viewport::new(40, 5));
        assert!(row_text(&fb, 0).starts_with("SCORE 150  EXIT LOCKED"));

        snap.exit_unlocked = true;
        snap.message = Some("Go thru the door!");
        let fb = view.render(state.map(), &snap, Viewport::new(40, 5));
        assert!(row_text(&fb, 0).starts_with("SCORE 150  EXIT OPEN  Go thru the door!"));
    }

    #[test]
    fn collectibles_and_exit_are_drawn() {
        let map = TileMap::parse("PDTE\n####").unwrap();
        let state = GameState::new(map);
        let fb = GameView::default().render(state.map(), &state.snapshot(), Viewport::new(10, 6));

        assert_eq!(find(&fb, '◆'), vec![(3, 2), (4, 2)]);
        assert_eq!(find(&fb, 'T'), vec![(5, 2), (6, 2)]);
        assert_eq!(find(&fb, '▒'), vec![(7, 2), (8, 2)]);
        let exit = fb.get(7, 2).unwrap();
        assert!(exit.style.dim);
    }

    #[test]
    fn camera_follows_player_in_a_wide_map() {
        let mut src = String::new();
        src.push_str(&".".repeat(30));
        src.push('P');
        src.push_str(&".".repeat(9));
        src.push('\n');
        src.push_str(&"#".repeat(40));
        let map = TileMap::parse(&src).unwrap();
        let state = GameState::new(map);

        // 10 columns of world = 5 tiles wide.
        let fb = GameView::default().render(state.map(), &state.snapshot(), Viewport::new(12, 6));
        let player = find(&fb, '@');
        assert_eq!(player.len(), 2);
        let (x, y) = player[0];
        assert_eq!(y, 2);
        // Roughly centred horizontally inside the 10-column window.
        assert!((4..=6).contains(&x), "player at column {}", x);
    }

    #[test]
    fn walking_pose_points_in_facing_direction() {
        assert_eq!(player_glyphs(PlayerPose::Walk, Facing::Right), ['@', '>']);
        assert_eq!(player_glyphs(PlayerPose::Walk, Facing::Left), ['<', '@']);
        assert_eq!(player_glyphs(PlayerPose::Jump, Facing::Left), ['^', '@']);
    }

    #[test]
    fn tiny_viewport_draws_only_hud() {
        let map = TileMap::parse("P\n#").unwrap();
        let state = GameState::new(map);
        let fb = GameView::default().render(state.map(), &state.snapshot(), Viewport::new(20, 2));
        assert!(row_text(&fb, 0).starts_with("SCORE 0"));
        assert!(find(&fb, '┌').is_empty());
    }
}
