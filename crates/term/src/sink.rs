//! `FrameSink` that draws every tick to the terminal.

use anyhow::{Context, Result};
use crossterm::terminal;

use crate::core::{FrameSink, GameSnapshot, GameState};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Renders through a borrowed [`TerminalRenderer`], so the caller can still
/// restore the terminal after the loop is gone.
pub struct TerminalSink<'a> {
    renderer: &'a mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    snap: GameSnapshot,
    viewport: Viewport,
}

impl<'a> TerminalSink<'a> {
    pub fn new(renderer: &'a mut TerminalRenderer) -> Self {
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            snap: GameSnapshot::default(),
            viewport: Viewport::new(0, 0),
        }
    }
}

impl FrameSink for TerminalSink<'_> {
    type Error = anyhow::Error;

    fn present(&mut self, state: &GameState) -> Result<()> {
        let (w, h) = terminal::size().context("query terminal size")?;
        let viewport = Viewport::new(w, h);
        if viewport != self.viewport {
            log::debug!("viewport resized to {}x{}", w, h);
            self.viewport = viewport;
            self.renderer.invalidate();
        }

        state.snapshot_into(&mut self.snap);
        self.view
            .render_into(state.map(), &self.snap, viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}
