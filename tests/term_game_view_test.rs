use tui_platformer::core::{GameState, TileMap};
use tui_platformer::term::{FrameBuffer, GameView, Viewport};
use tui_platformer::types::{Facing, HeldKeys, PlayerPose};

fn row(fb: &FrameBuffer, y: u16) -> String {
    (0..fb.width()).map(|x| fb.get(x, y).unwrap().ch).collect()
}

fn state(src: &str) -> GameState {
    GameState::new(TileMap::parse(src).unwrap())
}

#[test]
fn term_view_renders_border_corners() {
    let gs = state("P...\n####");
    let fb = GameView::default().render(gs.map(), &gs.snapshot(), Viewport::new(10, 5));

    // 4 tiles * 2 columns + border = 10 columns; rows 1..=4.
    assert_eq!(fb.get(0, 1).unwrap().ch, '┌');
    assert_eq!(fb.get(9, 1).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 4).unwrap().ch, '└');
    assert_eq!(fb.get(9, 4).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_tiles_two_columns_wide() {
    let gs = state("P.#.\n####");
    let fb = GameView::default().render(gs.map(), &gs.snapshot(), Viewport::new(10, 5));
    assert_eq!(row(&fb, 2), "│@@  ██  │");
    assert_eq!(row(&fb, 3), "│████████│");
}

#[test]
fn term_view_player_glyph_follows_pose() {
    let mut gs = state(".P..\n####");
    gs.tick(1.0 / 30.0, HeldKeys::NONE);
    gs.tick(
        1.0 / 30.0,
        HeldKeys {
            right: true,
            ..HeldKeys::NONE
        },
    );
    let snap = gs.snapshot();
    assert_eq!(snap.player.pose, PlayerPose::Walk);
    assert_eq!(snap.player.facing, Facing::Right);

    let fb = GameView::default().render(gs.map(), &snap, Viewport::new(10, 5));
    assert!(row(&fb, 2).contains("@>"), "row was {:?}", row(&fb, 2));
}

#[test]
fn term_view_hides_collected_items() {
    let mut gs = state("P.D\n###");
    let right = HeldKeys {
        right: true,
        ..HeldKeys::NONE
    };
    let view = GameView::default();

    let before = view.render(gs.map(), &gs.snapshot(), Viewport::new(12, 5));
    assert!(row(&before, 2).contains('◆'));

    for _ in 0..20 {
        gs.tick(1.0 / 30.0, right);
    }
    assert_eq!(gs.score(), 100);
    let after = view.render(gs.map(), &gs.snapshot(), Viewport::new(12, 5));
    assert!(!row(&after, 2).contains('◆'));
    assert!(row(&after, 0).starts_with("SCORE 100"));
}

#[test]
fn term_view_reuses_framebuffer_across_sizes() {
    let gs = state("P...\n####");
    let view = GameView::default();
    let snap = gs.snapshot();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(gs.map(), &snap, Viewport::new(30, 10), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 10));
    view.render_into(gs.map(), &snap, Viewport::new(12, 6), &mut fb);
    assert_eq!((fb.width(), fb.height()), (12, 6));
    assert_eq!(fb, view.render(gs.map(), &snap, Viewport::new(12, 6)));
}
