use blockfall::core::{GameState, Notifier, SequencePieces};
use blockfall::term::{piece_color, AnchorY, GameView, StatusPanel, Viewport};
use blockfall::types::{Notice, PieceKind};

#[test]
fn term_view_renders_border_corners() {
    let state = GameState::new(1);
    let snap = state.snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, &StatusPanel::new(), 0, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = PieceKind::I.code();
    snap.active = None;

    let view = GameView::default();
    let fb = view.render(&snap, &StatusPanel::new(), 0, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, piece_color(PieceKind::I));
}

#[test]
fn term_view_draws_falling_piece_once_visible() {
    let mut state = GameState::with_source(SequencePieces::repeat(PieceKind::O));
    // Two drops bring the O fully onto rows 0-1.
    state.soft_drop();
    state.soft_drop();
    let snap = state.snapshot();

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, &StatusPanel::new(), 0, Viewport::new(22, 22));

    // O covers columns 4-5 -> x = 1 + 4*2 .. 1 + 6*2.
    for y in [1u16, 2] {
        for x in 9..13u16 {
            let cell = fb.get(x, y).unwrap();
            assert_eq!(cell.ch, '█', "({}, {})", x, y);
            assert!(cell.style.bold);
        }
    }
}

#[test]
fn term_view_shows_toast_above_board_when_there_is_room() {
    let snap = GameState::new(1).snapshot();
    let mut status = StatusPanel::new();
    status.set_clock(0);
    status.notify(Notice::Paused);

    // Centered: 24 rows leave one free row above the 22-row frame.
    let fb = GameView::default().render(&snap, &status, 100, Viewport::new(40, 24));
    assert!(fb.row_text(0).contains("Paused"));
}

#[test]
fn term_view_small_viewport_does_not_panic() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, &StatusPanel::new(), 0, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
