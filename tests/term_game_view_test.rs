use blocktris::core::{ActivePiece, Game, GameConfig};
use blocktris::term::{GameView, Viewport};
use blocktris::types::{Command, Rotation, OCCUPIED};

fn standard() -> Game {
    let mut game = Game::new(1, GameConfig::standard()).unwrap();
    game.start();
    game
}

#[test]
fn term_view_draws_walls_around_standard_field() {
    let snap = standard().snapshot();
    let view = GameView::default();
    let vp = view.min_viewport(&snap);
    let fb = view.render(&snap, vp);

    // 12 x 20 field cells including walls, two characters per cell.
    assert_eq!(fb.get(0, 0).unwrap().ch, '▓');
    assert_eq!(fb.get(23, 0).unwrap().ch, '▓');
    assert_eq!(fb.get(0, 19).unwrap().ch, '▓');
    assert_eq!(fb.get(23, 19).unwrap().ch, '▓');
    assert_eq!(fb.get(2, 10).unwrap().ch, ' ');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut game = standard();
    game.field_mut().set(18, 1, OCCUPIED);
    let snap = game.snapshot();

    let view = GameView::default();
    let fb = view.render(&snap, view.min_viewport(&snap));
    assert_eq!(fb.get(2, 18).unwrap().ch, '█');
    assert_eq!(fb.get(3, 18).unwrap().ch, '█');
    assert_eq!(fb.get(4, 18).unwrap().ch, ' ');
}

#[test]
fn term_view_active_piece_follows_moves() {
    let mut game = standard();
    game.set_active(ActivePiece {
        kind: 3,
        rotation: Rotation::default(),
        row: 5,
        col: 4,
    });
    let view = GameView::default();

    let snap = game.snapshot();
    let fb = view.render(&snap, view.min_viewport(&snap));
    // O piece occupies mask columns 1 and 2: field columns 5 and 6.
    assert_eq!(fb.get(10, 5).unwrap().ch, '█');
    assert_eq!(fb.get(13, 6).unwrap().ch, '█');

    game.apply(Command::MoveLeft);
    let snap = game.snapshot();
    let fb = view.render(&snap, view.min_viewport(&snap));
    assert_eq!(fb.get(8, 5).unwrap().ch, '█');
    assert_eq!(fb.get(13, 6).unwrap().ch, ' ');
}

#[test]
fn term_view_centres_in_large_viewport() {
    let snap = standard().snapshot();
    let view = GameView::default();
    let min = view.min_viewport(&snap);
    let fb = view.render(&snap, Viewport::new(min.width + 20, min.height + 10));

    assert_eq!(fb.get(10, 5).unwrap().ch, '▓');
    assert_eq!(fb.get(9, 5).unwrap().ch, ' ');
}
