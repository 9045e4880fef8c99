use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blocktris::core::{collides, Field, Game, GameConfig, PieceCatalog};
use blocktris::types::{Command, Rotation, OCCUPIED};

fn bench_collides(c: &mut Criterion) {
    let field = Field::new(18, 10);
    let catalog = PieceCatalog::standard();

    c.bench_function("collides_all_kinds", |b| {
        b.iter(|| {
            let mut hits = 0;
            for kind in 0..catalog.len() {
                for rotation in 0..4 {
                    if collides(
                        black_box(&field),
                        &catalog,
                        kind,
                        Rotation::new(rotation),
                        black_box(17),
                        black_box(4),
                    ) {
                        hits += 1;
                    }
                }
            }
            hits
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::new(18, 10);
            for row in 15..=18 {
                for col in 1..=10 {
                    field.set(row, col, OCCUPIED);
                }
            }
            field.clear_completed_rows()
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::new(12345, GameConfig::standard()).unwrap();
    game.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if game.state().is_terminal() {
                game = Game::new(12345, GameConfig::standard()).unwrap();
                game.start();
            }
            game.tick()
        })
    });
}

fn bench_moves(c: &mut Criterion) {
    let mut game = Game::new(12345, GameConfig::standard()).unwrap();
    game.start();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            game.apply(black_box(Command::MoveLeft));
            game.apply(black_box(Command::Rotate));
            game.apply(black_box(Command::MoveRight))
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut game = Game::new(12345, GameConfig::standard()).unwrap();
    game.start();

    c.bench_function("snapshot_copy", |b| b.iter(|| black_box(game.snapshot())));
}

criterion_group!(
    benches,
    bench_collides,
    bench_line_clear,
    bench_tick,
    bench_moves,
    bench_snapshot
);
criterion_main!(benches);
