use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{GameState, Grid};
use blockfall::term::{GameView, StatusPanel, Viewport};
use blockfall::types::{GameAction, PieceKind, RotateDirection};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let mut now = 0u64;

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            now += 16;
            state.tick(black_box(now));
            if state.game_over() {
                state.reset();
            }
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 16..20 {
                for x in 0..10 {
                    grid.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(grid.sweep_full_rows());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    // Bring the piece onto the board so the walls stop it.
    for _ in 0..4 {
        state.soft_drop();
    }
    let mut dx = 1;

    c.bench_function("move_by", |b| {
        b.iter(|| {
            if !state.move_by(dx) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(RotateDirection::Clockwise);
        })
    });
}

fn bench_hard_drop_game(c: &mut Criterion) {
    c.bench_function("hard_drop_until_top_out", |b| {
        b.iter(|| {
            let mut state = GameState::new(black_box(7));
            while state.running() {
                state.apply_action(GameAction::HardDrop);
            }
            black_box(state.score())
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let snap = state.snapshot();
    let status = StatusPanel::new();
    let view = GameView::default();
    let mut fb = blockfall::term::FrameBuffer::new(80, 24);

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            view.render_into(&snap, &status, 0, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_hard_drop_game,
    bench_render
);
criterion_main!(benches);
