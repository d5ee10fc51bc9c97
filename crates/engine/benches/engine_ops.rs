use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;
use twenty48_engine::engine::{self, Board, Move};

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = vec![Board::EMPTY];
    let mut b = Board::EMPTY;
    b = b.spawn_random(&mut rng).unwrap().0;
    b = b.spawn_random(&mut rng).unwrap().0;
    boards.push(b);
    // Derive a variety of densities deterministically
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..60 {
        let out = b.apply(seq[i % seq.len()]);
        if out.moved {
            if let Some((nb, _)) = out.board.spawn_random(&mut rng) {
                b = nb;
            }
        }
        boards.push(b);
    }
    boards
}

fn bench_shift(c: &mut Criterion) {
    engine::init();
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{dir:?}"), |bch| {
            let boards = corpus();
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards {
                    acc ^= bd.shift(dir).raw();
                }
                black_box(acc)
            })
        });
    }
}

fn bench_apply(c: &mut Criterion) {
    engine::init();
    c.bench_function("apply/left", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0u64;
            for &bd in &boards {
                let out = bd.apply(Move::Left);
                acc ^= out.board.raw() ^ out.score_gained;
            }
            black_box(acc)
        })
    });
}

fn bench_terminal_checks(c: &mut Criterion) {
    engine::init();
    c.bench_function("has_moves", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut alive = 0u32;
            for &bd in &boards {
                alive += bd.has_moves() as u32;
            }
            black_box(alive)
        })
    });
}

criterion_group!(benches, bench_shift, bench_apply, bench_terminal_checks);
criterion_main!(benches);
