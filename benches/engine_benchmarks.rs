//! Benchmarks for draughts engine performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use draughts_engine::board::{
    find_best_move, Board, BoardBuilder, Color, GameKind, Piece, Rules, SearchLimits, SearchState,
};
use draughts_engine::tt::DEFAULT_TT_MB;

/// Position with several multi-jump captures and two long-range queens
fn capture_position(rules: Rules) -> Board {
    let pieces = [
        ("a1", Piece::WhiteSimple),
        ("c1", Piece::WhiteSimple),
        ("e1", Piece::WhiteQueen),
        ("g3", Piece::WhiteSimple),
        ("b2", Piece::BlackSimple),
        ("d4", Piece::BlackSimple),
        ("f4", Piece::BlackSimple),
        ("d6", Piece::BlackSimple),
        ("f6", Piece::BlackSimple),
        ("h8", Piece::BlackQueen),
    ];
    pieces
        .iter()
        .fold(BoardBuilder::new(), |b, &(square, piece)| {
            b.piece(square.parse().expect("valid square"), piece)
        })
        .side_to_move(Color::White)
        .rules(rules)
        .build()
        .expect("valid position")
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    for rules in [Rules::Default, Rules::English] {
        let mut board = Board::new(rules, GameKind::Normal);
        for depth in [4, 6, 8] {
            let id = BenchmarkId::new(format!("startpos_{rules:?}"), depth);
            group.bench_with_input(id, &depth, |b, &depth| {
                b.iter(|| board.perft(black_box(depth)))
            });
        }
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Board::new(Rules::Default, GameKind::Normal);
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.generate_moves()))
    });

    for rules in [Rules::Default, Rules::English] {
        let board = capture_position(rules);
        group.bench_function(format!("captures_{rules:?}"), |b| {
            b.iter(|| black_box(board.generate_moves()))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    for depth in [6, 8, 10] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = Board::new(Rules::Default, GameKind::Normal);
                let mut state = SearchState::new(DEFAULT_TT_MB);
                find_best_move(&mut board, &mut state, &SearchLimits::depth(depth))
            })
        });
    }

    for depth in [6, 8] {
        group.bench_with_input(BenchmarkId::new("captures", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = capture_position(Rules::Default);
                let mut state = SearchState::new(DEFAULT_TT_MB);
                find_best_move(&mut board, &mut state, &SearchLimits::depth(depth))
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", Board::new(Rules::Default, GameKind::Normal)),
        ("captures", capture_position(Rules::Default)),
    ];

    for (name, board) in positions {
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| black_box(board.evaluate()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_search,
    bench_eval
);
criterion_main!(benches);
