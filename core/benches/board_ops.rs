use core::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use memoria_core::{BoardState, DeckGenerator, ResolveOutcome, ShuffledDeckGenerator};

fn deck_generation(c: &mut Criterion) {
    c.bench_function("deck_shuffle_10x10", |b| {
        b.iter(|| ShuffledDeckGenerator::new(black_box(42)).generate((10, 10), 40))
    });
}

fn full_board_play_through(c: &mut Criterion) {
    c.bench_function("flip_resolve_4x4", |b| {
        b.iter(|| {
            let deck = ShuffledDeckGenerator::new(black_box(7)).generate((4, 4), 40);
            let mut board = BoardState::from_deck((4, 4), deck);

            // Flip every pair by scanning for each tile's two positions.
            for tile in 0..board.pair_count() {
                for y in 0..4 {
                    for x in 0..4 {
                        if board.cell_at((x, y)).tile_index() == Some(tile)
                            && !board.cell_at((x, y)).is_matched()
                        {
                            board.flip((x, y));
                        }
                    }
                }
                assert_ne!(board.resolve(), ResolveOutcome::NoChange);
            }
            assert!(board.is_complete());
            board
        })
    });
}

criterion_group!(benches, deck_generation, full_board_play_through);
criterion_main!(benches);
