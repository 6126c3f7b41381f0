use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use buscaminas_core::{BoardConfig, FieldGenerator, Game, MineField, RandomFieldGenerator};

fn generation(c: &mut Criterion) {
    let config = BoardConfig::new(16, 30, 99).unwrap();
    c.bench_function("generate_hard_board", |b| {
        b.iter(|| RandomFieldGenerator::new(black_box(7)).generate(config));
    });
}

fn flood_reveal(c: &mut Criterion) {
    let field = MineField::from_mine_coords((120, 120), &[]).unwrap();
    c.bench_function("flood_reveal_120x120", |b| {
        b.iter(|| {
            let mut game = Game::new(&field);
            game.click((0, 0));
            black_box(game)
        });
    });
}

criterion_group!(benches, generation, flood_reveal);
criterion_main!(benches);
