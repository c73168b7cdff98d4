use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pairmatch_core::*;

fn bench_deal(c: &mut Criterion) {
    let classic = GameConfig::classic();
    let large: Vec<Symbol> = (0..1024).map(|i| Symbol::new(format!("s{i}"))).collect();

    let mut group = c.benchmark_group("deal");
    group.bench_function("classic", |b| {
        let mut generator = ShuffledDeck::new(1);
        b.iter(|| generator.generate(black_box(&classic.symbols)))
    });
    group.bench_function("1024 symbols", |b| {
        let mut generator = ShuffledDeck::new(1);
        b.iter(|| generator.generate(black_box(&large)))
    });
    group.finish();
}

fn bench_play(c: &mut Criterion) {
    c.bench_function("play classic game", |b| {
        b.iter(|| {
            let mut engine =
                MatchEngine::new(GameConfig::classic(), OrderedDeck, ()).expect("classic config");
            for id in 0..8 {
                engine.select_card(id);
                engine.select_card(id + 8);
            }
            black_box(engine.final_stats())
        })
    });
}

criterion_group!(benches, bench_deal, bench_play);
criterion_main!(benches);
