use criterion::{criterion_group, criterion_main, Criterion};
use scrabble_engine::{Lexicon, MaskCell, Rack};

const WORDS: &[&str] = &[
    "LE", "LA", "LES", "CES", "TES", "SEL", "ET", "TE", "ASSIS", "LIMASSE", "MINASSE", "SALINE",
    "ANIMES", "ZORRO", "EXPIRA", "DESK", "ETIOLENT",
];

fn bench_from_words(c: &mut Criterion) {
    c.bench_function("lexicon.from_words", |b| {
        b.iter(|| Lexicon::from_words(WORDS).unwrap())
    });
}

fn bench_contains(c: &mut Criterion) {
    let lexicon = Lexicon::from_words(WORDS).unwrap();
    c.bench_function("lexicon.contains", |b| {
        b.iter(|| lexicon.contains("LIMASSE").unwrap())
    });
}

fn bench_complete_one_blank(c: &mut Criterion) {
    let lexicon = Lexicon::from_words(WORDS).unwrap();
    c.bench_function("lexicon.complete_one_blank", |b| {
        b.iter(|| lexicon.complete_one_blank(" ES").unwrap())
    });
}

fn bench_masked_rack_search(c: &mut Criterion) {
    let lexicon = Lexicon::from_words(WORDS).unwrap();
    let mask = vec![MaskCell::Open; 7];
    let rack: Rack = "LESATI*".parse().unwrap();
    c.bench_function("lexicon.masked_rack_search", |b| {
        b.iter(|| lexicon.masked_rack_search(&mask, &rack, 2))
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_from_words(c);
    bench_contains(c);
    bench_complete_one_blank(c);
    bench_masked_rack_search(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
