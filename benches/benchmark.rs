use criterion::{criterion_group, criterion_main, Criterion};
use scaffold_match::{prepare_text, Bm25Ranker, Document};

/// tiny deterministic PRNG (xorshift32), keeps the corpus reproducible
struct Rng(u32);
impl Rng {
    fn new(seed: u32) -> Self {
        Self(seed)
    }
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

const VOCAB: &[&str] = &[
    "excel", "word", "powerpoint", "outlook", "teams", "taskpane", "add-in", "custom", "function",
    "formula", "bot", "tab", "message", "extension", "slide", "generator", "mail", "calendar",
    "spreadsheet", "document", "presentation", "channel", "notification", "dashboard", "chart",
    "template", "sample", "starter", "widget", "connector",
];

fn synthetic_corpus(doc_count: usize) -> Vec<Document<usize>> {
    let mut rng = Rng::new(0x5EED_1234);
    (0..doc_count)
        .map(|i| {
            let len = 8 + (rng.next_u32() % 24) as usize;
            let words: Vec<&str> = (0..len)
                .map(|_| VOCAB[(rng.next_u32() as usize) % VOCAB.len()])
                .collect();
            Document::new(words.join(" "), i)
        })
        .collect()
}

fn build_and_search_benchmark(c: &mut Criterion) {
    let docs = synthetic_corpus(500);

    c.bench_function("build_corpus_500", |b| {
        b.iter(|| Bm25Ranker::build(docs.clone()));
    });

    let ranker = Bm25Ranker::build(docs);
    let query = prepare_text("custom Excel function for a spreadsheet dashboard");

    c.bench_function("search_top5_500", |b| {
        b.iter(|| ranker.search(&query, 5));
    });

    c.bench_function("prepare_text", |b| {
        b.iter(|| prepare_text("Create a PowerPoint slide generator add-in with charts"));
    });
}

criterion_group!(benches, build_and_search_benchmark);
criterion_main!(benches);
