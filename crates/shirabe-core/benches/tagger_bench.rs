use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shirabe_core::parser::{CrfTagger, HeuristicParser, Tokenizer};

const INPUTS: &[&str] = &[
    "[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].mkv",
    "[Erai-raws] Shingeki no Kyojin - The Final Season - 28v2 [1080p][HEVC].mkv",
    "[Judas] Golden Kamuy S3 - 01-12 (1080p) [Batch]",
    "One.Piece.1084.VOSTFR.1080p.WEB.x264-AAC.mkv",
    "Movie.Title.2020.1080p.BluRay.x264-GROUP.mkv",
];

fn bench_tokenizer(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();

    c.bench_function("tokenize_single", |b| {
        b.iter(|| tokenizer.tokenize(black_box(INPUTS[0])));
    });
}

fn bench_heuristic_parse(c: &mut Criterion) {
    let parser = HeuristicParser::new().unwrap();

    c.bench_function("heuristic_parse_single", |b| {
        b.iter(|| parser.parse(black_box(INPUTS[0])));
    });

    c.bench_function("heuristic_parse_batch_5", |b| {
        b.iter(|| {
            for input in INPUTS {
                let _ = parser.parse(black_box(input));
            }
        });
    });
}

fn bench_crf_parse(c: &mut Criterion) {
    let tagger = CrfTagger::with_reference_weights();

    c.bench_function("crf_parse_single", |b| {
        b.iter(|| tagger.parse(black_box(INPUTS[0])).unwrap());
    });

    c.bench_function("crf_parse_batch_5", |b| {
        b.iter(|| {
            for input in INPUTS {
                let _ = tagger.parse(black_box(input)).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_tokenizer, bench_heuristic_parse, bench_crf_parse);
criterion_main!(benches);
