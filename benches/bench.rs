//! Criterion benchmarks for lexstat.
//!
//! Covers the scanner over in-memory text, over encoded byte streams with a
//! small read window, and the full statistics pass.

use std::hint::black_box;
use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lexstat::analysis::language::russian;
use lexstat::analysis::scanner::ScanConfig;
use lexstat::analysis::source::Encoding;
use lexstat::stats::analyzer::RussianAnalyzer;

/// Generate Russian prose for benchmarking.
fn generate_text(sentences: usize) -> String {
    let words = [
        "текст",
        "слово",
        "предложение",
        "читатель",
        "анализ",
        "длинный",
        "короткий",
        "простой",
        "сложный",
        "индекс",
        "оценка",
        "т.е.",
        "кто-то",
        "2024",
        "«цитата»",
        "мир,",
    ];

    let mut text = String::new();
    for i in 0..sentences {
        let length = 5 + (i % 12);
        for j in 0..length {
            let word = words[(i * 7 + j * 13) % words.len()];
            if j == 0 {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    text.extend(first.to_uppercase());
                    text.push_str(chars.as_str());
                }
            } else {
                text.push(' ');
                text.push_str(word);
            }
        }
        text.push_str(if i % 5 == 4 { "?! " } else { ". " });
    }
    text
}

/// Encode text as windows-1251 bytes. Only covers the characters
/// `generate_text` produces.
fn encode_windows_1251(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            'а'..='я' => (ch as u32 - 'а' as u32 + 0xE0) as u8,
            'А'..='Я' => (ch as u32 - 'А' as u32 + 0xC0) as u8,
            '«' => 0xAB,
            '»' => 0xBB,
            _ => ch as u8,
        })
        .collect()
}

/// Benchmark scanning in-memory text.
fn bench_scan_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_text");
    let scanner = russian::scanner();

    for sentences in [10, 100, 1000] {
        let text = generate_text(sentences);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sentences), &text, |b, text| {
            b.iter(|| {
                let tokens = scanner.scan_text(black_box(text)).unwrap();
                black_box(tokens)
            })
        });
    }

    group.finish();
}

/// Benchmark decoding and scanning byte streams through windows of
/// different sizes.
fn bench_scan_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_reader");
    let text = generate_text(500);
    let bytes = encode_windows_1251(&text);
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    for window in [64, 512, 4096] {
        let scanner =
            russian::scanner_with_config(ScanConfig::default().with_max_token_len(window));
        group.bench_with_input(BenchmarkId::new("windows-1251", window), &bytes, |b, bytes| {
            b.iter(|| {
                let tokens = scanner
                    .scan_reader(Cursor::new(black_box(bytes.as_slice())), Encoding::Windows1251)
                    .unwrap();
                black_box(tokens)
            })
        });
    }

    group.finish();
}

/// Benchmark the full statistics pass over scanned tokens.
fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let tokens = russian::scanner().scan_text(&generate_text(1000)).unwrap();

    group.bench_function("counts_and_indices", |b| {
        b.iter_with_setup(
            || RussianAnalyzer::from_tokens(tokens.clone()),
            |analyzer| {
                let counts = analyzer.counts();
                let fres = analyzer.fres().unwrap();
                black_box((counts, fres))
            },
        )
    });

    group.bench_function("hardest_sentence", |b| {
        let analyzer = RussianAnalyzer::from_tokens(tokens.clone());
        b.iter(|| black_box(analyzer.hardest_sentence(lexstat::stats::ReadabilityIndex::Fkgl)))
    });

    group.finish();
}

criterion_group!(benches, bench_scan_text, bench_scan_reader, bench_statistics);

criterion_main!(benches);
