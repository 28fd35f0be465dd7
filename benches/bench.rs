//! Criterion benchmarks for the Kirigami analysis filters.
//!
//! Covers the two stream transducers and the end-to-end pipeline:
//! - Word delimiter splitting over product-title style text
//! - Auto phrase aggregation over prose with embedded phrases
//! - Phrase dictionary lookup
//! - Full tokenizer + filter chain

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use kirigami::analysis::analyzer::Analyzer;
use kirigami::analysis::analyzer::pipeline::PipelineAnalyzer;
use kirigami::analysis::token::Token;
use kirigami::analysis::token_filter::auto_phrase::{
    AutoPhraseFilter, AutoPhraseStream, PhraseDictionary,
};
use kirigami::analysis::token_filter::word_delimiter::{
    WordDelimiterConfig, WordDelimiterFilter, WordDelimiterStream,
};
use kirigami::analysis::token_source::{VecTokenSource, collect_tokens};
use kirigami::analysis::tokenizer::Tokenizer;
use kirigami::analysis::tokenizer::whitespace::WhitespaceTokenizer;

/// Generate product-title style words that exercise every split rule.
fn generate_compound_tokens(count: usize) -> Vec<Token> {
    let words = [
        "Wi-Fi",
        "PowerShot",
        "SD500",
        "ultra-compact",
        "XL500-42",
        "O'Neil's",
        "plain",
        "catalog",
        "A1-B2-C3",
        "TurboMax",
    ];

    let mut tokens = Vec::with_capacity(count);
    let mut offset = 0;
    for i in 0..count {
        let word = words[(i * 7) % words.len()];
        let len = word.chars().count();
        tokens.push(Token::with_offsets(word, i, offset, offset + len));
        offset += len + 1;
    }
    tokens
}

/// Generate prose tokens with phrase material sprinkled in.
fn generate_prose_tokens(count: usize) -> Vec<Token> {
    let words = [
        "the", "new", "york", "city", "report", "covers", "air", "traffic", "control", "and",
        "wheel", "chair", "access", "near", "big", "apple", "offices",
    ];

    let mut tokens = Vec::with_capacity(count);
    let mut offset = 0;
    for i in 0..count {
        let word = words[(i * 5 + i / 3) % words.len()];
        let len = word.chars().count();
        tokens.push(Token::with_offsets(word, i, offset, offset + len));
        offset += len + 1;
    }
    tokens
}

fn phrase_dictionary(extra: usize) -> Arc<PhraseDictionary> {
    let mut phrases = vec![
        "new york".to_string(),
        "new york city".to_string(),
        "air traffic control".to_string(),
        "wheel chair".to_string(),
        "big apple".to_string(),
    ];
    for i in 0..extra {
        phrases.push(format!("filler{i} phrase{i}"));
    }
    Arc::new(PhraseDictionary::new(phrases).unwrap())
}

fn bench_word_delimiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_delimiter");

    let config = WordDelimiterConfig {
        generate_word_parts: true,
        generate_number_parts: true,
        catenate_words: true,
        split_on_case_change: true,
        split_on_numerics: true,
        stem_english_possessive: true,
        ..Default::default()
    };

    for size in [100, 1000] {
        let tokens = generate_compound_tokens(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("split_{size}_tokens"), |b| {
            b.iter(|| {
                let source = VecTokenSource::new(black_box(tokens.clone()));
                let mut stream = WordDelimiterStream::new(source, config.clone());
                black_box(collect_tokens(&mut stream).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_auto_phrase(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_phrase");

    let dictionary = phrase_dictionary(0);

    for size in [100, 1000] {
        let tokens = generate_prose_tokens(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("replace_{size}_tokens"), |b| {
            b.iter(|| {
                let source = VecTokenSource::new(black_box(tokens.clone()));
                let mut stream =
                    AutoPhraseStream::new(source, dictionary.clone(), false)
                        .with_replace_whitespace('_');
                black_box(collect_tokens(&mut stream).unwrap())
            })
        });
        group.bench_function(format!("dual_emit_{size}_tokens"), |b| {
            b.iter(|| {
                let source = VecTokenSource::new(black_box(tokens.clone()));
                let mut stream = AutoPhraseStream::new(source, dictionary.clone(), true);
                black_box(collect_tokens(&mut stream).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_phrase_dictionary(c: &mut Criterion) {
    let mut group = c.benchmark_group("phrase_dictionary");

    let large = phrase_dictionary(10_000);

    group.bench_function("lookup_10k", |b| {
        b.iter(|| {
            let hit = large.candidates(black_box("new"));
            let miss = large.candidates(black_box("absent"));
            black_box((hit, miss))
        })
    });

    group.bench_function("build_1k", |b| {
        b.iter(|| black_box(phrase_dictionary(1000)))
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
        .add_filter(Arc::new(WordDelimiterFilter::new(WordDelimiterConfig {
            generate_word_parts: true,
            generate_number_parts: true,
            split_on_case_change: true,
            split_on_numerics: true,
            ..Default::default()
        })))
        .add_filter(Arc::new(
            AutoPhraseFilter::new(phrase_dictionary(0), false).with_replace_whitespace('_'),
        ));

    let text = generate_prose_tokens(200)
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("analyze_prose", |b| {
        b.iter(|| {
            let tokens: Vec<Token> = analyzer.analyze(black_box(&text)).unwrap().collect();
            black_box(tokens)
        })
    });

    let tokenizer = WhitespaceTokenizer::new();
    group.bench_function("tokenize_only", |b| {
        b.iter(|| {
            let tokens: Vec<Token> = tokenizer.tokenize(black_box(&text)).unwrap().collect();
            black_box(tokens)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_word_delimiter,
    bench_auto_phrase,
    bench_phrase_dictionary,
    bench_pipeline
);

criterion_main!(benches);
