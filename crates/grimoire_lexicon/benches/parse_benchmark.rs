//! Benchmark for prompt parsing.
//!
//! TARGET: parsing is noise next to geometry; a few microseconds per prompt
//!
//! Run with: cargo bench --package grimoire_lexicon --bench parse_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use grimoire_lexicon::{parse_character, parse_scene};

const SCENE_PROMPTS: [&str; 4] = [
    "a haunted twisted cathedral glowing red",
    "a melting glass orb floating in misty moonlight",
    "giant fractured obsidian pyramid with embers and a glitch",
    "",
];

const CHARACTER_PROMPTS: [&str; 3] = [
    "a tiny furry creature",
    "a lopsided horned demon with glowing eyes and steel armor",
    "a dancing wizard named Merlin who can jump",
];

fn benchmark_scene_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_parse");
    group.throughput(Throughput::Elements(SCENE_PROMPTS.len() as u64));

    group.bench_function("mixed_prompts", |b| {
        b.iter(|| {
            for prompt in SCENE_PROMPTS {
                black_box(parse_scene(black_box(prompt)));
            }
        });
    });

    group.finish();
}

fn benchmark_character_parse(c: &mut Criterion) {
    c.bench_function("character_parse", |b| {
        b.iter(|| {
            for prompt in CHARACTER_PROMPTS {
                black_box(parse_character(black_box(prompt)));
            }
        });
    });
}

criterion_group!(benches, benchmark_scene_parse, benchmark_character_parse);
criterion_main!(benches);
