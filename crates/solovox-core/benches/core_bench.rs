//! Criterion benchmarks for solovox-core primitives
//!
//! Run with: cargo bench -p solovox-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use solovox_core::{EnvelopeGenerator, EnvelopeParams, OnePole, WavetableBank, Waveform};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("EnvelopeGenerator");

    for &block_size in BLOCK_SIZES {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, EnvelopeParams::default());
        env.gate_on();

        group.bench_with_input(
            BenchmarkId::new("advance", block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for _ in 0..size {
                        sum += env.advance();
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

fn bench_one_pole(c: &mut Criterion) {
    let mut group = c.benchmark_group("OnePole");

    for &block_size in BLOCK_SIZES {
        let mut lp = OnePole::new(SAMPLE_RATE, 500.0);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for i in 0..size {
                        sum += lp.process(if i % 2 == 0 { 1.0 } else { -1.0 });
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

fn bench_wavetable_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("Wavetable");
    let bank = WavetableBank::new();

    for waveform in [Waveform::Sine, Waveform::Sawtooth, Waveform::Triangle] {
        group.bench_function(format!("{waveform:?}"), |b| {
            let table = bank.table(waveform);
            let mut phase = 0usize;
            b.iter(|| {
                let sample = table.at(phase);
                phase = phase.wrapping_add(41);
                black_box(sample)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_envelope, bench_one_pole, bench_wavetable_lookup);
criterion_main!(benches);
