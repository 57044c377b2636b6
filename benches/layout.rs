use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use signal_radar::ir::{Driver, MapVariant, Maturity, Polarity, Signal, SignalSet};
use signal_radar::{compute_layout, render_svg, LayoutConfig, Theme};
use std::hint::black_box;

fn generated_set(count: usize, variant: MapVariant) -> SignalSet {
    let mut set = SignalSet::new(variant);
    set.title = Some("Benchmark scan".to_string());
    for i in 0..count {
        set.signals.push(Signal {
            id: format!("signal-{i}"),
            name: format!("Benchmark signal number {i} with a label"),
            maturity: Maturity::ALL[i % Maturity::ALL.len()],
            driver: Driver::ORDER[i % Driver::ORDER.len()],
            polarity: if i % 3 == 0 {
                Polarity::Risk
            } else {
                Polarity::Opportunity
            },
        });
    }
    set
}

fn bench_layout(c: &mut Criterion) {
    let theme = Theme::light();
    let config = LayoutConfig::default();

    let mut group = c.benchmark_group("compute_layout");
    for count in [10usize, 40, 120] {
        let set = generated_set(count, MapVariant::Full);
        group.bench_with_input(BenchmarkId::new("full", count), &set, |b, set| {
            b.iter(|| compute_layout(black_box(set), &theme, &config));
        });
        let split = generated_set(count, MapVariant::Split);
        group.bench_with_input(BenchmarkId::new("split", count), &split, |b, set| {
            b.iter(|| compute_layout(black_box(set), &theme, &config));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let theme = Theme::light();
    let config = LayoutConfig::default();
    let set = generated_set(60, MapVariant::Full);
    let layout = compute_layout(&set, &theme, &config);

    c.bench_function("render_svg_60", |b| {
        b.iter(|| render_svg(black_box(&layout), &theme, &config));
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
