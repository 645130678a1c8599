use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memedo_catalog::{CaptionSlot, TemplateRegistry};
use memedo_core::FrameBuffer;
use memedo_render::{wrap_text, TextRenderer};

const LONG_CAPTION: &str = "India vs Sri Lanka test match. India is playing really well and is \
about to win the match. Just then the set batsmen tries to hit a big shot and is caught out.";

fn bench_wrap(c: &mut Criterion) {
    c.bench_function("wrap_text_22_columns", |b| {
        b.iter(|| wrap_text(black_box(LONG_CAPTION), Some(22)))
    });
}

fn bench_overlay(c: &mut Criterion) {
    let renderer = TextRenderer::default();
    let mut group = c.benchmark_group("caption_overlay");
    group.sample_size(20);

    let flat = CaptionSlot::new("opinion", 50, 450, 30.0).white().wrap(40);
    group.bench_function("flat_640x640", |b| {
        b.iter(|| renderer.render_overlay(640, 640, &flat, black_box(LONG_CAPTION)))
    });

    let rotated = CaptionSlot::new("opinion", 500, 385, 30.0).wrap(22).rotate(20.0);
    group.bench_function("rotated_640x640", |b| {
        b.iter(|| renderer.render_overlay(640, 640, &rotated, black_box(LONG_CAPTION)))
    });

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let renderer = TextRenderer::default();
    let registry = TemplateRegistry::builtin().expect("builtin catalog is valid");
    let template = registry.resolve(13).expect("Bike_Fall is registered");

    let overlays: Vec<FrameBuffer> = template
        .caption_slots
        .iter()
        .map(|slot| renderer.render_overlay(640, 640, slot, "Saturday").expect("overlay renders"))
        .collect();
    let base = FrameBuffer::solid(640, 640, [240, 240, 240, 255]);

    c.bench_function("composite_three_slots", |b| {
        b.iter(|| {
            let mut canvas = base.clone();
            for overlay in &overlays {
                canvas.composite_over(overlay, 0, 0);
            }
            canvas.flatten()
        })
    });
}

criterion_group!(benches, bench_wrap, bench_overlay, bench_composite);
criterion_main!(benches);
