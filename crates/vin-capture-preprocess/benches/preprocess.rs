use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vin_capture_core::FrameBuffer;
use vin_capture_preprocess::{preprocess, ContrastLevel, KernelSize, PreprocessConfig};

/// Scan-band sized frame (280 x 86 at 720p) with synthetic glyph bars.
fn band_frame() -> FrameBuffer {
    let (w, h) = (280, 86);
    let mut frame = FrameBuffer::filled(w, h, [214, 210, 205, 255]).expect("frame");
    for y in 20..66 {
        for x in (8..w - 8).step_by(16) {
            for dx in 0..4 {
                frame.set_pixel(x + dx, y, [38, 40, 52, 255]);
            }
        }
    }
    frame
}

fn bench_preprocess(c: &mut Criterion) {
    let frame = band_frame();

    let default_cfg = PreprocessConfig::default();
    c.bench_function("preprocess/default", |b| {
        b.iter(|| preprocess(black_box(frame.clone()), &default_cfg))
    });

    let global_cfg = PreprocessConfig {
        contrast: ContrastLevel::High,
        ..PreprocessConfig::default()
    };
    c.bench_function("preprocess/global_contrast", |b| {
        b.iter(|| preprocess(black_box(frame.clone()), &global_cfg))
    });

    let heavy_cfg = PreprocessConfig {
        kernel_size: KernelSize::K7,
        unsharp_mask: true,
        ..PreprocessConfig::default()
    };
    c.bench_function("preprocess/k7_unsharp", |b| {
        b.iter(|| preprocess(black_box(frame.clone()), &heavy_cfg))
    });
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
