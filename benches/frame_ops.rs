use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gifcap::primitives::frame_ops::{crop_rgba, downsample_rgba};
use gifcap::Region;

fn make_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut rgba = vec![0u8; (width * height * 4) as usize];
    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 4) as usize;
            rgba[idx] = (x % 255) as u8;
            rgba[idx + 1] = (y % 255) as u8;
            rgba[idx + 2] = 128;
            rgba[idx + 3] = 255;
        }
    }
    rgba
}

fn bench_downsample(c: &mut Criterion) {
    let rgba = make_rgba(1920, 1080);
    c.bench_function("downsample_1080p_by_2", |b| {
        b.iter(|| {
            downsample_rgba(black_box(rgba.clone()), 1920, 1080, 2).expect("downsample")
        })
    });
}

fn bench_crop(c: &mut Criterion) {
    let rgba = make_rgba(1920, 1080);
    let region = Region::new(320, 180, 1280, 720);
    c.bench_function("crop_720p_from_1080p", |b| {
        b.iter(|| crop_rgba(black_box(&rgba), 1920, 1080, region).expect("crop"))
    });
}

criterion_group!(benches, bench_downsample, bench_crop);
criterion_main!(benches);
