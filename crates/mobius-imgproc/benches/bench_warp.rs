use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use mobius_image::{Image, ImageSize};
use mobius_imgproc::{
    coords::PixelCoord,
    interpolation::InterpolationMode,
    parallel::ExecutionStrategy,
    shift::shift_longitude,
    transform::{rotation_sending_pixel_to_pixel, zoom_at_pixel},
    warp::{apply_transform, WarpOptions},
    zoom::{zoom_loop_frame, ZoomLoopParams},
};

fn test_image(width: usize) -> Image<u8, 3> {
    Image::from_fn(ImageSize::equirectangular(width), |x, y| {
        [(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8]
    })
}

fn bench_apply_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("ApplyTransform");

    for width in [512, 1024, 2048].iter() {
        let size = ImageSize::equirectangular(*width);
        group.throughput(criterion::Throughput::Elements((size.width * size.height) as u64));

        let parameter_string = format!("{}", size);

        let image = test_image(*width);
        let x = *width as f64;
        let m = rotation_sending_pixel_to_pixel(
            PixelCoord::new(0.5 * x, 0.25 * x),
            PixelCoord::new(0.1 * x, 0.3 * x),
            *width,
        )
        .unwrap();

        for (name, interpolation, strategy) in [
            ("bilinear_rows", InterpolationMode::Bilinear, ExecutionStrategy::ParallelRows),
            ("bilinear_pixels", InterpolationMode::Bilinear, ExecutionStrategy::ParallelPixels),
            ("nearest_rows", InterpolationMode::Nearest, ExecutionStrategy::ParallelRows),
            ("bilinear_serial", InterpolationMode::Bilinear, ExecutionStrategy::Serial),
        ] {
            let options = WarpOptions {
                interpolation,
                strategy,
            };
            group.bench_with_input(
                BenchmarkId::new(name, &parameter_string),
                &(&image, m),
                |b, i| {
                    let (src, m) = (i.0, i.1);
                    b.iter(|| {
                        black_box(apply_transform(
                            black_box(&m),
                            black_box(src),
                            None,
                            black_box(&options),
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("Zoom");

    for width in [512, 1024].iter() {
        let size = ImageSize::equirectangular(*width);
        group.throughput(criterion::Throughput::Elements((size.width * size.height) as u64));

        let parameter_string = format!("{}", size);

        let outer = test_image(*width);
        let inner = test_image(*width);
        let center = PixelCoord::new(0.5 * *width as f64, 0.25 * *width as f64);

        let m = zoom_at_pixel(center, 4.0, *width).unwrap();
        group.bench_with_input(
            BenchmarkId::new("zoom_at_pixel", &parameter_string),
            &(&outer, m),
            |b, i| {
                let (src, m) = (i.0, i.1);
                b.iter(|| {
                    black_box(apply_transform(
                        black_box(&m),
                        black_box(src),
                        None,
                        &WarpOptions::default(),
                    ))
                })
            },
        );

        let params = ZoomLoopParams::new(center, 4.0, 0.3, 0.5).unwrap();
        group.bench_with_input(
            BenchmarkId::new("zoom_loop_frame", &parameter_string),
            &(&outer, &inner, params),
            |b, i| {
                let (outer, inner, params) = (i.0, i.1, i.2);
                b.iter(|| {
                    black_box(zoom_loop_frame(
                        black_box(outer),
                        black_box(inner),
                        black_box(&params),
                        None,
                        &WarpOptions::default(),
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("ShiftLongitude");

    for width in [1024, 4096].iter() {
        let image = test_image(*width);
        let parameter_string = format!("{}", image.size());

        group.bench_with_input(
            BenchmarkId::new("par_rows", &parameter_string),
            &image,
            |b, src| b.iter(|| black_box(shift_longitude(black_box(src), *width / 3, 10))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_apply_transform, bench_zoom, bench_shift);
criterion_main!(benches);
