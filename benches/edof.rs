use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array3;
use sciimg_utils::image_utils::{compress_to_8bit, edof, DEFAULT_QUANTILE};
use sciimg_utils::logger;

fn generate_stack(depth: usize, width: usize, height: usize) -> Array3<u16> {
    Array3::from_shape_fn((depth, height, width), |(z, y, x)| ((x * (z + 1) + y) % 4096) as u16)
}

fn benchmark_edof_sizes(c: &mut Criterion) {
    logger::init_with_default("warn");
    let mut group = c.benchmark_group("edof_by_size");

    let sizes = vec![
        (256, 256, "256x256"),
        (512, 512, "512x512"),
        (1024, 1024, "1024x1024"),
    ];

    for (width, height, label) in sizes {
        let stack = generate_stack(8, width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &stack, |b, stack| {
            b.iter(|| edof(black_box(stack.view())));
        });
    }

    group.finish();
}

fn benchmark_compress(c: &mut Criterion) {
    let stack = generate_stack(4, 512, 512);

    c.bench_function("compress_to_8bit_4x512x512", |b| {
        b.iter(|| compress_to_8bit(black_box(stack.view()), DEFAULT_QUANTILE));
    });
}

criterion_group!(benches, benchmark_edof_sizes, benchmark_compress);
criterion_main!(benches);
