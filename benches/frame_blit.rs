use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mandelbrot_viewer::adapters::frame_blit::blit_rgba;
use mandelbrot_viewer::core::data::decoded_image::DecodedImage;

fn bench_blit(c: &mut Criterion) {
    let mut group = c.benchmark_group("blit_rgba");

    for &(width, height) in &[(800u32, 600u32), (1280, 768), (3840, 2160)] {
        let rgba = vec![128u8; width as usize * height as usize * 4];
        let image = DecodedImage::from_rgba(width, height, rgba).expect("sized buffer");
        let mut frame = vec![0u8; width as usize * height as usize * 4];

        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &image,
            |b, image| {
                b.iter(|| blit_rgba(black_box(image), &mut frame, width, height))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_blit);
criterion_main!(benches);
