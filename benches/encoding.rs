use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qrcraft::{encode, ECLevel, MaskPattern, QRBuilder};
use std::hint::black_box;

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let payloads = [
        ("HELLO".to_string(), "short"),
        ("https://example.com/some/long/path?query=value&other=1".repeat(4), "medium"),
        ("a".repeat(2331), "v40"),
    ];

    for (data, name) in payloads.iter() {
        group.throughput(Throughput::Bytes(data.len() as u64));

        for ecl in [ECLevel::L, ECLevel::H] {
            // Version 40 at H holds at most 1273 bytes
            let data = if ecl == ECLevel::H { &data[..data.len().min(1273)] } else { &data[..] };
            group.bench_with_input(BenchmarkId::new(format!("{ecl:?}"), name), data, |b, data| {
                b.iter(|| black_box(encode(black_box(data), ecl).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_forced_mask(c: &mut Criterion) {
    let data = "a".repeat(1000);
    c.bench_function("encode_forced_mask", |b| {
        b.iter(|| {
            let symbol = QRBuilder::new(black_box(data.as_bytes()))
                .mask(MaskPattern::new(0))
                .build()
                .unwrap();
            black_box(symbol)
        });
    });
}

criterion_group!(benches, bench_encode, bench_forced_mask);
criterion_main!(benches);
