use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use packed_bitset::{Bitset, EMBED_BITS, WORD_BITS};
use std::hint::black_box;

type Bs = Bitset<4>;

fn filled(len: usize) -> Bs {
    (0..len).map(|i| i % 3 == 0).collect()
}

fn bench_field_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_access");

    group.bench_function("get_embedded", |b| {
        let bs = filled(EMBED_BITS);
        let mut i = 0;
        b.iter(|| {
            black_box(bs.get(black_box((i % (EMBED_BITS - 13)) as isize), 13).ok());
            i += 1;
        });
    });

    group.bench_function("get_heap", |b| {
        let bs = filled(10_000);
        let mut i = 0;
        b.iter(|| {
            black_box(bs.get(black_box((i * 7 % 9_900) as isize), WORD_BITS).ok());
            i += 1;
        });
    });

    group.bench_function("set_in_place", |b| {
        let mut bs = filled(10_000);
        let mut i = 0;
        b.iter(|| {
            let _ = bs.set_bits(black_box((i * 7 % 9_900) as isize), 17, black_box(i), 17);
            i += 1;
        });
    });

    group.bench_function("push_pop", |b| {
        let mut bs = filled(1_000);
        b.iter(|| {
            let _ = bs.push(black_box(0x2a), 9);
            black_box(bs.pop(9).ok());
        });
    });

    group.finish();
}

fn bench_slide(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide");

    for len in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("insert_remove_front", len), &len, |b, &len| {
            let mut bs = filled(len);
            b.iter(|| {
                let _ = bs.slide(black_box(3), 37);
                let _ = bs.slide(black_box(3), -37);
            });
        });

        group.bench_with_input(BenchmarkId::new("splice_resize", len), &len, |b, &len| {
            let mut bs = filled(len);
            b.iter(|| {
                let _ = bs.set_bits(black_box(5), 4, 0b1, 12);
                let _ = bs.set_bits(black_box(5), 12, 0b1, 4);
            });
        });
    }

    group.finish();
}

fn bench_combinators(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinators");

    for len in [64, 1_000, 10_000] {
        let a = filled(len);
        let other = filled(len / 2 + 5);

        group.bench_with_input(BenchmarkId::new("msb_xor", len), &len, |b, _| {
            b.iter(|| {
                let mut x = a.clone();
                let _ = x.msb_xor(black_box(&other));
                black_box(x)
            });
        });

        group.bench_with_input(BenchmarkId::new("lsb_xor", len), &len, |b, _| {
            b.iter(|| {
                let mut x = a.clone();
                let _ = x.lsb_xor(black_box(&other));
                black_box(x)
            });
        });

        group.bench_with_input(BenchmarkId::new("hamming", len), &len, |b, _| {
            b.iter(|| black_box(a.hamming(black_box(&other))));
        });
    }

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    let bs = filled(10_003);

    group.bench_function("reflect", |b| b.iter(|| black_box(bs.reflected())));
    group.bench_function("negate", |b| b.iter(|| black_box(bs.negated())));
    group.bench_function("flip", |b| b.iter(|| black_box(bs.flipped())));
    group.bench_function("count_ones", |b| b.iter(|| black_box(bs.count_ones())));
    group.bench_function("trailing_zeros", |b| b.iter(|| black_box(bs.trailing_zeros())));

    group.finish();
}

fn bench_digests(c: &mut Criterion) {
    let mut group = c.benchmark_group("digests");

    for len in [100, 10_000] {
        let bs = filled(len);
        group.bench_with_input(BenchmarkId::new("crc", len), &bs, |b, bs| {
            b.iter(|| black_box(bs.crc()));
        });
        group.bench_with_input(BenchmarkId::new("hexdigest", len), &bs, |b, bs| {
            b.iter(|| black_box(bs.hexdigest()));
        });
        group.bench_with_input(BenchmarkId::new("bindigest", len), &bs, |b, bs| {
            b.iter(|| black_box(bs.bindigest()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_field_access,
    bench_slide,
    bench_combinators,
    bench_transforms,
    bench_digests
);
criterion_main!(benches);
