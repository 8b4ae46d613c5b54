//! Benchmark comparison between `Bitset` and bitvec's `BitVec<usize, Msb0>`,
//! which uses the same word layout.

use bitvec::prelude::*;
use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use packed_bitset::Bitset;

type Bs = Bitset<4>;

const SIZES: &[usize] = &[10, 100, 1000, 10000];

fn pattern(size: usize) -> Vec<bool> {
    (0..size).map(|i| i % 3 == 0).collect()
}

fn bench_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("creation");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Bitset", size), &size, |b, &size| {
            b.iter(|| {
                let mut bs = Bs::with_capacity(size);
                let _ = bs.resize(size);
                black_box(&mut bs);
            });
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &size, |b, &size| {
            b.iter(|| {
                let mut bv = BitVec::<usize, Msb0>::with_capacity(size);
                bv.resize(size, false);
                black_box(&mut bv);
            });
        });
    }

    group.finish();
}

fn bench_field_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_load");

    for &size in &[100, 1000, 10000] {
        group.throughput(Throughput::Elements(1000));
        let bits = pattern(size);
        let ours = Bs::from_bools(&bits);
        let theirs: BitVec<usize, Msb0> = bits.iter().copied().collect();
        let offsets: Vec<usize> = (0..1000).map(|i| i * 13 % (size - 24)).collect();

        group.bench_with_input(BenchmarkId::new("Bitset", size), &offsets, |b, offsets| {
            b.iter(|| {
                let sum = offsets
                    .iter()
                    .filter_map(|&i| ours.get(i as isize, 24).ok())
                    .fold(0usize, usize::wrapping_add);
                black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &offsets, |b, offsets| {
            b.iter(|| {
                let sum = offsets
                    .iter()
                    .map(|&i| theirs[i..i + 24].load_be::<usize>())
                    .fold(0usize, usize::wrapping_add);
                black_box(sum);
            });
        });
    }

    group.finish();
}

fn bench_insert_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_range");

    for &size in &[100, 1000, 10000] {
        let bits = pattern(size);

        group.bench_with_input(BenchmarkId::new("Bitset", size), &bits, |b, bits| {
            b.iter(|| {
                let mut bs = Bs::from_bools(bits);
                let _ = bs.slide(black_box(7), 40);
                black_box(bs);
            });
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &bits, |b, bits| {
            b.iter(|| {
                let mut bv: BitVec<usize, Msb0> = bits.iter().copied().collect();
                bv.splice(black_box(7)..7, core::iter::repeat_n(false, 40));
                black_box(bv);
            });
        });
    }

    group.finish();
}

fn bench_count_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_ones");

    for &size in &[100, 1000, 10000] {
        let bits = pattern(size);
        let ours = Bs::from_bools(&bits);
        let theirs: BitVec<usize, Msb0> = bits.iter().copied().collect();

        group.bench_with_input(BenchmarkId::new("Bitset", size), &ours, |b, bs| {
            b.iter(|| black_box(bs.count_ones()));
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &theirs, |b, bv| {
            b.iter(|| black_box(bv.count_ones()));
        });
    }

    group.finish();
}

fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");

    for &size in &[100, 1000, 10000] {
        let bits = pattern(size);
        let ours = Bs::from_bools(&bits);
        let theirs: BitVec<usize, Msb0> = bits.iter().copied().collect();

        group.bench_with_input(BenchmarkId::new("Bitset", size), &ours, |b, bs| {
            b.iter(|| black_box(bs.reflected()));
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &theirs, |b, bv| {
            b.iter(|| {
                let mut copy = bv.clone();
                copy.reverse();
                black_box(copy)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_creation,
    bench_field_load,
    bench_insert_range,
    bench_count_ones,
    bench_reverse,
);
criterion_main!(benches);
