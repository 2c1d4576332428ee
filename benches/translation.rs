//! Translation benchmarks

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use paged_memory::{MemoryConfig, MemoryManager};

fn loaded_manager() -> MemoryManager {
    let mut mm = MemoryManager::new(MemoryConfig::new(1 << 20, 256, 1 << 16)).unwrap();
    for pid in 0..16 {
        mm.create_process(pid, 1 << 16).unwrap();
    }
    mm
}

fn bench_read_by_logical_address(c: &mut Criterion) {
    let mm = loaded_manager();
    c.bench_function("read_by_logical_address", |b| {
        let mut address = 0usize;
        b.iter(|| {
            address = (address + 257) % (1 << 16);
            black_box(mm.read_by_logical_address(black_box(7), address).unwrap())
        })
    });
}

fn bench_create_process(c: &mut Criterion) {
    c.bench_function("create_process", |b| {
        b.iter(|| {
            let mut mm = MemoryManager::new(MemoryConfig::new(1 << 16, 64, 1 << 12)).unwrap();
            mm.create_process(black_box(1), black_box(4096)).unwrap();
            mm
        })
    });
}

criterion_group!(benches, bench_read_by_logical_address, bench_create_process);
criterion_main!(benches);
