//! Insert and scan benchmarks.
//!
//! A table holds at most 20 rows before a leaf under the root fills up, so
//! every iteration builds a fresh table from scratch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use leafdb::{Row, Table};
use tempfile::tempdir;

fn rows(count: u32) -> Vec<Row> {
    (1..=count)
        .map(|id| Row::new(id, &format!("user{}", id), &format!("user{}@example.com", id)).unwrap())
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_insert");

    // 13 fits the root leaf, 14 forces the root split
    for count in [13u32, 14, 20] {
        let input = rows(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("ascending", count), &input, |b, input| {
            b.iter_with_setup(
                || {
                    let dir = tempdir().unwrap();
                    let table = Table::open(dir.path().join("bench.db")).unwrap();
                    (dir, table)
                },
                |(dir, mut table)| {
                    for row in input {
                        table.insert_row(row).unwrap();
                    }
                    (dir, table)
                },
            );
        });

        group.bench_with_input(BenchmarkId::new("descending", count), &input, |b, input| {
            b.iter_with_setup(
                || {
                    let dir = tempdir().unwrap();
                    let table = Table::open(dir.path().join("bench.db")).unwrap();
                    (dir, table)
                },
                |(dir, mut table)| {
                    for row in input.iter().rev() {
                        table.insert_row(row).unwrap();
                    }
                    (dir, table)
                },
            );
        });
    }

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("bench.db")).unwrap();
    for row in rows(20) {
        table.insert_row(&row).unwrap();
    }

    c.bench_function("table_select_all", |b| {
        b.iter(|| {
            let count = table.select_all().unwrap().filter(|r| r.is_ok()).count();
            black_box(count)
        })
    });

    c.bench_function("table_get", |b| {
        b.iter(|| black_box(table.get(black_box(17)).unwrap()))
    });
}

fn bench_close(c: &mut Criterion) {
    c.bench_function("table_close_after_split", |b| {
        b.iter_with_setup(
            || {
                let dir = tempdir().unwrap();
                let mut table = Table::open(dir.path().join("bench.db")).unwrap();
                for row in rows(14) {
                    table.insert_row(&row).unwrap();
                }
                (dir, table)
            },
            |(dir, table)| {
                table.close().unwrap();
                dir
            },
        );
    });
}

criterion_group!(benches, bench_insert, bench_scan, bench_close);
criterion_main!(benches);
