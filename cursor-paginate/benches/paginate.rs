//! Benchmarks for cursor encoding, keyset rendering and page resolution.
//!
//! Run with: cargo bench -p cursor-paginate

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cursor_paginate::{
    AliasMap, Cursor, Direction, FetchRequest, KeysetCondition, MemorySource, OrderSpec,
    PaginateOptions, SortDir, SortField, Value, is_valid_sql_identifier, paginate, postgres,
};
use std::collections::BTreeMap;
use std::hint::black_box;

// =============================================================================
// Cursor Codec Benchmarks
// =============================================================================

fn bench_cursor_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_codec");

    let cursors = [
        ("one_field", Cursor::new().int("id", 42)),
        (
            "two_fields",
            Cursor::new().int("display_index", 1).int("id", 2),
        ),
        (
            "mixed",
            Cursor::new()
                .string("created_at", "2024-01-15T10:00:00Z")
                .field("score", 98.5f64)
                .field("archived", false)
                .int("id", 12345),
        ),
    ];

    for (name, cursor) in &cursors {
        group.bench_with_input(BenchmarkId::new("encode", name), cursor, |b, c| {
            b.iter(|| black_box(c).encode())
        });
        let token = cursor.encode();
        group.bench_with_input(BenchmarkId::new("decode", name), &token, |b, t| {
            b.iter(|| Cursor::decode(black_box(t)))
        });
    }

    group.finish();
}

// =============================================================================
// Keyset Rendering Benchmarks
// =============================================================================

fn bench_keyset_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyset_sql");

    for width in [1usize, 2, 4, 8] {
        let declared: Vec<SortField> = (0..width - 1)
            .map(|i| SortField::new(format!("col_{i}"), if i % 2 == 0 { SortDir::Asc } else { SortDir::Desc }))
            .collect();
        let order = OrderSpec::resolve(&declared, Some("id"), &AliasMap::new()).unwrap();
        let values: Vec<Value> = (0..width as i64).map(Value::Int).collect();
        let query = declared
            .iter()
            .fold(postgres("items").fields(&["id"]), |q, s| q.sort(s.field.clone(), s.dir))
            .primary_key("id");

        group.bench_with_input(BenchmarkId::new("render", width), &width, |b, _| {
            b.iter(|| {
                let keyset = KeysetCondition::new(&order, values.clone(), Direction::Forward).unwrap();
                query.fetch_sql(&FetchRequest {
                    condition: Some(keyset.to_filter_expr()),
                    order: order.fetch_order(Direction::Forward),
                    limit: 21,
                })
            })
        });
    }

    group.bench_function("identifier_check", |b| {
        b.iter(|| is_valid_sql_identifier(black_box("display_index")))
    });

    group.finish();
}

// =============================================================================
// Page Resolution Benchmarks
// =============================================================================

fn bench_paginate_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate_memory");

    let rows: Vec<BTreeMap<String, Value>> = (0..10_000i64)
        .map(|i| {
            BTreeMap::from([
                ("id".to_string(), Value::Int(i + 1)),
                ("score".to_string(), Value::Int(i % 97)),
            ])
        })
        .collect();
    let source = MemorySource::new(rows)
        .sort("score", SortDir::Desc)
        .primary_key("id");

    let first = PaginateOptions::builder().per_page(50).build().unwrap();
    group.bench_function("first_page", |b| {
        b.iter(|| paginate(black_box(&source), &first))
    });

    let middle = Cursor::new().int("score", 48).int("id", 5000).encode();
    for direction in [Direction::Forward, Direction::Backward] {
        let options = PaginateOptions::builder()
            .per_page(50)
            .cursor(middle.clone())
            .direction(direction)
            .with_total(true)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("from_cursor", direction.as_str()),
            &options,
            |b, o| b.iter(|| paginate(black_box(&source), o)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cursor_codec,
    bench_keyset_sql,
    bench_paginate_memory,
);

criterion_main!(benches);
