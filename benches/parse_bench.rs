//! Performance benchmarks for parsing, composing and storing entries.
//!
//! Run with: cargo bench

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use daybook::crypto::JournalKey;
use daybook::journal::Journal;
use daybook::journal_core::{compose, parse_date_expression};
use daybook::journal_io::StoreCodec;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

fn journal_of(size: usize) -> Journal {
    let mut journal = Journal::new("bench");
    for i in 0..size {
        let line = format!(
            "20{:02}-{:02}-{:02} 08.30 Entry {}. Some words about the day +tag{} @n={}",
            i % 30,
            i % 12 + 1,
            i % 28 + 1,
            i,
            i % 7,
            i
        );
        journal
            .add_from_text(&line, now())
            .expect("bench entry must compose");
    }
    journal
}

/// Benchmark the date expression parser on the common forms.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_date_expression");

    for line in [
        "2023-05-01 09.30 Wrote code.",
        "yesterday Dinner.",
        "friday Gym.",
        "No date at all.",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(line), line, |b, line| {
            b.iter(|| black_box(parse_date_expression(black_box(line), now())));
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let line = "Long day. Meetings then a run by the river +work +sport @km=8 @mood=tired";
    c.bench_function("compose", |b| {
        b.iter(|| black_box(compose(black_box(line), now()).expect("compose failed")));
    });
}

/// Benchmark inserting into and encoding journals of various sizes.
fn bench_journal(c: &mut Criterion) {
    let mut group = c.benchmark_group("journal");
    let key = StoreCodec::Encrypted(JournalKey::from_password("benchmark-password"));

    for size in [100usize, 1_000, 10_000] {
        let journal = journal_of(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("insert", size), &journal, |b, journal| {
            b.iter(|| {
                let mut journal = journal.clone();
                journal
                    .add_from_text("2015-06-15 Inserted. +bench", now())
                    .expect("insert failed");
                black_box(journal);
            });
        });

        group.bench_with_input(BenchmarkId::new("encode_encrypted", size), &journal, |b, journal| {
            b.iter(|| black_box(key.encode(journal).expect("encode failed")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_compose, bench_journal);
criterion_main!(benches);
