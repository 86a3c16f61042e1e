use chrono::{Duration, NaiveDate};
use commit_trends::model::CommitRecord;
use commit_trends::series::{aggregate_weekly, build_daily, rolling_average};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_records(users: usize, days: i64) -> Vec<CommitRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut records = Vec::new();
    for user in 0..users {
        for day in (0..days).filter(|d| (*d as usize + user) % 3 != 0) {
            records.push(CommitRecord::new(
                format!("user{user}"),
                start + Duration::days(day),
                ((user as i64 + day) % 7) as u64,
            ));
        }
    }
    records
}

fn bench_rolling(c: &mut Criterion) {
    let values: Vec<f64> = (0..3650).map(|v| (v % 17) as f64).collect();
    c.bench_function("rolling_average_3650_w7", |b| {
        b.iter(|| rolling_average(black_box(&values), 7).unwrap())
    });
}

fn bench_builders(c: &mut Criterion) {
    let records = synthetic_records(500, 365);
    c.bench_function("build_daily_500_users_year", |b| {
        b.iter(|| build_daily(black_box(&records), 7).unwrap())
    });
    c.bench_function("aggregate_weekly_500_users_year", |b| {
        b.iter(|| aggregate_weekly(black_box(&records)))
    });
}

criterion_group!(benches, bench_rolling, bench_builders);
criterion_main!(benches);
