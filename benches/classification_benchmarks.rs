//! Performance benchmarks for the Attendance Engine.
//!
//! This benchmark suite covers:
//! - Single day classification
//! - One employee's month
//! - Monthly summaries for a batch of employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::calculation::{
    Classifier, EmployeeMonth, build_monthly_attendance, summarize_employees,
};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{DayLog, MonthSchedule};

fn load_schedule() -> MonthSchedule {
    ConfigLoader::load_month_schedule("./config/schedules/2025-12.yaml")
        .expect("Failed to load schedule")
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 31)
        .unwrap()
        .and_hms_opt(23, 0, 0)
        .unwrap()
}

/// Creates an employee month with a slightly different punch pair every day.
fn create_employee(id: usize, schedule: &MonthSchedule) -> EmployeeMonth {
    let logs: BTreeMap<NaiveDate, DayLog> = schedule
        .dates()
        .enumerate()
        .map(|(i, day)| {
            let checkin = NaiveTime::from_hms_opt(8, 50 + (i % 10) as u32, 0);
            let checkout = NaiveTime::from_hms_opt(17 + (i % 3) as u32, 30, 0);
            (day, DayLog::new(checkin, checkout))
        })
        .collect();

    EmployeeMonth {
        employee_id: format!("emp_bench_{:03}", id),
        schedule: schedule.clone(),
        logs,
        out_date: None,
    }
}

fn bench_single_day(c: &mut Criterion) {
    let schedule = load_schedule();
    let classifier = Classifier::default();
    let day = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
    let module = schedule.module_for(day);
    let log = DayLog::new(NaiveTime::from_hms_opt(9, 10, 0), NaiveTime::from_hms_opt(18, 30, 0));

    c.bench_function("single_day", |b| {
        b.iter(|| black_box(classifier.classify_day(black_box(day), module, &log, now())))
    });
}

fn bench_month(c: &mut Criterion) {
    let schedule = load_schedule();
    let classifier = Classifier::default();
    let employee = create_employee(0, &schedule);

    c.bench_function("month_31_days", |b| {
        b.iter(|| black_box(build_monthly_attendance(&employee, now(), &classifier)))
    });
}

fn bench_batch_summaries(c: &mut Criterion) {
    let schedule = load_schedule();
    let classifier = Classifier::default();

    let mut group = c.benchmark_group("batch_summaries");
    for size in [10usize, 100] {
        let employees: Vec<EmployeeMonth> =
            (0..size).map(|i| create_employee(i, &schedule)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &employees, |b, employees| {
            b.iter(|| black_box(summarize_employees(employees, now(), &classifier)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_day, bench_month, bench_batch_summaries);
criterion_main!(benches);
