use chrono::{TimeDelta, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use suite_runner::analysis::analyze;
use suite_runner::compare::compare_runs;
use suite_runner::config::TestCase;
use suite_runner::execution::execute_test_case;
use suite_runner::models::{TestCaseResult, TestRun};
use tokio::runtime::Runtime;

/// A run of `cases` top-level results, each followed by `subs` sub-cases.
fn synthetic_run(cases: usize, subs: usize, skew_ms: i64) -> TestRun {
    let start = Utc::now();
    let mut run = TestRun::new("bench.json", Vec::new());
    run.start_time = start;
    for i in 0..cases {
        let mut top = TestCaseResult::new(format!("T{:04}", i));
        top.start_time = start;
        top.end_time = start + TimeDelta::milliseconds(100 + (i as i64 % 7) * skew_ms);
        top.passed = i % 5 != 0;
        top.timed_out = i % 13 == 0;
        let parent_id = top.id.clone();
        run.executed_test_results.push(top);
        for j in 0..subs {
            let mut sub = TestCaseResult::new(format!("s{}", j));
            sub.start_time = start;
            sub.end_time = start + TimeDelta::milliseconds(10);
            sub.passed = j % 2 == 0;
            sub.nest_under(&parent_id);
            run.executed_test_results.push(sub);
        }
    }
    run.finalize("bench");
    run
}

fn bench_analyze(c: &mut Criterion) {
    let run = synthetic_run(1000, 5, 3);
    c.bench_function("analyze_6000_results", |b| {
        b.iter(|| analyze(black_box(&run)));
    });
}

fn bench_compare_runs(c: &mut Criterion) {
    let target = synthetic_run(1000, 5, 3);
    let comparison = synthetic_run(900, 5, 5);
    c.bench_function("compare_runs_6000_results", |b| {
        b.iter(|| compare_runs(black_box(&target), black_box(&comparison)));
    });
}

fn bench_execute_test_case(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let case = TestCase {
        id: "bench".to_string(),
        program: "echo".to_string(),
        cli_parameters: r#"'{"overall_passed": true}'"#.to_string(),
        timeout_secs: 10,
        ..TestCase::default()
    };

    c.bench_function("execute_test_case", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = execute_test_case(&case, "echo", None).await;
        });
    });
}

criterion_group!(benches, bench_analyze, bench_compare_runs, bench_execute_test_case);
criterion_main!(benches);
