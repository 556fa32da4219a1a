use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plan_core::{pack_role, GanttChart, LabelFit, Phase, Plan, RenderOptions, RowLayoutEngine, Task};

fn gen_tasks(n: usize) -> Vec<Task> {
    // deterministic pseudo-random starts and lengths
    let mut state = 0x2545_f491_u64;
    (0..n)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let start = ((state >> 33) % 500) as f64;
            let len = 1.0 + ((state >> 17) % 12) as f64;
            Task::try_new("BE-1", format!("task {i}"), Some(len), start, start + len).expect("valid task")
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_role");
    for &n in &[100usize, 1_000, 5_000] {
        let tasks = gen_tasks(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &tasks, |b, tasks| {
            b.iter(|| black_box(pack_role(tasks).len()));
        });
    }
    group.finish();
}

fn bench_fit_label(c: &mut Criterion) {
    let engine = RowLayoutEngine::new(LabelFit::default());
    c.bench_function("fit_label_truncate", |b| {
        b.iter(|| black_box(engine.fit_label("인덱스 사용처 확인", Some(5.0), 40.0, Some(160.0), 60.0)));
    });
}

fn bench_gantt_layout(c: &mut Criterion) {
    let mut plan = Plan::new("bench", NaiveDate::from_ymd_opt(2025, 4, 1).expect("date"));
    plan.role_order = vec!["BE-1".to_string()];
    plan.phases = vec![Phase::new("P0", "P0", gen_tasks(1_000))];
    let chart = GanttChart::new(&plan, RenderOptions::default(), LabelFit::default());
    c.bench_function("gantt_layout_1k", |b| b.iter(|| black_box(chart.layout().bars.len())));
}

criterion_group!(benches, bench_pack, bench_fit_label, bench_gantt_layout);
criterion_main!(benches);
