// File: crates/plan-core/tests/common/mod.rs
// Purpose: Small deterministic plan shared by the layout and render tests.

use chrono::NaiveDate;
use plan_core::{Milestone, Phase, Plan, Task};

fn weeks(role: &str, label: &str, weight: f64, first: f64, last: f64) -> Task {
    Task::from_weeks(role, label, Some(weight), first, last).expect("valid task")
}

/// Two phases, three roles, one role needing two sub-rows.
pub fn sample_plan() -> Plan {
    let mut plan = Plan::new("sample rollout", NaiveDate::from_ymd_opt(2025, 4, 1).expect("date"));
    plan.role_order = vec!["BE".to_string(), "DBA".to_string(), "QA".to_string()];
    plan.buffer_weight = Some(4.0);
    plan.success_criteria = Some("TPS 2x".to_string());
    plan.critical_path_note = Some("Critical Path: design → build → cutover".to_string());
    plan.phases = vec![
        Phase::new(
            "P0",
            "P0: design",
            vec![
                weeks("BE", "design", 2.0, 1.0, 1.0).critical(),
                weeks("BE", "review", 1.0, 1.0, 1.0),
                weeks("DBA", "index audit", 1.0, 1.0, 2.0),
            ],
        ),
        Phase::new(
            "P1",
            "P1: build",
            vec![
                weeks("BE", "build", 6.0, 2.0, 4.0).critical(),
                weeks("QA", "test cases", 3.0, 3.0, 4.0),
                weeks("BE", "cutover", 2.0, 5.0, 5.0).critical(),
            ],
        ),
    ];
    plan.milestones = vec![
        Milestone::new("M0", 1, "design done").gate().exit("benchmark 2x").exit("review signed off"),
        Milestone::new("M1", 4, "build done").exit("unit tests pass").rollback("flag off"),
        Milestone::new("M2", 5, "cutover done").exit("traffic at 100%"),
    ];
    plan
}
