// File: crates/plan-render/src/lib.rs
// Summary: Built-in t_coupon_issue plan, config lookup and logging setup shared by the chart binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use plan_core::{ChartConfig, Milestone, Phase, Plan, Task};
use tracing_subscriber::EnvFilter;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "PLAN_CHARTS_CONFIG";
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "plan-charts.toml";

pub const ROLE_ORDER: [&str; 5] = ["BE-1", "BE-2", "DBA", "SRE", "QA"];

/// Log to stderr so stdout only carries the completion line.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn load_config() -> Result<ChartConfig> {
    let path = config_path();
    tracing::debug!(path = %path.display(), "loading chart config");
    ChartConfig::load_or_default(&path).with_context(|| format!("loading config {}", path.display()))
}

/// `(role, label, weight, first week, last week, critical)`; weeks inclusive.
type TaskRow = (&'static str, &'static str, Option<f64>, f64, f64, bool);

fn phase(key: &str, label: &str, rows: &[TaskRow]) -> Result<Phase> {
    let tasks = rows
        .iter()
        .map(|&(role, name, weight, first, last, critical)| {
            let task = Task::from_weeks(role, name, weight, first, last)?;
            Ok(if critical { task.critical() } else { task })
        })
        .collect::<plan_core::Result<Vec<_>>>()
        .with_context(|| format!("phase {key}"))?;
    Ok(Phase::new(key, label, tasks))
}

/// The t_coupon_issue INSERT load improvement plan, April to June.
pub fn coupon_issue_plan() -> Result<Plan> {
    let first_day = NaiveDate::from_ymd_opt(2025, 4, 1).context("invalid plan start date")?;
    let mut plan = Plan::new("t_coupon_issue INSERT 부하 개선", first_day);
    plan.role_order = ROLE_ORDER.iter().map(|r| r.to_string()).collect();
    plan.buffer_weight = Some(20.0);
    plan.success_criteria = Some("성공 기준: INSERT TPS 3.4x+".to_string());
    plan.critical_path_note = Some(
        "Critical Path: 인덱스 사용 통계 수집(3월) → 벤치마크(W1) → Lua 개발(W2~W3) → \
         MC 통합(W4~W5) → Shadow(W6~W7) → MC 100%(W8) → 48h 안정화 → 인덱스 삭제(W10)"
            .to_string(),
    );

    plan.phases = vec![
        phase("P0", "P0: 설계 확정", &[
            ("BE-1", "벤치마크", Some(1.0), 1.0, 1.0, true),
            ("BE-1", "Lua 설계 리뷰", Some(1.0), 1.0, 1.0, false),
            ("BE-2", "Lua 설계 리뷰", Some(1.0), 1.0, 1.0, false),
            ("BE-2", "Key 구조 확정", Some(1.0), 1.0, 1.0, false),
            ("DBA", "벤치마크 지원", Some(2.0), 1.0, 1.0, true),
            ("DBA", "idx 분석", Some(1.0), 1.0, 1.0, false),
            ("SRE", "Key 정책 확정", Some(1.0), 1.0, 1.0, false),
            ("SRE", "대시보드 설계", Some(3.0), 1.0, 1.0, false),
            ("QA", "테스트 계획", Some(1.0), 1.0, 1.0, false),
        ])?,
        phase("P1", "P1: 개발", &[
            ("BE-1", "gate_keeper Lua", Some(5.0), 2.0, 3.0, true),
            ("BE-1", "compensate Lua", Some(3.0), 3.0, 3.5, true),
            ("BE-1", "FF 설정", Some(2.0), 3.5, 4.0, false),
            ("BE-1", "Shadow 준비", Some(4.5), 4.0, 5.0, false),
            ("BE-2", "MC 통합", Some(8.0), 2.0, 5.0, true),
            ("BE-2", "보상 워커", Some(7.0), 2.0, 4.0, false),
            ("BE-2", "Reconciliation", Some(6.0), 4.0, 5.0, false),
            ("BE-2", "Shadow 준비", Some(4.5), 4.0, 5.0, false),
            ("DBA", "인덱스 사용처 확인", Some(5.0), 2.0, 4.0, false),
            ("SRE", "대시보드 구축", Some(6.0), 2.0, 4.0, false),
            ("QA", "케이스 작성", Some(4.0), 3.0, 5.0, false),
        ])?,
        phase("P2", "P2: Shadow 검증", &[
            ("BE-1", "Shadow 운영", Some(4.0), 6.0, 7.0, true),
            ("BE-1", "부하 테스트", Some(2.0), 7.0, 7.0, false),
            ("BE-2", "Recon diff 검증", Some(4.0), 6.0, 7.0, false),
            ("BE-2", "부하 테스트", Some(2.0), 7.0, 7.0, false),
            ("DBA", "삭제/복구 리허설", Some(4.0), 6.0, 7.0, false),
            ("SRE", "모니터링 강화", Some(5.0), 6.0, 7.0, false),
            ("QA", "전수 QA", Some(10.0), 6.0, 7.0, false),
        ])?,
        phase("P3", "P3: 전환·안정화", &[
            ("BE-1", "MC 100% 전환", Some(3.0), 8.0, 8.0, true),
            ("BE-2", "인덱스 삭제 지원", Some(3.0), 8.0, 8.0, false),
            ("DBA", "무중단 삭제", Some(3.0), 8.0, 8.0, false),
            ("DBA", "24h 모니터링", Some(2.0), 8.0, 9.0, false),
            ("SRE", "7일 안정화", Some(5.0), 8.0, 9.0, false),
            ("QA", "회귀 테스트", Some(4.0), 8.0, 8.0, false),
        ])?,
        phase("post", "후속", &[
            ("DBA", "인덱스 6개 삭제", None, 10.0, 10.0, true),
        ])?,
    ];

    plan.milestones = vec![
        Milestone::new("M0", 1, "설계 확정")
            .gate()
            .exit("프로덕션 벤치마크 3.0x+ 달성")
            .exit("설계 리뷰 완료"),
        Milestone::new("M1", 5, "개발 완료")
            .exit("단위 테스트 통과")
            .exit("Feature Flag 동작")
            .exit("Shadow Mode 배포 가능")
            .rollback("FF OFF → DB 즉시 전환 (<1분)"),
        Milestone::new("M2", 7, "검증 완료")
            .exit("Shadow Mode 1주+ 무장애")
            .exit("TPS 3.4x+ 달성")
            .exit("QA 전수 통과")
            .rollback("Lua script: 이전 버전 배포 (<5분)"),
        Milestone::new("M3", 8, "MC 전환 완료")
            .exit("MC 100% + 48h 안정화")
            .exit("drift < 0.01%")
            .rollback("Redis MC: FF → DB 전환 (<1분)"),
        Milestone::new("M4", 9, "안정화 완료")
            .exit("7일간 Sev-0/Sev-1 0건")
            .exit("변경 동결 기간 무사 통과"),
        Milestone::new("M5", 10, "인덱스 삭제 완료")
            .exit("인덱스 6개 삭제 완료")
            .exit("INSERT TPS 3.4x+ 달성")
            .rollback("인덱스 재생성 (15~40분)"),
    ];

    plan.validate().context("built-in plan failed validation")?;
    Ok(plan)
}
