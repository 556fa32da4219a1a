// File: crates/plan-core/tests/config.rs
// Purpose: TOML config parsing, defaults and error reporting.

use std::path::{Path, PathBuf};

use plan_core::{ChartConfig, PlanError};

#[test]
fn empty_config_uses_defaults() {
    let cfg = ChartConfig::from_toml_str("", Path::new("inline.toml")).expect("parse");
    assert_eq!(cfg, ChartConfig::default());
    assert_eq!(cfg.gantt_path(), PathBuf::from("/tmp/final_gantt.svg"));
    assert_eq!(cfg.milestone_path(), PathBuf::from("/tmp/final_milestone.svg"));

    let gantt = cfg.gantt_options();
    assert_eq!((gantt.width, gantt.height), (1800, 1350));
    let milestone = cfg.milestone_options();
    assert_eq!((milestone.width, milestone.height), (1800, 900));
    assert_eq!(milestone.insets.top, 120);
}

#[test]
fn partial_tables_override_only_named_keys() {
    let raw = r#"
        output_dir = "out/charts"
        theme = "dark"

        [gantt]
        width = 2400

        [labels]
        font_size = 11.0
        min_space = 30.0
    "#;
    let cfg = ChartConfig::from_toml_str(raw, Path::new("inline.toml")).expect("parse");

    assert_eq!(cfg.gantt_path(), PathBuf::from("out/charts/final_gantt.svg"));
    assert_eq!(cfg.gantt.width, 2400);
    assert_eq!(cfg.gantt.height, 1350);
    assert_eq!(cfg.gantt_options().theme.name, "dark");

    let fit = cfg.labels.label_fit("MD");
    assert_eq!(fit.metrics.font_size, 11.0);
    assert_eq!(fit.min_space, 30.0);
    assert_eq!(fit.margin, 8.0);
    assert_eq!(fit.gap, 6.0);
    assert_eq!(fit.metrics.wide_threshold, 0x1100);
}

#[test]
fn unknown_theme_falls_back_to_light() {
    let cfg = ChartConfig::from_toml_str("theme = \"sepia\"", Path::new("inline.toml")).expect("parse");
    assert_eq!(cfg.milestone_options().theme.name, "light");
}

#[test]
fn malformed_config_reports_its_path() {
    let err = ChartConfig::from_toml_str("[gantt]\nwidth = \"wide\"", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, PlanError::Config { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn missing_file_loads_defaults_and_present_file_is_read() {
    let dir = PathBuf::from("target/test_out/config");
    std::fs::create_dir_all(&dir).unwrap();

    let missing = dir.join("does-not-exist.toml");
    let _ = std::fs::remove_file(&missing);
    assert_eq!(ChartConfig::load_or_default(&missing).unwrap(), ChartConfig::default());
    assert!(matches!(ChartConfig::load(&missing), Err(PlanError::Io(_))));

    let present = dir.join("plan-charts.toml");
    std::fs::write(&present, "gantt_file = \"g.svg\"\n").unwrap();
    let cfg = ChartConfig::load_or_default(&present).unwrap();
    assert_eq!(cfg.gantt_file, "g.svg");
}

#[test]
fn partial_milestone_table_keeps_milestone_defaults() {
    let raw = "[milestone]\nwidth = 2000\n\n[gantt]\nheight = 1500\n";
    let cfg = ChartConfig::from_toml_str(raw, Path::new("inline.toml")).expect("parse");

    let milestone = cfg.milestone_options();
    assert_eq!((milestone.width, milestone.height), (2000, 900));
    assert_eq!((milestone.insets.left, milestone.insets.top), (50, 120));

    let gantt = cfg.gantt_options();
    assert_eq!((gantt.width, gantt.height), (1800, 1500));
    assert_eq!(gantt.insets.left, 240);
}
