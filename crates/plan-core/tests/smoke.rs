// File: crates/plan-core/tests/smoke.rs
// Purpose: End-to-end renders of both charts to PNG and SVG files.

mod common;

use plan_core::{ChartConfig, ChartRender, GanttChart, LabelFit, MilestoneChart, RenderOptions, TextMetrics, Theme};

#[test]
fn gantt_smoke_png_and_svg() {
    let plan = common::sample_plan();
    let chart = GanttChart::new(&plan, RenderOptions::default(), LabelFit::default()).with_title("sample — timeline");

    let out = std::path::PathBuf::from("target/test_out/gantt_smoke.svg");
    chart.render_to_svg(&out).expect("render svg");
    let svg = std::fs::read_to_string(&out).expect("svg exists");
    assert!(svg.contains("<svg"), "should be an SVG document");

    let bytes = chart.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn milestone_smoke_png() {
    let plan = common::sample_plan();
    let config = ChartConfig::default();
    let chart = MilestoneChart::new(&plan, config.milestone_options(), TextMetrics::default());

    let out = std::path::PathBuf::from("target/test_out/nested/milestone_smoke.png");
    let _ = std::fs::remove_dir_all(out.parent().unwrap());
    chart.render_to_png(&out).expect("render png into a missing directory");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let img = image::open(&out).expect("decode png");
    assert_eq!((img.width(), img.height()), (1800, 900));
}

#[test]
fn dark_theme_changes_the_background() {
    let plan = common::sample_plan();
    let mut opts = RenderOptions { width: 320, height: 240, draw_labels: false, ..RenderOptions::default() };
    opts.insets = plan_core::types::Insets::new(20, 20, 20, 20);

    let light = GanttChart::new(&plan, opts.clone(), LabelFit::default()).render_to_png_bytes().expect("light");
    opts.theme = Theme::dark();
    let dark = GanttChart::new(&plan, opts, LabelFit::default()).render_to_png_bytes().expect("dark");

    let corner = |bytes: &[u8]| image::load_from_memory(bytes).expect("decode").to_rgba8().get_pixel(0, 0).0;
    assert_ne!(corner(&light), corner(&dark));
}

#[test]
fn empty_plan_still_renders() {
    let plan = plan_core::Plan::new("empty", chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    let gantt = GanttChart::new(&plan, RenderOptions::default(), LabelFit::default());
    assert!(gantt.layout().bars.is_empty());
    assert!(!gantt.render_to_svg_bytes().expect("svg").is_empty());

    let milestones = MilestoneChart::new(&plan, RenderOptions::default(), TextMetrics::default());
    assert!(milestones.layout().items.is_empty());
    assert!(milestones.render_to_png_bytes().expect("png").starts_with(&[137, 80, 78, 71]));
}
