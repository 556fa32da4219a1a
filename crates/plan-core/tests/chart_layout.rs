// File: crates/plan-core/tests/chart_layout.rs
// Purpose: Geometry invariants of the Gantt and milestone layouts (no drawing involved).

mod common;

use plan_core::{max_overlap, ChartConfig, GanttChart, LabelFit, LabelPlacement, MilestoneChart, RenderOptions, TextMetrics};
use plan_core::milestone::card_lines;

fn gantt_options(width: i32) -> RenderOptions {
    RenderOptions { width, ..RenderOptions::default() }
}

#[test]
fn gantt_rows_follow_phase_and_role_order() {
    let plan = common::sample_plan();
    let chart = GanttChart::new(&plan, gantt_options(1800), LabelFit::default());
    let layout = chart.layout();

    let rows: Vec<(usize, &str, usize)> = layout.rows.iter().map(|r| (r.phase_index, r.role, r.sub_row)).collect();
    assert_eq!(rows, vec![(0, "BE", 0), (0, "BE", 1), (0, "DBA", 0), (1, "BE", 0), (1, "QA", 0)]);
    assert!(layout.rows.windows(2).all(|w| w[0].y < w[1].y));
    assert_eq!(layout.bars.len(), plan.tasks().count());
    assert_eq!(layout.placements().count(), layout.bars.len());
}

#[test]
fn gantt_sub_rows_match_peak_overlap() {
    let plan = common::sample_plan();
    let layout = GanttChart::new(&plan, gantt_options(1800), LabelFit::default()).layout();

    for (phase_index, phase) in plan.phases.iter().enumerate() {
        for role in &plan.role_order {
            let members = phase.tasks.iter().filter(|t| t.role() == role);
            let rows = layout.rows.iter().filter(|r| r.phase_index == phase_index && r.role == role).count();
            assert_eq!(rows, max_overlap(members), "phase {phase_index} role {role}");
        }
    }
}

#[test]
fn gantt_bars_stay_in_plot_and_never_overlap_in_a_row() {
    let plan = common::sample_plan();
    let opts = gantt_options(1800);
    let area = opts.plot_rect();
    let layout = GanttChart::new(&plan, opts, LabelFit::default()).layout();

    for bar in &layout.bars {
        assert!(bar.rect.left >= area.left - 0.01 && bar.rect.right <= area.right + 0.01);
        assert!((bar.rect.center_y() - layout.row_y(bar.row_index)).abs() < 0.01);
    }
    for row_index in 0..layout.rows.len() {
        let in_row: Vec<_> = layout.bars.iter().filter(|b| b.row_index == row_index).collect();
        for pair in in_row.windows(2) {
            assert!(pair[0].rect.right <= pair[1].rect.left + 0.01);
        }
    }
}

#[test]
fn gantt_phase_bands_do_not_overlap() {
    let plan = common::sample_plan();
    let layout = GanttChart::new(&plan, gantt_options(1800), LabelFit::default()).layout();
    assert_eq!(layout.phases.len(), 2);
    assert!(layout.phases[0].bottom < layout.phases[1].top);
    for band in &layout.phases {
        let rows = layout.rows.iter().filter(|r| r.phase_index == band.phase_index);
        for r in rows {
            assert!(r.y > band.top && r.y < band.bottom);
        }
    }
}

#[test]
fn gantt_critical_chain_lists_critical_bars_top_down() {
    let plan = common::sample_plan();
    let layout = GanttChart::new(&plan, gantt_options(1800), LabelFit::default()).layout();
    let labels: Vec<&str> = layout.critical_chain.iter().map(|&i| layout.bars[i].task.label()).collect();
    assert_eq!(labels, vec!["design", "build", "cutover"]);
}

#[test]
fn gantt_labels_never_run_into_the_next_bar() {
    let plan = common::sample_plan();
    for width in [600, 900, 1800] {
        let opts = gantt_options(width);
        let area = opts.plot_rect();
        let fit = LabelFit::default();
        let layout = GanttChart::new(&plan, opts, fit.clone()).layout();

        for (i, bar) in layout.bars.iter().enumerate() {
            let next = layout.bars[i + 1..].iter().find(|b| b.row_index == bar.row_index);
            let limit = next.map_or(area.right as f64, |n| n.rect.left as f64);
            match &bar.placement {
                LabelPlacement::Inside(text) => {
                    assert!(fit.metrics.estimate(text) + fit.margin <= bar.rect.width() as f64 + 1e-3);
                }
                LabelPlacement::Beside(text) if !text.is_empty() => {
                    let end = bar.rect.right as f64 + fit.gap + fit.metrics.estimate(text);
                    assert!(end <= limit + 1e-3, "width {width}: '{text}' runs past {limit}");
                }
                LabelPlacement::Beside(_) => {}
            }
        }
    }
}

#[test]
fn narrow_canvas_moves_labels_beside_bars() {
    let plan = common::sample_plan();
    let layout = GanttChart::new(&plan, gantt_options(600), LabelFit::default()).layout();
    let audit = layout.bars.iter().find(|b| b.task.label() == "index audit").expect("bar");
    assert_eq!(audit.placement, LabelPlacement::Beside("index audit  (1MD)".to_string()));
}

#[test]
fn milestone_cards_alternate_around_the_timeline() {
    let plan = common::sample_plan();
    let config = ChartConfig::default();
    let opts = config.milestone_options();
    let area = opts.plot_rect();
    let layout = MilestoneChart::new(&plan, opts, TextMetrics::default()).layout();

    assert_eq!(layout.items.len(), 3);
    let sides: Vec<bool> = layout.items.iter().map(|i| i.above).collect();
    assert_eq!(sides, vec![true, false, true]);
    for item in &layout.items {
        assert!(item.card.left >= area.left - 0.01 && item.card.right <= area.right + 0.01);
        if item.above {
            assert!(item.card.bottom < layout.timeline_y);
            assert_eq!(item.card_anchor_y(), item.card.bottom);
        } else {
            assert!(item.card.top > layout.timeline_y);
        }
    }
    assert!(layout.items.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn milestone_rollback_sits_opposite_its_card() {
    let plan = common::sample_plan();
    let layout = MilestoneChart::new(&plan, ChartConfig::default().milestone_options(), TextMetrics::default()).layout();

    let m1 = &layout.items[1];
    let (rect, text) = m1.rollback.as_ref().expect("M1 has a rollback");
    assert_eq!(text, "Rollback: flag off");
    assert!(!m1.above);
    assert!(rect.center_y() < layout.timeline_y);
    assert!(layout.items[0].rollback.is_none());
}

#[test]
fn milestone_spans_and_ribbon() {
    let plan = common::sample_plan();
    let layout = MilestoneChart::new(&plan, ChartConfig::default().milestone_options(), TextMetrics::default()).layout();

    let weeks: Vec<u32> = layout.spans.iter().map(|s| s.weeks).collect();
    assert_eq!(weeks, vec![3, 1]);
    assert_eq!(layout.ribbon.len(), 2);
    assert!((layout.ribbon[0].rect.left - layout.scale.to_px(1.0)).abs() < 0.01);
    assert!((layout.ribbon[1].rect.right - layout.scale.to_px(6.0)).abs() < 0.01);
}

#[test]
fn card_lines_mark_gates_and_bullets() {
    let plan = common::sample_plan();
    let lines = card_lines(&plan.milestones[0]);
    assert_eq!(lines, vec!["design done  [GATE Go/No-Go]", "\u{2022} benchmark 2x", "\u{2022} review signed off"]);
    assert_eq!(card_lines(&plan.milestones[2]).len(), 2);
}
