// File: crates/plan-core/tests/label_fit.rs
// Purpose: Label placement (inside, beside, truncated, dropped) and the width heuristic.

use plan_core::{compose_label, truncate_to_width, LabelFit, LabelPlacement, RowLayoutEngine, TextMetrics};
use proptest::prelude::*;

/// Unit-scale metrics: one narrow char is 0.07 wide.
fn unit_engine(min_space: f64) -> RowLayoutEngine {
    RowLayoutEngine::new(LabelFit {
        margin: 0.0,
        gap: 0.0,
        min_space,
        canvas_right: 10.0,
        weight_unit: "MD".to_string(),
        metrics: TextMetrics { font_size: 1.0, narrow_unit: 0.07, wide_unit: 0.14, wide_threshold: 0x1100 },
    })
}

#[test]
fn label_inside_when_estimate_fits_the_bar() {
    let engine = unit_engine(0.25);
    let placed = engine.fit_label("Reconciliation", None, 1.0, None, 1.0);
    assert_eq!(placed, LabelPlacement::Inside("Reconciliation".to_string()));
}

#[test]
fn label_truncated_beside_when_bar_is_too_short() {
    let engine = unit_engine(0.25);
    let placed = engine.fit_label("Reconciliation", None, 0.5, Some(0.8), 0.5);
    assert!(!placed.is_inside());
    assert_eq!(placed.text(), "Re..");
}

#[test]
fn nothing_drawn_below_min_space() {
    let engine = unit_engine(0.25);
    let placed = engine.fit_label("Reconciliation", None, 0.5, Some(0.7), 0.5);
    assert_eq!(placed, LabelPlacement::Beside(String::new()));
}

#[test]
fn last_task_in_row_uses_canvas_right() {
    let engine = unit_engine(0.25);
    let placed = engine.fit_label("Reconciliation", None, 0.5, None, 0.5);
    assert_eq!(placed, LabelPlacement::Beside("Reconciliation".to_string()));
}

#[test]
fn weight_is_part_of_the_fitted_text() {
    let engine = RowLayoutEngine::new(LabelFit::default());
    let placed = engine.fit_label("MC 통합", Some(8.0), 400.0, None, 400.0);
    assert_eq!(placed, LabelPlacement::Inside("MC 통합  (8MD)".to_string()));
}

#[test]
fn default_pixel_fit_truncates_hangul_labels() {
    // 13px font: Hangul 13px each, ASCII 7.8px each
    let engine = RowLayoutEngine::new(LabelFit::default());
    let placed = engine.fit_label("인덱스 사용처 확인", Some(5.0), 40.0, Some(120.0), 60.0);
    let fit = engine.label_fit();
    let available = 120.0 - 60.0 - fit.gap;
    assert!(placed.text().ends_with(".."));
    assert!(fit.metrics.estimate(placed.text()) <= available);
}

#[test]
fn compose_label_formats_weights() {
    assert_eq!(compose_label("벤치마크", Some(1.0), "MD"), "벤치마크  (1MD)");
    assert_eq!(compose_label("Shadow 준비", Some(4.5), "MD"), "Shadow 준비  (4.5MD)");
    assert_eq!(compose_label("인덱스 6개 삭제", None, "MD"), "인덱스 6개 삭제");
    assert_eq!(compose_label("zero", Some(0.0), "MD"), "zero");
}

#[test]
fn width_heuristic_splits_at_threshold() {
    let m = TextMetrics::default();
    assert!((m.estimate("ab") - 2.0 * 0.6 * 13.0).abs() < 1e-9);
    assert!((m.estimate("가나") - 2.0 * 13.0).abs() < 1e-9);
    assert_eq!(m.char_units('\u{10FF}'), 0.6);
    assert_eq!(m.char_units('\u{1100}'), 1.0);
    assert!((m.with_font_size(10.0).estimate("a") - 6.0).abs() < 1e-9);
}

#[test]
fn truncate_returns_empty_when_marker_does_not_fit() {
    let m = TextMetrics { font_size: 1.0, narrow_unit: 0.07, wide_unit: 0.14, wide_threshold: 0x1100 };
    assert_eq!(truncate_to_width("Reconciliation", 0.1, &m), "");
    assert_eq!(truncate_to_width("Recon", 1.0, &m), "Recon");
}

#[test]
fn truncate_drops_trailing_space_before_marker() {
    let m = TextMetrics { font_size: 1.0, narrow_unit: 1.0, wide_unit: 2.0, wide_threshold: 0x1100 };
    // budget 5 - 2 = 3 keeps "MC " which trims to "MC"
    assert_eq!(truncate_to_width("MC 통합", 5.0, &m), "MC..");
}

proptest! {
    #[test]
    fn beside_text_never_exceeds_available(
        label in "[a-zA-Z가-힣 ]{0,24}",
        weight in prop::option::of(0.0f64..20.0),
        drawn in 0.0f64..200.0,
        current_end in 0.0f64..500.0,
        room in 0.0f64..300.0,
    ) {
        let engine = RowLayoutEngine::new(LabelFit::default());
        let fit = engine.label_fit().clone();
        let next_start = current_end + room;
        let placed = engine.fit_label(&label, weight, drawn, Some(next_start), current_end);
        match placed {
            LabelPlacement::Inside(text) => {
                prop_assert!(fit.metrics.estimate(&text) + fit.margin <= drawn);
            }
            LabelPlacement::Beside(text) => {
                let available = room - fit.gap;
                if available < fit.min_space {
                    prop_assert!(text.is_empty());
                } else {
                    prop_assert!(fit.metrics.estimate(&text) <= available + 1e-9);
                }
            }
        }
    }

    #[test]
    fn wide_bars_always_hold_their_label(label in "[a-zA-Z가-힣 ]{0,24}") {
        let engine = RowLayoutEngine::new(LabelFit::default());
        let fit = engine.label_fit();
        let need = fit.metrics.estimate(&label) + fit.margin;
        let placed = engine.fit_label(&label, None, need + 1.0, None, 0.0);
        prop_assert!(placed.is_inside());
    }
}
