// File: crates/plan-core/src/view.rs
// Visible week range derived from a plan's tasks and milestones.

use crate::model::Plan;
use crate::scale::Week;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeekRange {
    pub first: Week,
    pub last: Week,
}

impl WeekRange {
    /// Smallest whole-week range covering every task and milestone week.
    pub fn from_plan(plan: &Plan) -> Self {
        let mut first = f64::INFINITY;
        let mut last = f64::NEG_INFINITY;
        for t in plan.tasks() {
            first = first.min(t.start());
            last = last.max(t.end());
        }
        for m in &plan.milestones {
            let w = m.week as f64;
            first = first.min(w);
            last = last.max(w + 1.0);
        }
        if !first.is_finite() || !last.is_finite() {
            return Self { first: 1.0, last: 2.0 };
        }
        let first = first.floor();
        let mut last = last.ceil();
        if last - first < 1.0 { last = first + 1.0; }
        Self { first, last }
    }

    /// Whole weeks `first..last` as 1-based week numbers.
    pub fn week_numbers(&self) -> impl Iterator<Item = u32> {
        let lo = self.first.max(1.0) as u32;
        let hi = self.last.max(1.0) as u32;
        lo..hi
    }
}
