// File: crates/plan-core/src/model.rs
// Summary: Plan model: tasks with validated intervals, phases, milestones and calendar helpers.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{PlanError, Result};
use crate::layout::format_weight;

/// One unit of work drawn as a bar.
///
/// The interval is half-open, `[start, end)`, in week coordinates. Fields are
/// private so a constructed task cannot be changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    role: String,
    label: String,
    weight: Option<f64>,
    start: f64,
    end: f64,
    critical: bool,
}

impl Task {
    /// Build a task, rejecting malformed input instead of repairing it.
    ///
    /// Intervals must have positive length.
    pub fn try_new(
        role: impl Into<String>,
        label: impl Into<String>,
        weight: Option<f64>,
        start: f64,
        end: f64,
    ) -> Result<Self> {
        let role = role.into();
        let label = label.into();
        if role.trim().is_empty() {
            return Err(PlanError::MissingRole { label });
        }
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(PlanError::InvalidInterval { label, start, end });
        }
        if let Some(w) = weight {
            if !w.is_finite() || w < 0.0 {
                return Err(PlanError::InvalidWeight { label, weight: w });
            }
        }
        Ok(Self { role, label, weight, start, end, critical: false })
    }

    /// Build a task from an inclusive week range: `first..=last` becomes `[first, last + 1)`.
    pub fn from_weeks(
        role: impl Into<String>,
        label: impl Into<String>,
        weight: Option<f64>,
        first_week: f64,
        last_week: f64,
    ) -> Result<Self> {
        Self::try_new(role, label, weight, first_week, last_week + 1.0)
    }

    /// Flag the task as part of the critical path.
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn role(&self) -> &str { &self.role }
    pub fn label(&self) -> &str { &self.label }
    pub fn weight(&self) -> Option<f64> { self.weight }
    pub fn start(&self) -> f64 { self.start }
    pub fn end(&self) -> f64 { self.end }
    pub fn is_critical(&self) -> bool { self.critical }
    pub fn duration(&self) -> f64 { self.end - self.start }

    /// True when both intervals share at least one instant.
    pub fn overlaps(&self, other: &Task) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A named group of tasks drawn as one shaded band.
#[derive(Clone, Debug)]
pub struct Phase {
    pub key: String,
    pub label: String,
    pub tasks: Vec<Task>,
}

impl Phase {
    pub fn new(key: impl Into<String>, label: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self { key: key.into(), label: label.into(), tasks }
    }

    /// Sum of task weights; `None` when no task carries one.
    pub fn total_weight(&self) -> Option<f64> {
        let mut any = false;
        let mut sum = 0.0;
        for w in self.tasks.iter().filter_map(Task::weight) {
            any = true;
            sum += w;
        }
        any.then_some(sum)
    }

    /// Earliest start and latest end over the phase's tasks.
    pub fn week_span(&self) -> Option<(f64, f64)> {
        let start = self.tasks.iter().map(Task::start).reduce(f64::min)?;
        let end = self.tasks.iter().map(Task::end).reduce(f64::max)?;
        Some((start, end))
    }
}

#[derive(Clone, Debug)]
pub struct Milestone {
    pub id: String,
    /// Week the milestone closes (1-based).
    pub week: u32,
    pub title: String,
    /// Go/no-go decision point; display only.
    pub gate: bool,
    pub exit_criteria: Vec<String>,
    pub rollback: Option<String>,
}

impl Milestone {
    pub fn new(id: impl Into<String>, week: u32, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            week,
            title: title.into(),
            gate: false,
            exit_criteria: Vec::new(),
            rollback: None,
        }
    }

    pub fn gate(mut self) -> Self {
        self.gate = true;
        self
    }

    pub fn exit(mut self, criterion: impl Into<String>) -> Self {
        self.exit_criteria.push(criterion.into());
        self
    }

    pub fn rollback(mut self, strategy: impl Into<String>) -> Self {
        self.rollback = Some(strategy.into());
        self
    }
}

/// Everything both charts draw, passed explicitly to the layout and render steps.
#[derive(Clone, Debug)]
pub struct Plan {
    pub title: String,
    /// First working day of week 1.
    pub first_day: NaiveDate,
    pub role_order: Vec<String>,
    pub phases: Vec<Phase>,
    pub milestones: Vec<Milestone>,
    /// Reserve added on top of the phase totals in the summary line.
    pub buffer_weight: Option<f64>,
    pub weight_unit: String,
    pub success_criteria: Option<String>,
    pub critical_path_note: Option<String>,
}

impl Plan {
    pub fn new(title: impl Into<String>, first_day: NaiveDate) -> Self {
        Self {
            title: title.into(),
            first_day,
            role_order: Vec::new(),
            phases: Vec::new(),
            milestones: Vec::new(),
            buffer_weight: None,
            weight_unit: "MD".to_string(),
            success_criteria: None,
            critical_path_note: None,
        }
    }

    /// Check cross-references the task constructors cannot see.
    pub fn validate(&self) -> Result<()> {
        for task in self.tasks() {
            if !self.role_order.iter().any(|r| r == task.role()) {
                return Err(PlanError::UnknownRole {
                    label: task.label().to_string(),
                    role: task.role().to_string(),
                });
            }
        }
        for (i, m) in self.milestones.iter().enumerate() {
            if m.week == 0 {
                return Err(PlanError::InvalidMilestone { id: m.id.clone(), reason: "week must be 1 or later" });
            }
            if self.milestones[..i].iter().any(|o| o.id == m.id) {
                return Err(PlanError::InvalidMilestone { id: m.id.clone(), reason: "duplicate id" });
            }
        }
        Ok(())
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.phases.iter().flat_map(|p| p.tasks.iter())
    }

    /// Index of `role` in the role order, if listed.
    pub fn role_index(&self, role: &str) -> Option<usize> {
        self.role_order.iter().position(|r| r == role)
    }

    pub fn total_weight(&self) -> f64 {
        self.phases.iter().filter_map(Phase::total_weight).sum()
    }

    /// Monday of week `week` (week 1 is the week containing `first_day`).
    pub fn week_monday(&self, week: u32) -> NaiveDate {
        let back = self.first_day.weekday().num_days_from_monday() as i64;
        let monday = self.first_day - Duration::days(back);
        monday + Duration::days(7 * (week.max(1) as i64 - 1))
    }

    /// `M/D` of the first working day of `week`.
    pub fn week_label(&self, week: u32) -> String {
        let day = if week <= 1 { self.first_day } else { self.week_monday(week) };
        format!("{}/{}", day.month(), day.day())
    }

    /// `M/D` of the Friday closing `week`.
    pub fn milestone_date(&self, week: u32) -> String {
        let day = self.week_monday(week) + Duration::days(4);
        format!("{}/{}", day.month(), day.day())
    }

    /// Weight totals line: `Total: 118 MD + Buffer 20 MD = 138 MD   |   P0: 12 ...`.
    pub fn weight_summary(&self) -> String {
        let unit = &self.weight_unit;
        let total = self.total_weight();
        let mut out = match self.buffer_weight {
            Some(buffer) => format!(
                "Total: {} {unit} + Buffer {} {unit} = {} {unit}",
                format_weight(total),
                format_weight(buffer),
                format_weight(total + buffer),
            ),
            None => format!("Total: {} {unit}", format_weight(total)),
        };
        let parts = self
            .phases
            .iter()
            .filter_map(|p| p.total_weight().map(|w| format!("{}: {}", p.key, format_weight(w))))
            .chain(self.buffer_weight.map(|b| format!("Buffer: {}", format_weight(b))))
            .collect::<Vec<_>>();
        if !parts.is_empty() {
            out.push_str("   |   ");
            out.push_str(&parts.join("   "));
        }
        out
    }

    /// Schedule line: `10 Weeks (4/1 ~ 6/6)   |   6 Milestones   |   1 GATE Decision`.
    pub fn milestone_summary(&self) -> String {
        let last_week = self.milestones.iter().map(|m| m.week).max().unwrap_or(1);
        let gates = self.milestones.iter().filter(|m| m.gate).count();
        let mut parts = vec![
            format!(
                "{} Weeks ({} ~ {})",
                last_week,
                self.week_label(1),
                self.milestone_date(last_week)
            ),
            format!("{} Milestones", self.milestones.len()),
            format!("{} GATE Decision{}", gates, if gates == 1 { "" } else { "s" }),
        ];
        if let Some(success) = &self.success_criteria {
            parts.push(success.clone());
        }
        parts.join("   |   ")
    }
}
