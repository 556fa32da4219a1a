// File: crates/plan-core/src/layout.rs
// Summary: Row layout engine: first-fit interval packing per role and label fitting for bars.
// Notes:
// - Everything here is pure; no drawing calls and no global state. The render
//   step consumes `Row`, `RoleBlock` and `LabelPlacement` values.

use tracing::debug;

use crate::model::Task;

/// Appended to a label that had to be shortened.
pub const TRUNCATION_MARKER: &str = "..";

/// Tasks sharing one sub-row; intervals never overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row<'a> {
    tasks: Vec<&'a Task>,
}

impl<'a> Row<'a> {
    /// Tasks in placement order (ascending start).
    pub fn tasks(&self) -> &[&'a Task] { &self.tasks }
    pub fn len(&self) -> usize { self.tasks.len() }
    pub fn is_empty(&self) -> bool { self.tasks.is_empty() }

    fn accepts(&self, task: &Task) -> bool {
        self.tasks.last().map_or(true, |last| !last.overlaps(task))
    }
}

/// One role's rows, in the order they were opened.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleBlock<'a> {
    pub role: &'a str,
    pub rows: Vec<Row<'a>>,
}

impl RoleBlock<'_> {
    pub fn task_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }
}

/// Pack one role's tasks into the fewest non-overlapping rows.
///
/// Tasks are stably sorted by start, then each goes into the first row whose
/// last task ends at or before its start. A new row is opened only when every
/// open row is busy at that start, so the row count equals the peak overlap.
pub fn pack_role<'a, I>(tasks: I) -> Vec<Row<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&'a Task> = tasks.into_iter().collect();
    sorted.sort_by(|a, b| a.start().total_cmp(&b.start()));

    let mut rows: Vec<Row<'a>> = Vec::new();
    for task in sorted {
        match rows.iter_mut().find(|row| row.accepts(task)) {
            Some(row) => row.tasks.push(task),
            None => rows.push(Row { tasks: vec![task] }),
        }
    }
    rows
}

/// Group tasks by role and pack each group.
///
/// Blocks follow `role_order`; roles missing from it are appended in order of
/// first appearance. Roles without tasks produce no block.
pub fn pack_by_role<'a, S: AsRef<str>>(tasks: &'a [Task], role_order: &[S]) -> Vec<RoleBlock<'a>> {
    let mut roles: Vec<&'a str> = Vec::new();
    for wanted in role_order {
        if let Some(t) = tasks.iter().find(|t| t.role() == wanted.as_ref()) {
            if !roles.contains(&t.role()) {
                roles.push(t.role());
            }
        }
    }
    for t in tasks {
        if !roles.contains(&t.role()) {
            roles.push(t.role());
        }
    }

    roles
        .into_iter()
        .map(|role| {
            let members = tasks.iter().filter(|t| t.role() == role);
            let rows = pack_role(members.clone());
            debug!(
                role,
                tasks = members.clone().count(),
                rows = rows.len(),
                peak = max_overlap(members),
                "packed role"
            );
            RoleBlock { role, rows }
        })
        .collect()
}

/// Largest number of tasks active at one instant (sweep line).
///
/// Ends are processed before starts at equal coordinates, so touching
/// intervals do not count as overlapping.
pub fn max_overlap<'a, I>(tasks: I) -> usize
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut events: Vec<(f64, i32)> = Vec::new();
    for t in tasks {
        events.push((t.start(), 1));
        events.push((t.end(), -1));
    }
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut active = 0i32;
    let mut peak = 0i32;
    for (_, delta) in events {
        active += delta;
        peak = peak.max(active);
    }
    peak as usize
}

/// Per-character width heuristic; no font metrics involved.
///
/// Characters at or above `wide_threshold` (Hangul, CJK, box drawing, ...)
/// count as `wide_unit` ems, everything else as `narrow_unit` ems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub font_size: f64,
    pub narrow_unit: f64,
    pub wide_unit: f64,
    pub wide_threshold: u32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self { font_size: 13.0, narrow_unit: 0.6, wide_unit: 1.0, wide_threshold: 0x1100 }
    }
}

impl TextMetrics {
    /// Width of `c` in ems.
    #[inline]
    pub fn char_units(&self, c: char) -> f64 {
        if (c as u32) >= self.wide_threshold { self.wide_unit } else { self.narrow_unit }
    }

    pub fn estimate(&self, text: &str) -> f64 {
        text.chars().map(|c| self.char_units(c)).sum::<f64>() * self.font_size
    }

    /// Same heuristic at another font size.
    pub fn with_font_size(&self, font_size: f64) -> Self {
        Self { font_size, ..*self }
    }
}

/// Where a bar's label goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelPlacement {
    /// Centred within the bar.
    Inside(String),
    /// Left-aligned right after the bar. Empty means nothing is drawn.
    Beside(String),
}

impl LabelPlacement {
    pub fn text(&self) -> &str {
        match self {
            LabelPlacement::Inside(s) | LabelPlacement::Beside(s) => s,
        }
    }

    pub fn is_inside(&self) -> bool { matches!(self, LabelPlacement::Inside(_)) }
}

/// Label fitting parameters, all in the same unit as the drawn widths.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelFit {
    /// Slack a label must leave inside its bar.
    pub margin: f64,
    /// Space kept between a bar and a label drawn beside it.
    pub gap: f64,
    /// Below this much free space nothing is drawn beside a bar.
    pub min_space: f64,
    /// Right edge used when no task follows in the row.
    pub canvas_right: f64,
    pub weight_unit: String,
    pub metrics: TextMetrics,
}

impl Default for LabelFit {
    fn default() -> Self {
        Self {
            margin: 8.0,
            gap: 6.0,
            min_space: 24.0,
            canvas_right: f64::INFINITY,
            weight_unit: "MD".to_string(),
            metrics: TextMetrics::default(),
        }
    }
}

/// Render weights as integers when they have no fractional part.
pub fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 && w.abs() < 1e15 {
        format!("{}", w as i64)
    } else {
        format!("{w}")
    }
}

/// `label` plus `  (<weight><unit>)` when a non-zero weight is present.
pub fn compose_label(label: &str, weight: Option<f64>, unit: &str) -> String {
    match weight {
        Some(w) if w != 0.0 => format!("{label}  ({}{unit})", format_weight(w)),
        _ => label.to_string(),
    }
}

/// Longest prefix of `text` that fits `available` together with the marker.
///
/// Returns `text` unchanged when it already fits, and an empty string when
/// not even the marker fits.
pub fn truncate_to_width(text: &str, available: f64, metrics: &TextMetrics) -> String {
    if metrics.estimate(text) <= available {
        return text.to_string();
    }
    let marker = metrics.estimate(TRUNCATION_MARKER);
    if marker > available {
        return String::new();
    }
    let budget = available - marker;
    let mut units = 0.0;
    let mut cut = 0;
    for (i, c) in text.char_indices() {
        let next = units + metrics.char_units(c);
        if next * metrics.font_size > budget {
            break;
        }
        units = next;
        cut = i + c.len_utf8();
    }
    format!("{}{TRUNCATION_MARKER}", text[..cut].trim_end())
}

/// Stateless per call; the configuration is fixed at construction.
#[derive(Clone, Debug, Default)]
pub struct RowLayoutEngine {
    fit: LabelFit,
}

impl RowLayoutEngine {
    pub fn new(fit: LabelFit) -> Self { Self { fit } }

    pub fn label_fit(&self) -> &LabelFit { &self.fit }

    pub fn pack_role<'a, I>(&self, tasks: I) -> Vec<Row<'a>>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        pack_role(tasks)
    }

    pub fn pack_by_role<'a, S: AsRef<str>>(&self, tasks: &'a [Task], role_order: &[S]) -> Vec<RoleBlock<'a>> {
        pack_by_role(tasks, role_order)
    }

    /// Decide whether a label goes inside its bar or beside it.
    ///
    /// `next_start` is where the following task in the same row begins; with
    /// `None` the space runs up to `canvas_right`.
    pub fn fit_label(
        &self,
        label: &str,
        weight: Option<f64>,
        drawn_width: f64,
        next_start: Option<f64>,
        current_end: f64,
    ) -> LabelPlacement {
        let fit = &self.fit;
        let full = compose_label(label, weight, &fit.weight_unit);
        if fit.metrics.estimate(&full) + fit.margin <= drawn_width {
            return LabelPlacement::Inside(full);
        }

        let limit = next_start.unwrap_or(fit.canvas_right);
        let available = (limit - current_end) - fit.gap;
        if available < fit.min_space {
            return LabelPlacement::Beside(String::new());
        }
        let shown = truncate_to_width(&full, available, &fit.metrics);
        if shown != full {
            debug!(label = %full, shown = %shown, available, "label truncated");
        }
        LabelPlacement::Beside(shown)
    }
}
