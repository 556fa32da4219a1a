// File: crates/plan-core/src/gantt.rs
// Summary: Gantt chart: per-phase role blocks packed into sub-rows, then drawn with Skia.
// Notes:
// - `GanttLayout` is the pure half: it hands the renderer one `PlacedBar`
//   (row index, task, label placement) per task.
// - `GanttChart` only consumes a layout; it makes no placement decisions.

use skia_safe as skia;

use crate::geometry::RectF;
use crate::grid::week_boundaries;
use crate::layout::{format_weight, LabelFit, LabelPlacement, Row, RowLayoutEngine};
use crate::model::{Plan, Task};
use crate::render::{self, ChartRender, RenderOptions};
use crate::scale::{RowScale, WeekScale};
use crate::text::{Emphasis, TextShaper};
use crate::view::WeekRange;

/// Vertical rhythm of the Gantt body, in row slots unless noted.
#[derive(Clone, Copy, Debug)]
pub struct GanttStyle {
    /// Upper bound on one row's height in pixels.
    pub max_row_px: f32,
    /// Bar height as a fraction of the row height.
    pub bar_fill: f32,
    pub role_gap: f32,
    pub phase_gap: f32,
}

impl Default for GanttStyle {
    fn default() -> Self {
        Self { max_row_px: 34.0, bar_fill: 0.72, role_gap: 0.2, phase_gap: 1.2 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRow<'a> {
    pub phase_index: usize,
    pub role: &'a str,
    /// Position of `role` in the plan's role order (palette index).
    pub role_index: usize,
    /// Sub-row within the role block, 0 for the first.
    pub sub_row: usize,
    pub slot: f32,
    /// Centre line in pixels.
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBar<'a> {
    pub row_index: usize,
    pub task: &'a Task,
    pub rect: RectF,
    pub placement: LabelPlacement,
}

/// Vertical extent of one phase's rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseBand {
    pub phase_index: usize,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Debug)]
pub struct GanttLayout<'a> {
    pub range: WeekRange,
    pub scale: WeekScale,
    pub row_scale: RowScale,
    pub rows: Vec<LayoutRow<'a>>,
    pub bars: Vec<PlacedBar<'a>>,
    pub phases: Vec<PhaseBand>,
    /// Indices into `bars` of critical tasks, top to bottom.
    pub critical_chain: Vec<usize>,
}

struct PendingRow<'a> {
    phase_index: usize,
    role: &'a str,
    role_index: usize,
    sub_row: usize,
    slot: f32,
    row: Row<'a>,
}

impl<'a> GanttLayout<'a> {
    /// Lay out every phase of `plan` inside `area` (pixels).
    pub fn build(plan: &'a Plan, fit: &LabelFit, area: RectF, style: &GanttStyle) -> Self {
        let range = WeekRange::from_plan(plan);
        let scale = WeekScale::fit(area.left, area.right, range.first, range.last);
        let engine = RowLayoutEngine::new(LabelFit { canvas_right: area.right as f64, ..fit.clone() });

        let mut pending: Vec<PendingRow<'a>> = Vec::new();
        let mut spans: Vec<(usize, f32, f32)> = Vec::new();
        let mut slot = 0.0f32;
        for (phase_index, phase) in plan.phases.iter().enumerate() {
            let blocks = engine.pack_by_role(&phase.tasks, &plan.role_order);
            if blocks.is_empty() {
                continue;
            }
            let first_slot = slot;
            for (block_index, block) in blocks.into_iter().enumerate() {
                if block_index > 0 {
                    slot += style.role_gap;
                }
                let role_index = plan.role_index(block.role).unwrap_or(plan.role_order.len());
                for (sub_row, row) in block.rows.into_iter().enumerate() {
                    pending.push(PendingRow { phase_index, role: block.role, role_index, sub_row, slot, row });
                    slot += 1.0;
                }
            }
            spans.push((phase_index, first_slot, slot - 1.0));
            slot += style.phase_gap;
        }
        let total_slots = spans.last().map_or(1.0, |&(_, _, last)| last + 1.0);
        let row_scale = RowScale::fit(area.top, area.height(), total_slots, style.max_row_px);
        let half_bar = row_scale.slot_px * style.bar_fill * 0.5;

        let mut rows = Vec::with_capacity(pending.len());
        let mut bars = Vec::new();
        for (row_index, p) in pending.into_iter().enumerate() {
            let y = row_scale.center_px(p.slot);
            let tasks = p.row.tasks();
            for (i, &task) in tasks.iter().enumerate() {
                let left = scale.to_px(task.start());
                let right = scale.to_px(task.end());
                let rect = RectF::from_ltrb(left, y - half_bar, right, y + half_bar);
                let next_start = tasks.get(i + 1).map(|n| scale.to_px(n.start()) as f64);
                let placement = engine.fit_label(
                    task.label(),
                    task.weight(),
                    rect.width() as f64,
                    next_start,
                    right as f64,
                );
                bars.push(PlacedBar { row_index, task, rect, placement });
            }
            rows.push(LayoutRow {
                phase_index: p.phase_index,
                role: p.role,
                role_index: p.role_index,
                sub_row: p.sub_row,
                slot: p.slot,
                y,
            });
        }

        let half_slot = row_scale.slot_px * 0.5;
        let phases = spans
            .into_iter()
            .map(|(phase_index, first, last)| PhaseBand {
                phase_index,
                top: row_scale.center_px(first) - half_slot,
                bottom: row_scale.center_px(last) + half_slot,
            })
            .collect();
        let critical_chain = bars
            .iter()
            .enumerate()
            .filter(|(_, b)| b.task.is_critical())
            .map(|(i, _)| i)
            .collect();

        Self { range, scale, row_scale, rows, bars, phases, critical_chain }
    }

    /// `(row-index, task, placement)` for every bar, in drawing order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &'a Task, &LabelPlacement)> + '_ {
        self.bars.iter().map(|b| (b.row_index, b.task, &b.placement))
    }

    pub fn row_y(&self, row_index: usize) -> f32 {
        self.rows[row_index].y
    }
}

pub struct GanttChart<'a> {
    pub plan: &'a Plan,
    pub options: RenderOptions,
    pub fit: LabelFit,
    pub style: GanttStyle,
    pub title: String,
}

impl<'a> GanttChart<'a> {
    pub fn new(plan: &'a Plan, options: RenderOptions, fit: LabelFit) -> Self {
        Self { plan, options, fit, style: GanttStyle::default(), title: plan.title.clone() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(&self) -> GanttLayout<'a> {
        GanttLayout::build(self.plan, &self.fit, self.options.plot_rect(), &self.style)
    }

    fn font_size(&self) -> f32 {
        self.fit.metrics.font_size as f32
    }

    fn draw_phase_bands(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &GanttLayout) {
        let opts = &self.options;
        let area = opts.plot_rect();
        for band in &layout.phases {
            let (bg, accent) = opts.theme.phase_colors(band.phase_index);
            let rect = RectF::from_ltrb(area.left - 10.0, band.top - 6.0, area.right + 10.0, band.bottom + 6.0);
            render::draw_box(canvas, rect, 8.0, render::with_alpha(bg, 0.75), Some((render::with_alpha(accent, 0.6), 1.2)));

            if !opts.draw_labels {
                continue;
            }
            let phase = &self.plan.phases[band.phase_index];
            let text = match phase.total_weight() {
                Some(w) => format!("{}  [ {} {} ]", phase.label, format_weight(w), self.plan.weight_unit),
                None => phase.label.clone(),
            };
            let size = 13.0;
            let w = shaper.measure_width(&text, size, Emphasis::Bold) + 20.0;
            let cx = (area.left - 12.0) * 0.5;
            let cy = (band.top + band.bottom) * 0.5;
            let label_box = RectF::centered(cx, cy, w, size * 2.2).clamp_x(4.0, area.left - 16.0);
            render::draw_box(canvas, label_box, 6.0, render::with_alpha(accent, 0.92), None);
            shaper.draw_centered(canvas, &text, label_box.center_x(), cy, size, skia::Color::WHITE, Emphasis::Bold);
        }
    }

    fn draw_week_grid(&self, canvas: &skia::Canvas, layout: &GanttLayout) {
        let area = self.options.plot_rect();
        let paint = render::stroke(self.options.theme.grid, 0.5);
        for w in week_boundaries(layout.range.first, layout.range.last) {
            let x = layout.scale.to_px(w);
            canvas.draw_line((x, area.top - 12.0), (x, area.bottom), &paint);
        }
    }

    fn draw_milestones(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &GanttLayout) {
        let opts = &self.options;
        let theme = &opts.theme;
        let area = opts.plot_rect();
        let top = layout.phases.first().map_or(area.top, |b| b.top);
        let bottom = layout.phases.last().map_or(area.bottom, |b| b.bottom);
        let diamond_y = area.top - 92.0;
        let caption_y = area.top - 148.0;

        for m in &self.plan.milestones {
            let x = layout.scale.to_px(m.week as f64 + 1.0);
            let color = if m.gate { theme.critical } else { theme.milestone_line };
            let line = if m.gate {
                render::stroke(render::with_alpha(color, 0.4), 2.0)
            } else {
                render::dashed(render::with_alpha(color, 0.4), 1.0, 6.0, 4.0)
            };
            canvas.draw_line((x, top), (x, bottom), &line);
            render::draw_diamond(canvas, x, diamond_y, 12.0, color, theme.background, 2.5);

            if !opts.draw_labels {
                continue;
            }
            let gate = if m.gate { " (GATE)" } else { "" };
            let text = format!("{}: {}{}\n{}", m.id, m.title, gate, self.plan.milestone_date(m.week));
            let size = 12.0;
            let w = shaper.measure_width(&text, size, Emphasis::Bold) + 16.0;
            let caption = RectF::centered(x, caption_y, w, size * 3.4);
            render::draw_box(canvas, caption, 6.0, theme.card_fill, Some((color, 1.5)));
            shaper.draw_centered(canvas, &text, x, caption_y, size, color, Emphasis::Bold);
        }
    }

    fn draw_week_header(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &GanttLayout) {
        let opts = &self.options;
        if !opts.draw_labels {
            return;
        }
        let y = opts.plot_rect().top - 40.0;
        for w in layout.range.week_numbers() {
            let x = layout.scale.to_px(w as f64 + 0.5);
            let text = format!("W{}\n{}", w, self.plan.week_label(w));
            shaper.draw_centered(canvas, &text, x, y, 13.0, opts.theme.header, Emphasis::Bold);
        }
    }

    fn draw_bars(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &GanttLayout) {
        let opts = &self.options;
        let theme = &opts.theme;
        let size = self.font_size();

        for bar in &layout.bars {
            let row = &layout.rows[bar.row_index];
            let color = theme.role_color(row.role_index);
            let border = if bar.task.is_critical() { (theme.critical, 3.0) } else { (color, 0.8) };
            render::draw_box(canvas, bar.rect, 4.0, render::with_alpha(color, 0.88), Some(border));

            if !opts.draw_labels {
                continue;
            }
            match &bar.placement {
                LabelPlacement::Inside(text) => {
                    shaper.draw_centered(canvas, text, bar.rect.center_x(), row.y, size, skia::Color::WHITE, Emphasis::Bold);
                }
                LabelPlacement::Beside(text) if !text.is_empty() => {
                    let x = bar.rect.right + self.fit.gap as f32;
                    shaper.draw_left(canvas, text, x, row.y, size, color, Emphasis::Bold);
                }
                LabelPlacement::Beside(_) => {}
            }
        }

        if !opts.draw_labels {
            return;
        }
        // one badge per row, left of its first bar
        let badge_size = 11.0;
        for (row_index, row) in layout.rows.iter().enumerate() {
            let Some(first) = layout.bars.iter().find(|b| b.row_index == row_index) else { continue };
            let color = theme.role_color(row.role_index);
            let w = shaper.measure_width(row.role, badge_size, Emphasis::Bold) + 10.0;
            let right = first.rect.left - 6.0;
            let badge = RectF::from_ltrb(right - w, row.y - badge_size * 0.9, right, row.y + badge_size * 0.9);
            render::draw_box(canvas, badge, 4.0, theme.badge_fill, Some((color, 1.0)));
            shaper.draw_centered(canvas, row.role, badge.center_x(), row.y, badge_size, color, Emphasis::Bold);
        }
    }

    fn draw_critical_path(&self, canvas: &skia::Canvas, layout: &GanttLayout) {
        let theme = &self.options.theme;
        let color = render::with_alpha(theme.critical, 0.6);
        let paint = render::stroke(color, 1.8);
        let slot = layout.row_scale.slot_px;

        for pair in layout.critical_chain.windows(2) {
            let (a, b) = (&layout.bars[pair[0]], &layout.bars[pair[1]]);
            let from = (a.rect.right - 2.0, layout.row_y(a.row_index));
            let to = (b.rect.left + 2.0, layout.row_y(b.row_index));
            let (dx, dy) = (to.0 - from.0, to.1 - from.1);
            let rad = if dy.abs() < slot * 0.5 {
                0.0
            } else if dy.abs() < slot * 5.0 {
                0.15
            } else {
                0.25
            };
            let ctrl = ((from.0 + to.0) * 0.5 + rad * dy, (from.1 + to.1) * 0.5 - rad * dx);

            let mut path = skia::Path::new();
            path.move_to(from);
            path.quad_to(ctrl, to);
            canvas.draw_path(&path, &paint);
            render::draw_arrow_head(canvas, to, to.0 - ctrl.0, to.1 - ctrl.1, 10.0, 7.0, color);
        }
    }

    fn draw_legend(&self, canvas: &skia::Canvas, shaper: &TextShaper) {
        let opts = &self.options;
        let theme = &opts.theme;
        let size = 12.0;
        let swatch = 14.0;
        let spacing = 18.0;

        let mut items: Vec<(String, LegendMark)> = self
            .plan
            .role_order
            .iter()
            .enumerate()
            .map(|(i, role)| (role.clone(), LegendMark::Swatch(theme.role_color(i), None)))
            .collect();
        items.push(("Critical Path".into(), LegendMark::Swatch(skia::Color::from_rgb(0xBD, 0xBD, 0xBD), Some(theme.critical))));
        items.push(("GATE".into(), LegendMark::Diamond(theme.critical)));
        items.push(("Milestone".into(), LegendMark::Diamond(theme.milestone_line)));

        let widths: Vec<f32> = items.iter().map(|(t, _)| shaper.measure_width(t, size, Emphasis::Regular)).collect();
        let total: f32 = widths.iter().map(|w| swatch + 6.0 + w + spacing).sum::<f32>() - spacing;
        let y = 118.0;
        let right = opts.width as f32 - opts.insets.right as f32;
        let frame = RectF::from_ltrb(right - total - 16.0, y - 16.0, right, y + 16.0);
        render::draw_box(canvas, frame, 6.0, render::with_alpha(theme.card_fill, 0.95), Some((theme.legend_stroke, 1.0)));

        let mut x = frame.left + 8.0;
        for ((text, mark), w) in items.iter().zip(widths) {
            match *mark {
                LegendMark::Swatch(color, border) => {
                    let r = RectF::centered(x + swatch * 0.5, y, swatch, swatch * 0.8);
                    let border = border.map_or((theme.header, 0.8), |c| (c, 2.5));
                    render::draw_box(canvas, r, 2.0, render::with_alpha(color, 0.88), Some(border));
                }
                LegendMark::Diamond(color) => {
                    render::draw_diamond(canvas, x + swatch * 0.5, y, swatch * 0.5, color, theme.background, 1.0);
                }
            }
            shaper.draw_left(canvas, text, x + swatch + 6.0, y, size, theme.text, Emphasis::Regular);
            x += swatch + 6.0 + w + spacing;
        }
    }

    fn draw_titles(&self, canvas: &skia::Canvas, shaper: &TextShaper) {
        let opts = &self.options;
        let theme = &opts.theme;
        let w = opts.width as f32;

        shaper.draw_left(canvas, &self.title, 30.0, 36.0, 24.0, theme.title, Emphasis::Bold);

        let summary = self.plan.weight_summary();
        let size = 14.0;
        let sw = shaper.measure_width(&summary, size, Emphasis::Bold) + 24.0;
        let rect = RectF::centered(w * 0.5, 78.0, sw, size * 2.2);
        render::draw_box(canvas, rect, 6.0, render::with_alpha(theme.summary_fill, 0.9), Some((theme.summary_stroke, 1.0)));
        shaper.draw_centered(canvas, &summary, w * 0.5, 78.0, size, theme.header, Emphasis::Bold);

        if let Some(note) = &self.plan.critical_path_note {
            let cy = opts.height as f32 - opts.insets.bottom as f32 * 0.5;
            let nw = shaper.measure_width(note, 13.0, Emphasis::Bold) + 24.0;
            let rect = RectF::centered(w * 0.5, cy, nw, 13.0 * 2.2);
            render::draw_box(canvas, rect, 6.0, render::with_alpha(theme.note_fill, 0.9), Some((theme.critical, 1.0)));
            shaper.draw_centered(canvas, note, w * 0.5, cy, 13.0, theme.critical, Emphasis::Bold);
        }
    }
}

enum LegendMark {
    Swatch(skia::Color, Option<skia::Color>),
    Diamond(skia::Color),
}

impl ChartRender for GanttChart<'_> {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn draw(&self, canvas: &skia::Canvas, shaper: &TextShaper) {
        canvas.clear(self.options.theme.background);
        let layout = self.layout();

        self.draw_phase_bands(canvas, shaper, &layout);
        self.draw_week_grid(canvas, &layout);
        self.draw_milestones(canvas, shaper, &layout);
        self.draw_bars(canvas, shaper, &layout);
        self.draw_critical_path(canvas, &layout);
        self.draw_week_header(canvas, shaper, &layout);
        if self.options.draw_labels {
            self.draw_legend(canvas, shaper);
            self.draw_titles(canvas, shaper);
        }
    }
}
