// File: crates/plan-core/src/milestone.rs
// Summary: Milestone timeline: phase ribbon, milestone cards alternating around the line, duration arrows.

use skia_safe as skia;

use crate::geometry::RectF;
use crate::layout::TextMetrics;
use crate::model::{Milestone, Plan};
use crate::render::{self, ChartRender, RenderOptions};
use crate::scale::WeekScale;
use crate::text::{Emphasis, TextShaper};
use crate::view::WeekRange;

const CARD_PAD: f32 = 14.0;
const LINE_SPACING: f32 = 1.6;
const SEPARATOR_GAP: f32 = 12.0;
const CARD_OFFSET: f32 = 90.0;
const ROLLBACK_OFFSET: f32 = 62.0;
const RIBBON_HEIGHT: f32 = 36.0;

/// Card lines for one milestone; the first line is the title.
pub fn card_lines(m: &Milestone) -> Vec<String> {
    let badge = if m.gate { "  [GATE Go/No-Go]" } else { "" };
    let mut lines = vec![format!("{}{}", m.title, badge)];
    lines.extend(m.exit_criteria.iter().map(|c| format!("\u{2022} {c}")));
    lines
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMilestone<'a> {
    pub index: usize,
    pub milestone: &'a Milestone,
    pub x: f32,
    /// Card sits above the timeline (even positions) or below it.
    pub above: bool,
    pub card: RectF,
    pub lines: Vec<String>,
    pub rollback: Option<(RectF, String)>,
}

impl PlacedMilestone<'_> {
    /// Edge of the card facing the timeline.
    pub fn card_anchor_y(&self) -> f32 {
        if self.above { self.card.bottom } else { self.card.top }
    }
}

/// Gap between two consecutive milestones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationSpan {
    pub from_x: f32,
    pub to_x: f32,
    pub weeks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RibbonSegment {
    pub phase_index: usize,
    pub rect: RectF,
}

#[derive(Clone, Debug)]
pub struct MilestoneLayout<'a> {
    pub range: WeekRange,
    pub scale: WeekScale,
    pub timeline_y: f32,
    pub ribbon: Vec<RibbonSegment>,
    pub items: Vec<PlacedMilestone<'a>>,
    pub spans: Vec<DurationSpan>,
}

impl<'a> MilestoneLayout<'a> {
    /// Place ribbon, cards and arrows inside `area`. Card sizes come from the
    /// width heuristic in `metrics`, so layout needs no font backend.
    pub fn build(plan: &'a Plan, metrics: &TextMetrics, area: RectF) -> Self {
        let range = WeekRange::from_plan(plan);
        let scale = WeekScale::fit(area.left, area.right, range.first, range.last);
        let timeline_y = area.center_y();

        let ribbon_top = area.top;
        let ribbon = plan
            .phases
            .iter()
            .enumerate()
            .filter_map(|(phase_index, phase)| {
                let (start, end) = phase.week_span()?;
                let rect = RectF::from_ltrb(scale.to_px(start), ribbon_top, scale.to_px(end), ribbon_top + RIBBON_HEIGHT);
                Some(RibbonSegment { phase_index, rect })
            })
            .collect();

        let font = metrics.font_size as f32;
        let line_h = font * LINE_SPACING;
        let small = metrics.with_font_size(metrics.font_size * 0.8);

        let items = plan
            .milestones
            .iter()
            .enumerate()
            .map(|(index, milestone)| {
                let x = scale.to_px(milestone.week as f64 + 0.5);
                let above = index % 2 == 0;
                let lines = card_lines(milestone);
                let widest = lines.iter().map(|l| metrics.estimate(l)).fold(0.0, f64::max) as f32;
                let w = widest + CARD_PAD * 2.0;
                let h = CARD_PAD * 2.0 + line_h * lines.len() as f32 + SEPARATOR_GAP;
                let top = if above { timeline_y - CARD_OFFSET - h } else { timeline_y + CARD_OFFSET };
                let card = RectF::from_ltwh(x - w * 0.5, top, w, h).clamp_x(area.left, area.right);

                let rollback = milestone.rollback.as_ref().map(|r| {
                    let text = format!("Rollback: {r}");
                    let rw = small.estimate(&text) as f32 + 12.0;
                    let cy = if above { timeline_y + ROLLBACK_OFFSET } else { timeline_y - ROLLBACK_OFFSET };
                    let rect = RectF::centered(x, cy, rw, small.font_size as f32 * 2.0).clamp_x(area.left, area.right);
                    (rect, text)
                });

                PlacedMilestone { index, milestone, x, above, card, lines, rollback }
            })
            .collect::<Vec<_>>();

        let spans = plan
            .milestones
            .windows(2)
            .zip(items.windows(2))
            .map(|(ms, placed)| DurationSpan {
                from_x: placed[0].x,
                to_x: placed[1].x,
                weeks: ms[1].week.saturating_sub(ms[0].week),
            })
            .collect();

        Self { range, scale, timeline_y, ribbon, items, spans }
    }
}

pub struct MilestoneChart<'a> {
    pub plan: &'a Plan,
    pub options: RenderOptions,
    pub metrics: TextMetrics,
    pub title: String,
}

impl<'a> MilestoneChart<'a> {
    pub fn new(plan: &'a Plan, options: RenderOptions, metrics: TextMetrics) -> Self {
        Self { plan, options, metrics, title: plan.title.clone() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(&self) -> MilestoneLayout<'a> {
        MilestoneLayout::build(self.plan, &self.metrics, self.options.plot_rect())
    }

    fn draw_ribbon(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &MilestoneLayout) {
        let opts = &self.options;
        for seg in &layout.ribbon {
            let color = opts.theme.milestone_color(seg.phase_index);
            render::draw_box(canvas, seg.rect, 6.0, render::with_alpha(color, 0.88), Some((skia::Color::WHITE, 2.5)));
            if opts.draw_labels {
                let label = &self.plan.phases[seg.phase_index].label;
                shaper.draw_centered(canvas, label, seg.rect.center_x(), seg.rect.center_y(), 14.0, skia::Color::WHITE, Emphasis::Bold);
            }
        }
    }

    fn draw_timeline(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &MilestoneLayout) {
        let opts = &self.options;
        let theme = &opts.theme;
        let area = opts.plot_rect();
        let y = layout.timeline_y;

        let mut line = render::stroke(theme.timeline, 5.0);
        line.set_stroke_cap(skia::paint::Cap::Round);
        canvas.draw_line((area.left - 10.0, y), (area.right + 10.0, y), &line);

        let tick = render::stroke(theme.tick, 1.5);
        for w in layout.range.week_numbers() {
            let x = layout.scale.to_px(w as f64 + 0.5);
            canvas.draw_line((x, y - 8.0), (x, y + 8.0), &tick);
            if opts.draw_labels {
                shaper.draw_centered(canvas, &format!("W{w}"), x, y + 18.0, 12.0, theme.subtext, Emphasis::Regular);
            }
        }

        let arrow = render::stroke(theme.subtext, 1.0);
        for span in &layout.spans {
            let (x1, x2) = (span.from_x + 22.0, span.to_x - 22.0);
            if x2 <= x1 {
                continue;
            }
            let ay = y - 24.0;
            canvas.draw_line((x1, ay), (x2, ay), &arrow);
            render::draw_arrow_head(canvas, (x1, ay), -1.0, 0.0, 7.0, 6.0, theme.subtext);
            render::draw_arrow_head(canvas, (x2, ay), 1.0, 0.0, 7.0, 6.0, theme.subtext);
            if opts.draw_labels {
                let text = format!("{}w", span.weeks);
                shaper.draw_centered(canvas, &text, (x1 + x2) * 0.5, ay - 10.0, 11.0, theme.subtext, Emphasis::Bold);
            }
        }
    }

    fn draw_milestones(&self, canvas: &skia::Canvas, shaper: &TextShaper, layout: &MilestoneLayout) {
        let opts = &self.options;
        let theme = &opts.theme;
        let y = layout.timeline_y;
        let font = self.metrics.font_size as f32;
        let line_h = font * LINE_SPACING;

        for item in &layout.items {
            let m = item.milestone;
            let color = theme.milestone_color(item.index);

            let connector = render::stroke(render::with_alpha(color, 0.5), 2.0);
            let start = if item.above { y - 24.0 } else { y + 24.0 };
            canvas.draw_line((item.x, start), (item.x, item.card_anchor_y()), &connector);

            let half = if m.gate { 22.0 } else { 18.0 };
            render::draw_diamond(canvas, item.x, y, half, color, skia::Color::WHITE, 3.0);

            let border = if m.gate { 2.5 } else { 1.5 };
            render::draw_box(canvas, item.card, 8.0, render::with_alpha(theme.card_fill, 0.97), Some((color, border)));
            let sep_y = item.card.top + CARD_PAD + line_h + SEPARATOR_GAP * 0.5;
            canvas.draw_line(
                (item.card.left + CARD_PAD, sep_y),
                (item.card.right - CARD_PAD, sep_y),
                &render::stroke(render::with_alpha(color, 0.6), 1.0),
            );

            if let Some((rect, _)) = &item.rollback {
                render::draw_box(canvas, *rect, 5.0, render::with_alpha(theme.rollback_fill, 0.92), Some((theme.rollback_stroke, 0.8)));
            }

            if !opts.draw_labels {
                continue;
            }
            shaper.draw_centered(canvas, &m.id, item.x, y, 11.0, skia::Color::WHITE, Emphasis::Bold);
            let date = self.plan.milestone_date(m.week);
            shaper.draw_centered(canvas, &format!("{date} (W{})", m.week), item.x, y + 38.0, 13.0, color, Emphasis::Bold);

            let left = item.card.left + CARD_PAD;
            let mut cy = item.card.top + CARD_PAD + line_h * 0.5;
            for (i, line) in item.lines.iter().enumerate() {
                let (c, e) = if i == 0 { (theme.text, Emphasis::Bold) } else { (theme.text, Emphasis::Regular) };
                shaper.draw_left(canvas, line, left, cy, font, c, e);
                cy += line_h;
                if i == 0 {
                    cy += SEPARATOR_GAP;
                }
            }

            if let Some((rect, text)) = &item.rollback {
                shaper.draw_centered(canvas, text, rect.center_x(), rect.center_y(), font * 0.8, theme.rollback_text, Emphasis::Italic);
            }
        }
    }

    fn draw_titles(&self, canvas: &skia::Canvas, shaper: &TextShaper) {
        let opts = &self.options;
        let theme = &opts.theme;
        let w = opts.width as f32;

        shaper.draw_left(canvas, &self.title, 30.0, 36.0, 24.0, theme.text, Emphasis::Bold);

        let summary = self.plan.milestone_summary();
        let size = 14.0;
        let sw = shaper.measure_width(&summary, size, Emphasis::Bold) + 24.0;
        let rect = RectF::centered(w * 0.5, 78.0, sw, size * 2.2);
        render::draw_box(canvas, rect, 6.0, render::with_alpha(theme.summary_fill, 0.9), Some((theme.summary_stroke, 1.0)));
        shaper.draw_centered(canvas, &summary, w * 0.5, 78.0, size, theme.text, Emphasis::Bold);
    }

    fn draw_legend(&self, canvas: &skia::Canvas, shaper: &TextShaper) {
        let opts = &self.options;
        let theme = &opts.theme;
        let size = 12.0;
        let labels = ["GATE (Go/No-Go)", "Milestone", "Rollback Strategy"];
        let widest = labels.iter().map(|l| shaper.measure_width(l, size, Emphasis::Regular)).fold(0.0, f32::max);
        let right = opts.width as f32 - opts.insets.right as f32;
        let bottom = opts.height as f32 - 16.0;
        let row_h = 24.0;
        let frame = RectF::from_ltrb(right - widest - 50.0, bottom - row_h * 3.0 - 12.0, right, bottom);
        render::draw_box(canvas, frame, 6.0, render::with_alpha(theme.card_fill, 0.95), Some((theme.timeline, 1.0)));

        let mx = frame.left + 18.0;
        for (i, label) in labels.iter().enumerate() {
            let cy = frame.top + 6.0 + row_h * (i as f32 + 0.5);
            match i {
                0 => render::draw_diamond(canvas, mx, cy, 8.0, theme.critical, skia::Color::WHITE, 1.5),
                1 => render::draw_diamond(canvas, mx, cy, 8.0, theme.milestone_line, skia::Color::WHITE, 1.5),
                _ => render::draw_box(canvas, RectF::centered(mx, cy, 16.0, 12.0), 2.0, theme.rollback_fill, Some((theme.rollback_stroke, 0.8))),
            }
            shaper.draw_left(canvas, label, mx + 16.0, cy, size, theme.text, Emphasis::Regular);
        }
    }
}

impl ChartRender for MilestoneChart<'_> {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn draw(&self, canvas: &skia::Canvas, shaper: &TextShaper) {
        canvas.clear(self.options.theme.background);
        let layout = self.layout();

        self.draw_ribbon(canvas, shaper, &layout);
        self.draw_timeline(canvas, shaper, &layout);
        self.draw_milestones(canvas, shaper, &layout);
        if self.options.draw_labels {
            self.draw_titles(canvas, shaper);
            self.draw_legend(canvas, shaper);
        }
    }
}
