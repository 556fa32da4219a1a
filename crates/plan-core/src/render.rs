// File: crates/plan-core/src/render.rs
// Summary: Shared output pipeline (PNG raster surface, SVG canvas) and paint helpers for chart renderers.

use std::path::Path;

use anyhow::Result;
use skia_safe as skia;
use tracing::info;

use crate::geometry::RectF;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Skip every text draw; keeps pixel snapshots independent of installed fonts.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

impl RenderOptions {
    /// Area inside the insets.
    pub fn plot_rect(&self) -> RectF {
        RectF::from_ltrb(
            self.insets.left as f32,
            self.insets.top as f32,
            (self.width - self.insets.right as i32) as f32,
            (self.height - self.insets.bottom as i32) as f32,
        )
    }
}

/// A chart that can paint itself onto any Skia canvas.
pub trait ChartRender {
    fn options(&self) -> &RenderOptions;
    fn draw(&self, canvas: &skia::Canvas, shaper: &TextShaper);

    /// Render to PNG bytes using a CPU raster surface.
    fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let opts = self.options();
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let shaper = TextShaper::new();
        self.draw(surface.canvas(), &shaper);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to an SVG document.
    fn render_to_svg_bytes(&self) -> Result<Vec<u8>> {
        let opts = self.options();
        let bounds = skia::Rect::from_wh(opts.width as f32, opts.height as f32);
        let canvas = skia::svg::Canvas::new(bounds, None);
        let shaper = TextShaper::new();
        self.draw(&canvas, &shaper);
        let data = canvas.end();
        if data.is_empty() {
            anyhow::bail!("SVG canvas produced no output");
        }
        Ok(data.as_bytes().to_vec())
    }

    fn render_to_png(&self, output_png_path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes()?;
        write_output(output_png_path.as_ref(), &bytes)
    }

    fn render_to_svg(&self, output_svg_path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_to_svg_bytes()?;
        write_output(output_svg_path.as_ref(), &bytes)
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "chart written");
    Ok(())
}

// ---- paint helpers ----------------------------------------------------------

pub(crate) fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

pub(crate) fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

pub(crate) fn dashed(color: skia::Color, width: f32, on: f32, off: f32) -> skia::Paint {
    let mut paint = stroke(color, width);
    paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    paint
}

/// `color` with its alpha replaced by `alpha` in `[0, 1]`.
pub(crate) fn with_alpha(color: skia::Color, alpha: f32) -> skia::Color {
    color.with_a((alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Rounded box with a fill and an optional border.
pub(crate) fn draw_box(
    canvas: &skia::Canvas,
    rect: RectF,
    radius: f32,
    fill_color: skia::Color,
    border: Option<(skia::Color, f32)>,
) {
    let r: skia::Rect = rect.into();
    canvas.draw_round_rect(r, radius, radius, &fill(fill_color));
    if let Some((color, width)) = border {
        if width > 0.0 {
            canvas.draw_round_rect(r, radius, radius, &stroke(color, width));
        }
    }
}

pub(crate) fn diamond_path(cx: f32, cy: f32, half: f32) -> skia::Path {
    let mut path = skia::Path::new();
    path.move_to((cx, cy - half));
    path.line_to((cx + half, cy));
    path.line_to((cx, cy + half));
    path.line_to((cx - half, cy));
    path.close();
    path
}

/// Filled diamond with a contrasting outline.
pub(crate) fn draw_diamond(canvas: &skia::Canvas, cx: f32, cy: f32, half: f32, color: skia::Color, outline: skia::Color, outline_width: f32) {
    let path = diamond_path(cx, cy, half);
    canvas.draw_path(&path, &fill(color));
    if outline_width > 0.0 {
        canvas.draw_path(&path, &stroke(outline, outline_width));
    }
}

/// Triangular head at `tip`, pointing along `(dx, dy)`.
pub(crate) fn draw_arrow_head(canvas: &skia::Canvas, tip: (f32, f32), dx: f32, dy: f32, length: f32, width: f32, color: skia::Color) {
    let len = (dx * dx + dy * dy).sqrt().max(1e-6);
    let (ux, uy) = (dx / len, dy / len);
    let (bx, by) = (tip.0 - ux * length, tip.1 - uy * length);
    let (px, py) = (-uy * width * 0.5, ux * width * 0.5);
    let mut path = skia::Path::new();
    path.move_to(tip);
    path.line_to((bx + px, by + py));
    path.line_to((bx - px, by - py));
    path.close();
    canvas.draw_path(&path, &fill(color));
}
