// File: crates/plan-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout with CJK-capable font fallbacks.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Regular,
    Bold,
    Italic,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, emphasis: Emphasis) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        // Hangul labels need a CJK family ahead of the Latin ones
        ts.set_font_families(&[
            "Apple SD Gothic Neo",
            "Noto Sans CJK KR",
            "Malgun Gothic",
            "NanumGothic",
            "Segoe UI",
            "Arial",
            "DejaVu Sans",
            "sans-serif",
        ]);
        let style = match emphasis {
            Emphasis::Regular => skia::FontStyle::normal(),
            Emphasis::Bold => skia::FontStyle::bold(),
            Emphasis::Italic => skia::FontStyle::italic(),
        };
        ts.set_font_style(style);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, emphasis: Emphasis) -> Paragraph {
        self.layout_aligned(text, size, color, emphasis, TextAlign::Left)
    }

    fn layout_aligned(&self, text: &str, size: f32, color: skia::Color, emphasis: Emphasis, align: TextAlign) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(align);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color, emphasis);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, emphasis: Emphasis) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), emphasis);
        // width of the longest line
        p.longest_line()
    }

    /// Draw with the left edge at `x`, vertically centred on `cy`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, cy: f32, size: f32, color: skia::Color, emphasis: Emphasis) {
        let mut p = self.layout(text, size, color, emphasis);
        let h = p.height();
        p.paint(canvas, (x, cy - h * 0.5));
    }

    /// Draw horizontally and vertically centred on `(cx, cy)`; each line is centred on its own.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color, emphasis: Emphasis) {
        let mut p = self.layout_aligned(text, size, color, emphasis, TextAlign::Center);
        let w = p.longest_line().ceil() + 1.0;
        p.layout(w);
        let h = p.height();
        p.paint(canvas, (cx - w * 0.5, cy - h * 0.5));
    }
}
