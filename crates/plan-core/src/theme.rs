// File: crates/plan-core/src/theme.rs
// Summary: Light/Dark palettes for the Gantt chart and milestone timeline.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub title: skia::Color,
    pub text: skia::Color,
    pub subtext: skia::Color,
    pub header: skia::Color,
    /// Bar colours, indexed by position in the plan's role order.
    pub roles: [skia::Color; 5],
    /// Phase band fills and borders, indexed by phase position.
    pub phase_backgrounds: [skia::Color; 5],
    pub phase_accents: [skia::Color; 5],
    /// Milestone marker colours, indexed by milestone position.
    pub milestones: [skia::Color; 6],
    pub critical: skia::Color,
    pub milestone_line: skia::Color,
    pub timeline: skia::Color,
    pub tick: skia::Color,
    pub card_fill: skia::Color,
    pub badge_fill: skia::Color,
    pub rollback_fill: skia::Color,
    pub rollback_stroke: skia::Color,
    pub rollback_text: skia::Color,
    pub summary_fill: skia::Color,
    pub summary_stroke: skia::Color,
    pub note_fill: skia::Color,
    pub legend_stroke: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_rgb(0xFA, 0xFB, 0xFC),
            grid: skia::Color::from_rgb(0xE0, 0xE0, 0xE0),
            title: skia::Color::from_rgb(0x21, 0x21, 0x21),
            text: skia::Color::from_rgb(0x2C, 0x3E, 0x50),
            subtext: skia::Color::from_rgb(0x7F, 0x8C, 0x8D),
            header: skia::Color::from_rgb(0x37, 0x47, 0x4F),
            roles: [
                skia::Color::from_rgb(0x42, 0xA5, 0xF5), // blue 400
                skia::Color::from_rgb(0x15, 0x65, 0xC0), // blue 800
                skia::Color::from_rgb(0xFF, 0x98, 0x00), // orange 500
                skia::Color::from_rgb(0x66, 0xBB, 0x6A), // green 400
                skia::Color::from_rgb(0xAB, 0x47, 0xBC), // purple 400
            ],
            phase_backgrounds: [
                skia::Color::from_rgb(0xEB, 0xF5, 0xFB),
                skia::Color::from_rgb(0xFE, 0xF9, 0xE7),
                skia::Color::from_rgb(0xFD, 0xEB, 0xD0),
                skia::Color::from_rgb(0xE8, 0xF8, 0xF5),
                skia::Color::from_rgb(0xF5, 0xEE, 0xF8),
            ],
            phase_accents: [
                skia::Color::from_rgb(0x29, 0x80, 0xB9),
                skia::Color::from_rgb(0xF3, 0x9C, 0x12),
                skia::Color::from_rgb(0xE7, 0x4C, 0x3C),
                skia::Color::from_rgb(0x27, 0xAE, 0x60),
                skia::Color::from_rgb(0x8E, 0x44, 0xAD),
            ],
            milestones: [
                skia::Color::from_rgb(0xE7, 0x4C, 0x3C),
                skia::Color::from_rgb(0x34, 0x98, 0xDB),
                skia::Color::from_rgb(0x2E, 0xCC, 0x71),
                skia::Color::from_rgb(0xE6, 0x7E, 0x22),
                skia::Color::from_rgb(0x9B, 0x59, 0xB6),
                skia::Color::from_rgb(0x1A, 0xBC, 0x9C),
            ],
            critical: skia::Color::from_rgb(0xC6, 0x28, 0x28),
            milestone_line: skia::Color::from_rgb(0xE6, 0x51, 0x00),
            timeline: skia::Color::from_rgb(0xBD, 0xC3, 0xC7),
            tick: skia::Color::from_rgb(0x95, 0xA5, 0xA6),
            card_fill: skia::Color::WHITE,
            badge_fill: skia::Color::WHITE,
            rollback_fill: skia::Color::from_rgb(0xFD, 0xED, 0xEC),
            rollback_stroke: skia::Color::from_rgb(0xE7, 0x4C, 0x3C),
            rollback_text: skia::Color::from_rgb(0xC0, 0x39, 0x2B),
            summary_fill: skia::Color::from_rgb(0xE8, 0xEA, 0xF6),
            summary_stroke: skia::Color::from_rgb(0x79, 0x86, 0xCB),
            note_fill: skia::Color::from_rgb(0xFF, 0xEB, 0xEE),
            legend_stroke: skia::Color::from_rgb(0x90, 0xA4, 0xAE),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            title: skia::Color::from_argb(255, 235, 235, 245),
            text: skia::Color::from_argb(255, 220, 220, 230),
            subtext: skia::Color::from_argb(255, 150, 150, 160),
            header: skia::Color::from_argb(255, 200, 200, 210),
            roles: [
                skia::Color::from_rgb(0x64, 0xB5, 0xF6),
                skia::Color::from_rgb(0x1E, 0x88, 0xE5),
                skia::Color::from_rgb(0xFF, 0xA7, 0x26),
                skia::Color::from_rgb(0x81, 0xC7, 0x84),
                skia::Color::from_rgb(0xBA, 0x68, 0xC8),
            ],
            phase_backgrounds: [
                skia::Color::from_rgb(0x1A, 0x26, 0x33),
                skia::Color::from_rgb(0x2B, 0x27, 0x18),
                skia::Color::from_rgb(0x2E, 0x20, 0x16),
                skia::Color::from_rgb(0x16, 0x2A, 0x26),
                skia::Color::from_rgb(0x26, 0x1C, 0x2E),
            ],
            phase_accents: [
                skia::Color::from_rgb(0x29, 0x80, 0xB9),
                skia::Color::from_rgb(0xF3, 0x9C, 0x12),
                skia::Color::from_rgb(0xE7, 0x4C, 0x3C),
                skia::Color::from_rgb(0x27, 0xAE, 0x60),
                skia::Color::from_rgb(0x8E, 0x44, 0xAD),
            ],
            milestones: [
                skia::Color::from_rgb(0xE7, 0x4C, 0x3C),
                skia::Color::from_rgb(0x34, 0x98, 0xDB),
                skia::Color::from_rgb(0x2E, 0xCC, 0x71),
                skia::Color::from_rgb(0xE6, 0x7E, 0x22),
                skia::Color::from_rgb(0x9B, 0x59, 0xB6),
                skia::Color::from_rgb(0x1A, 0xBC, 0x9C),
            ],
            critical: skia::Color::from_rgb(0xEF, 0x53, 0x50),
            milestone_line: skia::Color::from_rgb(0xFF, 0x8A, 0x3D),
            timeline: skia::Color::from_argb(255, 90, 90, 100),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            card_fill: skia::Color::from_argb(255, 30, 30, 34),
            badge_fill: skia::Color::from_argb(255, 30, 30, 34),
            rollback_fill: skia::Color::from_rgb(0x3A, 0x1C, 0x1A),
            rollback_stroke: skia::Color::from_rgb(0xE7, 0x4C, 0x3C),
            rollback_text: skia::Color::from_rgb(0xF2, 0x8B, 0x82),
            summary_fill: skia::Color::from_rgb(0x23, 0x26, 0x3A),
            summary_stroke: skia::Color::from_rgb(0x79, 0x86, 0xCB),
            note_fill: skia::Color::from_rgb(0x3A, 0x1C, 0x20),
            legend_stroke: skia::Color::from_argb(255, 90, 90, 100),
        }
    }

    pub fn role_color(&self, index: usize) -> skia::Color {
        self.roles[index % self.roles.len()]
    }

    pub fn phase_colors(&self, index: usize) -> (skia::Color, skia::Color) {
        let n = self.phase_backgrounds.len();
        (self.phase_backgrounds[index % n], self.phase_accents[index % n])
    }

    pub fn milestone_color(&self, index: usize) -> skia::Color {
        self.milestones[index % self.milestones.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
