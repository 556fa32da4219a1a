// File: crates/plan-core/src/scale.rs
// Summary: Week (X) and row slot (Y) transforms from plan coordinates to pixels.

/// Week coordinate; week `n` covers `[n, n + 1)`.
pub type Week = f64;

/// Horizontal scale controlled via the first visible week and pixels per week.
#[derive(Clone, Copy, Debug)]
pub struct WeekScale {
    pub left_px: f32,
    pub start_week: Week,
    pub week_px: f32,
}

impl WeekScale {
    pub fn new(left_px: f32, start_week: Week, week_px: f32) -> Self {
        Self { left_px, start_week, week_px: week_px.max(0.01) }
    }

    /// Scale mapping `[first, last]` onto `[left_px, right_px]`.
    pub fn fit(left_px: f32, right_px: f32, first: Week, last: Week) -> Self {
        let span = (last - first).max(1e-9) as f32;
        Self::new(left_px, first, (right_px - left_px) / span)
    }

    #[inline]
    pub fn to_px(&self, week: Week) -> f32 {
        self.left_px + ((week - self.start_week) as f32) * self.week_px
    }
}

/// Vertical scale for stacked rows; slot `s` is centred at `top + (s + 0.5) * slot_px`.
#[derive(Clone, Copy, Debug)]
pub struct RowScale {
    pub top_px: f32,
    pub slot_px: f32,
}

impl RowScale {
    pub fn new(top_px: f32, slot_px: f32) -> Self {
        Self { top_px, slot_px: slot_px.max(1.0) }
    }

    /// Rows of at most `max_slot_px` that fit `slots` into `height_px`.
    pub fn fit(top_px: f32, height_px: f32, slots: f32, max_slot_px: f32) -> Self {
        let per = if slots > 0.0 { height_px / slots } else { max_slot_px };
        Self::new(top_px, per.min(max_slot_px))
    }

    #[inline]
    pub fn center_px(&self, slot: f32) -> f32 {
        self.top_px + (slot + 0.5) * self.slot_px
    }
}
