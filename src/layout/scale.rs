use super::*;

/// Horizontal scale: the initial visible window always fills the scroll
/// surface exactly, and the full canvas extends proportionally from there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub origin: NaiveDate,
    pub window_months: u32,
    pub initial_view_days: i64,
    pub pixels_per_day: f32,
    pub total_width: f32,
}

impl Scale {
    /// Unclamped x of `date` relative to the range start.
    pub fn x_for(&self, date: NaiveDate) -> f32 {
        day_difference(self.origin, date) as f32 * self.pixels_per_day
    }

    pub fn clamped_x_for(&self, date: NaiveDate) -> f32 {
        self.x_for(date).clamp(0.0, self.total_width)
    }
}

pub fn visible_window_months(viewport_width: f32, config: &LayoutConfig) -> u32 {
    if viewport_width < config.narrow_breakpoint {
        config.narrow_window_months
    } else {
        config.wide_window_months
    }
}

pub fn compute_scale(
    range: &DateRange,
    today: NaiveDate,
    viewport_width: f32,
    scroll_width: f32,
    config: &LayoutConfig,
) -> Scale {
    let window_months = visible_window_months(viewport_width, config).max(1);
    let window_end = add_months(today, window_months as i32).unwrap_or(today);
    let initial_view_days = day_difference(today, window_end).max(1);
    let pixels_per_day = scroll_width.max(1.0) / initial_view_days as f32;
    let total_width = range.total_days().max(0) as f32 * pixels_per_day;
    Scale {
        origin: range.min_date,
        window_months,
        initial_view_days,
        pixels_per_day,
        total_width,
    }
}
