use chrono::NaiveDate;

use crate::date::DateToken;

/// Why a layout pass produced nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The enabled-conference set selects nothing.
    NothingSelected,
    /// Conferences are enabled but none of them carries a single date.
    NoDates,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    Empty(EmptyReason),
    Ready(TimelineLayout),
}

impl LayoutOutcome {
    pub fn layout(&self) -> Option<&TimelineLayout> {
        match self {
            Self::Ready(layout) => Some(layout),
            Self::Empty(_) => None,
        }
    }

    pub fn into_layout(self) -> Option<TimelineLayout> {
        match self {
            Self::Ready(layout) => Some(layout),
            Self::Empty(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub total_days: i64,
    pub window_months: u32,
    pub pixels_per_day: f32,
    pub width: f32,
    pub height: f32,
    pub initial_scroll_x: f32,
    pub style: SurfaceStyle,
    pub month_ticks: Vec<MonthTick>,
    pub today: Option<TodayMarker>,
    pub conferences: Vec<ConferenceLayout>,
}

impl TimelineLayout {
    pub fn conference(&self, name: &str) -> Option<&ConferenceLayout> {
        self.conferences.iter().find(|conf| conf.name == name)
    }

    pub fn segment_count(&self) -> usize {
        self.conferences
            .iter()
            .flat_map(|conf| &conf.cycles)
            .map(|cycle| cycle.segments.len())
            .sum()
    }
}

/// Paint settings that apply to the whole surface rather than one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    /// Month tick labels and other secondary text.
    pub muted_text_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTick {
    pub date: NaiveDate,
    pub x: f32,
    pub label: String,
    pub year_start: bool,
    /// Year boundaries get the stronger grid color.
    pub line_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayMarker {
    pub date: NaiveDate,
    pub x: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConferenceLayout {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub y: f32,
    pub height: f32,
    pub row_count: usize,
    pub cycles: Vec<CycleLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleLayout {
    pub installment_index: usize,
    pub cycle_index: usize,
    pub year: i32,
    pub name: String,
    pub row: usize,
    pub y: f32,
    pub start_x: f32,
    pub end_x: f32,
    /// `start_x` minus the estimated label width; only used for packing.
    pub effective_start_x: f32,
    pub label: Option<CycleLabel>,
    pub segments: Vec<SegmentLayout>,
}

/// Name label drawn immediately left of the cycle's first visible bar.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleLabel {
    pub text: String,
    pub anchor_x: f32,
    pub y: f32,
    pub link: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentEndpoint {
    pub date: DateToken,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    pub color_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub text_color: String,
    pub start: SegmentEndpoint,
    pub end: SegmentEndpoint,
    pub duration_days: i64,
    pub title: String,
    pub description: Vec<String>,
}
