mod packing;
mod range;
mod scale;
mod segments;
pub(crate) mod types;
pub use packing::{
    PackItem, RowPacking, RowSlot, conference_height, estimate_label_width, pack_rows,
};
pub use range::{DateRange, compute_date_range};
pub use scale::{Scale, compute_scale, visible_window_months};
pub use types::*;
use segments::*;

use crate::config::{LayoutConfig, PackingOrder};
use crate::date::{add_months, day_difference, first_of_month, month_label, month_starts};
use crate::ir::{Conference, CycleRef, Dataset, EnabledSet, EventDate};
use crate::theme::Theme;
use chrono::{Datelike, NaiveDate};

/// Everything the host owns that a layout pass depends on. Passed in
/// explicitly on every recompute (load, resize, theme or filter change).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub enabled: EnabledSet,
    pub viewport_width: f32,
    pub scroll_width: f32,
    pub today: NaiveDate,
}

impl ViewState {
    pub fn new(viewport_width: f32, today: NaiveDate) -> Self {
        Self {
            enabled: EnabledSet::All,
            viewport_width,
            scroll_width: viewport_width,
            today,
        }
    }

    pub fn with_enabled(mut self, enabled: EnabledSet) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_scroll_width(mut self, scroll_width: f32) -> Self {
        self.scroll_width = scroll_width;
        self
    }
}

/// Runs the full pipeline: date range, scale, per-conference row packing,
/// segment geometry and vertical aggregation.
///
/// Pure with respect to its arguments; all derived state is rebuilt on every
/// call, so equal inputs always give equal output.
pub fn compute_layout(
    dataset: &Dataset,
    view: &ViewState,
    theme: &Theme,
    config: &LayoutConfig,
) -> LayoutOutcome {
    let enabled: Vec<&Conference> = dataset.enabled(&view.enabled).collect();
    if enabled.is_empty() {
        tracing::debug!("layout skipped: no conferences enabled");
        return LayoutOutcome::Empty(EmptyReason::NothingSelected);
    }
    let Some(range) = compute_date_range(enabled.iter().copied(), config.range_padding_months)
    else {
        tracing::debug!(
            conferences = enabled.len(),
            "layout skipped: enabled conferences have no dates"
        );
        return LayoutOutcome::Empty(EmptyReason::NoDates);
    };
    let scale = compute_scale(
        &range,
        view.today,
        view.viewport_width,
        view.scroll_width,
        config,
    );
    tracing::debug!(
        min_date = %range.min_date,
        max_date = %range.max_date,
        total_days = range.total_days(),
        pixels_per_day = scale.pixels_per_day,
        total_width = scale.total_width,
        "timeline scale computed"
    );

    let mut conferences: Vec<ConferenceLayout> = Vec::with_capacity(enabled.len());
    let mut y = 0.0_f32;
    for conference in enabled {
        let block = layout_conference(conference, y, &range, &scale, theme, config);
        if block.row_count == 0 {
            continue;
        }
        y = block.y + block.height + config.conference_padding;
        conferences.push(block);
    }
    let height = conferences
        .last()
        .map(|block| block.y + block.height)
        .unwrap_or(0.0);

    let month_ticks = month_starts(range.min_date, range.max_date)
        .into_iter()
        .map(|date| {
            let year_start = date.month() == 1;
            MonthTick {
                date,
                x: scale.x_for(date),
                label: month_label(date),
                year_start,
                line_color: if year_start {
                    theme.year_grid_color.clone()
                } else {
                    theme.grid_color.clone()
                },
            }
        })
        .collect();
    let today = range.contains(view.today).then(|| TodayMarker {
        date: view.today,
        x: scale.x_for(view.today),
        color: theme.today_color.clone(),
    });
    let max_scroll = (scale.total_width - view.scroll_width).max(0.0);
    let initial_scroll_x = scale.x_for(view.today).clamp(0.0, max_scroll);

    let layout = TimelineLayout {
        min_date: range.min_date,
        max_date: range.max_date,
        total_days: range.total_days(),
        window_months: scale.window_months,
        pixels_per_day: scale.pixels_per_day,
        width: scale.total_width,
        height,
        initial_scroll_x,
        style: SurfaceStyle {
            font_family: theme.font_family.clone(),
            font_size: theme.font_size,
            background: theme.background.clone(),
            text_color: theme.text_color.clone(),
            muted_text_color: theme.muted_text_color.clone(),
        },
        month_ticks,
        today,
        conferences,
    };
    tracing::debug!(
        conferences = layout.conferences.len(),
        segments = layout.segment_count(),
        height = layout.height,
        "timeline layout computed"
    );
    LayoutOutcome::Ready(layout)
}

fn layout_conference(
    conference: &Conference,
    y: f32,
    range: &DateRange,
    scale: &Scale,
    theme: &Theme,
    config: &LayoutConfig,
) -> ConferenceLayout {
    let placeable: Vec<(CycleRef<'_>, PackItem)> = conference
        .cycles()
        .filter(|item| item.cycle.is_renderable())
        .filter_map(|item| {
            let (first, last) = item.cycle.span()?;
            Some((
                item,
                PackItem {
                    start_x: scale.clamped_x_for(first),
                    end_x: scale.clamped_x_for(last),
                    label_width: estimate_label_width(&item.cycle.name, config),
                },
            ))
        })
        .collect();
    let items: Vec<PackItem> = placeable.iter().map(|(_, item)| *item).collect();
    let packing = pack_rows(&items, config.packing_order);
    tracing::debug!(
        conference = %conference.name,
        cycles = items.len(),
        rows = packing.row_count,
        order = ?config.packing_order,
        "rows packed"
    );

    let cycles = placeable
        .iter()
        .zip(&packing.slots)
        .map(|((item, pack), slot)| {
            let row_y = y + slot.row as f32 * config.row_pitch();
            let mapped = map_cycle_segments(*item, row_y, range, scale, theme, config);
            CycleLayout {
                installment_index: item.installment_index,
                cycle_index: item.cycle_index,
                year: item.installment.year,
                name: item.cycle.name.clone(),
                row: slot.row,
                y: row_y,
                start_x: slot.start_x,
                end_x: slot.end_x,
                effective_start_x: pack.effective_start_x(),
                label: mapped.label,
                segments: mapped.segments,
            }
        })
        .collect();

    ConferenceLayout {
        id: conference.id.clone(),
        name: conference.name.clone(),
        full_name: conference.full_name.clone(),
        y,
        height: conference_height(packing.row_count, config),
        row_count: packing.row_count,
        cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Cycle, Installment};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cycle(name: &str, tokens: &[&str]) -> Cycle {
        Cycle {
            name: name.to_string(),
            dates: tokens
                .iter()
                .enumerate()
                .map(|(idx, token)| EventDate {
                    date: token.parse().unwrap(),
                    description: format!("Milestone {idx}"),
                })
                .collect(),
        }
    }

    fn conference(name: &str, cycles: Vec<Cycle>) -> Conference {
        Conference {
            id: name.to_ascii_lowercase(),
            name: name.to_string(),
            full_name: format!("{name} full"),
            installments: vec![Installment {
                year: 2025,
                website: None,
                cycles,
            }],
        }
    }

    fn view() -> ViewState {
        ViewState::new(1280.0, ymd(2025, 1, 15))
    }

    fn ready(dataset: &Dataset, view: &ViewState, config: &LayoutConfig) -> TimelineLayout {
        compute_layout(dataset, view, &Theme::light(), config)
            .into_layout()
            .expect("layout should be ready")
    }

    #[test]
    fn empty_selection_short_circuits() {
        let dataset = Dataset::new(vec![conference("CHI", vec![cycle("R", &["2025-01-01", "2025-02-01"])])]);
        let view = view().with_enabled(EnabledSet::only(["UIST"]));
        let outcome = compute_layout(&dataset, &view, &Theme::light(), &LayoutConfig::default());
        assert_eq!(outcome, LayoutOutcome::Empty(EmptyReason::NothingSelected));
    }

    #[test]
    fn dateless_selection_reports_no_dates() {
        let dataset = Dataset::new(vec![conference("CHI", vec![cycle("R", &[])])]);
        let outcome = compute_layout(&dataset, &view(), &Theme::light(), &LayoutConfig::default());
        assert_eq!(outcome, LayoutOutcome::Empty(EmptyReason::NoDates));
    }

    #[test]
    fn zero_height_conferences_are_dropped_without_trailing_padding() {
        let config = LayoutConfig::default();
        let dataset = Dataset::new(vec![
            conference("CHI", vec![cycle("R1", &["2025-01-01", "2025-02-01"])]),
            conference("SOLO", vec![cycle("One date", &["2025-03-01"])]),
            conference(
                "UIST",
                vec![
                    cycle("A", &["2025-01-01", "2025-03-01"]),
                    cycle("B", &["2025-02-01", "2025-04-01"]),
                ],
            ),
            conference("EMPTY", Vec::new()),
        ]);
        let layout = ready(&dataset, &view(), &config);
        let names: Vec<&str> = layout.conferences.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CHI", "UIST"]);

        let chi = &layout.conferences[0];
        let uist = &layout.conferences[1];
        assert_eq!(chi.y, 0.0);
        assert_eq!(chi.height, config.bar_height);
        assert_eq!(uist.y, chi.height + config.conference_padding);
        assert_eq!(uist.row_count, 2);
        assert_eq!(layout.height, uist.y + uist.height);
    }

    #[test]
    fn rows_stack_within_the_block() {
        let config = LayoutConfig::default();
        let dataset = Dataset::new(vec![conference(
            "CHI",
            vec![
                cycle("A", &["2025-01-01", "2025-03-01"]),
                cycle("B", &["2025-02-01", "2025-04-01"]),
            ],
        )]);
        let layout = ready(&dataset, &view(), &config);
        let cycles = &layout.conferences[0].cycles;
        assert_eq!(cycles[0].row, 0);
        assert_eq!(cycles[1].row, 1);
        assert_eq!(cycles[1].y, config.row_pitch());
        assert!(cycles[1].segments.iter().all(|s| s.y == cycles[1].y));
    }

    #[test]
    fn today_marker_and_initial_scroll() {
        let config = LayoutConfig::default();
        let dataset = Dataset::new(vec![conference(
            "CHI",
            vec![cycle("A", &["2024-06-01", "2026-06-01"])],
        )]);
        let view = ViewState::new(1280.0, ymd(2025, 1, 15)).with_scroll_width(1000.0);
        let layout = ready(&dataset, &view, &config);
        let today = layout.today.as_ref().unwrap();
        assert_eq!(today.date, ymd(2025, 1, 15));
        let expected = day_difference(layout.min_date, today.date) as f32 * layout.pixels_per_day;
        assert!((today.x - expected).abs() < 1e-3);
        assert!((layout.initial_scroll_x - today.x).abs() < 1e-3);

        let far = ViewState::new(1280.0, ymd(2030, 1, 1));
        let layout = ready(&dataset, &far, &config);
        assert!(layout.today.is_none());
        assert!((layout.initial_scroll_x - (layout.width - far.scroll_width)).abs() < 1e-3);
    }

    #[test]
    fn month_ticks_cover_the_range() {
        let dataset = Dataset::new(vec![conference(
            "CHI",
            vec![cycle("A", &["2025-01-10", "2025-02-20"])],
        )]);
        let layout = ready(&dataset, &view(), &LayoutConfig::default());
        let labels: Vec<&str> = layout.month_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"]);
        assert_eq!(layout.month_ticks[0].x, 0.0);
        assert!(layout.month_ticks[1].year_start);
        assert!((layout.month_ticks[3].x - layout.width).abs() < 1e-3);
    }

    #[test]
    fn theme_colors_reach_ticks_marker_and_style() {
        let dataset = Dataset::new(vec![conference(
            "CHI",
            vec![cycle("A", &["2024-12-10", "2025-02-20"])],
        )]);
        let mut theme = Theme::dark();
        theme.today_color = "#FF0000".to_string();
        theme.font_size = 15.0;
        let layout = compute_layout(&dataset, &view(), &theme, &LayoutConfig::default())
            .into_layout()
            .unwrap();

        assert_eq!(layout.today.as_ref().unwrap().color, "#FF0000");
        assert_eq!(layout.style.font_size, 15.0);
        assert_eq!(layout.style.background, theme.background);
        assert_eq!(layout.style.muted_text_color, theme.muted_text_color);
        for tick in &layout.month_ticks {
            let expected = if tick.year_start {
                &theme.year_grid_color
            } else {
                &theme.grid_color
            };
            assert_eq!(&tick.line_color, expected, "{}", tick.label);
        }
        assert!(layout.month_ticks.iter().any(|tick| tick.year_start));
    }

    #[test]
    fn start_time_order_can_save_rows() {
        let dataset = Dataset::new(vec![conference(
            "CHI",
            vec![
                cycle("", &["2025-05-01", "2025-06-01"]),
                cycle("", &["2025-01-01", "2025-02-01"]),
            ],
        )]);
        let dataset_order = ready(&dataset, &view(), &LayoutConfig::default());
        assert_eq!(dataset_order.conferences[0].row_count, 2);

        let config = LayoutConfig {
            packing_order: PackingOrder::StartTime,
            ..LayoutConfig::default()
        };
        let sorted = ready(&dataset, &view(), &config);
        assert_eq!(sorted.conferences[0].row_count, 1);
        // Output stays in dataset order.
        assert_eq!(sorted.conferences[0].cycles[0].start_x, dataset_order.conferences[0].cycles[0].start_x);
    }
}
