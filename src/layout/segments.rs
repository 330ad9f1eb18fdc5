use super::*;

pub(super) struct MappedCycle {
    pub segments: Vec<SegmentLayout>,
    pub label: Option<CycleLabel>,
}

/// Turns consecutive event pairs of one cycle into bar geometry on row `y`.
///
/// Pairs with a non-positive duration, pairs outside the axis range and bars
/// narrower than the minimum renderable width are skipped silently. The
/// color index is the pair's ordinal inside the cycle, so colors stay stable
/// even when an earlier pair is skipped.
pub(super) fn map_cycle_segments(
    item: CycleRef<'_>,
    y: f32,
    range: &DateRange,
    scale: &Scale,
    theme: &Theme,
    config: &LayoutConfig,
) -> MappedCycle {
    let mut segments = Vec::new();
    for (color_index, pair) in item.cycle.dates.windows(2).enumerate() {
        let (start, end) = (&pair[0], &pair[1]);
        if end.date.date <= start.date.date {
            continue;
        }
        let clipped_start = start.date.date.max(range.min_date);
        let clipped_end = end.date.date.min(range.max_date);
        if clipped_end <= clipped_start {
            continue;
        }
        let x = scale.x_for(clipped_start);
        let width = day_difference(clipped_start, clipped_end) as f32 * scale.pixels_per_day;
        if width.round() < config.min_segment_width {
            continue;
        }
        let duration_days = day_difference(start.date.date, end.date.date);
        segments.push(SegmentLayout {
            color_index,
            x,
            y,
            width: width.max(config.min_segment_width),
            height: config.bar_height,
            fill: theme.segment_color(color_index).to_string(),
            text_color: theme.segment_text_color(color_index).to_string(),
            start: endpoint(start),
            end: endpoint(end),
            duration_days,
            title: segment_title(start, end),
            description: segment_description(start, end, duration_days),
        });
    }

    let label = match segments.first() {
        Some(first) if item.cycle.has_label() => Some(CycleLabel {
            text: item.cycle.name.trim().to_string(),
            anchor_x: first.x,
            y: first.y,
            link: item.installment.website.clone(),
            color: if item.installment.website.is_some() {
                theme.link_color.clone()
            } else {
                theme.text_color.clone()
            },
        }),
        _ => None,
    };
    MappedCycle { segments, label }
}

fn endpoint(event: &EventDate) -> SegmentEndpoint {
    SegmentEndpoint {
        date: event.date,
        label: event.description.clone(),
    }
}

fn segment_title(start: &EventDate, end: &EventDate) -> String {
    format!("{} \u{2192} {}", start.description, end.description)
}

fn segment_description(start: &EventDate, end: &EventDate, duration_days: i64) -> Vec<String> {
    let unit = if duration_days == 1 { "day" } else { "days" };
    vec![
        format!("{}: {}", start.description, start.date.format_verbose()),
        format!("{}: {}", end.description, end.date.format_verbose()),
        format!("Duration: {duration_days} {unit}"),
    ]
}
