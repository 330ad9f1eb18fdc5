use crate::layout::{
    ConferenceLayout, CycleLayout, EmptyReason, LayoutOutcome, SegmentLayout, TimelineLayout,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeDump {
    Empty { reason: String },
    Ready(LayoutDump),
}

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub min_date: String,
    pub max_date: String,
    pub total_days: i64,
    pub window_months: u32,
    pub pixels_per_day: f32,
    pub width: f32,
    pub height: f32,
    pub initial_scroll_x: f32,
    pub style: StyleDump,
    pub today: Option<MarkerDump>,
    pub month_ticks: Vec<TickDump>,
    pub conferences: Vec<ConferenceDump>,
}

#[derive(Debug, Serialize)]
pub struct StyleDump {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub muted_text_color: String,
}

#[derive(Debug, Serialize)]
pub struct MarkerDump {
    pub date: String,
    pub x: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct TickDump {
    pub date: String,
    pub x: f32,
    pub label: String,
    pub year_start: bool,
    pub line_color: String,
}

#[derive(Debug, Serialize)]
pub struct ConferenceDump {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub y: f32,
    pub height: f32,
    pub row_count: usize,
    pub cycles: Vec<CycleDump>,
}

#[derive(Debug, Serialize)]
pub struct CycleDump {
    pub year: i32,
    pub name: String,
    pub row: usize,
    pub y: f32,
    pub start_x: f32,
    pub end_x: f32,
    pub effective_start_x: f32,
    pub label: Option<LabelDump>,
    pub segments: Vec<SegmentDump>,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub anchor_x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentDump {
    pub color_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub text_color: String,
    pub start: String,
    pub end: String,
    pub start_label: String,
    pub end_label: String,
    pub duration_days: i64,
    pub title: String,
    pub description: Vec<String>,
}

impl OutcomeDump {
    pub fn from_outcome(outcome: &LayoutOutcome) -> Self {
        match outcome {
            LayoutOutcome::Empty(reason) => OutcomeDump::Empty {
                reason: empty_reason_text(*reason).to_string(),
            },
            LayoutOutcome::Ready(layout) => OutcomeDump::Ready(LayoutDump::from_layout(layout)),
        }
    }
}

pub fn empty_reason_text(reason: EmptyReason) -> &'static str {
    match reason {
        EmptyReason::NothingSelected => "no conferences selected",
        EmptyReason::NoDates => "selected conferences have no dates",
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &TimelineLayout) -> Self {
        LayoutDump {
            min_date: layout.min_date.to_string(),
            max_date: layout.max_date.to_string(),
            total_days: layout.total_days,
            window_months: layout.window_months,
            pixels_per_day: layout.pixels_per_day,
            width: layout.width,
            height: layout.height,
            initial_scroll_x: layout.initial_scroll_x,
            style: StyleDump {
                font_family: layout.style.font_family.clone(),
                font_size: layout.style.font_size,
                background: layout.style.background.clone(),
                text_color: layout.style.text_color.clone(),
                muted_text_color: layout.style.muted_text_color.clone(),
            },
            today: layout.today.as_ref().map(|marker| MarkerDump {
                date: marker.date.to_string(),
                x: marker.x,
                color: marker.color.clone(),
            }),
            month_ticks: layout
                .month_ticks
                .iter()
                .map(|tick| TickDump {
                    date: tick.date.to_string(),
                    x: tick.x,
                    label: tick.label.clone(),
                    year_start: tick.year_start,
                    line_color: tick.line_color.clone(),
                })
                .collect(),
            conferences: layout.conferences.iter().map(conference_dump).collect(),
        }
    }
}

fn conference_dump(conf: &ConferenceLayout) -> ConferenceDump {
    ConferenceDump {
        id: conf.id.clone(),
        name: conf.name.clone(),
        full_name: conf.full_name.clone(),
        y: conf.y,
        height: conf.height,
        row_count: conf.row_count,
        cycles: conf.cycles.iter().map(cycle_dump).collect(),
    }
}

fn cycle_dump(cycle: &CycleLayout) -> CycleDump {
    CycleDump {
        year: cycle.year,
        name: cycle.name.clone(),
        row: cycle.row,
        y: cycle.y,
        start_x: cycle.start_x,
        end_x: cycle.end_x,
        effective_start_x: cycle.effective_start_x,
        label: cycle.label.as_ref().map(|label| LabelDump {
            text: label.text.clone(),
            anchor_x: label.anchor_x,
            y: label.y,
            link: label.link.clone(),
            color: label.color.clone(),
        }),
        segments: cycle.segments.iter().map(segment_dump).collect(),
    }
}

fn segment_dump(segment: &SegmentLayout) -> SegmentDump {
    SegmentDump {
        color_index: segment.color_index,
        x: segment.x,
        y: segment.y,
        width: segment.width,
        height: segment.height,
        fill: segment.fill.clone(),
        text_color: segment.text_color.clone(),
        start: segment.start.date.to_string(),
        end: segment.end.date.to_string(),
        start_label: segment.start.label.clone(),
        end_label: segment.end.label.clone(),
        duration_days: segment.duration_days,
        title: segment.title.clone(),
        description: segment.description.clone(),
    }
}

pub fn layout_dump_json(outcome: &LayoutOutcome) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&OutcomeDump::from_outcome(outcome))?)
}

pub fn write_layout_dump(path: &Path, outcome: &LayoutOutcome) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &OutcomeDump::from_outcome(outcome))?;
    Ok(())
}
