use cfp_timeline::layout_dump::layout_dump_json;
use cfp_timeline::{
    ColorScheme, Dataset, EnabledSet, LayoutConfig, Theme, ViewState, compute_layout,
    parse_conferences,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineOptions {
    viewport_width: Option<f32>,
    scroll_width: Option<f32>,
    today: Option<NaiveDate>,
    dark: Option<bool>,
    conferences: Option<Vec<String>>,
}

fn build_view(options: &TimelineOptions) -> ViewState {
    let viewport_width = options.viewport_width.unwrap_or(DEFAULT_VIEWPORT_WIDTH);
    let today = options.today.unwrap_or_else(|| Local::now().date_naive());
    let enabled = match &options.conferences {
        Some(names) => EnabledSet::only(names.iter().cloned()),
        None => EnabledSet::All,
    };
    ViewState::new(viewport_width, today)
        .with_scroll_width(options.scroll_width.unwrap_or(viewport_width))
        .with_enabled(enabled)
}

fn layout_to_json(dataset_json: &str, options: TimelineOptions) -> Result<String, String> {
    let conferences =
        parse_conferences(dataset_json, "dataset").map_err(|error| error.to_string())?;
    let dataset = Dataset::new(conferences);
    let theme = Theme::for_scheme(ColorScheme::from_dark_flag(options.dark.unwrap_or(false)));
    let outcome = compute_layout(
        &dataset,
        &build_view(&options),
        &theme,
        &LayoutConfig::default(),
    );
    layout_dump_json(&outcome).map_err(|error| error.to_string())
}

/// Lays out `dataset_json` (one conference or an array) and returns the
/// layout dump as JSON. Call again on every resize, filter or theme change.
#[wasm_bindgen]
pub fn layout_timeline(dataset_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TimelineOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TimelineOptions::default()
    };
    layout_to_json(dataset_json, options).map_err(|error| JsValue::from_str(&error))
}
