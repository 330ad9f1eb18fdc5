use crate::theme::{ColorScheme, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackingOrder {
    /// Installments and cycles in declaration order.
    #[default]
    Dataset,
    /// Stable sort by label-extended start before packing.
    StartTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub bar_height: f32,
    pub inter_row_padding: f32,
    pub conference_padding: f32,
    pub label_char_width: f32,
    pub label_padding: f32,
    pub narrow_breakpoint: f32,
    pub narrow_window_months: u32,
    pub wide_window_months: u32,
    pub range_padding_months: u32,
    pub min_segment_width: f32,
    pub packing_order: PackingOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bar_height: 20.0,
            inter_row_padding: 6.0,
            conference_padding: 24.0,
            label_char_width: 7.0,
            label_padding: 12.0,
            narrow_breakpoint: 768.0,
            narrow_window_months: 3,
            wide_window_months: 12,
            range_padding_months: 1,
            min_segment_width: 1.0,
            packing_order: PackingOrder::Dataset,
        }
    }
}

impl LayoutConfig {
    pub fn row_pitch(&self) -> f32 {
        self.bar_height + self.inter_row_padding
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub width: f32,
    pub scroll_width: Option<f32>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            scroll_width: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scheme: ColorScheme,
    pub light_theme: Theme,
    pub dark_theme: Theme,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: ColorScheme::Light,
            light_theme: Theme::light(),
            dark_theme: Theme::dark(),
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl Config {
    pub fn theme(&self, scheme: ColorScheme) -> &Theme {
        match scheme {
            ColorScheme::Light => &self.light_theme,
            ColorScheme::Dark => &self.dark_theme,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    light_segment_colors: Option<Vec<String>>,
    dark_segment_colors: Option<Vec<String>>,
    light_background: Option<String>,
    dark_background: Option<String>,
    today_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    bar_height: Option<f32>,
    inter_row_padding: Option<f32>,
    conference_padding: Option<f32>,
    label_char_width: Option<f32>,
    label_padding: Option<f32>,
    narrow_breakpoint: Option<f32>,
    narrow_window_months: Option<u32>,
    wide_window_months: Option<u32>,
    range_padding_months: Option<u32>,
    min_segment_width: Option<f32>,
    packing_order: Option<PackingOrder>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportConfigFile {
    width: Option<f32>,
    scroll_width: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    viewport: Option<ViewportConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a camelCase config document. Strict JSON is tried first; JSON5
/// (comments, trailing commas) is accepted as a fallback.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {json_err}"))?,
    };
    apply_config_file(Config::default(), parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> anyhow::Result<Config> {
    if let Some(name) = parsed.theme.as_deref() {
        config.scheme = ColorScheme::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme `{name}` (expected light or dark)"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        for theme in [&mut config.light_theme, &mut config.dark_theme] {
            if let Some(v) = vars.font_family.clone() {
                theme.font_family = v;
            }
            if let Some(v) = vars.font_size {
                theme.font_size = v;
            }
            if let Some(v) = vars.today_color.clone() {
                theme.today_color = v;
            }
        }
        if let Some(v) = vars.light_segment_colors {
            config.light_theme.segment_colors = non_empty_palette(v, "lightSegmentColors")?;
        }
        if let Some(v) = vars.dark_segment_colors {
            config.dark_theme.segment_colors = non_empty_palette(v, "darkSegmentColors")?;
        }
        if let Some(v) = vars.light_background {
            config.light_theme.background = v;
        }
        if let Some(v) = vars.dark_background {
            config.dark_theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.bar_height {
            target.bar_height = v;
        }
        if let Some(v) = layout.inter_row_padding {
            target.inter_row_padding = v;
        }
        if let Some(v) = layout.conference_padding {
            target.conference_padding = v;
        }
        if let Some(v) = layout.label_char_width {
            target.label_char_width = v;
        }
        if let Some(v) = layout.label_padding {
            target.label_padding = v;
        }
        if let Some(v) = layout.narrow_breakpoint {
            target.narrow_breakpoint = v;
        }
        if let Some(v) = layout.narrow_window_months {
            target.narrow_window_months = v;
        }
        if let Some(v) = layout.wide_window_months {
            target.wide_window_months = v;
        }
        if let Some(v) = layout.range_padding_months {
            target.range_padding_months = v;
        }
        if let Some(v) = layout.min_segment_width {
            target.min_segment_width = v;
        }
        if let Some(v) = layout.packing_order {
            target.packing_order = v;
        }
        if target.narrow_window_months == 0 || target.wide_window_months == 0 {
            anyhow::bail!("visible window must span at least one month");
        }
    }

    if let Some(viewport) = parsed.viewport {
        if let Some(v) = viewport.width {
            config.viewport.width = v;
        }
        if viewport.scroll_width.is_some() {
            config.viewport.scroll_width = viewport.scroll_width;
        }
    }

    Ok(config)
}

fn non_empty_palette(colors: Vec<String>, key: &str) -> anyhow::Result<Vec<String>> {
    if colors.is_empty() {
        anyhow::bail!("`{key}` must list at least one color");
    }
    Ok(colors)
}
