use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" | "default" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub grid_color: String,
    pub year_grid_color: String,
    pub today_color: String,
    pub link_color: String,
    pub segment_colors: Vec<String>,
    pub segment_text_colors: Vec<String>,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            muted_text_color: "#5B6778".to_string(),
            grid_color: "#E3E8F0".to_string(),
            year_grid_color: "#B8C2D3".to_string(),
            today_color: "#E11D48".to_string(),
            link_color: "#2563EB".to_string(),
            segment_colors: vec![
                "#60A5FA".to_string(), // blue-400
                "#34D399".to_string(), // emerald-400
                "#FBBF24".to_string(), // amber-400
                "#F472B6".to_string(), // pink-400
                "#A78BFA".to_string(), // violet-400
                "#FB923C".to_string(), // orange-400
            ],
            segment_text_colors: vec!["#0F172A".to_string()],
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#0F172A".to_string(),
            text_color: "#E2E8F0".to_string(),
            muted_text_color: "#94A3B8".to_string(),
            grid_color: "#1E293B".to_string(),
            year_grid_color: "#475569".to_string(),
            today_color: "#FB7185".to_string(),
            link_color: "#93C5FD".to_string(),
            segment_colors: vec![
                "#1D4ED8".to_string(), // blue-700
                "#047857".to_string(), // emerald-700
                "#B45309".to_string(), // amber-700
                "#BE185D".to_string(), // pink-700
                "#6D28D9".to_string(), // violet-700
                "#C2410C".to_string(), // orange-700
            ],
            segment_text_colors: vec!["#F8FAFC".to_string()],
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark => Self::dark(),
        }
    }

    /// Palette entry for the `index`-th segment of a cycle, cycling.
    pub fn segment_color(&self, index: usize) -> &str {
        cycle_pick(&self.segment_colors, index).unwrap_or(&self.text_color)
    }

    pub fn segment_text_color(&self, index: usize) -> &str {
        cycle_pick(&self.segment_text_colors, index).unwrap_or(&self.text_color)
    }
}

fn cycle_pick(values: &[String], index: usize) -> Option<&str> {
    if values.is_empty() {
        None
    } else {
        Some(values[index % values.len()].as_str())
    }
}
