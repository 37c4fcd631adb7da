use crate::error::Result;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How rows are matched between consecutive renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKeying {
    /// Rows are matched by position in the input.
    #[default]
    Index,
    /// Rows are matched by label, so inserted or removed rows animate in
    /// and out while the rest slide to their new slots.
    Label,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub bar_height: f64,
    pub row_padding: f64,
    pub transition_delay_ms: f64,
    pub transition_duration_ms: f64,
    pub label_font_size: f64,
    pub label_gap: f64,
    pub tick_count: usize,
    pub tick_label_width: f64,
    pub tick_label_gap: f64,
    pub tick_label_font_size: f64,
    pub tooltip_offset_x: f64,
    pub tooltip_offset_y: f64,
    pub resize_debounce_ms: f64,
    pub empty_height: f64,
    pub row_keying: RowKeying,
    pub fast_text_metrics: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_height: 22.0,
            row_padding: 8.0,
            transition_delay_ms: 14.0,
            transition_duration_ms: 250.0,
            label_font_size: 16.0,
            label_gap: 12.0,
            tick_count: 10,
            tick_label_width: 32.0,
            tick_label_gap: 4.0,
            tick_label_font_size: 11.0,
            tooltip_offset_x: 10.0,
            tooltip_offset_y: -10.0,
            resize_debounce_ms: 150.0,
            empty_height: 200.0,
            row_keying: RowKeying::Index,
            fast_text_metrics: false,
        }
    }
}

impl ChartConfig {
    /// Height of one row slot: the bar plus padding above and below.
    pub fn row_height(&self) -> f64 {
        self.bar_height + self.row_padding * 2.0
    }

    /// Plot height for `rows` rows, or the placeholder height when empty.
    pub fn plot_height(&self, rows: usize) -> f64 {
        if rows == 0 {
            self.empty_height
        } else {
            rows as f64 * self.row_height()
        }
    }

    pub fn stagger(&self, index: usize) -> f64 {
        index as f64 * self.transition_delay_ms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub chart: ChartConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    label_color: Option<String>,
    tick_label_color: Option<String>,
    gridline_color: Option<String>,
    zero_line_color: Option<String>,
    tooltip_background: Option<String>,
    tooltip_text_color: Option<String>,
    background: Option<String>,
    positive_start: Option<String>,
    positive_end: Option<String>,
    negative_start: Option<String>,
    negative_end: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    chart: Option<ChartConfig>,
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "light" {
            config.theme = Theme::light();
        } else if theme_name == "dark" || theme_name == "default" {
            config.theme = Theme::dark();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        let overrides = [
            (vars.font_family, &mut theme.font_family),
            (vars.label_color, &mut theme.label_color),
            (vars.tick_label_color, &mut theme.tick_label_color),
            (vars.gridline_color, &mut theme.gridline_color),
            (vars.zero_line_color, &mut theme.zero_line_color),
            (vars.tooltip_background, &mut theme.tooltip_background),
            (vars.tooltip_text_color, &mut theme.tooltip_text_color),
            (vars.background, &mut theme.background),
            (vars.positive_start, &mut theme.positive_start),
            (vars.positive_end, &mut theme.positive_end),
            (vars.negative_start, &mut theme.negative_start),
            (vars.negative_end, &mut theme.negative_end),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    if let Some(chart) = parsed.chart {
        config.chart = chart;
    }
    if let Some(width) = parsed.width {
        config.render.width = width;
    }
    if let Some(height) = parsed.height {
        config.render.height = height;
    }
    Ok(config)
}
