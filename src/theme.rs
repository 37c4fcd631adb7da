use crate::error::{ChartError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex regex"));
static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("valid rgb regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub label_color: String,
    pub tick_label_color: String,
    pub gridline_color: String,
    pub zero_line_color: String,
    pub tooltip_background: String,
    pub tooltip_text_color: String,
    pub background: String,
    pub positive_start: String,
    pub positive_end: String,
    pub negative_start: String,
    pub negative_end: String,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            label_color: "#E6E6E6".to_string(),
            tick_label_color: "#9A9A9A".to_string(),
            gridline_color: "#3A3A3A".to_string(),
            zero_line_color: "#BBBBBB".to_string(),
            tooltip_background: "#222222".to_string(),
            tooltip_text_color: "#FFFFFF".to_string(),
            background: "#141414".to_string(),
            positive_start: "#003002".to_string(),
            positive_end: "#09E810".to_string(),
            negative_start: "#650000".to_string(),
            negative_end: "#FF4A4A".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            label_color: "#1C2430".to_string(),
            tick_label_color: "#5A6475".to_string(),
            gridline_color: "#E1E6EE".to_string(),
            zero_line_color: "#7A8AA6".to_string(),
            tooltip_background: "#FFFFFF".to_string(),
            tooltip_text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            ..Self::dark()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rgb`, `#rrggbb` and `rgb(r, g, b)`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Some(caps) = HEX_COLOR.captures(trimmed) {
            let hex = &caps[1];
            let channel = |s: &str| {
                u8::from_str_radix(s, 16).map_err(|_| ChartError::Color(input.to_string()))
            };
            return if hex.len() == 3 {
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            } else {
                Ok(Self::new(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                ))
            };
        }
        if let Some(caps) = RGB_COLOR.captures(trimmed) {
            let channel = |i: usize| {
                caps[i]
                    .parse::<u16>()
                    .ok()
                    .filter(|v| *v <= 255)
                    .map(|v| v as u8)
                    .ok_or_else(|| ChartError::Color(input.to_string()))
            };
            return Ok(Self::new(channel(1)?, channel(2)?, channel(3)?));
        }
        Err(ChartError::Color(input.to_string()))
    }

    /// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| {
            (a as f64 + (b as f64 - a as f64) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub dark: Rgb,
    pub bright: Rgb,
}

impl Gradient {
    pub fn at(&self, t: f64) -> Rgb {
        self.dark.lerp(self.bright, t)
    }
}

/// Maps a bar's magnitude, relative to the largest magnitude in the chart,
/// onto the positive or negative gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMapper {
    pub positive: Gradient,
    pub negative: Gradient,
}

impl ColorMapper {
    pub fn from_theme(theme: &Theme) -> Result<Self> {
        Ok(Self {
            positive: Gradient {
                dark: Rgb::parse(&theme.positive_start)?,
                bright: Rgb::parse(&theme.positive_end)?,
            },
            negative: Gradient {
                dark: Rgb::parse(&theme.negative_start)?,
                bright: Rgb::parse(&theme.negative_end)?,
            },
        })
    }

    pub fn color_for(&self, value: f64, max_value: f64) -> Rgb {
        let percent = if max_value > 0.0 { value.abs() / max_value } else { 0.0 };
        if value < 0.0 {
            self.negative.at(percent)
        } else {
            self.positive.at(percent)
        }
    }
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self {
            positive: Gradient {
                dark: Rgb::new(0x00, 0x30, 0x02),
                bright: Rgb::new(0x09, 0xE8, 0x10),
            },
            negative: Gradient {
                dark: Rgb::new(0x65, 0x00, 0x00),
                bright: Rgb::new(0xFF, 0x4A, 0x4A),
            },
        }
    }
}
