use pvn_chart::{RenderOptions, RowKeying, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PvnRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    width: Option<f64>,
    at_ms: Option<f64>,
    bar_height: Option<f64>,
    row_padding: Option<f64>,
    transition_delay_ms: Option<f64>,
    label_font_size: Option<f64>,
    key_by_label: Option<bool>,
}

fn build_render_options(options: PvnRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("light") {
        RenderOptions::light()
    } else {
        RenderOptions::dark()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(width) = options.width {
        render_options.width = width;
    }
    render_options.at_ms = options.at_ms;

    let chart = &mut render_options.chart;
    if let Some(bar_height) = options.bar_height {
        chart.bar_height = bar_height;
    }
    if let Some(row_padding) = options.row_padding {
        chart.row_padding = row_padding;
    }
    if let Some(delay) = options.transition_delay_ms {
        chart.transition_delay_ms = delay;
    }
    if let Some(size) = options.label_font_size {
        chart.label_font_size = size;
    }
    if options.key_by_label == Some(true) {
        chart.row_keying = RowKeying::Label;
    }
    // No system fonts inside the browser sandbox.
    chart.fast_text_metrics = true;

    render_options
}

#[wasm_bindgen]
pub fn render_pvn_svg(rows_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<PvnRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        PvnRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(rows_json, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
