use crate::config::{ChartConfig, RenderConfig};
use crate::ir::Partition;
use crate::text_metrics::label_width;
use crate::theme::Theme;
use crate::tooltip::TooltipLayer;
use crate::transition::{BarSnapshot, Snapshot, TextSnapshot};
use anyhow::Result;
use std::path::Path;

const PLACEHOLDER_TEXT: &str = "No Data";

/// Render one frame of the chart as a standalone SVG document.
///
/// The row label column sits to the left of the plot and is sized to the
/// widest label; tick labels hang below the plot.
pub fn render_svg(
    snapshot: &Snapshot,
    theme: &Theme,
    config: &ChartConfig,
    tooltip: Option<&TooltipLayer>,
) -> String {
    let label_column = label_column_width(&snapshot.labels, theme, config);
    let axis_height = config.tick_label_gap + config.tick_label_font_size + 4.0;
    let width = label_column + snapshot.width;
    let height = snapshot.height + axis_height;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if snapshot.is_empty() {
        svg.push_str(&format!(
            "<text class=\"placeholder\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            width / 2.0,
            snapshot.height / 2.0,
            escape_xml(&theme.font_family),
            config.label_font_size,
            theme.label_color,
            PLACEHOLDER_TEXT
        ));
        svg.push_str("</svg>");
        return svg;
    }

    svg.push_str("<g class=\"labels\">");
    for label in &snapshot.labels {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" opacity=\"{:.3}\">{}</text>",
            label_column - config.label_gap,
            label.style.top + label.style.height / 2.0,
            escape_xml(&theme.font_family),
            config.label_font_size,
            theme.label_color,
            label.style.opacity,
            escape_xml(&label.text)
        ));
    }
    svg.push_str("</g>");

    svg.push_str(&format!("<g class=\"pvnChart\" transform=\"translate({label_column:.2},0)\">"));

    svg.push_str("<g class=\"gridlines\">");
    for line in &snapshot.gridlines {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" opacity=\"{:.3}\"/>",
            line.left, line.top, line.width, line.height, theme.gridline_color, line.opacity
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"tickLabels\">");
    for tick in &snapshot.tick_labels {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"hanging\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" opacity=\"{:.3}\">{}</text>",
            tick.style.left + tick.style.width / 2.0,
            tick.style.top,
            escape_xml(&theme.font_family),
            config.tick_label_font_size,
            theme.tick_label_color,
            tick.style.opacity,
            escape_xml(&tick.text)
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"pvnRows\">");
    for row in &snapshot.rows {
        let class = if row.index.is_some() { "pvnRow" } else { "pvnRow exiting" };
        svg.push_str(&format!("<g class=\"{class}\" data-label=\"{}\">", escape_xml(&row.label)));
        for bar in &row.bars {
            svg.push_str(&bar_svg(bar, theme));
        }
        svg.push_str("</g>");
    }
    svg.push_str("</g>");

    svg.push_str(&format!(
        "<g class=\"zeroLine\"><line x1=\"{x:.2}\" y1=\"0\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/></g>",
        snapshot.height,
        theme.zero_line_color,
        x = snapshot.width / 2.0,
    ));

    if let Some(tooltip) = tooltip {
        svg.push_str(&format!(
            "<g class=\"tooltip\" transform=\"translate({:.2},{:.2})\" opacity=\"{}\">{}</g>",
            tooltip.left,
            tooltip.top,
            if tooltip.visible { 1 } else { 0 },
            tooltip.markup
        ));
    }

    svg.push_str("</g></svg>");
    svg
}

fn bar_svg(bar: &BarSnapshot, theme: &Theme) -> String {
    let fill = match (&bar.style.color, bar.partition) {
        (Some(color), _) => color.to_string(),
        (None, Partition::Positive) => theme.positive_end.clone(),
        (None, Partition::Negative) => theme.negative_end.clone(),
    };
    format!(
        "<rect class=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" opacity=\"{:.3}\"/>",
        bar.partition.class_name(),
        bar.style.left,
        bar.style.top,
        bar.style.width.max(0.0),
        bar.style.height.max(0.0),
        fill,
        bar.style.opacity
    )
}

fn label_column_width(labels: &[TextSnapshot], theme: &Theme, config: &ChartConfig) -> f64 {
    let widest = labels
        .iter()
        .map(|label| {
            label_width(
                &label.text,
                config.label_font_size,
                &theme.font_family,
                config.fast_text_metrics,
            )
        })
        .fold(0.0, f64::max);
    widest + config.label_gap * 2.0
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &Path,
    _render_cfg: &RenderConfig,
    _theme: &Theme,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
