pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod size;
pub mod text_metrics;
pub mod theme;
pub mod tooltip;
pub mod transition;

pub use chart::PvnChart;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ChartConfig, Config, RenderConfig, RowKeying, load_config};
pub use error::{ChartError, Result};
pub use ir::{DataPoint, Partition, Row};
pub use layout::{ChartLayout, FramePlan, compute_layout, plan_frame};
pub use parser::{JsonRows, parse_rows, parse_rows_as, validate_rows};
pub use render::render_svg;
pub use size::{ObserverSource, Size, SizeObserver};
pub use theme::{ColorMapper, Theme};
pub use tooltip::{HoverState, TooltipController, TooltipLayer};
pub use transition::{Scene, Snapshot};

/// Everything needed to render one static frame of the chart.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub chart: ChartConfig,
    /// Plot width in pixels, excluding the label column.
    pub width: f64,
    /// Frame-clock time to render, in ms after the rows were set. `None`
    /// renders the settled frame.
    pub at_ms: Option<f64>,
}

impl RenderOptions {
    pub fn dark() -> Self {
        Self {
            theme: Theme::dark(),
            chart: ChartConfig::default(),
            width: 960.0,
            at_ms: None,
        }
    }

    pub fn light() -> Self {
        Self {
            theme: Theme::light(),
            ..Self::dark()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::dark()
    }
}

/// Build a chart for `rows` at the requested width and advance it to the
/// requested frame. Returns the chart and the frame time it was advanced to.
pub fn build_chart<T: Clone + 'static>(
    rows: Vec<Row<T>>,
    options: &RenderOptions,
) -> Result<(PvnChart<T>, f64)> {
    let mut chart = PvnChart::new(options.chart.clone(), &options.theme)?;
    chart.resize(options.width, 0.0);
    chart.set_rows(rows, 0.0)?;
    let at = options.at_ms.unwrap_or_else(|| chart.settled_at()).max(0.0);
    chart.tick(at);
    Ok((chart, at))
}

/// Parse JSON5 rows and render one frame as SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let rows = parse_rows(input)?;
    let (chart, at) = build_chart(rows, &options)?;
    Ok(chart.render_svg(at, &options.theme))
}
