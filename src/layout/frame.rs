use crate::config::ChartConfig;
use crate::format::format_tick;
use crate::theme::ColorMapper;

use super::scale::{Scale, make_scale};
use super::{
    BarTarget, ChartLayout, EnterStyles, FramePlan, LayoutBar, RowTarget, Style, TextTarget,
    TickTarget,
};

/// Entering rows start as a small sliver in the middle of the plot.
const ROW_ENTER_WIDTH: f64 = 200.0;
const ROW_ENTER_HEIGHT: f64 = 10.0;

/// Bars are placed on `[-maxTotal, maxTotal]` mapped onto the plot, so
/// the longest stack reaches the edge.
pub fn bar_scale<T>(layout: &ChartLayout<T>, width: f64) -> Scale {
    make_scale(layout.max_total, width)
}

/// The bar scale widened to round tick steps. Only gridlines and tick labels
/// use it.
pub fn tick_scale<T>(layout: &ChartLayout<T>, width: f64, config: &ChartConfig) -> Scale {
    bar_scale(layout, width).nice(config.tick_count)
}

/// Compute the target geometry of every row, bar, label and gridline for a
/// plot `width` pixels wide.
pub fn plan_frame<T>(
    layout: &ChartLayout<T>,
    width: f64,
    config: &ChartConfig,
    colors: &ColorMapper,
) -> FramePlan {
    let width = width.max(0.0);
    let height = config.plot_height(layout.rows.len());
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let row_height = config.row_height();

    let enter = EnterStyles {
        row: Style {
            left: center_x - ROW_ENTER_WIDTH / 2.0,
            top: center_y,
            width: ROW_ENTER_WIDTH,
            height: ROW_ENTER_HEIGHT,
            opacity: 0.0,
            color: None,
        },
        bar: Style {
            left: center_x,
            top: config.row_padding,
            width: 0.0,
            height: config.bar_height,
            opacity: 1.0,
            color: None,
        },
        gridline: Style {
            left: center_x,
            top: 0.0,
            width: 1.0,
            height,
            opacity: 1.0,
            color: None,
        },
        tick_label: Style {
            left: center_x - config.tick_label_width / 2.0,
            top: height + config.tick_label_gap,
            width: config.tick_label_width,
            height: config.tick_label_font_size,
            opacity: 1.0,
            color: None,
        },
    };

    if layout.is_empty() {
        return FramePlan {
            width,
            height,
            rows: Vec::new(),
            labels: Vec::new(),
            ticks: Vec::new(),
            enter,
        };
    }

    let scale = bar_scale(layout, width);
    let bar_target = |bar: &LayoutBar<T>| {
        let (left, bar_width) = scale.interval(bar.start_value, bar.end_value());
        BarTarget {
            style: Style {
                left,
                top: config.row_padding,
                width: bar_width,
                height: config.bar_height,
                opacity: 1.0,
                color: Some(colors.color_for(bar.value, layout.max_value)),
            },
            value: bar.value,
            start_value: bar.start_value,
        }
    };

    let rows = layout
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| RowTarget {
            label: row.label.clone(),
            style: Style {
                left: 0.0,
                top: idx as f64 * row_height,
                width,
                height: row_height,
                opacity: 1.0,
                color: None,
            },
            positive: row.ordered_positive.iter().map(&bar_target).collect(),
            negative: row.ordered_negative.iter().map(&bar_target).collect(),
        })
        .collect();

    let labels = layout
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| TextTarget {
            text: row.label.clone(),
            style: Style {
                left: 0.0,
                top: idx as f64 * row_height + row_height / 2.0 - config.label_font_size / 2.0,
                width: 0.0,
                height: config.label_font_size,
                opacity: 1.0,
                color: None,
            },
        })
        .collect();

    let ticks_on = tick_scale(layout, width, config);
    let ticks = ticks_on
        .ticks(config.tick_count)
        .into_iter()
        .map(|value| {
            let x = ticks_on.apply(value);
            TickTarget {
                value,
                gridline: Style {
                    left: x,
                    ..enter.gridline
                },
                label: TextTarget {
                    text: format_tick(value),
                    style: Style {
                        left: x - config.tick_label_width / 2.0,
                        ..enter.tick_label
                    },
                },
            }
        })
        .collect();

    FramePlan {
        width,
        height,
        rows,
        labels,
        ticks,
        enter,
    }
}
