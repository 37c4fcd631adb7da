use crate::ir::{DataPoint, Row};

use super::{ChartLayout, LayoutBar, LayoutRow};

/// Partition a row into positive and negative stacks and assign each bar
/// its cumulative start offset.
///
/// Positives are ordered ascending; negatives are ordered nearest-to-zero
/// first. Zero counts as positive.
pub fn layout_row<T: Clone>(row: &Row<T>) -> LayoutRow<T> {
    let mut ordered: Vec<&DataPoint<T>> = row.data.iter().collect();
    ordered.sort_by(|a, b| a.value.total_cmp(&b.value));

    let (mut negatives, positives): (Vec<_>, Vec<_>) =
        ordered.into_iter().partition(|point| point.value < 0.0);
    negatives.reverse();

    LayoutRow {
        label: row.label.clone(),
        ordered_positive: stack(&positives),
        ordered_negative: stack(&negatives),
    }
}

fn stack<T: Clone>(points: &[&DataPoint<T>]) -> Vec<LayoutBar<T>> {
    let mut bars = Vec::with_capacity(points.len());
    points.iter().fold(0.0, |cumulative, point| {
        bars.push(LayoutBar {
            value: point.value,
            start_value: cumulative,
            raw_value: point.raw_value.clone(),
        });
        cumulative + point.value
    });
    bars
}

pub fn layout_rows<T: Clone>(rows: &[Row<T>]) -> Vec<LayoutRow<T>> {
    rows.iter().map(layout_row).collect()
}

/// Lay out every row and derive the global magnitudes for one render pass.
pub fn compute_layout<T: Clone>(rows: &[Row<T>]) -> ChartLayout<T> {
    let layout_rows = layout_rows(rows);
    let max_value = rows
        .iter()
        .flat_map(|row| row.data.iter())
        .map(|point| point.value.abs())
        .fold(0.0, f64::max);
    let max_total = layout_rows
        .iter()
        .map(LayoutRow::total_extent)
        .fold(0.0, f64::max);
    tracing::debug!(rows = layout_rows.len(), max_value, max_total, "computed row layout");
    ChartLayout {
        rows: layout_rows,
        max_value,
        max_total,
    }
}
