use crate::config::ChartConfig;
use crate::ir::Partition;
use crate::layout::{BarTarget, ChartLayout, FramePlan, bar_scale, tick_scale};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub max_value: f64,
    pub max_total: f64,
    pub domain: [f64; 2],
    pub tick_domain: [f64; 2],
    pub rows: Vec<RowDump>,
    pub ticks: Vec<TickDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDump {
    pub label: String,
    pub top: f64,
    pub height: f64,
    pub label_top: f64,
    pub bars: Vec<BarDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDump {
    pub partition: Partition,
    pub value: f64,
    pub start_value: f64,
    pub end_value: f64,
    pub left: f64,
    pub width: f64,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickDump {
    pub value: f64,
    pub x: f64,
    pub label: String,
}

impl LayoutDump {
    pub fn from_plan<T>(layout: &ChartLayout<T>, plan: &FramePlan, config: &ChartConfig) -> Self {
        let (d0, d1) = bar_scale(layout, plan.width).domain();
        let (t0, t1) = tick_scale(layout, plan.width, config).domain();
        let bar_dump = |partition: Partition, bar: &BarTarget| BarDump {
            partition,
            value: bar.value,
            start_value: bar.start_value,
            end_value: bar.start_value + bar.value,
            left: bar.style.left,
            width: bar.style.width,
            color: bar.style.color.map(|color| color.to_string()),
        };

        let rows = plan
            .rows
            .iter()
            .zip(&plan.labels)
            .map(|(row, label)| RowDump {
                label: row.label.clone(),
                top: row.style.top,
                height: row.style.height,
                label_top: label.style.top,
                bars: row
                    .negative
                    .iter()
                    .map(|bar| bar_dump(Partition::Negative, bar))
                    .chain(row.positive.iter().map(|bar| bar_dump(Partition::Positive, bar)))
                    .collect(),
            })
            .collect();

        let ticks = plan
            .ticks
            .iter()
            .map(|tick| TickDump {
                value: tick.value,
                x: tick.gridline.left,
                label: tick.label.text.clone(),
            })
            .collect();

        LayoutDump {
            width: plan.width,
            height: plan.height,
            max_value: layout.max_value,
            max_total: layout.max_total,
            domain: [d0, d1],
            tick_domain: [t0, t1],
            rows,
            ticks,
        }
    }
}

pub fn write_layout_dump<T>(
    path: &Path,
    layout: &ChartLayout<T>,
    plan: &FramePlan,
    config: &ChartConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_plan(layout, plan, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
