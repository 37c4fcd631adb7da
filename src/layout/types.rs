use serde::Serialize;

use crate::ir::Partition;
use crate::theme::Rgb;

/// A bar after stacking: `start_value` is the running sum of the values
/// stacked before it in its partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBar<T> {
    pub value: f64,
    pub start_value: f64,
    pub raw_value: T,
}

impl<T> LayoutBar<T> {
    pub fn end_value(&self) -> f64 {
        self.start_value + self.value
    }

    pub fn partition(&self) -> Partition {
        Partition::of(self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRow<T> {
    pub label: String,
    pub ordered_positive: Vec<LayoutBar<T>>,
    pub ordered_negative: Vec<LayoutBar<T>>,
}

impl<T> LayoutRow<T> {
    pub fn positive_total(&self) -> f64 {
        self.ordered_positive.iter().map(|bar| bar.value).sum()
    }

    pub fn negative_total(&self) -> f64 {
        self.ordered_negative.iter().map(|bar| bar.value).sum()
    }

    /// The larger of the two stack extents, as a magnitude.
    pub fn total_extent(&self) -> f64 {
        self.positive_total().max(self.negative_total().abs())
    }

    pub fn bars(&self, partition: Partition) -> &[LayoutBar<T>] {
        match partition {
            Partition::Positive => &self.ordered_positive,
            Partition::Negative => &self.ordered_negative,
        }
    }
}

/// Everything derived from one set of input rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout<T> {
    pub rows: Vec<LayoutRow<T>>,
    /// Largest `|value|` over every point; drives colour normalisation.
    pub max_value: f64,
    /// Largest per-row stack extent; drives the shared scale domain.
    pub max_total: f64,
}

impl<T> ChartLayout<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn bar(&self, row: usize, partition: Partition, index: usize) -> Option<&LayoutBar<T>> {
        self.rows.get(row)?.bars(partition).get(index)
    }
}

impl<T> Default for ChartLayout<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            max_value: 0.0,
            max_total: 0.0,
        }
    }
}

/// Animatable visual properties of one element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Style {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    #[serde(skip)]
    pub color: Option<Rgb>,
}

impl Style {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && x >= self.left
            && x < self.left + self.width
            && y >= self.top
            && y < self.top + self.height
    }

    pub fn faded(self) -> Self {
        Self { opacity: 0.0, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarTarget {
    pub style: Style,
    pub value: f64,
    pub start_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowTarget {
    pub label: String,
    pub style: Style,
    pub positive: Vec<BarTarget>,
    pub negative: Vec<BarTarget>,
}

impl RowTarget {
    pub fn bars(&self, partition: Partition) -> &[BarTarget] {
        match partition {
            Partition::Positive => &self.positive,
            Partition::Negative => &self.negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextTarget {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickTarget {
    pub value: f64,
    pub gridline: Style,
    pub label: TextTarget,
}

/// Target geometry for every element of one render pass, plus the
/// entry points elements animate in from.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub width: f64,
    pub height: f64,
    pub rows: Vec<RowTarget>,
    pub labels: Vec<TextTarget>,
    pub ticks: Vec<TickTarget>,
    pub enter: EnterStyles,
}

impl FramePlan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnterStyles {
    pub row: Style,
    pub bar: Style,
    pub gridline: Style,
    pub tick_label: Style,
}
