use serde::{Deserialize, Serialize};

/// A single signed value in a row. The sign picks the bar direction, the
/// magnitude its length and colour intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct DataPoint<T> {
    pub value: f64,
    #[serde(default)]
    pub raw_value: T,
}

impl<T> DataPoint<T> {
    pub fn new(value: f64, raw_value: T) -> Self {
        Self { value, raw_value }
    }
}

/// One horizontal lane of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Row<T> {
    pub label: String,
    pub data: Vec<DataPoint<T>>,
}

impl<T> Row<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: Vec::new(),
        }
    }

    pub fn with_point(mut self, value: f64, raw_value: T) -> Self {
        self.data.push(DataPoint::new(value, raw_value));
        self
    }
}

impl Row<()> {
    pub fn from_values(label: impl Into<String>, values: &[f64]) -> Self {
        Self {
            label: label.into(),
            data: values.iter().map(|&value| DataPoint::new(value, ())).collect(),
        }
    }
}

/// Which side of the zero line a bar is stacked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Positive,
    Negative,
}

impl Partition {
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Positive => "positiveBar",
            Self::Negative => "negativeBar",
        }
    }
}
