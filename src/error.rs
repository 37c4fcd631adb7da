use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("row {row} ({label:?}) point {index}: value must be finite, got {value}")]
    InvalidValue {
        row: usize,
        label: String,
        index: usize,
        value: f64,
    },

    #[error("Invalid rows input: {0}")]
    Parse(#[from] json5::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid colour {0:?}")]
    Color(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
