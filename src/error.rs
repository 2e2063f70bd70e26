use arrow::datatypes::DataType;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between opening the table and writing the figure.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not read parquet file {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        source: parquet::errors::ParquetError,
    },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("column '{column}' not found in {}", path.display())]
    ColumnNotFound { column: String, path: PathBuf },

    #[error("column '{column}' has non-numeric type {data_type:?}")]
    NonNumericColumn { column: String, data_type: DataType },

    #[error("unknown style preset '{0}'")]
    UnknownStyle(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("could not write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl PlotError {
    /// true when the input table itself is absent, as opposed to malformed
    pub fn is_not_found(&self) -> bool {
        match self {
            PlotError::Open { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
