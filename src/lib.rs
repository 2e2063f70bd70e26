use arrow::array::AsArray;
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use std::fs::File;
use std::path::{Path, PathBuf};
pub mod config;
pub mod error;
pub mod plot;
pub mod render;
pub mod sample;
pub mod theme;

pub use config::{task_paths, PlotConfig, Scale};
pub use error::PlotError;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DATA_DIR: &str = "data";
pub const FIGURE_DIR: &str = "figure";
pub const DEFAULT_TASK: &str = "line_world_mc";
pub const LEN_COLUMN: &str = "len";

/// One numeric column of a table; the position of each value is its episode index.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Series {
        Series {
            name: name.into(),
            values,
        }
    }

    /// Read a single column from a parquet file.
    /// Only that column is decoded; any numeric type is widened to f64 and nulls become NAN.
    pub fn from_parquet(fin: &Path, column: &str) -> Result<Series, PlotError> {
        let file = File::open(fin).map_err(|source| PlotError::Open {
            path: fin.to_path_buf(),
            source,
        })?;
        let parquet_err = |source| PlotError::Parquet {
            path: fin.to_path_buf(),
            source,
        };
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;

        let idx = builder
            .schema()
            .index_of(column)
            .map_err(|_| PlotError::ColumnNotFound {
                column: column.to_string(),
                path: fin.to_path_buf(),
            })?;
        let data_type = builder.schema().field(idx).data_type().clone();
        if !data_type.is_numeric() {
            return Err(PlotError::NonNumericColumn {
                column: column.to_string(),
                data_type,
            });
        }
        debug!("column '{}' has type {:?}", column, data_type);

        let mask = ProjectionMask::roots(builder.parquet_schema(), [idx]);
        let reader = builder
            .with_projection(mask)
            .build()
            .map_err(parquet_err)?;

        let mut values = Vec::new();
        for batch in reader {
            let batch = batch?;
            let floats = cast(batch.column(0), &DataType::Float64)?;
            let floats = floats.as_primitive::<Float64Type>();
            values.extend(floats.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        info!(
            "read {} values of '{}' from {}",
            values.len(),
            column,
            fin.display()
        );
        Ok(Series::new(column, values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (episode index, value) pairs in episode order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (i as f64, v))
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "episode,{}", self.name)?;
        for (i, v) in self.values.iter().enumerate() {
            writeln!(f, "{},{}", i, v)?;
        }
        Ok(())
    }
}

/// min and max of a slice, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut s_iter = s.iter();
    let (mut min, mut max) = match s_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in s_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// Load the configured column and render it; returns the path of the written figure.
/// Nothing is written when loading fails.
pub fn run(cfg: &PlotConfig) -> Result<PathBuf, PlotError> {
    info!(
        "read data from {} and plot to {}",
        cfg.input.display(),
        cfg.output.display()
    );
    let series = Series::from_parquet(&cfg.input, &cfg.column)?;
    log::trace!("{}", series);
    let theme = theme::Theme::from_styles(&cfg.styles[..])?;
    let img = render::render(&series, cfg, &theme)?;
    render::save_png(&img, &cfg.output)?;
    info!(
        "wrote {}x{} figure to {}",
        img.width(),
        img.height(),
        cfg.output.display()
    );
    Ok(cfg.output.clone())
}
