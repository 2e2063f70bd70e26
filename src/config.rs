use super::{DATA_DIR, FIGURE_DIR, LEN_COLUMN};
use std::path::{Path, PathBuf};

/// Axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Log,
}

impl Scale {
    /// whether a coordinate can be placed on an axis with this scale
    pub fn accepts(self, v: f64) -> bool {
        match self {
            Scale::Linear => v.is_finite(),
            Scale::Log => v.is_finite() && v > 0.,
        }
    }
}

/// All the knobs of a single plot: where to read, where to write and how the axes look.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub column: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: Scale,
    pub y_scale: Scale,
    /// style presets, applied left to right
    pub styles: Vec<String>,
    pub dpi: u32,
    pub legend: bool,
    pub series_label: Option<String>,
}

impl PlotConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output: Q) -> PlotConfig {
        PlotConfig {
            input: input.into(),
            output: output.into(),
            column: String::from(LEN_COLUMN),
            x_label: String::from("Episode"),
            y_label: String::from("Length"),
            x_scale: Scale::Linear,
            y_scale: Scale::Log,
            styles: vec![String::from("science"), String::from("nature")],
            dpi: 600,
            legend: true,
            series_label: None,
        }
    }

    /// data/<task>.parquet -> figure/<task>_plot.png
    pub fn for_task(task: &str) -> PlotConfig {
        let (input, output) = task_paths(task);
        PlotConfig::new(input, output)
    }
}

/// Input table and output figure for a task, relative to the working directory.
pub fn task_paths(task: &str) -> (PathBuf, PathBuf) {
    task_paths_in(Path::new(DATA_DIR), Path::new(FIGURE_DIR), task)
}

pub fn task_paths_in(data_dir: &Path, figure_dir: &Path, task: &str) -> (PathBuf, PathBuf) {
    let input = data_dir.join(format!("{}.parquet", task));
    let output = figure_dir.join(format!("{}_plot.png", task));
    (input, output)
}
