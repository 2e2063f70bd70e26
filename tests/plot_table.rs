use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use pq_plot::sample::{episode_lengths, write_len_table};
use pq_plot::{run, PlotConfig, PlotError, Scale, Series};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

fn write_table(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, arr)| Field::new(*name, arr.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let batch =
        RecordBatch::try_new(schema.clone(), columns.into_iter().map(|c| c.1).collect()).unwrap();
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

fn small_config(dir: &Path) -> PlotConfig {
    let mut cfg = PlotConfig::new(dir.join("t.parquet"), dir.join("t_plot.png"));
    // keep the canvas small, the layout is the same at any dpi
    cfg.dpi = 150;
    cfg
}

#[test]
fn powers_of_two_produce_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    write_table(
        &cfg.input,
        vec![("len", Arc::new(UInt64Array::from(vec![1u64, 2, 4, 8, 16])) as ArrayRef)],
    );

    let written = run(&cfg).unwrap();
    assert_eq!(written, cfg.output);
    assert!(std::fs::metadata(&cfg.output).unwrap().len() > 0);

    let img = image::open(&cfg.output).unwrap();
    // trimmed, so never larger than the 3.3x2.5 inch canvas
    assert!(img.width() > 0 && img.width() <= 495);
    assert!(img.height() > 0 && img.height() <= 375);
}

#[test]
fn only_the_requested_column_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.parquet");
    write_table(
        &path,
        vec![
            (
                "reward",
                Arc::new(StringArray::from(vec!["a", "b", "c"])) as ArrayRef,
            ),
            (
                "len",
                Arc::new(Int32Array::from(vec![Some(3), None, Some(5)])) as ArrayRef,
            ),
        ],
    );
    let s = Series::from_parquet(&path, "len").unwrap();
    assert_eq!(s.name(), "len");
    assert_eq!(s.len(), 3);
    assert_eq!(s.values()[0], 3.);
    assert!(s.values()[1].is_nan());
    assert_eq!(s.values()[2], 5.);
}

#[test]
fn missing_column_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    write_table(
        &cfg.input,
        vec![("length", Arc::new(Float64Array::from(vec![1., 2.])) as ArrayRef)],
    );
    match run(&cfg) {
        Err(PlotError::ColumnNotFound { column, .. }) => assert_eq!(column, "len"),
        other => panic!("expected ColumnNotFound, got {:?}", other),
    }
    assert!(!cfg.output.exists());
}

#[test]
fn missing_table_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    let err = run(&cfg).unwrap_err();
    assert!(err.is_not_found());
    assert!(!cfg.output.exists());
}

#[test]
fn text_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    write_table(
        &cfg.input,
        vec![("len", Arc::new(StringArray::from(vec!["1", "2"])) as ArrayRef)],
    );
    match run(&cfg) {
        Err(PlotError::NonNumericColumn { data_type, .. }) => {
            assert_eq!(data_type, DataType::Utf8)
        }
        other => panic!("expected NonNumericColumn, got {:?}", other),
    }
    assert!(!cfg.output.exists());
}

#[test]
fn unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = small_config(dir.path());
    cfg.output = dir.path().join("no_such_dir").join("t_plot.png");
    write_table(
        &cfg.input,
        vec![("len", Arc::new(UInt64Array::from(vec![3u64, 9])) as ArrayRef)],
    );
    match run(&cfg) {
        Err(PlotError::Image { path, .. }) => assert_eq!(path, cfg.output),
        other => panic!("expected Image error, got {:?}", other),
    }
}

#[test]
fn generated_sample_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line_world_mc.parquet");
    let lengths = episode_lengths(50, 3);
    write_len_table(&path, &lengths).unwrap();

    let s = Series::from_parquet(&path, "len").unwrap();
    let expected: Vec<f64> = lengths.iter().map(|&l| l as f64).collect();
    assert_eq!(s.values(), &expected[..]);
}

#[test]
fn linear_axes_and_labelled_legend() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = small_config(dir.path());
    cfg.y_scale = Scale::Linear;
    cfg.series_label = Some(String::from("MC e-greedy"));
    write_table(
        &cfg.input,
        vec![("len", Arc::new(Float64Array::from(vec![0., -1., 2.5, 7.])) as ArrayRef)],
    );
    run(&cfg).unwrap();
    assert!(image::open(&cfg.output).is_ok());
}

fn assert_png(path: &Path) -> (u32, u32) {
    assert!(std::fs::metadata(path).unwrap().len() > 0);
    let img = image::open(path).unwrap();
    assert!(img.width() > 0 && img.height() > 0);
    (img.width(), img.height())
}

#[test]
fn empty_column_still_saves_axes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    write_table(
        &cfg.input,
        vec![("len", Arc::new(UInt64Array::from(Vec::<u64>::new())) as ArrayRef)],
    );
    assert_eq!(run(&cfg).unwrap(), cfg.output);
    assert_png(&cfg.output);
}

#[test]
fn zeros_on_log_axis_still_save_axes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    write_table(
        &cfg.input,
        vec![("len", Arc::new(Float64Array::from(vec![0., 0.])) as ArrayRef)],
    );
    assert_eq!(run(&cfg).unwrap(), cfg.output);
    assert_png(&cfg.output);
}

#[test]
fn second_run_gives_a_valid_png_again() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    write_table(
        &cfg.input,
        vec![("len", Arc::new(UInt64Array::from(vec![1u64, 2, 4, 8, 16])) as ArrayRef)],
    );
    run(&cfg).unwrap();
    let first = assert_png(&cfg.output);
    run(&cfg).unwrap();
    let second = assert_png(&cfg.output);
    assert_eq!(first, second);
}

#[test]
fn default_dpi_fits_the_nature_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PlotConfig::new(dir.path().join("t.parquet"), dir.path().join("t_plot.png"));
    assert_eq!(cfg.dpi, 600);
    write_table(
        &cfg.input,
        vec![("len", Arc::new(UInt64Array::from(vec![1u64, 2, 4, 8, 16])) as ArrayRef)],
    );
    run(&cfg).unwrap();
    let (w, h) = assert_png(&cfg.output);
    assert!(w <= 1980 && h <= 1500);
    // the plot at 600 dpi is far larger than one at 150
    assert!(w > 495 && h > 375);
}
