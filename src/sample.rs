//! Demo tables shaped like the ones written by the training runs:
//! a single `len` column of u64 episode lengths.

use super::error::PlotError;
use super::{DEFAULT_TASK, LEN_COLUMN, VERSION};
use arrow::array::UInt64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::{value_t, App, Arg};
use log::info;
use parquet::arrow::ArrowWriter;
use std::ffi::OsString;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// shortest episode of the demo task
pub const MIN_LEN: u64 = 9;
const START_LEN: f64 = 400.;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleArgs {
    pub task: String,
    pub episodes: usize,
    pub seed: u64,
}

/// Takes the CLI arguments of the sample table generator.
pub fn parse_cli() -> SampleArgs {
    parse_cli_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

pub fn parse_cli_from<I, T>(args: I) -> Result<SampleArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_task = Arg::with_name("task")
        .help("task name, the table is written to data/<task>.parquet")
        .short("t")
        .long("task")
        .takes_value(true)
        .default_value(DEFAULT_TASK);
    let arg_episodes = Arg::with_name("episodes")
        .help("number of episodes (rows)")
        .short("n")
        .long("episodes")
        .takes_value(true)
        .default_value("200");
    let arg_seed = Arg::with_name("seed")
        .help("seed of the length jitter")
        .short("s")
        .long("seed")
        .takes_value(true)
        .default_value("42");
    let cli_args = App::new("pq_sample")
        .version(VERSION.unwrap_or("unknown"))
        .about("write a demo episode length table")
        .arg(arg_task)
        .arg(arg_episodes)
        .arg(arg_seed)
        .get_matches_from_safe(args)?;
    Ok(SampleArgs {
        task: String::from(cli_args.value_of("task").unwrap_or(DEFAULT_TASK)),
        episodes: value_t!(cli_args, "episodes", usize)?,
        seed: value_t!(cli_args, "seed", u64)?,
    })
}

/// splitmix64, enough for reproducible jitter
struct Jitter(u64);

impl Jitter {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Episode lengths that start long and settle on MIN_LEN as the agent improves.
pub fn episode_lengths(episodes: usize, seed: u64) -> Vec<u64> {
    let mut rng = Jitter(seed);
    let tau = (episodes as f64 / 8.).max(1.);
    (0..episodes)
        .map(|i| {
            let excess = (START_LEN - MIN_LEN as f64) * (-(i as f64) / tau).exp();
            let factor = 0.25 + 1.5 * rng.next_f64();
            MIN_LEN + (excess * factor).round() as u64
        })
        .collect()
}

/// Writes the lengths as a parquet table with a single non-nullable `len` column.
pub fn write_len_table(fout: &Path, lengths: &[u64]) -> Result<(), PlotError> {
    let schema = Arc::new(Schema::new(vec![Field::new(
        LEN_COLUMN,
        DataType::UInt64,
        false,
    )]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(UInt64Array::from(lengths.to_vec()))],
    )?;
    let file = File::create(fout).map_err(|source| PlotError::Create {
        path: fout.to_path_buf(),
        source,
    })?;
    let parquet_err = |source| PlotError::Parquet {
        path: fout.to_path_buf(),
        source,
    };
    let mut writer = ArrowWriter::try_new(file, schema, None).map_err(parquet_err)?;
    writer.write(&batch).map_err(parquet_err)?;
    writer.close().map_err(parquet_err)?;
    info!("wrote {} episodes to {}", lengths.len(), fout.display());
    Ok(())
}
