use super::VERSION;
use clap::{App, Arg};
use std::ffi::OsString;

fn base_app(name: &str) -> App<'static, 'static> {
    App::new(name)
        .version(VERSION.unwrap_or("unknown"))
        .about("plot the episode length column of a parquet table to a png figure")
}

/// CLI of the fixed plot: no options besides help and version.
pub fn parse_cli() {
    base_app("pq_plot").get_matches();
}

/// Takes the task name that selects data/<task>.parquet and figure/<task>_plot.png.
pub fn parse_cli_task() -> String {
    parse_cli_task_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

pub fn parse_cli_task_from<I, T>(args: I) -> Result<String, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_task = Arg::with_name("task")
        .help("task name, read from data/<task>.parquet and plot to figure/<task>_plot.png")
        .short("t")
        .long("task")
        .takes_value(true)
        .required(true);
    let cli_args = base_app("pq_plot_task")
        .arg(arg_task)
        .get_matches_from_safe(args)?;
    Ok(String::from(cli_args.value_of("task").unwrap_or_default()))
}
