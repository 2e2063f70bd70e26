use anyhow::Context;
use env_logger::Env;
use pq_plot::plot::parse_cli;
use pq_plot::{run, PlotConfig, DEFAULT_TASK};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    parse_cli();
    let cfg = PlotConfig::for_task(DEFAULT_TASK);
    run(&cfg).with_context(|| format!("could not plot task {}", DEFAULT_TASK))?;
    Ok(())
}
