use anyhow::Context;
use env_logger::Env;
use pq_plot::plot::parse_cli_task;
use pq_plot::{run, PlotConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let task = parse_cli_task();
    let cfg = PlotConfig::for_task(&task);
    if let Err(e) = run(&cfg) {
        let hint = if e.is_not_found() {
            format!(", expected a table at {}", cfg.input.display())
        } else {
            String::new()
        };
        return Err(e).with_context(|| format!("could not plot task {}{}", task, hint));
    }
    Ok(())
}
