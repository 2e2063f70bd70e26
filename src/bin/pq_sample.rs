use anyhow::Context;
use env_logger::Env;
use pq_plot::sample::{episode_lengths, parse_cli, write_len_table};
use pq_plot::task_paths;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = parse_cli();
    let (table, _) = task_paths(&args.task);
    if let Some(dir) = table.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }
    let lengths = episode_lengths(args.episodes, args.seed);
    write_len_table(&table, &lengths)?;
    Ok(())
}
