use std::fs;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use ghmarks::batch::{self, ProcessRunner, GITHUB_REPOS, MAX_WORKERS, OUTPUT_DIR};

/// Scrape many repositories at once, one report file per repository
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Repository URLs, in marking order. Defaults to the built-in list
    repos: Vec<String>,

    /// Number of scrapes running at the same time
    #[arg(short, long, default_value_t = MAX_WORKERS)]
    workers: usize,

    /// Directory receiving the report files
    #[arg(short, long, default_value = OUTPUT_DIR)]
    output_dir: PathBuf,

    /// The scraper executable. Defaults to the `ghmarks` next to this one
    #[arg(long)]
    scraper: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let urls: Vec<String> = if args.repos.is_empty() {
        GITHUB_REPOS.iter().map(|url| url.to_string()).collect()
    } else {
        args.repos
    };

    let runner = match args.scraper {
        Some(program) => ProcessRunner::new(program),
        None => ProcessRunner::sibling()?,
    };

    fs::create_dir_all(&args.output_dir)?;
    let tasks = batch::plan(&urls, &args.output_dir)?;
    let total = tasks.len();

    let outcomes = batch::run_all(tasks, &runner, args.workers);
    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    info!("{}/{} repositories scraped", ok, total);

    if ok < total {
        anyhow::bail!("{} scrapes failed", total - ok);
    }
    Ok(())
}
