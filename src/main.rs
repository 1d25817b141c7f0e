use clap::Parser;
use env_logger::Env;

use ghmarks::config::{GithubConfig, DEFAULT_API_URL};
use ghmarks::remote::github::Github;
use ghmarks::repo::RepoId;
use ghmarks::scrape::scrape;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The repository to report on, as `owner/name` or a full URL
    repo: RepoId,

    /// Base URL of the REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Retrieve the token
    let config = GithubConfig::from_env(args.api_url)?;
    let remote = Github::new(config, args.repo.clone())?;

    let mut out = std::io::stdout().lock();
    scrape(&remote, &args.repo, &mut out)?;
    Ok(())
}
