use thiserror::Error;

pub type Error = GhmarksError;
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum GhmarksError {
    #[error("you must set the GITHUB_ACCESS_TOKEN, GH_TOKEN or GITHUB_TOKEN environment variable")]
    MissingToken,
    #[error("the access token was rejected by the API")]
    Unauthorized,
    #[error("repository not found or not accessible: {0}")]
    RepoNotFound(String),
    #[error("not a repository URL or owner/name pair: {0}")]
    InvalidRepo(String),

    // Batch task failures
    #[error("scraper exited with an error (code={0}): {1}")]
    ScraperFailed(i32, String),
    #[error("scraper stopped without status due to signal: {0}")]
    ScraperSignaled(String),
    #[error("failed to start scraper: {0}")]
    CommandFailure(String),

    #[error("IOError: {0}")]
    IOError(#[from] std::io::Error),

    #[error("failed to request API: {0}")]
    APIError(#[from] reqwest::Error),

    #[error("error: {0}")]
    InternalError(String),
}
