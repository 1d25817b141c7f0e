pub mod github;

use serde::Deserialize;

use crate::commit::CommitResponse;
use crate::error::Result;
use crate::issue::{Comment, Listed, PullRequest, Review};

/// The API quota of the current credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Quota {
    pub limit: u64,
    pub remaining: u64,
}

/// Read access to the activity of one hosted repository
pub trait Remote {
    fn quota(&self) -> Result<Quota>;
    /// Fail if the repository does not exist or is not accessible
    fn resolve(&self) -> Result<()>;
    fn commits(&self) -> Result<Vec<CommitResponse>>;
    /// The issue listing, pull requests included
    fn issues(&self) -> Result<Vec<Listed>>;
    fn issue_comments(&self, number: u64) -> Result<Vec<Comment>>;
    fn pulls(&self) -> Result<Vec<PullRequest>>;
    fn pull_reviews(&self, number: u64) -> Result<Vec<Review>>;
}
