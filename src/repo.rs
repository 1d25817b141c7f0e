use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A repository on the hosting platform, as `owner/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    /// The name of the account that owns the repository
    pub owner: String,
    /// The name of the repository
    pub name: String,
}

impl RepoId {
    /// Parse a repository from a full URL, an SSH remote or a bare `owner/name`
    pub fn parse(input: &str) -> Result<Self> {
        let url = input.trim();
        let invalid = || Error::InvalidRepo(input.to_string());

        let path = if url.starts_with("git@") {
            // It's an SSH URL
            url.rsplit(':').next().ok_or_else(invalid)?
        } else if let Some((_scheme, rest)) = url.split_once("://") {
            // It's an HTTP(s) URL, drop the host
            rest.split_once('/')
                .map(|(_host, path)| path)
                .ok_or_else(invalid)?
        } else {
            url
        };

        // Only the last two segments matter, the rest is host or prefix
        let mut parts = path.trim_end_matches('/').rsplit('/');
        let repo_name = parts.next().ok_or_else(invalid)?;
        let owner = parts.next().ok_or_else(invalid)?;

        // Trim the `.git` suffix, if it is there
        let repo_name = repo_name.strip_suffix(".git").unwrap_or(repo_name);

        if owner.is_empty() || repo_name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: repo_name.to_string(),
        })
    }

    /// Name usable in a file name: `owner-name`
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
