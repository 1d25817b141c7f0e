use serde::Deserialize;

use crate::issue::User;

#[derive(Debug, Deserialize)]
pub struct AuthorInfo {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Commit {
    pub author: Option<AuthorInfo>,
    pub message: String,
}

/// One entry of the commit listing
#[derive(Debug, Deserialize)]
pub struct CommitResponse {
    pub sha: String,
    pub commit: Commit,
    /// The linked platform account, missing when the commit email is not
    /// attached to any account
    pub author: Option<User>,
}

impl CommitResponse {
    /// The identity to group this commit under: the account login when
    /// there is one, the free-text commit author name otherwise
    pub fn identity(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|user| user.login.as_str())
            .or_else(|| self.commit.author.as_ref()?.name.as_deref())
    }

    pub fn message(&self) -> &str {
        &self.commit.message
    }
}
