use serde::de::IgnoredAny;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    /// Missing for deleted accounts
    pub user: Option<User>,
}

impl Issue {
    pub fn owner(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

/// An entry of the issue listing, which also contains pull requests
#[derive(Debug, Deserialize)]
#[serde(from = "RawIssue")]
pub enum Listed {
    Issue(Issue),
    PullRequest(u64),
}

#[derive(Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    body: Option<String>,
    user: Option<User>,
    #[serde(default)]
    pull_request: Option<IgnoredAny>,
}

impl From<RawIssue> for Listed {
    fn from(raw: RawIssue) -> Self {
        if raw.pull_request.is_some() {
            return Listed::PullRequest(raw.number);
        }
        Listed::Issue(Issue {
            number: raw.number,
            title: raw.title,
            body: raw.body,
            user: raw.user,
        })
    }
}

impl Listed {
    pub fn into_issue(self) -> Option<Issue> {
        match self {
            Listed::Issue(issue) => Some(issue),
            Listed::PullRequest(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: Option<User>,
}

impl PullRequest {
    pub fn owner(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct Review {
    pub user: Option<User>,
}

/// Anything with an optional author, used for peer credits
pub trait Authored {
    fn author(&self) -> Option<&str>;
}

impl Authored for Comment {
    fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

impl Authored for Review {
    fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}
