use log::{debug, trace};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::commit::CommitResponse;
use crate::config::GithubConfig;
use crate::error::{Error, Result};
use crate::issue::{Comment, Listed, PullRequest, Review};
use crate::remote::{Quota, Remote};
use crate::repo::RepoId;

/// Items requested per page, the API maximum
const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    resources: Resources,
}

#[derive(Debug, Deserialize)]
struct Resources {
    core: Quota,
}

#[derive(Debug)]
pub struct Github {
    pub repo: RepoId,
    config: GithubConfig,
    client: Client,
}

impl Github {
    pub fn new(config: GithubConfig, repo: RepoId) -> Result<Self> {
        // NOTE: the API rejects requests without a user agent
        let client = Client::builder()
            .user_agent(concat!("ghmarks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            repo,
            config,
            client,
        })
    }

    fn send(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.config.api_url, path);
        trace!("request url={} query={:?}", &url, query);
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        Ok(response)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Ok(self.send(path, &[])?.error_for_status()?.json()?)
    }

    /// Fetch every page of a listing, stopping at the first short page
    fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let mut query: Vec<(&str, String)> = filter
                .iter()
                .map(|&(key, value)| (key, value.to_string()))
                .collect();
            query.push(("per_page", PER_PAGE.to_string()));
            query.push(("page", page.to_string()));

            let batch: Vec<T> = self.send(path, &query)?.error_for_status()?.json()?;
            let len = batch.len();
            debug!("{} page={} items={}", path, page, len);
            items.extend(batch);

            if len < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    fn repo_path(&self, rest: &str) -> String {
        format!("/repos/{}/{}{}", self.repo.owner, self.repo.name, rest)
    }
}

impl Remote for Github {
    fn quota(&self) -> Result<Quota> {
        let limits: RateLimitResponse = self.get("/rate_limit")?;
        Ok(limits.resources.core)
    }

    fn resolve(&self) -> Result<()> {
        let response = self.send(&self.repo_path(""), &[])?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(self.repo.to_string()));
        }
        response.error_for_status()?;
        Ok(())
    }

    fn commits(&self) -> Result<Vec<CommitResponse>> {
        self.get_all(&self.repo_path("/commits"), &[])
    }

    fn issues(&self) -> Result<Vec<Listed>> {
        self.get_all(&self.repo_path("/issues"), &[("state", "all")])
    }

    fn issue_comments(&self, number: u64) -> Result<Vec<Comment>> {
        let path = self.repo_path(&format!("/issues/{}/comments", number));
        self.get_all(&path, &[])
    }

    fn pulls(&self) -> Result<Vec<PullRequest>> {
        self.get_all(&self.repo_path("/pulls"), &[("state", "all")])
    }

    fn pull_reviews(&self, number: u64) -> Result<Vec<Review>> {
        let path = self.repo_path(&format!("/pulls/{}/reviews", number));
        self.get_all(&path, &[])
    }
}
