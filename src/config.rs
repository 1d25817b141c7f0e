use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variables searched for the access token, in order
pub const TOKEN_VARS: [&str; 3] = ["GITHUB_ACCESS_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

/// Everything the API client needs to talk to the platform
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: String,
}

impl GithubConfig {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Build the configuration with the token taken from the environment
    pub fn from_env(api_url: impl Into<String>) -> Result<Self> {
        let token = token_from(|var| std::env::var(var).ok())?;
        Ok(Self::new(api_url, token))
    }
}

fn token_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|token| !token.trim().is_empty())
        .ok_or(Error::MissingToken)
}
