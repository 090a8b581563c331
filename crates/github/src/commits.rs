//! Commit listing for one branch.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{BranchName, CommitRecord, CommitSha, CommitSource, RepositoryId, SourceError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// REST API root used when none is configured.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Number of commits requested when none is configured.
pub const DEFAULT_PER_PAGE: u8 = 20;

const USER_AGENT: &str = "version-release-scribe";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Where and how to list commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// API root, without trailing slash (e.g. `https://api.github.com`).
    pub api_base: String,
    /// Repository to read.
    pub repository: RepositoryId,
    /// Branch whose history is listed.
    pub branch: BranchName,
    /// Commits per request, 1..=100 (GitHub's page-size limit).
    pub per_page: u8,
    /// Personal access token; anonymous requests when `None`.
    pub token: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

// ---------------------------------------------------------------------------
// Wire format (subset of GET /repos/{owner}/{repo}/commits)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ApiCommit {
    sha: CommitSha,
    commit: ApiCommitDetail,
}

#[derive(Deserialize)]
struct ApiCommitDetail {
    message: Option<String>,
    author: Option<ApiSignature>,
}

#[derive(Deserialize)]
struct ApiSignature {
    name: Option<String>,
    date: Option<String>,
}

impl From<ApiCommit> for CommitRecord {
    fn from(api: ApiCommit) -> Self {
        let (author, date) = match api.commit.author {
            Some(sig) => (sig.name, sig.date),
            None => (None, None),
        };
        Self {
            sha: Some(api.sha.to_string()),
            message: api.commit.message,
            author,
            date,
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// [`CommitSource`] that lists a branch's recent commits from GitHub.
pub struct GithubCommitSource {
    http: Client,
    config: GithubConfig,
}

impl GithubCommitSource {
    /// Builds the source and its HTTP client.
    ///
    /// # Errors
    ///
    /// [`SourceError::Transport`] if the HTTP client cannot be constructed.
    pub fn new(config: GithubConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { http, config })
    }

    fn commits_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.config.api_base.trim_end_matches('/'),
            self.config.repository.owner(),
            self.config.repository.name()
        )
    }

    /// Fetches and flattens the commits.
    ///
    /// # Errors
    ///
    /// [`SourceError::Transport`], [`SourceError::Status`], or
    /// [`SourceError::InvalidResponse`].
    #[instrument(skip(self), fields(repository = %self.config.repository, branch = %self.config.branch))]
    pub async fn fetch_commits(&self) -> Result<Vec<CommitRecord>, SourceError> {
        let per_page = self.config.per_page.to_string();
        let mut req = self
            .http
            .get(self.commits_url())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .query(&[("sha", self.config.branch.as_str()), ("per_page", per_page.as_str())]);
        if let Some(token) = &self.config.token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }

        let response = req.send().await.map_err(|e| SourceError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| SourceError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let commits: Vec<ApiCommit> =
            serde_json::from_str(&text).map_err(|e| SourceError::InvalidResponse {
                message: e.to_string(),
            })?;
        debug!(commits = commits.len(), "Fetched commits");

        Ok(commits.into_iter().map(CommitRecord::from).collect())
    }
}

#[async_trait]
impl CommitSource for GithubCommitSource {
    async fn read_commits(&self) -> Result<String, SourceError> {
        let records = self.fetch_commits().await?;
        serde_json::to_string(&records).map_err(|e| SourceError::InvalidResponse {
            message: e.to_string(),
        })
    }
}
