use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{PipelineFilter, PipelineRun, Tag};
use crate::error::{GateError, Result};
use crate::source::DataSource;

/// Connection settings for a GitLab instance
#[derive(Debug, Clone)]
pub struct GitLabSettings {
    /// Instance root, e.g. `https://gitlab.example.com`
    pub url: String,
    pub token: String,
    pub verify_tls: bool,
    pub timeout: Duration,
    /// Page size for list endpoints (GitLab caps it at 100)
    pub per_page: u32,
}

/// GitLab REST v4 implementation of [DataSource]
pub struct GitLabClient {
    http: Client,
    base: Url,
    token: String,
    per_page: u32,
}

#[derive(Deserialize)]
struct TagDto {
    name: String,
    commit: CommitDto,
}

#[derive(Deserialize)]
struct CommitDto {
    id: String,
}

#[derive(Deserialize)]
struct RefDto {
    name: String,
}

#[derive(Deserialize)]
struct PipelineDto {
    status: String,
    #[serde(rename = "ref")]
    ref_name: String,
    sha: String,
}

impl From<TagDto> for Tag {
    fn from(dto: TagDto) -> Self {
        Tag::new(dto.name, dto.commit.id)
    }
}

impl From<PipelineDto> for PipelineRun {
    fn from(dto: PipelineDto) -> Self {
        PipelineRun::new(dto.status, dto.ref_name, dto.sha)
    }
}

impl GitLabClient {
    /// Build a client; no request is made until the first query
    pub fn new(settings: GitLabSettings) -> Result<Self> {
        let base = Url::parse(&settings.url)
            .map_err(|e| GateError::config(format!("Invalid GitLab URL '{}': {}", settings.url, e)))?;
        if base.cannot_be_a_base() {
            return Err(GateError::config(format!(
                "GitLab URL '{}' cannot be used as a base URL",
                settings.url
            )));
        }

        let http = Client::builder()
            .user_agent(concat!("tag-gate/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()?;

        Ok(GitLabClient {
            http,
            base,
            token: settings.token,
            per_page: settings.per_page,
        })
    }

    /// `{base}/api/v4/projects/{project}/{rest..}` with every segment percent-encoded
    ///
    /// The project id may be a numeric id or a `group/name` path; its slash is encoded.
    fn endpoint(&self, project_id: &str, rest: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v4", "projects", project_id])
                .extend(rest);
        }
        url
    }

    fn send(&self, url: Url) -> Result<Response> {
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(url.clone())
            .header("PRIVATE-TOKEN", &self.token)
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(fault_for_status(status, url.path()))
        }
    }

    /// Fetch every page of a list endpoint, following `X-Next-Page`
    fn get_all<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("per_page", &self.per_page.to_string())
                .append_pair("page", &page.to_string());

            let response = self.send(page_url)?;
            let next = next_page(
                response
                    .headers()
                    .get("x-next-page")
                    .and_then(|v| v.to_str().ok()),
            );
            let batch: Vec<T> = response.json()?;
            debug!(page, count = batch.len(), "received page");
            items.extend(batch);

            match next {
                Some(n) if n > page => page = n,
                _ => break,
            }
        }

        Ok(items)
    }
}

/// Parse the `X-Next-Page` header; empty or absent means last page
fn next_page(header: Option<&str>) -> Option<u32> {
    header.map(str::trim).filter(|v| !v.is_empty())?.parse().ok()
}

/// Map a non-success HTTP status to a data source fault
fn fault_for_status(status: StatusCode, path: &str) -> GateError {
    let detail = match status.as_u16() {
        401 | 403 => "authorization failed",
        404 => "resource not found",
        429 => "rate limited",
        500..=599 => "server error",
        _ => "unexpected response",
    };
    GateError::data_source(format!("{} (HTTP {}) for {}", detail, status.as_u16(), path))
}

impl DataSource for GitLabClient {
    fn list_tags(&self, project_id: &str, search: Option<&str>) -> Result<Vec<Tag>> {
        let mut url = self.endpoint(project_id, &["repository", "tags"]);
        if let Some(search) = search {
            url.query_pairs_mut().append_pair("search", search);
        }
        let tags: Vec<TagDto> = self.get_all(url)?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }

    fn tag_commit(&self, project_id: &str, tag_name: &str) -> Result<String> {
        let url = self.endpoint(project_id, &["repository", "tags", tag_name]);
        let tag: TagDto = self.send(url)?.json()?;
        Ok(tag.commit.id)
    }

    fn list_pipelines(&self, project_id: &str, filter: &PipelineFilter) -> Result<Vec<PipelineRun>> {
        let mut url = self.endpoint(project_id, &["pipelines"]);
        {
            let mut query = url.query_pairs_mut();
            if let Some(sha) = &filter.commit_id {
                query.append_pair("sha", sha);
            }
            if let Some(ref_name) = &filter.ref_name {
                query.append_pair("ref", ref_name);
            }
        }
        let runs: Vec<PipelineDto> = self.get_all(url)?;
        Ok(runs.into_iter().map(PipelineRun::from).collect())
    }

    fn list_commits(&self, project_id: &str, branch: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint(project_id, &["repository", "commits"]);
        url.query_pairs_mut().append_pair("ref_name", branch);
        let commits: Vec<CommitDto> = self.get_all(url)?;
        Ok(commits.into_iter().map(|c| c.id).collect())
    }

    /// Asks for the branches containing the commit instead of walking the branch history
    fn branch_contains(&self, project_id: &str, branch: &str, commit_id: &str) -> Result<bool> {
        let mut url = self.endpoint(project_id, &["repository", "commits", commit_id, "refs"]);
        url.query_pairs_mut().append_pair("type", "branch");
        let refs: Vec<RefDto> = self.get_all(url)?;
        Ok(refs.iter().any(|r| r.name == branch))
    }
}
