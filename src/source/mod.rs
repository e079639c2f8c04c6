//! Read-only access to the remote source-control / CI system
//!
//! The gate never talks to the network directly. Everything it needs goes
//! through the [DataSource] trait so the decision logic can run against the
//! real GitLab API or an in-memory fake.
//!
//! - [gitlab::GitLabClient]: GitLab REST v4 over blocking HTTP
//! - [mock::MockDataSource]: in-memory fake for tests

pub mod gitlab;
pub mod mock;

pub use gitlab::{GitLabClient, GitLabSettings};
pub use mock::MockDataSource;

use crate::domain::{PipelineFilter, PipelineRun, Tag};
use crate::error::Result;

/// Query capabilities the gate needs from the remote system
///
/// Every call is a pure read. Implementations must map transport,
/// authorization and rate-limit failures to
/// [crate::error::GateError::DataSource] rather than returning empty results,
/// so "nothing found" stays distinguishable from "could not ask".
pub trait DataSource: Send + Sync {
    /// List tags of a project, optionally narrowed by a substring search
    ///
    /// The search is only a server-side hint; callers still match names exactly.
    fn list_tags(&self, project_id: &str, search: Option<&str>) -> Result<Vec<Tag>>;

    /// Resolve the commit a tag points to
    fn tag_commit(&self, project_id: &str, tag_name: &str) -> Result<String>;

    /// List pipeline runs matching the filter
    fn list_pipelines(&self, project_id: &str, filter: &PipelineFilter) -> Result<Vec<PipelineRun>>;

    /// List commit ids reachable from a branch
    fn list_commits(&self, project_id: &str, branch: &str) -> Result<Vec<String>>;

    /// Whether `commit_id` is part of `branch`'s history
    ///
    /// The default scans [DataSource::list_commits]; remote sources should
    /// override it with a lookup that does not download the whole history.
    fn branch_contains(&self, project_id: &str, branch: &str, commit_id: &str) -> Result<bool> {
        let commits = self.list_commits(project_id, branch)?;
        Ok(commits.iter().any(|c| c == commit_id))
    }
}
